use skyfreight_optimizer::solver::solver_params::Threads;

/// Accepts `auto` or a thread count. `1` means single threaded.
pub fn parse_threads(input: &str) -> Result<Threads, String> {
    if input.eq_ignore_ascii_case("auto") {
        return Ok(Threads::Auto);
    }

    match input.parse::<usize>() {
        Ok(0) => Err(String::from("Thread count must be at least 1")),
        Ok(1) => Ok(Threads::Single),
        Ok(threads) => Ok(Threads::Multi(threads)),
        Err(_) => Err(format!("Invalid thread count `{input}`, expected a number or `auto`")),
    }
}

pub fn parse_alpha(input: &str) -> Result<f64, String> {
    let alpha = input
        .parse::<f64>()
        .map_err(|_| format!("Invalid alpha `{input}`"))?;

    if !(0.0..=1.0).contains(&alpha) {
        return Err(String::from("Alpha must be between 0 and 1"));
    }

    Ok(alpha)
}

pub fn parse_rcl_size(input: &str) -> Result<usize, String> {
    match input.parse::<usize>() {
        Ok(0) => Err(String::from("The candidate list needs at least one entry")),
        Ok(size) => Ok(size),
        Err(_) => Err(format!("Invalid candidate list size `{input}`")),
    }
}
