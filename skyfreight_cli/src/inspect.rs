use anyhow::{Context, anyhow};
use clap::Args;
use skyfreight_optimizer::problem::planning_week::{self, DAYS_IN_WEEK};

use crate::{
    dataset::DatasetArgs,
    plan::{self, SolverArgs},
    report,
};

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Airport whose warehouse is shown
    #[arg(long)]
    pub airport: String,

    /// Day of the planning week, in the airport's local time
    #[arg(long, value_parser = clap::value_parser!(i8).range(1..=DAYS_IN_WEEK as i64))]
    pub day: i8,

    #[arg(long, value_parser = clap::value_parser!(i8).range(0..24))]
    pub hour: i8,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i8).range(0..60))]
    pub minute: i8,
}

pub fn run(args: InspectArgs) -> Result<(), anyhow::Error> {
    let (network, solution) = plan::load_and_plan(&args.dataset, &args.solver)?;

    let airport_id = network
        .airport_id(&args.airport)
        .ok_or_else(|| anyhow!("Unknown airport {}", args.airport))?;
    let moment = planning_week::local_datetime(args.day, args.hour, args.minute)
        .context("Invalid instant")?;
    let warehouse = solution.ledger().warehouse(airport_id);

    println!("{}", report::summary_table(&solution));
    println!(
        "{} at {}: {} of {} units stored",
        args.airport,
        moment,
        warehouse.occupancy_at(moment),
        warehouse.capacity()
    );
    println!("{}", report::snapshot_table(&network, warehouse, moment));

    Ok(())
}
