use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use jiff::civil::DateTime;
use serde::Serialize;
use skyfreight_optimizer::{
    ledger::warehouse::{BatchKind, Warehouse},
    problem::network::FreightNetwork,
    solver::{
        evaluator::SolutionMetrics,
        solution::{Route, ShortfallReason, Solution},
    },
};

/// The plan as written to `--output`, with airports and orders named instead of indexed.
#[derive(Serialize)]
pub struct PlanReport<'a> {
    metrics: &'a SolutionMetrics,
    on_time_rate: f64,
    routes: Vec<RouteReport<'a>>,
    shortfalls: Vec<ShortfallReport<'a>>,
}

#[derive(Serialize)]
struct RouteReport<'a> {
    client: &'a str,
    destination: &'a str,
    hub: &'a str,
    quantity: u32,
    meets_deadline: bool,
    legs: Vec<LegReport<'a>>,
}

#[derive(Serialize)]
struct LegReport<'a> {
    origin: &'a str,
    destination: &'a str,
    departure: DateTime,
    arrival: DateTime,
}

#[derive(Serialize)]
struct ShortfallReport<'a> {
    client: &'a str,
    destination: &'a str,
    requested: u32,
    missing: u32,
    reason: ShortfallReason,
}

impl<'a> PlanReport<'a> {
    pub fn new(network: &'a FreightNetwork, solution: &'a Solution) -> Self {
        PlanReport {
            metrics: solution.metrics(),
            on_time_rate: solution.metrics().on_time_rate(),
            routes: solution
                .routes()
                .iter()
                .map(|route| RouteReport::new(network, route))
                .collect(),
            shortfalls: solution
                .shortfalls()
                .iter()
                .map(|shortfall| {
                    let order = network.order(shortfall.order);
                    ShortfallReport {
                        client: order.client_id(),
                        destination: order.destination(),
                        requested: order.quantity(),
                        missing: shortfall.missing,
                        reason: shortfall.reason,
                    }
                })
                .collect(),
        }
    }
}

impl<'a> RouteReport<'a> {
    fn new(network: &'a FreightNetwork, route: &Route) -> Self {
        let order = network.order(route.order());
        RouteReport {
            client: order.client_id(),
            destination: order.destination(),
            hub: network.airport(route.hub()).code(),
            quantity: route.quantity(),
            meets_deadline: route.meets_deadline(),
            legs: route
                .legs()
                .iter()
                .map(|&flight_id| {
                    let flight = network.flight(flight_id);
                    LegReport {
                        origin: network.airport(flight.origin()).code(),
                        destination: network.airport(flight.destination()).code(),
                        departure: flight.departure(),
                        arrival: flight.arrival(),
                    }
                })
                .collect(),
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn format_time(time: DateTime) -> String {
    time.strftime("day %d %H:%M").to_string()
}

pub fn summary_table(solution: &Solution) -> Table {
    let metrics = solution.metrics();
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Orders".to_string(), metrics.total_orders.to_string()]);
    table.add_row(vec![
        "On time".to_string(),
        format!(
            "{} ({:.1}%)",
            metrics.on_time_orders,
            metrics.on_time_rate() * 100.0
        ),
    ]);
    table.add_row(vec!["Routes".to_string(), metrics.route_count.to_string()]);
    table.add_row(vec![
        "Flight violations".to_string(),
        metrics.flight_violations.to_string(),
    ]);
    table.add_row(vec![
        "Warehouse violations".to_string(),
        metrics.warehouse_violations.to_string(),
    ]);
    table.add_row(vec![
        "Short orders".to_string(),
        solution.shortfalls().len().to_string(),
    ]);
    table.add_row(vec!["Fitness".to_string(), format!("{:.2}", metrics.fitness)]);
    table
}

pub fn routes_table(network: &FreightNetwork, solution: &Solution) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Client",
        "Hub",
        "Destination",
        "Quantity",
        "Itinerary",
        "On time",
    ]);

    for route in solution.routes() {
        let report = RouteReport::new(network, route);
        let itinerary = report
            .legs
            .iter()
            .map(|leg| {
                format!(
                    "{} {} → {} {}",
                    leg.origin,
                    format_time(leg.departure),
                    leg.destination,
                    format_time(leg.arrival)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            report.client.to_string(),
            report.hub.to_string(),
            report.destination.to_string(),
            report.quantity.to_string(),
            itinerary,
            if report.meets_deadline { "yes" } else { "no" }.to_string(),
        ]);
    }

    table
}

pub fn shortfalls_table(network: &FreightNetwork, solution: &Solution) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Client", "Destination", "Requested", "Missing", "Reason"]);

    for shortfall in solution.shortfalls() {
        let order = network.order(shortfall.order);
        table.add_row(vec![
            order.client_id().to_string(),
            order.destination().to_string(),
            order.quantity().to_string(),
            shortfall.missing.to_string(),
            format!("{:?}", shortfall.reason),
        ]);
    }

    table
}

/// Batches present in `warehouse` at `moment`.
pub fn snapshot_table(network: &FreightNetwork, warehouse: &Warehouse, moment: DateTime) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Client", "Quantity", "Arrived", "Leaves", "Status"]);

    for batch in warehouse.batches_present_at(moment) {
        let status = match batch.kind() {
            BatchKind::Transit { onward, .. } => {
                let flight = network.flight(onward);
                format!(
                    "transit to {}",
                    network.airport(flight.destination()).code()
                )
            }
            BatchKind::FinalDestination => "final destination".to_string(),
        };

        table.add_row(vec![
            network.order(batch.order()).client_id().to_string(),
            batch.quantity().to_string(),
            format_time(batch.arrival()),
            format_time(batch.dwell_end()),
            status,
        ]);
    }

    table
}
