use rand::rngs::SmallRng;
use rayon::prelude::*;
use tracing::{Level, debug, instrument, warn};

use crate::{
    ledger::capacity_ledger::CapacityLedger,
    problem::{
        airport::AirportIdx,
        network::FreightNetwork,
        order::{Order, OrderIdx},
    },
    solver::{
        candidate::{HubCandidate, RestrictedCandidateList},
        deadline,
        route_search::RouteSearch,
        solution::{OrderShortfall, Route, ShortfallReason, Solution},
        solver_params::SolverParams,
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// Greedy randomized construction: orders are served one after the other, each from a random
/// pick among the best hub itineraries still available.
pub struct Grasp<'a> {
    network: &'a FreightNetwork,
    params: &'a SolverParams,
    search_pool: Option<&'a rayon::ThreadPool>,
}

impl<'a> Grasp<'a> {
    pub fn new(network: &'a FreightNetwork, params: &'a SolverParams) -> Self {
        Grasp {
            network,
            params,
            search_pool: None,
        }
    }

    /// Runs the per-hub searches of each attempt on `pool`.
    pub fn with_search_pool(mut self, pool: &'a rayon::ThreadPool) -> Self {
        self.search_pool = Some(pool);
        self
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn run(&self, mut ledger: CapacityLedger, rng: &mut SmallRng) -> Solution {
        let mut routes = Vec::new();
        let mut shortfalls = Vec::new();

        for (order_id, order) in self.network.orders().iter().enumerate_idx() {
            if let Some(shortfall) = self.serve_order(&mut ledger, &mut routes, order_id, order, rng)
            {
                shortfalls.push(shortfall);
            }
        }

        Solution::new(
            self.network,
            routes,
            shortfalls,
            ledger,
            self.params.warehouse_violations,
        )
    }

    fn serve_order(
        &self,
        ledger: &mut CapacityLedger,
        routes: &mut Vec<Route>,
        order_id: OrderIdx,
        order: &Order,
        rng: &mut SmallRng,
    ) -> Option<OrderShortfall> {
        let network = self.network;
        let mut remaining = order.quantity();
        if remaining == 0 {
            return None;
        }

        let Some(destination_id) = network.airport_id(order.destination()) else {
            warn!(
                client = order.client_id(),
                "Unknown destination {}, order skipped",
                order.destination()
            );
            return Some(OrderShortfall {
                order: order_id,
                missing: remaining,
                reason: ShortfallReason::UnknownDestination,
            });
        };
        let destination = network.airport(destination_id);

        let mut reason = ShortfallReason::RetriesExhausted;
        let mut attempt = 0;

        while remaining > 0 && attempt < self.params.max_attempts {
            attempt += 1;

            let candidates = self.hub_candidates(ledger, order, destination_id);
            let mut rcl = RestrictedCandidateList::new(candidates, &self.params.rcl);

            if rcl.is_empty() {
                warn!(
                    client = order.client_id(),
                    attempt, "No feasible route to {}",
                    order.destination()
                );
                reason = ShortfallReason::NoFeasibleRoute;
                break;
            }

            let mut shipped = 0;
            while remaining > 0 {
                let Some(HubCandidate { hub, itinerary, .. }) = rcl.take_random(rng) else {
                    break;
                };

                let room = ledger.max_shippable(network, itinerary.legs());
                if room == 0 {
                    debug!(
                        client = order.client_id(),
                        hub = network.airport(hub).code(),
                        "No flight or warehouse capacity left on candidate"
                    );
                    continue;
                }

                let quantity = remaining.min(room);
                ledger.commit_itinerary(network, order_id, itinerary.legs(), quantity);

                let meets_deadline = deadline::is_met(
                    network,
                    itinerary.legs(),
                    order.registered_at(),
                    destination,
                    deadline::deadline_window(network.airport(hub), destination),
                );

                debug!(
                    client = order.client_id(),
                    hub = network.airport(hub).code(),
                    legs = itinerary.legs().len(),
                    quantity,
                    "Committed route"
                );

                routes.push(Route::new(
                    order_id,
                    hub,
                    itinerary.legs().into(),
                    quantity,
                    meets_deadline,
                ));
                remaining -= quantity;
                shipped += quantity;
            }

            if shipped == 0 {
                warn!(
                    client = order.client_id(),
                    attempt, "No capacity left on any candidate route"
                );
                reason = ShortfallReason::CapacityExhausted;
                break;
            }
        }

        if remaining == 0 {
            return None;
        }

        warn!(
            client = order.client_id(),
            "Order left short by {remaining} of {} after {attempt} attempts",
            order.quantity()
        );

        Some(OrderShortfall {
            order: order_id,
            missing: remaining,
            reason,
        })
    }

    /// Deadline-compliant itineraries from every hub, in hub order.
    fn hub_candidates(
        &self,
        ledger: &CapacityLedger,
        order: &Order,
        destination_id: AirportIdx,
    ) -> Vec<HubCandidate> {
        let network = self.network;
        let destination = network.airport(destination_id);
        let search = RouteSearch::new(network, ledger);

        let evaluate_hub = |&hub_id: &AirportIdx| -> Option<HubCandidate> {
            if hub_id == destination_id {
                debug!(
                    hub = destination.code(),
                    "Destination is the hub itself, nothing to fly"
                );
                return None;
            }

            let hub = network.airport(hub_id);
            let window = deadline::deadline_window(hub, destination);
            let itinerary = search.find(hub_id, destination_id, order.registered_at(), window)?;

            if !deadline::is_met(
                network,
                itinerary.legs(),
                order.registered_at(),
                destination,
                window,
            ) {
                warn!(
                    client = order.client_id(),
                    hub = hub.code(),
                    "Route exceeds the {} day deadline",
                    deadline::deadline_days(hub, destination)
                );
                return None;
            }

            Some(HubCandidate::new(network, hub_id, itinerary))
        };

        let hubs = network.hubs();
        let evaluated: Vec<Option<HubCandidate>> = match self.search_pool {
            Some(pool) => pool.install(|| hubs.par_iter().map(evaluate_hub).collect()),
            None => hubs.iter().map(evaluate_hub).collect(),
        };

        evaluated.into_iter().flatten().collect()
    }
}
