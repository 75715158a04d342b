use rand::Rng;

use crate::{
    problem::{airport::AirportIdx, network::FreightNetwork, planning_week},
    solver::{route_search::Itinerary, solver_params::RclStrategy},
};

/// Hours added to a candidate's score for each leg it takes.
pub const LEG_PENALTY_HOURS: f64 = 5.0;

/// Lower is better: hours from the first departure to the last arrival plus a fixed penalty per
/// leg.
pub fn score(network: &FreightNetwork, itinerary: &Itinerary) -> f64 {
    planning_week::as_hours_f64(itinerary.duration(network))
        + LEG_PENALTY_HOURS * itinerary.legs().len() as f64
}

/// A deadline-compliant itinerary found from one hub for the order being served.
#[derive(Debug, Clone)]
pub struct HubCandidate {
    pub hub: AirportIdx,
    pub itinerary: Itinerary,
    pub score: f64,
}

impl HubCandidate {
    pub fn new(network: &FreightNetwork, hub: AirportIdx, itinerary: Itinerary) -> Self {
        HubCandidate {
            hub,
            score: score(network, &itinerary),
            itinerary,
        }
    }
}

pub struct RestrictedCandidateList {
    candidates: Vec<HubCandidate>,
}

impl RestrictedCandidateList {
    /// Keeps the best candidates according to `strategy`. Equal scores keep the order they were
    /// given in.
    ///
    /// The best candidate is always kept: a cardinality of 0 acts as 1 and `alpha` is clamped to
    /// `[0, 1]`, a NaN `alpha` acting as 0.
    pub fn new(mut candidates: Vec<HubCandidate>, strategy: &RclStrategy) -> Self {
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));

        match strategy {
            RclStrategy::Cardinality(size) => candidates.truncate((*size).max(1)),
            RclStrategy::Threshold { alpha } => {
                let alpha = if alpha.is_nan() {
                    0.0
                } else {
                    alpha.clamp(0.0, 1.0)
                };
                if let (Some(best), Some(worst)) = (candidates.first(), candidates.last()) {
                    let cutoff = best.score + alpha * (worst.score - best.score);
                    candidates.retain(|candidate| candidate.score <= cutoff);
                }
            }
        }

        RestrictedCandidateList { candidates }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self) -> &[HubCandidate] {
        &self.candidates
    }

    /// Draws a candidate uniformly at random and removes it from the list.
    pub fn take_random(&mut self, rng: &mut impl Rng) -> Option<HubCandidate> {
        if self.candidates.is_empty() {
            return None;
        }

        let index = rng.random_range(0..self.candidates.len());
        Some(self.candidates.swap_remove(index))
    }
}
