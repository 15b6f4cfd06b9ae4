use crate::{Error, Instance, Result};

/// A solver's answer: a cyclic visiting order over point indices plus its
/// total cost. The infeasible sentinel is an empty tour with infinite cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub tour: Vec<usize>,
    pub cost: f64,
}

impl Solution {
    pub fn new(tour: Vec<usize>, cost: f64) -> Self {
        Self { tour, cost }
    }

    /// Sentinel for "the solver declined to produce a result".
    pub fn infeasible() -> Self {
        Self {
            tour: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        self.tour.is_empty()
    }
}

/// Total cyclic cost of `tour`: the last point connects back to the first.
pub fn tour_cost(instance: &Instance, tour: &[usize]) -> Result<f64> {
    if tour.is_empty() {
        return Err(Error::EmptyTour);
    }
    let n = tour.len();
    let mut total = 0.0;
    for i in 0..n {
        total += instance.distance(tour[i], tour[(i + 1) % n]);
    }
    Ok(total)
}

/// True iff `tour` visits every index in `0..n` exactly once.
pub fn is_valid_tour(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &p in tour {
        if p >= n || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

#[derive(Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

/// Edge-length metrics over the cyclic tour, logged for reporting.
pub fn tour_metrics(instance: &Instance, tour: &[usize]) -> TourMetrics {
    let n = tour.len();
    if n < 2 {
        log::info!("metrics: n={n} so there's nothing to report");
        return TourMetrics::default();
    }

    let mut total = 0.0;
    let mut longest = 0.0_f64;
    for i in 0..n {
        let d = instance.distance(tour[i], tour[(i + 1) % n]);
        total += d;
        longest = longest.max(d);
    }
    let average = total / n as f64;

    log::info!("metrics: n={n} total={total:.2} longest={longest:.2} avg={average:.2}");

    TourMetrics {
        total,
        longest,
        average,
    }
}
