use std::time::{Duration, Instant};

use crate::{
    algo::{held_karp, hybrid, mst},
    constants::COST_RECHECK_TOLERANCE,
    hybrid::SearchBudget,
    options::Algorithm,
    tour::{is_valid_tour, tour_cost, Solution},
    Instance, Result,
};

#[derive(Clone, Debug)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub solution: Solution,
    pub runtime: Duration,
}

/// Run one solver on an instance and gate its output before trusting it:
/// an invalid tour is degraded to the infeasible sentinel, and the reported
/// cost is recomputed through the evaluator and replaced when it disagrees.
pub fn run_algorithm(
    algorithm: Algorithm,
    instance: &Instance,
    budget: &SearchBudget,
) -> Result<RunReport> {
    let n = instance.dimension();
    log::info!(
        "run: start algorithm={} name={} n={n}",
        algorithm.as_str(),
        instance.name()
    );

    let started = Instant::now();
    let solution = match algorithm {
        Algorithm::HeldKarp => held_karp::solve_held_karp(instance)?,
        Algorithm::MstApprox => mst::solve_mst_approx(instance)?,
        Algorithm::Hybrid => hybrid::solve_hybrid_with_budget(instance, budget)?,
    };
    let runtime = started.elapsed();

    let solution = gate_solution(instance, algorithm, solution)?;

    log::info!(
        "run: complete algorithm={} cost={:.2} time={:.3}s",
        algorithm.as_str(),
        solution.cost,
        runtime.as_secs_f64()
    );

    Ok(RunReport {
        algorithm,
        solution,
        runtime,
    })
}

/// The output gate itself: a declined (sentinel) result passes through, an
/// invalid tour is degraded to the sentinel, and a reported cost that
/// disagrees with the evaluator is replaced by the recomputed one.
fn gate_solution(
    instance: &Instance,
    algorithm: Algorithm,
    mut solution: Solution,
) -> Result<Solution> {
    let n = instance.dimension();

    if solution.is_infeasible() {
        log::warn!(
            "run: algorithm={} declined n={n}, returning sentinel",
            algorithm.as_str()
        );
        return Ok(solution);
    }

    if !is_valid_tour(&solution.tour, n) {
        log::error!(
            "run: algorithm={} returned an invalid tour (len={})",
            algorithm.as_str(),
            solution.tour.len()
        );
        return Ok(Solution::infeasible());
    }

    let recomputed = tour_cost(instance, &solution.tour)?;
    if (recomputed - solution.cost).abs() > COST_RECHECK_TOLERANCE {
        log::warn!(
            "run: cost mismatch reported={:.6} recomputed={recomputed:.6}, using recomputed",
            solution.cost
        );
        solution.cost = recomputed;
    }
    Ok(solution)
}
