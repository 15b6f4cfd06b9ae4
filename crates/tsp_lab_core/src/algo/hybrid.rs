use std::time::{Duration, Instant};

use crate::{
    constants::{
        HYBRID_BLEND_MAX_POINTS, HYBRID_SEARCH_MAX_POINTS, SEARCH_DEFAULT_MAX_NODES,
        SEARCH_DEFAULT_TIME_LIMIT, SEARCH_MAX_POINTS,
    },
    tour::{tour_cost, Solution},
    Instance, Result,
};

/// Cutoffs for the bounded exact search. Exhausting either budget abandons
/// the search and returns the best complete tour found so far; it is never
/// an error.
#[derive(Clone, Copy, Debug)]
pub struct SearchBudget {
    pub time_limit: Duration,
    pub max_nodes: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            time_limit: SEARCH_DEFAULT_TIME_LIMIT,
            max_nodes: SEARCH_DEFAULT_MAX_NODES,
        }
    }
}

/// Hybrid solver: bounded exact search for tiny instances, the better of
/// nearest-neighbor and farthest-insertion for mid-size ones, plain
/// nearest-neighbor at scale.
pub fn solve_hybrid(instance: &Instance) -> Result<Solution> {
    solve_hybrid_with_budget(instance, &SearchBudget::default())
}

pub fn solve_hybrid_with_budget(instance: &Instance, budget: &SearchBudget) -> Result<Solution> {
    let n = instance.dimension();

    if n <= HYBRID_SEARCH_MAX_POINTS {
        return branch_and_bound(instance, budget);
    }

    if n <= HYBRID_BLEND_MAX_POINTS {
        let nn = nearest_neighbor(instance)?;
        let fi = farthest_insertion(instance)?;
        log::debug!(
            "hybrid: blend n={n} nn={:.2} fi={:.2}",
            nn.cost,
            fi.cost
        );
        // Nearest-neighbor wins ties.
        return Ok(if nn.cost <= fi.cost { nn } else { fi });
    }

    nearest_neighbor(instance)
}

/// Greedy construction from point 0: always move to the closest unvisited
/// point. Ties go to the lowest index.
pub fn nearest_neighbor(instance: &Instance) -> Result<Solution> {
    let n = instance.dimension();
    if n == 0 {
        return Err(crate::Error::EmptyTour);
    }
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    visited[0] = true;
    tour.push(0);
    let mut current = 0;

    for _ in 1..n {
        let mut nearest = usize::MAX;
        let mut best = f64::INFINITY;
        for next in 0..n {
            if !visited[next] {
                let d = instance.distance(current, next);
                if d < best {
                    best = d;
                    nearest = next;
                }
            }
        }
        visited[nearest] = true;
        tour.push(nearest);
        current = nearest;
    }

    let cost = tour_cost(instance, &tour)?;
    Ok(Solution::new(tour, cost))
}

/// Farthest-insertion construction: seed {0, point farthest from 0}, then
/// repeatedly take the unvisited point whose minimum distance to the tour
/// is largest and splice it in where it increases the cost least.
pub fn farthest_insertion(instance: &Instance) -> Result<Solution> {
    let n = instance.dimension();
    if n <= 2 {
        return nearest_neighbor(instance);
    }

    let mut in_tour = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    in_tour[0] = true;
    tour.push(0);

    let mut seed = usize::MAX;
    let mut seed_dist = f64::NEG_INFINITY;
    for c in 1..n {
        let d = instance.distance(0, c);
        if d > seed_dist {
            seed_dist = d;
            seed = c;
        }
    }
    in_tour[seed] = true;
    tour.push(seed);

    for _ in 2..n {
        let mut pick = usize::MAX;
        let mut pick_dist = f64::NEG_INFINITY;
        for c in 0..n {
            if in_tour[c] {
                continue;
            }
            let mut to_tour = f64::INFINITY;
            for &t in &tour {
                to_tour = to_tour.min(instance.distance(c, t));
            }
            if to_tour > pick_dist {
                pick_dist = to_tour;
                pick = c;
            }
        }

        // Replacing edge (i, j) with (i, pick) + (pick, j).
        let mut best_pos = 0;
        let mut best_increase = f64::INFINITY;
        for i in 0..tour.len() {
            let j = (i + 1) % tour.len();
            let increase = instance.distance(tour[i], pick) + instance.distance(pick, tour[j])
                - instance.distance(tour[i], tour[j]);
            if increase < best_increase {
                best_increase = increase;
                best_pos = i + 1;
            }
        }
        tour.insert(best_pos, pick);
        in_tour[pick] = true;
    }

    let cost = tour_cost(instance, &tour)?;
    Ok(Solution::new(tour, cost))
}

/// Shared state of the bounded search, threaded explicitly through every
/// expansion so the search stays reentrant and the cutoffs testable.
struct SearchContext<'a> {
    instance: &'a Instance,
    best_tour: Vec<usize>,
    best_cost: f64,
    nodes_checked: usize,
    max_nodes: usize,
    deadline: Instant,
}

/// Bounded exact search (branch-and-bound) seeded with the nearest-neighbor
/// tour as the incumbent. Anytime: budget exhaustion returns the best
/// complete tour found so far. Above 15 points the state space is judged
/// too large to explore usefully and the baseline is returned outright.
pub fn branch_and_bound(instance: &Instance, budget: &SearchBudget) -> Result<Solution> {
    let n = instance.dimension();
    let baseline = nearest_neighbor(instance)?;

    if n > SEARCH_MAX_POINTS {
        log::info!("search: skip n={n} exceeds max={SEARCH_MAX_POINTS}, keeping baseline");
        return Ok(baseline);
    }

    let mut ctx = SearchContext {
        instance,
        best_tour: baseline.tour,
        best_cost: baseline.cost,
        nodes_checked: 0,
        max_nodes: budget.max_nodes,
        deadline: Instant::now() + budget.time_limit,
    };

    let mut tour = Vec::with_capacity(n);
    tour.push(0);
    let mut remaining: Vec<usize> = (1..n).collect();
    expand(&mut ctx, &mut tour, &mut remaining, 0.0);

    log::debug!(
        "search: done n={n} nodes={} cost={:.2}",
        ctx.nodes_checked,
        ctx.best_cost
    );
    Ok(Solution::new(ctx.best_tour, ctx.best_cost))
}

fn expand(ctx: &mut SearchContext, tour: &mut Vec<usize>, remaining: &mut Vec<usize>, cost: f64) {
    ctx.nodes_checked += 1;
    if ctx.nodes_checked > ctx.max_nodes || Instant::now() >= ctx.deadline {
        return;
    }

    let last = tour[tour.len() - 1];

    if remaining.is_empty() {
        // Close the cycle back to the anchor before comparing.
        let total = cost + ctx.instance.distance(last, 0);
        if total < ctx.best_cost {
            ctx.best_cost = total;
            ctx.best_tour = tour.clone();
        }
        return;
    }

    if cost + half_matching_bound(ctx.instance, remaining) >= ctx.best_cost {
        return;
    }

    for i in 0..remaining.len() {
        let next = remaining[i];
        let new_cost = cost + ctx.instance.distance(last, next);
        if new_cost < ctx.best_cost {
            remaining.remove(i);
            tour.push(next);
            expand(ctx, tour, remaining, new_cost);
            tour.pop();
            remaining.insert(i, next);
        }
    }
}

/// Relaxed matching-style lower bound on the cost still to pay: half the
/// sum, over remaining points, of each point's cheapest edge to another
/// remaining point.
fn half_matching_bound(instance: &Instance, remaining: &[usize]) -> f64 {
    if remaining.len() <= 1 {
        return 0.0;
    }
    let mut sum = 0.0;
    for &a in remaining {
        let mut min_edge = f64::INFINITY;
        for &b in remaining {
            if a != b {
                min_edge = min_edge.min(instance.distance(a, b));
            }
        }
        sum += min_edge;
    }
    sum * 0.5
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::{
        branch_and_bound, farthest_insertion, nearest_neighbor, solve_hybrid,
        solve_hybrid_with_budget, SearchBudget,
    };
    use crate::algo::held_karp::solve_held_karp;
    use crate::tour::is_valid_tour;
    use crate::{Instance, Point};

    fn random_instance(name: &str, n: usize, seed: u64) -> Instance {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..n)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        Instance::new(name, points)
    }

    fn unit_square() -> Instance {
        Instance::new(
            "square",
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 0.0),
            ],
        )
    }

    #[test]
    fn nearest_neighbor_walks_the_square() {
        let solution = nearest_neighbor(&unit_square()).unwrap();
        assert!(is_valid_tour(&solution.tour, 4));
        assert!((solution.cost - 4.0).abs() < 1e-9);
        assert_eq!(solution.tour[0], 0);
    }

    #[test]
    fn farthest_insertion_produces_valid_tours() {
        let instance = random_instance("fi", 30, 11);
        let solution = farthest_insertion(&instance).unwrap();
        assert!(is_valid_tour(&solution.tour, 30));
    }

    #[test]
    fn farthest_insertion_falls_back_below_three_points() {
        let instance = Instance::new("pair", vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        let fi = farthest_insertion(&instance).unwrap();
        let nn = nearest_neighbor(&instance).unwrap();
        assert_eq!(fi.tour, nn.tour);
        assert!((fi.cost - 10.0).abs() < 1e-9);
    }

    #[test]
    fn constructions_are_deterministic() {
        let instance = random_instance("det", 40, 5);
        let a = nearest_neighbor(&instance).unwrap();
        let b = nearest_neighbor(&instance).unwrap();
        assert_eq!(a.tour, b.tour);
        let c = farthest_insertion(&instance).unwrap();
        let d = farthest_insertion(&instance).unwrap();
        assert_eq!(c.tour, d.tour);
    }

    #[test]
    fn bounded_search_matches_exact_on_nine_points() {
        let instance = random_instance("nine", 9, 42);
        let exact = solve_held_karp(&instance).unwrap();
        let budget = SearchBudget {
            time_limit: Duration::from_secs(60),
            max_nodes: 10_000_000,
        };
        let searched = branch_and_bound(&instance, &budget).unwrap();
        assert!(is_valid_tour(&searched.tour, 9));
        assert!((searched.cost - exact.cost).abs() < 1e-9);
    }

    #[test]
    fn exhausted_node_budget_returns_the_baseline() {
        let instance = random_instance("cutoff", 10, 3);
        let budget = SearchBudget {
            time_limit: Duration::from_secs(10),
            max_nodes: 0,
        };
        let baseline = nearest_neighbor(&instance).unwrap();
        let searched = branch_and_bound(&instance, &budget).unwrap();
        assert_eq!(searched.tour, baseline.tour);
        assert!((searched.cost - baseline.cost).abs() < 1e-12);
    }

    #[test]
    fn expired_deadline_returns_the_baseline() {
        let instance = random_instance("deadline", 10, 3);
        let budget = SearchBudget {
            time_limit: Duration::ZERO,
            max_nodes: usize::MAX,
        };
        let baseline = nearest_neighbor(&instance).unwrap();
        let searched = branch_and_bound(&instance, &budget).unwrap();
        assert_eq!(searched.tour, baseline.tour);
    }

    #[test]
    fn search_is_skipped_above_fifteen_points() {
        let instance = random_instance("sixteen", 16, 9);
        let baseline = nearest_neighbor(&instance).unwrap();
        let searched = branch_and_bound(&instance, &SearchBudget::default()).unwrap();
        assert_eq!(searched.tour, baseline.tour);
    }

    #[test]
    fn dispatch_tiny_instances_to_the_search() {
        let instance = random_instance("tiny", 8, 21);
        let exact = solve_held_karp(&instance).unwrap();
        let hybrid = solve_hybrid(&instance).unwrap();
        assert!((hybrid.cost - exact.cost).abs() < 1e-9);
    }

    #[test]
    fn dispatch_mid_size_to_the_better_construction() {
        let instance = random_instance("mid", 50, 17);
        let nn = nearest_neighbor(&instance).unwrap();
        let fi = farthest_insertion(&instance).unwrap();
        let hybrid = solve_hybrid(&instance).unwrap();
        assert!((hybrid.cost - nn.cost.min(fi.cost)).abs() < 1e-12);
    }

    #[test]
    fn dispatch_large_instances_to_nearest_neighbor() {
        let instance = random_instance("large", 101, 13);
        let nn = nearest_neighbor(&instance).unwrap();
        let hybrid =
            solve_hybrid_with_budget(&instance, &SearchBudget::default()).unwrap();
        assert_eq!(hybrid.tour, nn.tour);
    }
}
