use crate::{
    constants::HELD_KARP_MAX_POINTS,
    tour::{tour_cost, Solution},
    Instance, Result,
};

const UNSET_PARENT: u32 = u32::MAX;

/// Exact solver: Held-Karp bitmask dynamic programming anchored at point 0.
///
/// The state space is 2^n * n, so instances above 20 points are a declared
/// capability boundary: the solver returns the infeasible sentinel instead
/// of attempting them. O(n^2 * 2^n) time, O(n * 2^n) space.
pub fn solve_held_karp(instance: &Instance) -> Result<Solution> {
    let n = instance.dimension();

    if n > HELD_KARP_MAX_POINTS {
        log::info!("held_karp: skip n={n} exceeds max={HELD_KARP_MAX_POINTS}");
        return Ok(Solution::infeasible());
    }
    if n == 1 {
        return Ok(Solution::new(vec![0], 0.0));
    }

    log::debug!("held_karp: start n={n}");

    // dp[mask * n + last] = cheapest cost of visiting exactly `mask`
    // (which always contains point 0) ending at `last`. INFINITY marks
    // unreached states; parent records the minimizing predecessor.
    let full_mask: usize = (1 << n) - 1;
    let mut dp = vec![f64::INFINITY; (full_mask + 1) * n];
    let mut parent = vec![UNSET_PARENT; (full_mask + 1) * n];

    for i in 1..n {
        let mask = 1 | (1 << i);
        dp[mask * n + i] = instance.distance(0, i);
        parent[mask * n + i] = 0;
    }

    // Every predecessor mask removes a bit, so ascending numeric order
    // processes subsets before their supersets.
    for mask in 0..=full_mask {
        if mask & 1 == 0 || mask.count_ones() < 3 {
            continue;
        }
        for last in 1..n {
            if mask & (1 << last) == 0 {
                continue;
            }
            let prev_mask = mask ^ (1 << last);
            let mut min_cost = f64::INFINITY;
            let mut best_prev = UNSET_PARENT;
            for prev in 1..n {
                if prev == last || prev_mask & (1 << prev) == 0 {
                    continue;
                }
                let reach = dp[prev_mask * n + prev];
                if !reach.is_finite() {
                    continue;
                }
                // Strictly-less: the lowest-index predecessor wins ties,
                // keeping output deterministic.
                let cost = reach + instance.distance(prev, last);
                if cost < min_cost {
                    min_cost = cost;
                    best_prev = prev as u32;
                }
            }
            if best_prev != UNSET_PARENT {
                dp[mask * n + last] = min_cost;
                parent[mask * n + last] = best_prev;
            }
        }
    }

    let mut min_total = f64::INFINITY;
    let mut last_point = UNSET_PARENT;
    for i in 1..n {
        let reach = dp[full_mask * n + i];
        if !reach.is_finite() {
            continue;
        }
        let total = reach + instance.distance(i, 0);
        if total < min_total {
            min_total = total;
            last_point = i as u32;
        }
    }

    if last_point == UNSET_PARENT {
        log::warn!("held_karp: no full-set state reached n={n}");
        return Ok(Solution::infeasible());
    }

    // Walk predecessor links back to the anchor, then reverse.
    let mut path = Vec::with_capacity(n);
    let mut mask = full_mask;
    let mut curr = last_point as usize;
    while curr != 0 {
        path.push(curr);
        let prev = parent[mask * n + curr];
        mask ^= 1 << curr;
        curr = prev as usize;
    }
    path.push(0);
    path.reverse();

    let cost = tour_cost(instance, &path)?;
    log::debug!("held_karp: done n={n} cost={cost:.2}");
    Ok(Solution::new(path, cost))
}

#[cfg(test)]
mod tests {
    use super::solve_held_karp;
    use crate::tour::{is_valid_tour, tour_cost};
    use crate::{Instance, Point};

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

    /// Exhaustive reference: cheapest cyclic cost over all permutations
    /// anchored at 0.
    fn brute_force_cost(instance: &Instance) -> f64 {
        fn recurse(instance: &Instance, tour: &mut Vec<usize>, rest: &mut Vec<usize>) -> f64 {
            if rest.is_empty() {
                return tour_cost(instance, tour).unwrap();
            }
            let mut best = f64::INFINITY;
            for i in 0..rest.len() {
                let next = rest.remove(i);
                tour.push(next);
                best = best.min(recurse(instance, tour, rest));
                tour.pop();
                rest.insert(i, next);
            }
            best
        }
        let n = instance.dimension();
        recurse(instance, &mut vec![0], &mut (1..n).collect())
    }

    #[test]
    fn square_perimeter_is_optimal() {
        let solution = solve_held_karp(&unit_square()).unwrap();
        assert!(is_valid_tour(&solution.tour, 4));
        assert!((solution.cost - 4.0).abs() < 1e-9);
    }

    #[test]
    fn matches_brute_force_on_seven_points() {
        let points = vec![
            Point::new(2.0, 1.0),
            Point::new(9.0, 4.0),
            Point::new(5.0, 8.0),
            Point::new(1.0, 6.0),
            Point::new(7.0, 0.5),
            Point::new(3.5, 3.5),
            Point::new(8.0, 7.5),
        ];
        let instance = Instance::new("seven", points);
        let solution = solve_held_karp(&instance).unwrap();
        assert!(is_valid_tour(&solution.tour, 7));
        assert!((solution.cost - brute_force_cost(&instance)).abs() < 1e-9);
    }

    #[test]
    fn oversize_instance_returns_infeasible_sentinel() {
        let points: Vec<Point> = (0..21).map(|i| Point::new(i as f64, 0.0)).collect();
        let solution = solve_held_karp(&Instance::new("too-big", points)).unwrap();
        assert!(solution.is_infeasible());
        assert!(solution.cost.is_infinite());
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let instance = unit_square();
        let a = solve_held_karp(&instance).unwrap();
        let b = solve_held_karp(&instance).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost.to_bits(), b.cost.to_bits());
    }

    #[test]
    fn reported_cost_survives_reevaluation() {
        let solution = solve_held_karp(&unit_square()).unwrap();
        let recomputed = tour_cost(&unit_square(), &solution.tour).unwrap();
        assert!((solution.cost - recomputed).abs() < 1e-6);
    }
}
