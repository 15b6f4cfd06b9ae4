use std::time::Duration;

/// Smallest point count for which a cyclic tour is meaningful.
pub(crate) const MIN_CYCLE_POINTS: usize = 3;

/// Instances at or above this size skip the precomputed distance matrix
/// and recompute every lookup from coordinates.
pub(crate) const LARGE_INSTANCE_THRESHOLD: usize = 50_000;

/// Hard ceiling for the bitmask DP state space (2^n * n).
pub(crate) const HELD_KARP_MAX_POINTS: usize = 20;

/// Below this size both MST constructions are run and the cheaper tour kept;
/// at or above it only the dense array-based construction is affordable.
pub(crate) const MST_DENSE_THRESHOLD: usize = 500;

/// Hybrid dispatch: bounded exact search up to here.
pub(crate) const HYBRID_SEARCH_MAX_POINTS: usize = 12;
/// Hybrid dispatch: blend nearest-neighbor with farthest-insertion up to here.
pub(crate) const HYBRID_BLEND_MAX_POINTS: usize = 100;

/// The bounded search refuses to expand at all above this size.
pub(crate) const SEARCH_MAX_POINTS: usize = 15;
pub(crate) const SEARCH_DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);
pub(crate) const SEARCH_DEFAULT_MAX_NODES: usize = 50_000;

/// Tolerance for cross-checking a solver's reported cost against the evaluator.
pub(crate) const COST_RECHECK_TOLERANCE: f64 = 1e-6;
