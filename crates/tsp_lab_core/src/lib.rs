//! Travel-tour computation over planar point sets: an exact Held-Karp
//! solver for small instances, an MST-based 2-approximation that scales to
//! very large ones, and a hybrid heuristic/bounded-search solver in between.

mod algo;
mod constants;
mod error;
mod instance;
mod io;
pub mod logging;
mod node;
mod runner;
mod tour;

pub(crate) use algo::hybrid;
pub(crate) use io::options;

pub use algo::held_karp::solve_held_karp;
pub use algo::hybrid::{
    branch_and_bound, farthest_insertion, nearest_neighbor, solve_hybrid,
    solve_hybrid_with_budget, SearchBudget,
};
pub use algo::mst::solve_mst_approx;
pub use error::{Error, Result};
pub use instance::Instance;
pub use io::options::{Algorithm, LogFormat, LogLevel, SolverOptions};
pub use io::tsplib::{parse_tsp_file, parse_tsp_reader};
pub use node::Point;
pub use runner::{run_algorithm, RunReport};
pub use tour::{is_valid_tour, tour_cost, tour_metrics, Solution, TourMetrics};
