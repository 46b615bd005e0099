//! Minimum coin change: normalization, solving and caching.

pub mod cache;
pub mod error;
pub mod normalize;
pub mod service;
pub mod solver;
pub mod types;


pub use cache::{CachedOutcome, ChangeCache};
pub use error::ChangeError;
pub use normalize::{normalize, parse_decimal, parse_denomination_list, to_units};
pub use service::ChangeService;
pub use solver::MinCoinSolver;
pub use types::{
    ChangeOutcome, ChangeSolution, Denomination, NormalizedInput, ScalePolicy, SolverLimits, Units,
};
