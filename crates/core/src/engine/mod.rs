//! The optimization engine: knapsack selection, risk filtering and the frontier sweep.
//!
//! Everything here is a pure function over in-memory assets; none of it can fail.

pub mod filter;
pub mod frontier;
pub mod selector;

pub use filter::filter_by_risk;
pub use frontier::{sweep, tolerance_grid};
pub use selector::select;
