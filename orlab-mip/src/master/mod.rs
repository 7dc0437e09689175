//! Continuous relaxation (master LP) access.

mod backend;
mod simplex_backend;

pub use backend::{solve_checked, RelaxationBackend};
pub use simplex_backend::SimplexBackend;
