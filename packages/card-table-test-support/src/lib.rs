//! Test support shared by the card-table unit and integration tests:
//! logging initialization and response assertions that do not depend on
//! the application crate's types.

pub mod logging;
pub mod problem_details;

pub use problem_details::{assert_problem_details, read_data, ProblemDetailsLike};
