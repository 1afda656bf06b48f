//! Suite loading, resolution, and execution.
//!
//! A suite goes through three phases: parse the YAML definition, resolve it into
//! an arena of scenarios with validated helper handles, then run it. Only the
//! first two can fail; script failures are recorded on the scenarios.
mod load;
mod resolve;
pub mod run;
mod types;

pub use load::{load_suite, load_suite_file, parse_suite};
pub use resolve::resolve_suite;
pub use run::{run_suite, ScriptExecutor};
pub use types::*;
