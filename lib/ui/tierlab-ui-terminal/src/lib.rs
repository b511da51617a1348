//! Command-line front end: session setup, report rendering and the `tierlab`
//! binary's argument handling (behind the `cli` feature).

pub mod report;
pub mod session;

#[cfg(feature = "cli")]
mod cli;
#[cfg(feature = "cli")]
mod logging;

#[cfg(feature = "cli")]
pub use cli::run;
pub use report::{EvaluationReport, InfoReport, OutputFormat, SweepReport};
pub use session::{ConfigSource, start_session};
