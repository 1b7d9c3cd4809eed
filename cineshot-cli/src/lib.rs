// cineshot-cli/src/lib.rs
//
// Library portion of the cineshot CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{AnalyzeArgs, Cli, ClassifyArgs, Commands, EvalArgs, InfoArgs};
pub use commands::analyze::run_analyze;
pub use commands::classify::run_classify;
pub use commands::eval::run_eval;
pub use commands::info::run_info;
