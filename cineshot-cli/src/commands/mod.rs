// cineshot-cli/src/commands/mod.rs
//
// One module per subcommand.

pub mod analyze;
pub mod classify;
pub mod eval;
pub mod info;
