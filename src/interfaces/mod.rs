/// Interfaces Layer - External Entry Points
///
/// This layer contains all external interfaces to the system.
///
/// ## Modules
/// - `cli`: Command-line interface (main.rs logic) - line-oriented console
///   front end for manual testing of the auction engine

pub mod cli;
