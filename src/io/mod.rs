/// Command-line interface
pub mod cli;
/// Search constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Terminal progress reporting
pub mod progress;
/// Text format for tiles and patterns
pub mod shapes;
