// Library root
// ------------
// The binary (`main.rs`) wires these modules into a single login attempt.
//
// Module responsibilities:
// - `config`: environment-driven settings (step delay, progress display).
// - `error`: the library error type.
// - `login`: credentials, the login flow and its outcome.
// - `progress`: the fixed progress sequence and the reporter that replays it.
// - `queue`: login events and the sinks that record them.
// - `ui`: credential prompts and progress rendering.
//
// Everything the flow touches (input, output, delay, queue) is passed in,
// so tests drive it with in-memory readers and writers and no sleeping.
pub mod config;
pub mod error;
pub mod login;
pub mod progress;
pub mod queue;
pub mod ui;

pub use error::{AgentError, Result};

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`). Called once by the binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
