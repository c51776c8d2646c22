// Error types for the agent library.
// The binary wraps these in `anyhow` for reporting; the library keeps them
// typed so callers can tell configuration problems from I/O failures.

use thiserror::Error;

/// Errors raised while collecting input, reporting progress or queueing
/// events. Terminal prompt failures surface as `Io`. An empty user code
/// is not an error: it is a rejected login.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Config {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid progress bar template: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),

    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
