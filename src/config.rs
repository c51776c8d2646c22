// Runtime settings for the agent, read from environment variables.
// Every value has a default so the demo runs with no environment at all.

use crate::error::{AgentError, Result};
use std::time::Duration;

pub const STEP_DELAY_VAR: &str = "LOGINUV_STEP_DELAY_MS";
pub const PROGRESS_MODE_VAR: &str = "LOGINUV_PROGRESS";

/// Pause after each progress step unless overridden.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(350);

/// How progress steps are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// One `[ 20%] message` line per step on stdout.
    #[default]
    Lines,
    /// An `indicatif` bar drawn on stderr.
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub step_delay: Duration,
    pub progress: ProgressMode,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            step_delay: DEFAULT_STEP_DELAY,
            progress: ProgressMode::Lines,
        }
    }
}

impl AgentConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Unset or
    /// blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AgentConfig::default();

        if let Some(raw) = non_blank(lookup(STEP_DELAY_VAR)) {
            let millis: u64 = raw.parse().map_err(|_| AgentError::Config {
                var: STEP_DELAY_VAR,
                value: raw.clone(),
                reason: "expected a non-negative number of milliseconds".into(),
            })?;
            config.step_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = non_blank(lookup(PROGRESS_MODE_VAR)) {
            config.progress = match raw.to_ascii_lowercase().as_str() {
                "lines" => ProgressMode::Lines,
                "bar" => ProgressMode::Bar,
                _ => {
                    return Err(AgentError::Config {
                        var: PROGRESS_MODE_VAR,
                        value: raw,
                        reason: "expected `lines` or `bar`".into(),
                    })
                }
            };
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
