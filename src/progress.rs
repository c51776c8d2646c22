// Simulated login progress: a fixed list of steps replayed through a
// caller-supplied callback with a pause after each one.

use crate::config::DEFAULT_STEP_DELAY;
use crate::error::Result;
use std::fmt;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// One simulated stage of the login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub percent: u8,
    pub message: &'static str,
}

impl fmt::Display for ProgressStep {
    /// Renders as `[ 20%] Validando datos locales`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>3}%] {}", self.percent, self.message)
    }
}

/// The login sequence. Percents never decrease and the last one is 100.
pub const LOGIN_PROGRESS_STEPS: &[ProgressStep] = &[
    ProgressStep { percent: 20, message: "Validando datos locales" },
    ProgressStep { percent: 45, message: "Conectando al servidor" },
    ProgressStep { percent: 70, message: "Validando credenciales" },
    ProgressStep { percent: 90, message: "Aplicando politicas de sesion" },
    ProgressStep { percent: 100, message: "Acceso concedido" },
];

/// Replays a step sequence, blocking the calling thread for `delay` after
/// every callback. There is no cancellation: once started, every step runs
/// unless a fallible callback returns an error.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    steps: &'static [ProgressStep],
    delay: Duration,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        ProgressReporter::new(DEFAULT_STEP_DELAY)
    }
}

impl ProgressReporter {
    /// Reporter over the login sequence with the given pause.
    pub fn new(delay: Duration) -> Self {
        ProgressReporter {
            steps: LOGIN_PROGRESS_STEPS,
            delay,
        }
    }

    /// Replace the step sequence.
    pub fn with_steps(mut self, steps: &'static [ProgressStep]) -> Self {
        self.steps = steps;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Invoke `on_step` for each step in order.
    pub fn run<F>(&self, mut on_step: F)
    where
        F: FnMut(&ProgressStep),
    {
        for step in self.steps {
            debug!(percent = step.percent, message = step.message, "progress step");
            on_step(step);
            self.pause();
        }
    }

    /// Like [`run`](Self::run), but stops at the first callback error.
    /// Used when the callback writes to an output stream that may close.
    pub fn try_run<F>(&self, mut on_step: F) -> Result<()>
    where
        F: FnMut(&ProgressStep) -> Result<()>,
    {
        for step in self.steps {
            debug!(percent = step.percent, message = step.message, "progress step");
            on_step(step)?;
            self.pause();
        }
        Ok(())
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}
