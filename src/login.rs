// The login flow: collect credentials, replay the progress sequence,
// record the event and report the outcome.
//
//   input -> (blank user code? reject) -> progress -> event -> granted
//
// Nothing here talks to a server; the "validation" is the blank check.

use crate::config::{AgentConfig, ProgressMode};
use crate::error::Result;
use crate::progress::ProgressReporter;
use crate::queue::{Event, EventSink};
use crate::ui::{self, CredentialSource, ProgressBarView};
use std::fmt;
use std::io::Write;
use tracing::{info, warn};

pub const INVALID_CREDENTIALS: &str = "Credenciales invalidas";
pub const SESSION_STARTED: &str = "Sesion iniciada";

/// What the user typed. The user code is trimmed; the password is kept
/// as entered and never inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_code: String,
    password: String,
}

impl Credentials {
    pub fn new(user_code: &str, password: impl Into<String>) -> Self {
        Credentials {
            user_code: user_code.trim().to_string(),
            password: password.into(),
        }
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// True when the user code is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.user_code.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_code", &self.user_code)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    Rejected,
}

impl LoginOutcome {
    pub fn is_granted(self) -> bool {
        self == LoginOutcome::Granted
    }
}

pub struct LoginFlow<Q> {
    reporter: ProgressReporter,
    mode: ProgressMode,
    queue: Q,
}

impl<Q: EventSink> LoginFlow<Q> {
    pub fn new(reporter: ProgressReporter, queue: Q) -> Self {
        LoginFlow {
            reporter,
            mode: ProgressMode::Lines,
            queue,
        }
    }

    pub fn from_config(config: &AgentConfig, queue: Q) -> Self {
        LoginFlow::new(ProgressReporter::new(config.step_delay), queue)
            .with_progress_mode(config.progress)
    }

    pub fn with_progress_mode(mut self, mode: ProgressMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn into_queue(self) -> Q {
        self.queue
    }

    /// Run one login attempt. Progress lines and the final status line are
    /// written to `out`; the event goes to the queue.
    pub fn run<C, W>(&mut self, source: &mut C, out: &mut W) -> Result<LoginOutcome>
    where
        C: CredentialSource + ?Sized,
        W: Write,
    {
        let credentials = source.read_credentials()?;

        if credentials.is_blank() {
            warn!("login rejected: empty user code");
            writeln!(out, "{}", INVALID_CREDENTIALS)?;
            out.flush()?;
            return Ok(LoginOutcome::Rejected);
        }

        info!(user_code = credentials.user_code(), "login started");
        self.report_progress(out)?;

        self.queue.enqueue(Event::login_ok(credentials.user_code()))?;

        writeln!(out, "{}", SESSION_STARTED)?;
        out.flush()?;
        info!(user_code = credentials.user_code(), "session started");
        Ok(LoginOutcome::Granted)
    }

    fn report_progress<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.mode {
            ProgressMode::Lines => self.reporter.try_run(|step| ui::write_step(&mut *out, step)),
            ProgressMode::Bar => {
                let view = ProgressBarView::new()?;
                self.reporter.run(|step| view.update(step));
                view.finish();
                Ok(())
            }
        }
    }
}
