// UI layer: collects the user code and password and draws progress.
// Interactive terminals get `dialoguer` prompts (hidden password echo);
// piped input is read line by line so the agent can be scripted and tested.
// Prompts always go to stderr, leaving stdout for the login transcript.

use crate::error::Result;
use crate::login::Credentials;
use crate::progress::ProgressStep;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};

pub const BANNER: &str = "LoginUV Client Agent (demo)";
pub const USER_CODE_PROMPT: &str = "Codigo de usuario";
pub const PASSWORD_PROMPT: &str = "Contrasena";

/// Anything that can hand over a user code and password.
pub trait CredentialSource {
    fn read_credentials(&mut self) -> Result<Credentials>;
}

/// Reads one line per field from a buffered reader, echoing prompts to a
/// separate writer. End of input yields an empty field; bytes that are not
/// UTF-8 are replaced rather than rejected.
pub struct LinePrompt<R, W> {
    input: R,
    prompts: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, prompts: W) -> Self {
        LinePrompt { input, prompts }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.prompts, "{}: ", prompt)?;
        self.prompts.flush()?;
        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

impl<R: BufRead, W: Write> CredentialSource for LinePrompt<R, W> {
    fn read_credentials(&mut self) -> Result<Credentials> {
        let user_code = self.ask(USER_CODE_PROMPT)?;
        let password = self.ask(PASSWORD_PROMPT)?;
        Ok(Credentials::new(
            &user_code,
            password.trim_end_matches(&['\r', '\n'][..]),
        ))
    }
}

/// Keyboard-driven prompts on the controlling terminal.
///
/// `Password` hides input, so the password never appears on screen.
/// Empty answers are allowed: validation belongs to the login flow.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl CredentialSource for TerminalPrompt {
    fn read_credentials(&mut self) -> Result<Credentials> {
        let user_code: String = Input::new()
            .with_prompt(USER_CODE_PROMPT)
            .allow_empty(true)
            .interact_text()?;
        let password: String = Password::new()
            .with_prompt(PASSWORD_PROMPT)
            .allow_empty_password(true)
            .interact()?;
        Ok(Credentials::new(&user_code, password))
    }
}

/// Write one `[ 20%] message` line and flush it so it shows before the
/// reporter sleeps.
pub fn write_step<W: Write>(out: &mut W, step: &ProgressStep) -> Result<()> {
    writeln!(out, "{}", step)?;
    out.flush()?;
    Ok(())
}

/// `indicatif` bar driven by progress step percentages.
pub struct ProgressBarView {
    bar: ProgressBar,
}

impl ProgressBarView {
    /// A 0..=100 bar drawn on stderr.
    pub fn new() -> Result<Self> {
        Self::with_bar(ProgressBar::new(100))
    }

    pub fn with_bar(bar: ProgressBar) -> Result<Self> {
        bar.set_length(100);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {msg}")?
                .progress_chars("##-"),
        );
        Ok(ProgressBarView { bar })
    }

    pub fn update(&self, step: &ProgressStep) {
        self.bar.set_position(u64::from(step.percent));
        self.bar.set_message(step.message);
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(self) {
        self.bar.finish();
    }
}
