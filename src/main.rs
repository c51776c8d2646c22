// Entrypoint for the login agent.
// - Keeps `main` small: load settings, pick an input source and hand both
//   to the login flow.
// - Exit status is 0 whether the session is granted or the credentials
//   are rejected; only configuration and I/O failures exit non-zero.

use anyhow::Context;
use loginuv_agent::config::AgentConfig;
use loginuv_agent::login::LoginFlow;
use loginuv_agent::queue::ConsoleQueue;
use loginuv_agent::ui::{CredentialSource, LinePrompt, TerminalPrompt, BANNER};
use std::io::{self, IsTerminal};
use tracing::info;

fn main() -> anyhow::Result<()> {
    loginuv_agent::init_tracing();

    let config = AgentConfig::from_env().context("Failed to load configuration")?;
    info!(
        step_delay = ?config.step_delay,
        progress = ?config.progress,
        "configuration loaded"
    );

    eprintln!("{}", BANNER);

    // Interactive terminals get hidden password input; pipes are read
    // line by line.
    let stdin = io::stdin();
    let mut source: Box<dyn CredentialSource> = if stdin.is_terminal() {
        Box::new(TerminalPrompt)
    } else {
        Box::new(LinePrompt::new(stdin.lock(), io::stderr()))
    };

    let mut flow = LoginFlow::from_config(&config, ConsoleQueue::stdout());
    let outcome = flow
        .run(source.as_mut(), &mut io::stdout())
        .context("Login flow failed")?;
    info!(granted = outcome.is_granted(), "login finished");

    Ok(())
}
