use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "signinkit",
    version,
    about = "Drive the SignInKit bridge against a scripted credential broker"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter directives, e.g. `debug` or `signinkit_core=trace`.
    #[arg(long, global = true, env = "SIGNINKIT_LOG", default_value = "info")]
    pub log: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one sign-in flow and print the resulting event as JSON.
    SignIn {
        /// Which sign-in flow to run.
        #[arg(long, value_enum, default_value_t = Flow::Known)]
        flow: Flow,
        #[command(flatten)]
        target: Target,
    },
    /// Run a sign-out and print the resulting event as JSON.
    SignOut {
        #[command(flatten)]
        target: Target,
    },
    /// Print a fresh request nonce.
    Nonce,
    /// List the engine signals the bridge emits.
    Signals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Flow {
    /// Prefer previously authorized accounts, falling back to all accounts.
    Known,
    /// Account chooser over all accounts.
    Chooser,
    /// "Sign in with Google" button flow.
    Button,
}

#[derive(Debug, clap::Args)]
pub struct Target {
    /// Broker script (JSON).
    #[arg(long)]
    pub script: PathBuf,

    /// Web client id from the Google Cloud console.
    #[arg(long, env = "SIGNINKIT_WEB_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Bridge configuration (JSON), instead of `--client-id`.
    #[arg(long, conflicts_with = "client_id")]
    pub config: Option<PathBuf>,
}
