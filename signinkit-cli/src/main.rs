//! Developer CLI for SignInKit.
//!
//! Runs the sign-in bridge against a broker scripted in JSON, so flows can be
//! exercised without a device:
//!
//! ```sh
//! signinkit sign-in --flow known --client-id abc --script fixtures/fallback.json
//! ```

mod cli;
mod logging;
mod script;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use clap::Parser;
use eyre::WrapErr;
use signinkit_core::{
    generate_nonce, plugin_signals, SignInBridge, SignInConfig, SignInEvent, SignInListener,
};

use crate::cli::{Args, Commands, Flow, Target};
use crate::script::{Script, ScriptHost};

/// Keeps the events emitted by the bridge.
#[derive(Default)]
struct CollectingListener(Mutex<Vec<SignInEvent>>);

impl CollectingListener {
    fn take(&self) -> Vec<SignInEvent> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl SignInListener for CollectingListener {
    fn on_event(&self, event: SignInEvent) {
        tracing::debug!(signal = %event.kind(), "event emitted");
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    let args = Args::parse();
    logging::init(&args.log);

    let mut stdout = io::stdout();
    match args.command {
        Commands::SignIn { flow, target } => sign_in(&target, flow, &mut stdout).await,
        Commands::SignOut { target } => sign_out(&target, &mut stdout).await,
        Commands::Nonce => {
            writeln!(stdout, "{}", generate_nonce())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Signals => {
            for signal in plugin_signals() {
                writeln!(stdout, "{}\t{}", signal.name, signal.arity)?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn sign_in(target: &Target, flow: Flow, out: &mut impl Write) -> eyre::Result<ExitCode> {
    let (bridge, listener) = build_bridge(target)?;
    match flow {
        Flow::Known => bridge.sign_in().await,
        Flow::Chooser => bridge.sign_in_with_account_chooser().await,
        Flow::Button => bridge.sign_in_with_google_button().await,
    }
    print_events(out, &listener.take())
}

async fn sign_out(target: &Target, out: &mut impl Write) -> eyre::Result<ExitCode> {
    let (bridge, listener) = build_bridge(target)?;
    bridge.sign_out().await;
    print_events(out, &listener.take())
}

fn build_bridge(target: &Target) -> eyre::Result<(SignInBridge, Arc<CollectingListener>)> {
    let config = match &target.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading config {}", path.display()))?;
            SignInConfig::from_json(&raw)?
        }
        None => SignInConfig::new(target.client_id.clone().unwrap_or_default()),
    };
    let host = ScriptHost::from(Script::load(&target.script)?);
    let listener = Arc::new(CollectingListener::default());
    let bridge = SignInBridge::with_config(Arc::new(host), listener.clone(), config);
    Ok((bridge, listener))
}

/// Writes each event as one JSON line; fails the process on a sign-in failure.
fn print_events(out: &mut impl Write, events: &[SignInEvent]) -> eyre::Result<ExitCode> {
    let mut code = ExitCode::SUCCESS;
    for event in events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
        if matches!(event, SignInEvent::Failure { .. }) {
            code = ExitCode::FAILURE;
        }
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::{json, Value};

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    fn script_target(script: &str, client_id: Option<&str>) -> Target {
        Target {
            script: fixture(script),
            client_id: client_id.map(ToString::to_string),
            config: None,
        }
    }

    fn lines(out: &[u8]) -> Vec<Value> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_sign_in_falls_back_and_succeeds() {
        let mut out = Vec::new();
        let target = script_target("fallback.json", Some("abc"));
        let code = sign_in(&target, Flow::Known, &mut out).await.unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            lines(&out),
            vec![json!({
                "signal": "sign_in_success",
                "id_token": "tok123",
                "subject": "user@example.com",
                "display_name": "Ada",
            })]
        );
    }

    #[tokio::test]
    async fn test_cancelled_sign_in_fails_the_process() {
        let mut out = Vec::new();
        let target = script_target("cancelled.json", Some("abc"));
        let code = sign_in(&target, Flow::Chooser, &mut out).await.unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            lines(&out),
            vec![json!({"signal": "sign_in_failed", "message": "Sign-in cancelled"})]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_sign_in_fails_the_process() {
        let mut out = Vec::new();
        let target = script_target("fallback.json", None);
        let code = sign_in(&target, Flow::Button, &mut out).await.unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            lines(&out),
            vec![json!({
                "signal": "sign_in_failed",
                "message": "Sign-in bridge not configured. Call configure() first.",
            })]
        );
    }

    #[tokio::test]
    async fn test_sign_out_completes_despite_clear_failure() {
        let mut out = Vec::new();
        let target = script_target("cancelled.json", Some("abc"));
        let code = sign_out(&target, &mut out).await.unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(lines(&out), vec![json!({"signal": "sign_out_complete"})]);
    }

    #[tokio::test]
    async fn test_config_file_is_applied() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        config
            .write_all(br#"{"web_client_id": "abc", "fallback_to_all_accounts": false}"#)
            .unwrap();
        let target = Target {
            config: Some(config.path().to_path_buf()),
            ..script_target("fallback.json", None)
        };

        let (bridge, _listener) = build_bridge(&target).unwrap();
        assert!(bridge.is_configured());
        assert!(!bridge.config().fallback_to_all_accounts);

        let mut out = Vec::new();
        let code = sign_in(&target, Flow::Known, &mut out).await.unwrap();

        // without the fallback the scripted no-credential error surfaces
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            lines(&out),
            vec![json!({"signal": "sign_in_failed", "message": "No credentials available"})]
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        config.write_all(b"{").unwrap();
        let target = Target {
            config: Some(config.path().to_path_buf()),
            ..script_target("fallback.json", None)
        };

        assert!(build_bridge(&target).is_err());
    }

    #[test]
    fn test_print_events_writes_one_line_per_event() {
        let events = [
            SignInEvent::Failure {
                message: "boom".to_string(),
            },
            SignInEvent::SignOutComplete,
        ];
        let mut out = Vec::new();

        let code = print_events(&mut out, &events).unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(lines(&out).len(), 2);
    }
}
