//! End-of-run flavor text
//!
//! The text source is an outside collaborator that may be offline or
//! misconfigured. Failures never reach the simulation: they are logged and
//! replaced with fixed fallback lines.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use serde::{Deserialize, Serialize};

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlavorOutcome {
    Victory,
    GameOver,
}

impl FlavorOutcome {
    /// Line shown when the source fails outright
    pub fn fallback(self) -> &'static str {
        match self {
            FlavorOutcome::Victory => "Protocol Verified.",
            FlavorOutcome::GameOver => "Connection Terminated.",
        }
    }

    /// Line shown when no credential is configured
    pub fn offline_fallback(self) -> &'static str {
        "Mission Complete."
    }

    /// Line shown when the source answers with nothing
    pub fn empty_fallback(self) -> &'static str {
        match self {
            FlavorOutcome::Victory => "Protocol Complete.",
            FlavorOutcome::GameOver => "Signal Lost.",
        }
    }
}

/// Flavor text source errors
#[derive(thiserror::Error, Debug)]
pub enum FlavorError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Something that can write a one-line message about a finished run
pub trait FlavorTextSource: Send + Sync {
    /// `progress` is the zero-based level the run ended on
    fn generate(&self, outcome: FlavorOutcome, progress: u32) -> Result<String, FlavorError>;
}

/// Offline source with a fixed set of lines
#[derive(Debug, Clone, Default)]
pub struct CannedFlavor;

const VICTORY_LINES: [&str; 3] = [
    "Core neutralized. The word is yours, pilot.",
    "Every sector clear. Command salutes you.",
    "Final guardian down. Go home a legend.",
];

const GAME_OVER_LINES: [&str; 3] = [
    "Sector {n} claims another bird. Impressive, in its own way.",
    "Flight terminated in sector {n}. Try flapping next time.",
    "Sector {n}: the pipes send their regards.",
];

impl FlavorTextSource for CannedFlavor {
    fn generate(&self, outcome: FlavorOutcome, progress: u32) -> Result<String, FlavorError> {
        let pick = progress as usize;
        Ok(match outcome {
            FlavorOutcome::Victory => VICTORY_LINES[pick % VICTORY_LINES.len()].to_string(),
            FlavorOutcome::GameOver => GAME_OVER_LINES[pick % GAME_OVER_LINES.len()]
                .replace("{n}", &(progress + 1).to_string()),
        })
    }
}

/// Refuses to call the inner source unless a credential variable is set
pub struct CredentialGate<S> {
    env_var: String,
    inner: S,
}

impl<S: FlavorTextSource> CredentialGate<S> {
    pub fn new(env_var: impl Into<String>, inner: S) -> Self {
        Self {
            env_var: env_var.into(),
            inner,
        }
    }
}

impl<S: FlavorTextSource> FlavorTextSource for CredentialGate<S> {
    fn generate(&self, outcome: FlavorOutcome, progress: u32) -> Result<String, FlavorError> {
        match std::env::var(&self.env_var) {
            Ok(key) if !key.trim().is_empty() => self.inner.generate(outcome, progress),
            _ => Err(FlavorError::MissingCredential(self.env_var.clone())),
        }
    }
}

/// Ask the source, never failing
pub fn flavor_text_or_fallback(
    source: &dyn FlavorTextSource,
    outcome: FlavorOutcome,
    progress: u32,
) -> String {
    match source.generate(outcome, progress) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("Flavor text source returned an empty response");
            outcome.empty_fallback().to_string()
        }
        Err(FlavorError::MissingCredential(var)) => {
            log::warn!("Flavor text offline: {} is not set", var);
            outcome.offline_fallback().to_string()
        }
        Err(e) => {
            log::error!("Flavor text request failed: {}", e);
            outcome.fallback().to_string()
        }
    }
}

/// What the UI should show right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlavorStatus {
    /// Still waiting, show a placeholder
    Loading,
    Ready(String),
}

/// Fire-and-forget background request
///
/// Runs on its own thread and is polled by the UI; the simulation never waits
/// on it.
pub struct FlavorRequest {
    outcome: FlavorOutcome,
    rx: Receiver<String>,
    result: Option<String>,
}

impl FlavorRequest {
    pub fn spawn(source: Arc<dyn FlavorTextSource>, outcome: FlavorOutcome, progress: u32) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let text = flavor_text_or_fallback(source.as_ref(), outcome, progress);
            // Receiver may be gone if the UI moved on
            let _ = tx.send(text);
        });
        Self {
            outcome,
            rx,
            result: None,
        }
    }

    pub fn outcome(&self) -> FlavorOutcome {
        self.outcome
    }

    /// Non-blocking check for the text
    pub fn poll(&mut self) -> FlavorStatus {
        if self.result.is_none() {
            match self.rx.try_recv() {
                Ok(text) => self.result = Some(text),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    log::error!("Flavor text worker exited without answering");
                    self.result = Some(self.outcome.fallback().to_string());
                }
            }
        }
        match &self.result {
            Some(text) => FlavorStatus::Ready(text.clone()),
            None => FlavorStatus::Loading,
        }
    }

    /// Block until the text arrives
    pub fn wait(mut self) -> String {
        if let Some(text) = self.result.take() {
            return text;
        }
        self.rx
            .recv()
            .unwrap_or_else(|_| self.outcome.fallback().to_string())
    }
}
