//! Command-line front end over a regimen file.
//!
//! A regimen file is the same JSON body the planner service accepts:
//! `{"meds": [...], "patient": {...}}`. Every command prints JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::client::{ClientError, PlannerBackend};
use crate::config::ClientConfig;
use crate::label_hints::{flatten_label, index_hints, HintIndex};
use crate::models::RegimenRequest;
use crate::schedule::slots_for;
use crate::session::{RegimenSession, SessionError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Output encoding error: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "medplan", version, about = "Medication interaction checks and dosing schedules")]
pub struct Cli {
    /// Planner service base URL (overrides MEDPLAN_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every medication pair against the local rule table
    Check { file: PathBuf },
    /// List the time slots for each medication
    Schedule { file: PathBuf },
    /// Build a dosing plan locally
    Plan {
        file: PathBuf,
        /// JSON object mapping medication name to label text or a label document
        #[arg(long)]
        labels: Option<PathBuf>,
        /// Fetch label hints from the planner service
        #[arg(long)]
        remote_labels: bool,
    },
    /// Ask the planner service for interaction findings
    RemoteCheck { file: PathBuf },
    /// Ask the planner service for a dosing plan
    RemotePlan { file: PathBuf },
    /// Resolve names to RxNorm identifiers through the planner service
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Probe the planner service
    Health,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let env = ClientConfig::from_env();
        match &self.api_base {
            Some(base) => ClientConfig::new(base, env.timeout_secs),
            None => env,
        }
    }
}

#[derive(Serialize)]
struct ScheduleEntry<'a> {
    name: &'a str,
    frequency: &'static str,
    slots: &'static [&'static str],
}

pub fn load_regimen(path: &Path) -> Result<RegimenRequest, CliError> {
    let raw = read(path)?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_labels(path: &Path) -> Result<HintIndex, CliError> {
    let raw = read(path)?;
    let labels: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&raw).map_err(|source| CliError::Json {
            path: path.display().to_string(),
            source,
        })?;
    let texts: Vec<(&str, String)> = labels
        .iter()
        .map(|(name, doc)| (name.as_str(), flatten_label(doc)))
        .collect();
    Ok(index_hints(
        texts.iter().map(|(name, text)| (*name, text.as_str())),
    ))
}

fn file_hints(path: Option<&Path>) -> Result<HintIndex, CliError> {
    match path {
        Some(path) => load_labels(path),
        None => Ok(HintIndex::new()),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Run a command that needs no network access. Returns `None` for remote
/// commands.
pub fn run_local(command: &Command) -> Result<Option<serde_json::Value>, CliError> {
    let value = match command {
        Command::Check { file } => {
            let session = RegimenSession::from_request(load_regimen(file)?);
            serde_json::to_value(session.local_findings())?
        }
        Command::Schedule { file } => {
            let regimen = load_regimen(file)?;
            let entries: Vec<ScheduleEntry> = regimen
                .meds
                .iter()
                .map(|m| ScheduleEntry {
                    name: &m.name,
                    frequency: m.frequency.label(),
                    slots: slots_for(m.frequency),
                })
                .collect();
            serde_json::to_value(entries)?
        }
        Command::Plan {
            file,
            labels,
            remote_labels: false,
        } => {
            let session = RegimenSession::from_request(load_regimen(file)?);
            let hints = file_hints(labels.as_deref())?;
            serde_json::to_value(session.local_plan(&hints))?
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}

/// Run any command, using `backend` for the remote ones.
pub fn run<B: PlannerBackend>(command: &Command, backend: &B) -> Result<serde_json::Value, CliError> {
    let value = match command {
        Command::RemoteCheck { file } => {
            let mut session = RegimenSession::from_request(load_regimen(file)?);
            serde_json::to_value(session.check_interactions(backend)?)?
        }
        Command::RemotePlan { file } => {
            let mut session = RegimenSession::from_request(load_regimen(file)?);
            serde_json::to_value(&session.generate_plan(backend)?.plan)?
        }
        Command::Plan {
            file,
            labels,
            remote_labels: true,
        } => {
            let session = RegimenSession::from_request(load_regimen(file)?);
            let mut hints = session.fetch_label_hints(backend)?;
            hints.extend(file_hints(labels.as_deref())?);
            serde_json::to_value(session.local_plan(&hints))?
        }
        Command::Normalize { names } => serde_json::to_value(backend.normalize(names)?)?,
        Command::Health => serde_json::json!({ "ok": backend.health()? }),
        Command::Check { .. }
        | Command::Schedule { .. }
        | Command::Plan {
            remote_labels: false,
            ..
        } => {
            return run_local(command).map(Option::unwrap_or_default);
        }
    };
    Ok(value)
}
