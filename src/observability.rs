//! Stage outcome reporting.
//!
//! [`crate::pipeline::Pipeline`] reports the start, success and failure of every stage to a
//! [`PipelineObserver`]. The default observer, [`TracingObserver`], turns those callbacks into
//! `tracing` events, which the subscriber installed by [`crate::logging::init`] writes to stdout
//! and the log file.

use std::error::Error as StdError;
use std::fmt;

use tracing::{error, info};

use crate::error::{EtlError, ExtractError, LoadError};

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Extract => "extract",
            Stage::Transform => "transform",
            Stage::Load => "load",
        })
    }
}

/// Severity of a stage failure, compared against the pipeline's alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageSeverity {
    /// The stage failed on its input or on a store query.
    Error,
    /// I/O or other infrastructure failure (unreadable file, unopenable store).
    Critical,
}

/// Minimal stats reported on stage success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    /// Rows in the stage's output.
    pub rows: usize,
}

/// Observer interface for stage outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called before a stage runs.
    fn on_started(&self, _stage: Stage) {}

    /// Called when a stage succeeds.
    fn on_success(&self, _stage: Stage, _stats: StageStats) {}

    /// Called when a stage fails.
    fn on_failure(&self, _stage: Stage, _severity: StageSeverity, _error: &EtlError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, stage: Stage, severity: StageSeverity, error: &EtlError) {
        self.on_failure(stage, severity, error)
    }
}

/// Emits stage events through `tracing`: INFO for start/success, ERROR for failures and alerts.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_started(&self, stage: Stage) {
        info!(%stage, "{stage} started");
    }

    fn on_success(&self, stage: Stage, stats: StageStats) {
        info!(%stage, rows = stats.rows, "{stage} successful");
    }

    fn on_failure(&self, stage: Stage, severity: StageSeverity, error: &EtlError) {
        error!(%stage, ?severity, error = %error, "{stage} failed");
    }

    fn on_alert(&self, stage: Stage, severity: StageSeverity, error: &EtlError) {
        error!(%stage, ?severity, error = %error, alert = true, "{stage} failed");
    }
}

/// Severity of a stage failure: I/O problems and an unopenable store are `Critical`, everything
/// else is `Error`.
pub fn severity_for_error(e: &EtlError) -> StageSeverity {
    let critical = match e {
        EtlError::Extract(ExtractError::Io(_)) => true,
        EtlError::Extract(ExtractError::Csv(err)) => matches!(err.kind(), csv::ErrorKind::Io(_)),
        EtlError::Load(LoadError::Io(_)) => true,
        EtlError::Load(LoadError::Csv(err)) => matches!(err.kind(), csv::ErrorKind::Io(_)),
        EtlError::Load(LoadError::StoreOpen { .. }) => true,
        EtlError::Load(LoadError::Store(err)) => error_chain_contains_io(err),
        _ => false,
    };
    if critical {
        StageSeverity::Critical
    } else {
        StageSeverity::Error
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}
