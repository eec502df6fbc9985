//! Extract → transform → load orchestration.
//!
//! Every stage returns a `Result`. [`Pipeline::run`] reports each outcome to its
//! [`PipelineObserver`] and stops at the first failure, so a stage never receives the output of a
//! failed predecessor.

use std::fmt;
use std::sync::Arc;

use crate::config::EtlConfig;
use crate::error::{EtlError, EtlResult};
use crate::extract::{extract_from_path, TOTAL_REVENUE};
use crate::load::{load, LoadReport, Loaded};
use crate::observability::{
    severity_for_error, PipelineObserver, Stage, StageSeverity, StageStats, TracingObserver,
};
use crate::processing::{reduce, ReduceOp};
use crate::transform::transform;
use crate::types::{DataSet, Value};

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Rows read from the source.
    pub extracted_rows: usize,
    /// Rows left after dropping null prices.
    pub transformed_rows: usize,
    /// Rows dropped for a null price.
    pub dropped_rows: usize,
    /// Sum of `total_revenue` over the transformed rows (`Null` if there are none).
    pub total_revenue: Value,
    pub load: LoadReport,
}

/// A configured pipeline run.
pub struct Pipeline {
    config: EtlConfig,
    observer: Arc<dyn PipelineObserver>,
    alert_at_or_above: StageSeverity,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline that reports through [`TracingObserver`] and alerts on `Critical`.
    pub fn new(config: EtlConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
            alert_at_or_above: StageSeverity::Critical,
        }
    }

    /// Replace the observer.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Severity at or above which failures also trigger `on_alert`.
    pub fn with_alert_threshold(mut self, severity: StageSeverity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Run extract, transform and load in order.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails; later stages do not run.
    pub fn run(&self) -> EtlResult<RunSummary> {
        let extracted = self.stage(
            Stage::Extract,
            || {
                extract_from_path(&self.config.input_path, &self.config.extract_options())
                    .map_err(EtlError::from)
            },
            DataSet::row_count,
        )?;
        let extracted_rows = extracted.row_count();

        let transformed = self.stage(
            Stage::Transform,
            || transform(&extracted).map_err(EtlError::from),
            DataSet::row_count,
        )?;
        drop(extracted);
        let transformed_rows = transformed.row_count();
        let total_revenue = reduce(&transformed, TOTAL_REVENUE, ReduceOp::Sum).unwrap_or(Value::Null);

        let loaded = self.stage(
            Stage::Load,
            || load(transformed, &self.config.load_options()).map_err(EtlError::from),
            |loaded: &Loaded| loaded.dataset.row_count(),
        )?;

        Ok(RunSummary {
            extracted_rows,
            transformed_rows,
            dropped_rows: extracted_rows - transformed_rows,
            total_revenue,
            load: loaded.report,
        })
    }

    fn stage<T, F, R>(&self, stage: Stage, f: F, rows: R) -> EtlResult<T>
    where
        F: FnOnce() -> EtlResult<T>,
        R: FnOnce(&T) -> usize,
    {
        self.observer.on_started(stage);
        let result = f();
        match &result {
            Ok(out) => self.observer.on_success(stage, StageStats { rows: rows(out) }),
            Err(e) => {
                let sev = severity_for_error(e);
                self.observer.on_failure(stage, sev, e);
                if sev >= self.alert_at_or_above {
                    self.observer.on_alert(stage, sev, e);
                }
            }
        }
        result
    }
}
