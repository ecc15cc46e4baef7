//! Report engine error taxonomy.
//!
//! Validation failures and upstream failures each surface as a single
//! human-readable message; the engine itself never retries.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum ReportError {
    /// A required organizational ID could not be determined. Report
    /// generation aborts before any aggregation work begins.
    #[error("No {0} selected - choose a {0} before generating the report")]
    UnresolvedScope(&'static str),

    /// Zero records matched the resolved scope, at a level whose policy is
    /// to abort rather than emit an all-zero sheet.
    #[error("No attendance records found for the selected scope and period")]
    NoRecords,

    /// The data-access layer rejected a child-list fetch. Recoverable: the
    /// caller may retry the whole report request.
    #[error("Data service error: {0}")]
    Provider(#[from] ApiError),

    /// The export sink failed to serialize the workbook.
    #[error("Failed to write report sheet: {0}")]
    Sheet(String),
}
