//! rollsheet - attendance aggregation and report-sheet building for a
//! multi-tier membership organization.
//!
//! The hierarchy is state → region → old group → group → district. Each
//! district submits weekly attendance counts; this crate resolves which
//! organizational scope a caller may see, filters the record snapshot down
//! to a scope and time window, rolls the records up into per-child,
//! per-month totals, and lays the result out as a styled, merge-annotated
//! sheet matching the institutional template. A structurally different
//! builder covers the YHSF youth weekly template.
//!
//! The UI, authentication, persistence, and workbook binary format are
//! external collaborators: data arrives as immutable snapshots plus an
//! async [`api::DataProvider`] for on-demand child lists, and sheets leave
//! through an [`export::SheetSink`].

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod scope;

pub use error::ReportError;
