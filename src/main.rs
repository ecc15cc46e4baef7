//! rollsheet CLI - generate attendance report sheets from a data snapshot.
//!
//! Reads a JSON snapshot of the organizational lists and attendance
//! records (as exported by the admin data service), builds the requested
//! report sheet, and writes the workbook to the configured output
//! directory.
//!
//! Usage:
//!   rollsheet <state|region|old-group|group|district> <snapshot.json> \
//!       --id <scope-id> --year <year> [--from <1-12>] [--to <1-12>]
//!   rollsheet youth <snapshot.json> --month <1-12> --year <year>

use std::io;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollsheet::api::StaticProvider;
use rollsheet::config::Config;
use rollsheet::export::{report_file_name_now, ReportKind, SheetSink, XlsxSink};
use rollsheet::models::{
    AttendanceRecord, District, Group, Month, OldGroup, Region, State, YhsfRecord,
};
use rollsheet::reports::{build_attendance_sheet, build_youth_monthly_sheet, MonthSpec, ReportLevel};
use rollsheet::scope::ScopeSelection;

/// Everything the report engine needs, as one exported snapshot file.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    states: Vec<State>,
    #[serde(default)]
    regions: Vec<Region>,
    #[serde(rename = "oldGroups", default)]
    old_groups: Vec<OldGroup>,
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    districts: Vec<District>,
    #[serde(default)]
    attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    yhsf: Vec<YhsfRecord>,
}

/// Initialize the tracing subscriber for logging.
/// Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    match flag_value(args, flag) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| anyhow!("Invalid value for {}: {}", flag, v)),
        None => Ok(None),
    }
}

fn load_snapshot(path: &str) -> Result<Snapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse snapshot file: {}", path))
}

fn provider_for(snapshot: &Snapshot) -> StaticProvider {
    StaticProvider {
        regions: snapshot.regions.clone(),
        old_groups: snapshot.old_groups.clone(),
        groups: snapshot.groups.clone(),
        districts: snapshot.districts.clone(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!(
            "Usage: rollsheet <state|region|old-group|group|district|youth> <snapshot.json> \
             --id <scope-id> --year <year> [--from <1-12>] [--to <1-12>] [--month <1-12>]"
        );
    }

    let config = Config::load()?;
    let snapshot = load_snapshot(&args[1])?;
    let year: Option<i32> = parse_flag(&args, "--year")?;

    let (sheet, kind) = match args[0].as_str() {
        "youth" => {
            let month_index: u32 = parse_flag(&args, "--month")?
                .ok_or_else(|| anyhow!("youth report requires --month <1-12>"))?;
            let month = Month::from_index(month_index)
                .ok_or_else(|| anyhow!("--month must be between 1 and 12"))?;
            let year = year.ok_or_else(|| anyhow!("youth report requires --year"))?;
            let sheet = build_youth_monthly_sheet(
                &snapshot.groups,
                &snapshot.yhsf,
                month,
                year,
                config.organization_title(),
            );
            (sheet, ReportKind::YouthMonthly)
        }
        level_name => {
            let level = match level_name {
                "state" => ReportLevel::State,
                "region" => ReportLevel::Region,
                "old-group" => ReportLevel::OldGroup,
                "group" => ReportLevel::Group,
                "district" => ReportLevel::District,
                other => bail!("Unknown report level: {}", other),
            };

            let id: Option<i64> = parse_flag(&args, "--id")?;
            let from: Option<u32> = parse_flag(&args, "--from")?;
            let to: Option<u32> = parse_flag(&args, "--to")?;
            let month_spec = match (from, to) {
                (Some(from), Some(to)) => Some(MonthSpec::Range { from, to }),
                (Some(m), None) | (None, Some(m)) => {
                    Month::from_index(m).map(MonthSpec::Single)
                }
                (None, None) => None,
            };

            let mut selection = ScopeSelection {
                year,
                month_spec,
                ..Default::default()
            };
            match level {
                ReportLevel::State => selection.state_id = id,
                ReportLevel::Region => selection.region_id = id,
                ReportLevel::OldGroup => selection.old_group_id = id,
                ReportLevel::Group => selection.group_id = id,
                ReportLevel::District => selection.district_id = id,
            }

            let provider = provider_for(&snapshot);
            let sheet = build_attendance_sheet(
                level,
                &selection,
                &snapshot.attendance,
                &provider,
                config.organization_title(),
            )
            .await?;
            (sheet, ReportKind::Level(level))
        }
    };

    let file_name = report_file_name_now(kind);
    let path = config.output_dir().join(&file_name);
    XlsxSink.write(&sheet, &path)?;
    info!(rows = sheet.rows.len(), "report complete");
    println!("{}", path.display());
    Ok(())
}
