//! Export: deterministic report file naming and the workbook sink.
//!
//! The core hands a finished [`SheetLayout`] to a [`SheetSink`]; the sink
//! owns workbook serialization. `XlsxSink` is the production sink, built
//! on `rust_xlsxwriter`. File names carry a call-time timestamp and exist
//! purely for the download dialog.

use std::path::Path;

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use tracing::info;

use crate::error::ReportError;
use crate::reports::{Cell, ReportLevel, SheetLayout, StyleTag};

/// Which report a file name is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Level(ReportLevel),
    YouthMonthly,
}

impl ReportKind {
    fn human_label(self) -> &'static str {
        match self {
            ReportKind::Level(ReportLevel::State) => "State",
            ReportKind::Level(ReportLevel::Region) => "Region",
            ReportKind::Level(ReportLevel::OldGroup) => "Old Group",
            ReportKind::Level(ReportLevel::Group) => "Group",
            ReportKind::Level(ReportLevel::District) => "District",
            ReportKind::YouthMonthly => "Youth Monthly",
        }
    }
}

/// File name for a report generated at `timestamp`. Deterministic given a
/// fixed clock; [`report_file_name_now`] is the call-time convenience.
pub fn report_file_name(kind: ReportKind, timestamp: DateTime<Local>) -> String {
    let stamp = timestamp.format("%Y_%m_%d__%H_%M_%S");
    match kind {
        ReportKind::YouthMonthly => format!("Youth Monthly Report_{}.xlsx", stamp),
        other => format!("{} Report Sheet File_{}.xlsx", other.human_label(), stamp),
    }
}

pub fn report_file_name_now(kind: ReportKind) -> String {
    report_file_name(kind, Local::now())
}

/// Terminal side effect of a report invocation: serialize one sheet to one
/// file. No retries are defined; failures surface as `ReportError::Sheet`.
pub trait SheetSink {
    fn write(&self, sheet: &SheetLayout, path: &Path) -> Result<(), ReportError>;
}

/// Workbook sink over `rust_xlsxwriter`. Maps the layout's style tags to
/// concrete formats matching the institutional template.
pub struct XlsxSink;

/// Fill color for sub-total rows.
const SUBTOTAL_FILL: u32 = 0xD9E1F2;

impl XlsxSink {
    fn format_for(tag: StyleTag) -> Format {
        match tag {
            StyleTag::Title => Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center),
            StyleTag::Header => Format::new().set_bold().set_align(FormatAlign::Center),
            StyleTag::SubTotalLabel => Format::new()
                .set_bold()
                .set_background_color(Color::RGB(SUBTOTAL_FILL))
                .set_align(FormatAlign::Left),
            StyleTag::SubTotalMonth => Format::new()
                .set_bold()
                .set_background_color(Color::RGB(SUBTOTAL_FILL))
                .set_align(FormatAlign::Center),
            StyleTag::SubTotalNumber => Format::new()
                .set_bold()
                .set_background_color(Color::RGB(SUBTOTAL_FILL))
                .set_align(FormatAlign::Right),
            StyleTag::WeekLabel => Format::new().set_bold().set_align(FormatAlign::Center),
        }
    }
}

impl SheetSink for XlsxSink {
    fn write(&self, sheet: &SheetLayout, path: &Path) -> Result<(), ReportError> {
        let to_sheet_err = |e: rust_xlsxwriter::XlsxError| ReportError::Sheet(e.to_string());

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.sheet_name).map_err(to_sheet_err)?;

        for (col, width) in sheet.column_widths.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(to_sheet_err)?;
        }

        let tag_at = |row: usize, col: usize| {
            sheet
                .styles
                .iter()
                .find(|s| s.row == row && s.col == col)
                .map(|s| s.tag)
        };

        // Merged cells are written by merge_range below; skip them here so
        // the anchor value is not written twice
        let in_merge = |row: usize, col: usize| {
            sheet.merges.iter().any(|m| {
                (m.first_row..=m.last_row).contains(&row)
                    && (m.first_col..=m.last_col).contains(&col)
            })
        };

        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if in_merge(row, col) {
                    continue;
                }
                let r = row as u32;
                let c = col as u16;
                match (cell, tag_at(row, col)) {
                    (Cell::Empty, _) => {}
                    (Cell::Text(s), Some(tag)) => {
                        worksheet
                            .write_string_with_format(r, c, s, &Self::format_for(tag))
                            .map_err(to_sheet_err)?;
                    }
                    (Cell::Text(s), None) => {
                        worksheet.write_string(r, c, s).map_err(to_sheet_err)?;
                    }
                    (Cell::Number(n), Some(tag)) => {
                        worksheet
                            .write_number_with_format(r, c, *n as f64, &Self::format_for(tag))
                            .map_err(to_sheet_err)?;
                    }
                    (Cell::Number(n), None) => {
                        worksheet
                            .write_number(r, c, *n as f64)
                            .map_err(to_sheet_err)?;
                    }
                    (Cell::Float(v), Some(tag)) => {
                        worksheet
                            .write_number_with_format(r, c, *v, &Self::format_for(tag))
                            .map_err(to_sheet_err)?;
                    }
                    (Cell::Float(v), None) => {
                        worksheet.write_number(r, c, *v).map_err(to_sheet_err)?;
                    }
                }
            }
        }

        for m in &sheet.merges {
            let anchor = sheet
                .rows
                .get(m.first_row)
                .and_then(|r| r.get(m.first_col));
            let text = match anchor {
                Some(Cell::Text(s)) => s.clone(),
                Some(Cell::Number(n)) => n.to_string(),
                Some(Cell::Float(v)) => v.to_string(),
                _ => String::new(),
            };
            let format = tag_at(m.first_row, m.first_col)
                .map(Self::format_for)
                .unwrap_or_else(Format::new);
            worksheet
                .merge_range(
                    m.first_row as u32,
                    m.first_col as u16,
                    m.last_row as u32,
                    m.last_col as u16,
                    &text,
                    &format,
                )
                .map_err(to_sheet_err)?;
        }

        workbook.save(path).map_err(to_sheet_err)?;
        info!(path = %path.display(), sheet = %sheet.sheet_name, "report sheet written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 2, 3, 9, 5, 7).unwrap()
    }

    #[test]
    fn attendance_file_names_follow_the_template() {
        assert_eq!(
            report_file_name(ReportKind::Level(ReportLevel::State), fixed_clock()),
            "State Report Sheet File_2025_02_03__09_05_07.xlsx"
        );
        assert_eq!(
            report_file_name(ReportKind::Level(ReportLevel::OldGroup), fixed_clock()),
            "Old Group Report Sheet File_2025_02_03__09_05_07.xlsx"
        );
    }

    #[test]
    fn youth_file_name_uses_its_own_prefix() {
        assert_eq!(
            report_file_name(ReportKind::YouthMonthly, fixed_clock()),
            "Youth Monthly Report_2025_02_03__09_05_07.xlsx"
        );
    }

    #[test]
    fn xlsx_sink_writes_a_workbook() {
        use crate::reports::{MergeRange, StyledCell};

        let sheet = SheetLayout {
            sheet_name: "Test".into(),
            rows: vec![
                vec![Cell::Text("TITLE".into()), Cell::Empty],
                vec![Cell::Text("Region".into()), Cell::Number(7)],
            ],
            column_widths: vec![20.0, 10.0],
            merges: vec![MergeRange { first_row: 0, first_col: 0, last_row: 0, last_col: 1 }],
            styles: vec![StyledCell { row: 0, col: 0, tag: StyleTag::Title }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        XlsxSink.write(&sheet, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
