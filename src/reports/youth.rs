//! YHSF youth monthly report sheet.
//!
//! A different template from the attendance sheets: one row per group (not
//! per month), weeks as columns. Per group the columns are roster counts
//! (M/F), last-month strength (M/F), weekly attendance for weeks 1-5 (M/F
//! each, members and visitors combined), and the weekly average (M/F).
//!
//! The average always divides by five: a week with no submission counts as
//! zero, it is not excluded. "Last month" is the calendar month before the
//! requested one; January looks back to December of the previous year.

use tracing::debug;

use crate::models::{Group, Month, YhsfRecord};
use crate::reports::sheet::{Cell, MergeRange, SheetLayout, StyleTag, StyledCell};

/// Columns: Group, members M/F, strength M/F, 5 x week M/F, average M/F.
pub const YOUTH_SHEET_COLUMNS: usize = 17;

/// Title, subtitle, and the two-row compound header.
pub const YOUTH_HEADER_ROWS: usize = 4;

const WEEKS: u8 = 5;

fn week_sums(records: &[YhsfRecord], group_id: i64, year: i32, month: Month) -> ([i64; 5], [i64; 5]) {
    let mut males = [0i64; 5];
    let mut females = [0i64; 5];
    for r in records {
        if r.group_id == group_id && r.year == year && r.month == month {
            if let Some(slot) = (1..=WEEKS).position(|w| w == r.week) {
                males[slot] += r.males();
                females[slot] += r.females();
            }
        }
    }
    (males, females)
}

fn push_youth_header(sheet: &mut SheetLayout, org_name: &str, month: Month, year: i32) {
    for (row, text) in [
        (0, org_name.to_string()),
        (1, format!("Youth Monthly Report - {} {}", month.name(), year)),
    ] {
        let mut cells = vec![Cell::Empty; YOUTH_SHEET_COLUMNS];
        cells[0] = Cell::Text(text);
        sheet.rows.push(cells);
        sheet.merges.push(MergeRange {
            first_row: row,
            first_col: 0,
            last_row: row,
            last_col: YOUTH_SHEET_COLUMNS - 1,
        });
        sheet.styles.push(StyledCell { row, col: 0, tag: StyleTag::Title });
    }

    // Row 2: group captions over M/F pairs
    let mut caption_row = vec![Cell::Empty; YOUTH_SHEET_COLUMNS];
    caption_row[0] = Cell::text("Group");
    caption_row[1] = Cell::text("No. of Members");
    caption_row[3] = Cell::text("Strength of Last Month");
    for week in 0..WEEKS as usize {
        caption_row[5 + week * 2] = Cell::text(format!("Week {}", week + 1));
    }
    caption_row[15] = Cell::text("Average");
    sheet.rows.push(caption_row);

    // Row 3: M/F under every pair
    let mut mf_row = vec![Cell::Empty; YOUTH_SHEET_COLUMNS];
    for pair in 0..(YOUTH_SHEET_COLUMNS - 1) / 2 {
        mf_row[1 + pair * 2] = Cell::text("M");
        mf_row[2 + pair * 2] = Cell::text("F");
    }
    sheet.rows.push(mf_row);

    sheet.merges.push(MergeRange { first_row: 2, first_col: 0, last_row: 3, last_col: 0 });
    for pair in 0..(YOUTH_SHEET_COLUMNS - 1) / 2 {
        sheet.merges.push(MergeRange {
            first_row: 2,
            first_col: 1 + pair * 2,
            last_row: 2,
            last_col: 2 + pair * 2,
        });
    }

    for row in [2, 3] {
        for col in 0..YOUTH_SHEET_COLUMNS {
            sheet.styles.push(StyledCell { row, col, tag: StyleTag::Header });
        }
    }
    for week in 0..WEEKS as usize {
        sheet.styles.push(StyledCell {
            row: 2,
            col: 5 + week * 2,
            tag: StyleTag::WeekLabel,
        });
    }
}

/// Build the youth monthly sheet for the given groups. Pure and
/// synchronous: the caller supplies the group list for the scope and the
/// full YHSF snapshot.
pub fn build_youth_monthly_sheet(
    groups: &[Group],
    records: &[YhsfRecord],
    month: Month,
    year: i32,
    org_name: &str,
) -> SheetLayout {
    let mut widths = vec![8.0; YOUTH_SHEET_COLUMNS];
    widths[0] = 30.0;

    let mut sheet = SheetLayout {
        sheet_name: "Youth Monthly".to_string(),
        rows: Vec::new(),
        column_widths: widths,
        merges: Vec::new(),
        styles: Vec::new(),
    };
    push_youth_header(&mut sheet, org_name, month, year);

    let (last_month, last_year) = month.previous(year);
    debug!(
        groups = groups.len(),
        records = records.len(),
        %month,
        %last_month,
        "building youth monthly sheet"
    );

    for group in groups {
        let (week_m, week_f) = week_sums(records, group.id, year, month);
        let (last_m, last_f) = week_sums(records, group.id, last_year, last_month);
        let strength_m: i64 = last_m.iter().sum();
        let strength_f: i64 = last_f.iter().sum();
        // Divide by 5 regardless of how many weeks have data
        let avg_m = week_m.iter().sum::<i64>() as f64 / WEEKS as f64;
        let avg_f = week_f.iter().sum::<i64>() as f64 / WEEKS as f64;

        let mut cells = Vec::with_capacity(YOUTH_SHEET_COLUMNS);
        cells.push(Cell::Text(group.name.clone()));
        cells.push(Cell::Number(group.yhsf_males));
        cells.push(Cell::Number(group.yhsf_females));
        cells.push(Cell::Number(strength_m));
        cells.push(Cell::Number(strength_f));
        for week in 0..WEEKS as usize {
            cells.push(Cell::Number(week_m[week]));
            cells.push(Cell::Number(week_f[week]));
        }
        cells.push(Cell::Float(avg_m));
        cells.push(Cell::Float(avg_f));
        sheet.rows.push(cells);
    }

    sheet
}
