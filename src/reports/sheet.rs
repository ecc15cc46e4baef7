//! Attendance report-sheet assembly.
//!
//! One parameterized builder covers the five report levels. Every sheet
//! shares the same shape: a two-line title/subtitle header, a banner row,
//! a compound column-header block, then for each month in the normalized
//! window one row per immediate child of the scope, a SubTotal row for the
//! whole scope, and a blank separator row. The district level iterates
//! weeks 1-5 as the per-child unit instead of organizational children.
//!
//! Column widths and merge ranges reproduce the institutional template
//! exactly; the numbers live in each level's [`LevelSpec`] so the template
//! is data, not code. The output is a plain cell matrix plus layout
//! metadata; workbook serialization belongs to the export sink.

use tracing::debug;

use crate::api::DataProvider;
use crate::error::ReportError;
use crate::models::{AttendanceRecord, Month};
use crate::reports::filter::{filter_records, FilterCriteria};
use crate::reports::months::{build_subtitle, months_to_use, MonthSpec};
use crate::reports::totals::{sum_for, AggregateTotals};
use crate::scope::ScopeSelection;

/// Columns per attendance sheet: Month, child label, then the eleven
/// numeric columns of the template.
pub const SHEET_COLUMNS: usize = 13;

/// Fixed rows before the first month block: title, subtitle, banner,
/// group header, sub-column header, spacer.
pub const HEADER_ROWS: usize = 6;

/// Weeks per month on the district sheet. Months with fewer submissions
/// still show five rows; absent weeks stay zero.
pub const WEEKS_PER_MONTH: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(i64),
    /// Fractional value; only the youth averages use this.
    Float(f64),
    Empty,
}

impl Cell {
    pub(crate) fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }
}

/// Style tag attached to a cell; the sink maps tags to concrete formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Title,
    Header,
    SubTotalLabel,
    SubTotalMonth,
    SubTotalNumber,
    WeekLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledCell {
    pub row: usize,
    pub col: usize,
    pub tag: StyleTag,
}

/// Inclusive merge range, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

/// A finished sheet: cell matrix plus the layout side-tables the sink
/// needs. Built once per report invocation; immutable afterwards.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub rows: Vec<Vec<Cell>>,
    pub column_widths: Vec<f64>,
    pub merges: Vec<MergeRange>,
    pub styles: Vec<StyledCell>,
}

/// The five attendance report levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    State,
    Region,
    OldGroup,
    Group,
    District,
}

/// Per-level template data: captions, column widths, and the
/// zero-records policy.
struct LevelSpec {
    banner: &'static str,
    child_label: &'static str,
    sheet_name: &'static str,
    /// Group and district call sites abort on an empty scope instead of
    /// emitting an all-zero sheet. Level-specific legacy behavior,
    /// preserved deliberately.
    abort_on_empty: bool,
    column_widths: [f64; SHEET_COLUMNS],
}

static STATE_SPEC: LevelSpec = LevelSpec {
    banner: "STATE GENERAL ATTENDANCE SUMMARY",
    child_label: "Region",
    sheet_name: "State Report",
    abort_on_empty: false,
    column_widths: [14.0, 28.0, 9.0, 9.0, 10.0, 9.0, 9.0, 10.0, 12.0, 9.0, 9.0, 10.0, 13.0],
};

static REGION_SPEC: LevelSpec = LevelSpec {
    banner: "REGIONAL GENERAL ATTENDANCE SUMMARY",
    child_label: "Old Group",
    sheet_name: "Region Report",
    abort_on_empty: false,
    column_widths: [14.0, 30.0, 9.0, 9.0, 10.0, 9.0, 9.0, 10.0, 12.0, 9.0, 9.0, 10.0, 13.0],
};

static OLD_GROUP_SPEC: LevelSpec = LevelSpec {
    banner: "OLD GROUP GENERAL ATTENDANCE SUMMARY",
    child_label: "Group",
    sheet_name: "Old Group Report",
    abort_on_empty: false,
    column_widths: [14.0, 26.0, 9.0, 9.0, 10.0, 9.0, 9.0, 10.0, 12.0, 9.0, 9.0, 10.0, 13.0],
};

static GROUP_SPEC: LevelSpec = LevelSpec {
    banner: "GROUP GENERAL ATTENDANCE SUMMARY",
    child_label: "District",
    sheet_name: "Group Report",
    abort_on_empty: true,
    column_widths: [14.0, 26.0, 9.0, 9.0, 10.0, 9.0, 9.0, 10.0, 12.0, 9.0, 9.0, 10.0, 13.0],
};

static DISTRICT_SPEC: LevelSpec = LevelSpec {
    banner: "DISTRICT WEEKLY ATTENDANCE SUMMARY",
    child_label: "Week",
    sheet_name: "District Report",
    abort_on_empty: true,
    column_widths: [14.0, 12.0, 9.0, 9.0, 10.0, 9.0, 9.0, 10.0, 12.0, 9.0, 9.0, 10.0, 13.0],
};

impl ReportLevel {
    fn spec(self) -> &'static LevelSpec {
        match self {
            ReportLevel::State => &STATE_SPEC,
            ReportLevel::Region => &REGION_SPEC,
            ReportLevel::OldGroup => &OLD_GROUP_SPEC,
            ReportLevel::Group => &GROUP_SPEC,
            ReportLevel::District => &DISTRICT_SPEC,
        }
    }
}

/// One per-child row unit. Week is the district-level unit; the other
/// variants match on the child's foreign key in the record's ancestor
/// chain.
#[derive(Debug, Clone)]
enum ChildUnit {
    Region { id: i64, name: String },
    OldGroup { id: i64, name: String },
    Group { id: i64, name: String },
    District { id: i64, name: String },
    Week(u8),
}

impl ChildUnit {
    fn label(&self) -> String {
        match self {
            ChildUnit::Region { name, .. }
            | ChildUnit::OldGroup { name, .. }
            | ChildUnit::Group { name, .. }
            | ChildUnit::District { name, .. } => name.clone(),
            ChildUnit::Week(n) => format!("Week {}", n),
        }
    }

    fn matches(&self, record: &AttendanceRecord) -> bool {
        match self {
            ChildUnit::Region { id, .. } => record.region_id == *id,
            ChildUnit::OldGroup { id, .. } => record.old_group_id == *id,
            ChildUnit::Group { id, .. } => record.group_id == *id,
            ChildUnit::District { id, .. } => record.district_id == *id,
            ChildUnit::Week(n) => record.week == *n,
        }
    }
}

/// Resolve the immediate children of the scope for a level. District
/// reports iterate weeks, so no fetch is needed there.
async fn resolve_children<P: DataProvider>(
    level: ReportLevel,
    selection: &ScopeSelection,
    provider: &P,
) -> Result<Vec<ChildUnit>, ReportError> {
    match level {
        ReportLevel::State => {
            let state_id = selection
                .state_id
                .ok_or(ReportError::UnresolvedScope("state"))?;
            let regions = provider.regions_by_state(state_id).await?;
            Ok(regions
                .into_iter()
                .map(|r| ChildUnit::Region { id: r.id, name: r.name })
                .collect())
        }
        ReportLevel::Region => {
            let region_id = selection
                .region_id
                .ok_or(ReportError::UnresolvedScope("region"))?;
            let old_groups = provider.old_groups_by_region(region_id).await?;
            Ok(old_groups
                .into_iter()
                .map(|g| ChildUnit::OldGroup { id: g.id, name: g.name })
                .collect())
        }
        ReportLevel::OldGroup => {
            let old_group_id = selection
                .old_group_id
                .ok_or(ReportError::UnresolvedScope("old group"))?;
            let groups = provider.groups_by_old_group(old_group_id).await?;
            Ok(groups
                .into_iter()
                .map(|g| ChildUnit::Group { id: g.id, name: g.name })
                .collect())
        }
        ReportLevel::Group => {
            let group_id = selection
                .group_id
                .ok_or(ReportError::UnresolvedScope("group"))?;
            let districts = provider.districts_by_group(group_id).await?;
            Ok(districts
                .into_iter()
                .map(|d| ChildUnit::District { id: d.id, name: d.name })
                .collect())
        }
        ReportLevel::District => {
            selection
                .district_id
                .ok_or(ReportError::UnresolvedScope("district"))?;
            Ok((1..=WEEKS_PER_MONTH).map(ChildUnit::Week).collect())
        }
    }
}

fn scope_criteria(selection: &ScopeSelection) -> FilterCriteria {
    FilterCriteria {
        state_id: selection.state_id,
        region_id: selection.region_id,
        old_group_id: selection.old_group_id,
        group_id: selection.group_id,
        district_id: selection.district_id,
        year: selection.year,
        month_range: None,
    }
}

fn totals_cells(t: &AggregateTotals) -> [Cell; 11] {
    [
        Cell::Number(t.men),
        Cell::Number(t.women),
        Cell::Number(t.adults_total),
        Cell::Number(t.youth_boys),
        Cell::Number(t.youth_girls),
        Cell::Number(t.youths_total),
        Cell::Number(t.total_adults),
        Cell::Number(t.children_boys),
        Cell::Number(t.children_girls),
        Cell::Number(t.children_total),
        Cell::Number(t.grand_total),
    ]
}

fn full_width_merge(row: usize) -> MergeRange {
    MergeRange {
        first_row: row,
        first_col: 0,
        last_row: row,
        last_col: SHEET_COLUMNS - 1,
    }
}

/// Emit the fixed six-row header block and its merges/styles.
fn push_header(
    sheet: &mut SheetLayout,
    spec: &LevelSpec,
    org_name: &str,
    subtitle: &str,
) {
    // Rows 0-2: title, subtitle, banner, each merged across the sheet
    for (row, text) in [(0, org_name), (1, subtitle), (2, spec.banner)] {
        let mut cells = vec![Cell::Empty; SHEET_COLUMNS];
        cells[0] = Cell::text(text);
        sheet.rows.push(cells);
        sheet.merges.push(full_width_merge(row));
        let tag = if row < 2 { StyleTag::Title } else { StyleTag::Header };
        sheet.styles.push(StyledCell { row, col: 0, tag });
    }

    // Row 3: group header
    let mut group_row = vec![Cell::Empty; SHEET_COLUMNS];
    group_row[0] = Cell::text("Month");
    group_row[1] = Cell::text(spec.child_label);
    group_row[2] = Cell::text("Adults");
    group_row[5] = Cell::text("Youths");
    group_row[8] = Cell::text("Total Adults");
    group_row[9] = Cell::text("Children");
    group_row[12] = Cell::text("Grand Total");
    sheet.rows.push(group_row);

    // Row 4: sub-column header
    let mut sub_row = vec![Cell::Empty; SHEET_COLUMNS];
    for (col, text) in [
        (2, "Men"),
        (3, "Women"),
        (4, "Total"),
        (5, "Boys"),
        (6, "Girls"),
        (7, "Total"),
        (9, "Boys"),
        (10, "Girls"),
        (11, "Total"),
    ] {
        sub_row[col] = Cell::text(text);
    }
    sheet.rows.push(sub_row);

    // Row 5: spacer before the first month block
    sheet.rows.push(vec![Cell::Empty; SHEET_COLUMNS]);

    // Compound-header merges: vertical for the single-column captions,
    // horizontal for the three-column groups
    for col in [0, 1, 8, 12] {
        sheet.merges.push(MergeRange {
            first_row: 3,
            first_col: col,
            last_row: 4,
            last_col: col,
        });
    }
    for first_col in [2, 5, 9] {
        sheet.merges.push(MergeRange {
            first_row: 3,
            first_col,
            last_row: 3,
            last_col: first_col + 2,
        });
    }

    for row in [3, 4] {
        for col in 0..SHEET_COLUMNS {
            sheet.styles.push(StyledCell {
                row,
                col,
                tag: StyleTag::Header,
            });
        }
    }
}

/// Build the attendance sheet for a level.
///
/// Scope resolution, record filtering, per-child aggregation, and layout
/// happen here in order; the caller hands the result to a sink. The month
/// window defaults to the full year when the selection names none.
pub async fn build_attendance_sheet<P: DataProvider>(
    level: ReportLevel,
    selection: &ScopeSelection,
    records: &[AttendanceRecord],
    provider: &P,
    org_name: &str,
) -> Result<SheetLayout, ReportError> {
    let spec = level.spec();
    let children = resolve_children(level, selection, provider).await?;

    let scoped = filter_records(records, &scope_criteria(selection), provider).await?;
    if scoped.is_empty() && spec.abort_on_empty {
        return Err(ReportError::NoRecords);
    }

    let month_spec = selection
        .month_spec
        .clone()
        .unwrap_or(MonthSpec::Range { from: 1, to: 12 });
    let months = months_to_use(&month_spec);
    let year = selection.year.unwrap_or_default();
    let subtitle = build_subtitle(&month_spec, year);

    debug!(
        ?level,
        children = children.len(),
        scoped = scoped.len(),
        months = months.len(),
        "building attendance sheet"
    );

    let mut sheet = SheetLayout {
        sheet_name: spec.sheet_name.to_string(),
        rows: Vec::new(),
        column_widths: spec.column_widths.to_vec(),
        merges: Vec::new(),
        styles: Vec::new(),
    };
    push_header(&mut sheet, spec, org_name, &subtitle);

    for month in months {
        push_month_block(&mut sheet, level, &children, &scoped, month);
    }

    Ok(sheet)
}

fn push_month_block(
    sheet: &mut SheetLayout,
    level: ReportLevel,
    children: &[ChildUnit],
    scoped: &[AttendanceRecord],
    month: Month,
) {
    let month_records: Vec<&AttendanceRecord> =
        scoped.iter().filter(|r| r.month == month).collect();

    for child in children {
        let totals = sum_for(month_records.iter().copied().filter(|r| child.matches(r)));
        let mut cells = Vec::with_capacity(SHEET_COLUMNS);
        cells.push(Cell::text(month.name()));
        cells.push(Cell::text(child.label()));
        cells.extend(totals_cells(&totals));
        if level == ReportLevel::District {
            sheet.styles.push(StyledCell {
                row: sheet.rows.len(),
                col: 1,
                tag: StyleTag::WeekLabel,
            });
        }
        sheet.rows.push(cells);
    }

    // SubTotal row aggregates the entire scope for the month, not the sum
    // of the visible child rows
    let subtotal = sum_for(month_records.iter().copied());
    let row = sheet.rows.len();
    let mut cells = Vec::with_capacity(SHEET_COLUMNS);
    cells.push(Cell::text("SubTotal"));
    cells.push(Cell::text(month.name()));
    cells.extend(totals_cells(&subtotal));
    sheet.rows.push(cells);

    sheet.styles.push(StyledCell { row, col: 0, tag: StyleTag::SubTotalLabel });
    sheet.styles.push(StyledCell { row, col: 1, tag: StyleTag::SubTotalMonth });
    for col in 2..SHEET_COLUMNS {
        sheet.styles.push(StyledCell { row, col, tag: StyleTag::SubTotalNumber });
    }

    // Blank separator between month blocks
    sheet.rows.push(vec![Cell::Empty; SHEET_COLUMNS]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticProvider;
    use crate::models::Region;

    fn record(
        id: i64,
        region_id: i64,
        month: Month,
        men: i64,
        women: i64,
    ) -> AttendanceRecord {
        AttendanceRecord {
            id,
            state_id: 1,
            region_id,
            old_group_id: 2,
            group_id: 3,
            district_id: 4,
            year: 2025,
            month,
            week: 1,
            men,
            women,
            youth_boys: 0,
            youth_girls: 0,
            children_boys: 0,
            children_girls: 0,
        }
    }

    fn provider_with_one_region() -> StaticProvider {
        StaticProvider {
            regions: vec![Region {
                id: 5,
                name: "Uyo".into(),
                state_id: Some(1),
                state: None,
            }],
            ..Default::default()
        }
    }

    fn selection() -> ScopeSelection {
        ScopeSelection {
            state_id: Some(1),
            year: Some(2025),
            month_spec: Some(MonthSpec::Single(Month::January)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn state_sheet_row_count_matches_template() {
        let records = vec![record(1, 5, Month::January, 5, 4)];
        let sheet = build_attendance_sheet(
            ReportLevel::State,
            &selection(),
            &records,
            &provider_with_one_region(),
            "THE ORGANIZATION",
        )
        .await
        .unwrap();

        // header + (1 region x 1 month) + subtotal + blank separator
        assert_eq!(sheet.rows.len(), HEADER_ROWS + 1 + 1 + 1);
        assert_eq!(sheet.column_widths.len(), SHEET_COLUMNS);
    }

    #[tokio::test]
    async fn subtotal_row_covers_the_whole_scope() {
        // Region 99 is not among the state's children, so it gets no data
        // row, but the subtotal still counts its records
        let records = vec![
            record(1, 5, Month::January, 5, 4),
            record(2, 99, Month::January, 3, 2),
        ];
        let sheet = build_attendance_sheet(
            ReportLevel::State,
            &selection(),
            &records,
            &provider_with_one_region(),
            "THE ORGANIZATION",
        )
        .await
        .unwrap();

        let subtotal_row = &sheet.rows[HEADER_ROWS + 1];
        assert_eq!(subtotal_row[0], Cell::Text("SubTotal".into()));
        assert_eq!(subtotal_row[1], Cell::Text("January".into()));
        assert_eq!(subtotal_row[2], Cell::Number(8)); // men
        assert_eq!(subtotal_row[3], Cell::Number(6)); // women
        assert_eq!(subtotal_row[12], Cell::Number(14)); // grand total
    }

    #[tokio::test]
    async fn empty_scope_is_a_zero_sheet_at_state_level() {
        let sheet = build_attendance_sheet(
            ReportLevel::State,
            &selection(),
            &[],
            &provider_with_one_region(),
            "THE ORGANIZATION",
        )
        .await
        .unwrap();
        let region_row = &sheet.rows[HEADER_ROWS];
        assert_eq!(region_row[12], Cell::Number(0));
    }

    #[tokio::test]
    async fn group_level_aborts_on_zero_records() {
        let sel = ScopeSelection {
            group_id: Some(3),
            month_spec: Some(MonthSpec::Single(Month::January)),
            ..Default::default()
        };
        let err = build_attendance_sheet(
            ReportLevel::Group,
            &sel,
            &[],
            &StaticProvider::default(),
            "THE ORGANIZATION",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReportError::NoRecords));
    }

    #[tokio::test]
    async fn missing_scope_id_aborts_before_aggregation() {
        let err = build_attendance_sheet(
            ReportLevel::District,
            &ScopeSelection::default(),
            &[],
            &StaticProvider::default(),
            "THE ORGANIZATION",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReportError::UnresolvedScope("district")));
    }

    #[tokio::test]
    async fn district_sheet_iterates_five_weeks() {
        let mut rec = record(1, 5, Month::January, 2, 2);
        rec.week = 3;
        let sel = ScopeSelection {
            district_id: Some(4),
            year: Some(2025),
            month_spec: Some(MonthSpec::Single(Month::January)),
            ..Default::default()
        };
        let sheet = build_attendance_sheet(
            ReportLevel::District,
            &sel,
            &[rec],
            &StaticProvider::default(),
            "THE ORGANIZATION",
        )
        .await
        .unwrap();

        // header + 5 week rows + subtotal + blank
        assert_eq!(sheet.rows.len(), HEADER_ROWS + 5 + 1 + 1);
        let week3 = &sheet.rows[HEADER_ROWS + 2];
        assert_eq!(week3[1], Cell::Text("Week 3".into()));
        assert_eq!(week3[2], Cell::Number(2));
        let week1 = &sheet.rows[HEADER_ROWS];
        assert_eq!(week1[2], Cell::Number(0));
    }
}
