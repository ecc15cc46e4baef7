//! End-to-end report pipeline: visibility → scope → filter → aggregate →
//! sheet layout → export naming.

use rollsheet::api::StaticProvider;
use rollsheet::export::{report_file_name, ReportKind};
use rollsheet::models::{AttendanceRecord, Month, Region, UserContext};
use rollsheet::reports::{
    build_attendance_sheet, filter_records, sum_for, Cell, FilterCriteria, MonthRange, MonthSpec,
    ReportLevel, HEADER_ROWS,
};
use rollsheet::scope::{apply_fixed_scope, resolve_visibility, ScopeSelection};

fn record(
    id: i64,
    region_id: i64,
    month: Month,
    counts: (i64, i64, i64, i64, i64, i64),
) -> AttendanceRecord {
    let (men, women, youth_boys, youth_girls, children_boys, children_girls) = counts;
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
        youth_boys,
        youth_girls,
        children_boys,
        children_girls,
    }
}

fn provider() -> StaticProvider {
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

#[tokio::test]
async fn state_admin_january_report_end_to_end() {
    // A state admin's state is fixed to their own assignment
    let caller = UserContext {
        roles: vec!["State Admin".into()],
        state_id: Some(1),
        ..Default::default()
    };
    let vis = resolve_visibility(&caller);
    assert!(!vis.show_state);

    let mut selection = ScopeSelection {
        year: Some(2025),
        month_spec: Some(MonthSpec::Single(Month::January)),
        ..Default::default()
    };
    apply_fixed_scope(&caller, vis, &mut selection);
    assert_eq!(selection.state_id, Some(1));

    let records = vec![
        record(1, 5, Month::January, (5, 4, 1, 2, 2, 3)),
        record(2, 5, Month::January, (3, 2, 0, 1, 1, 1)),
        record(3, 5, Month::February, (100, 100, 100, 100, 100, 100)),
    ];

    let provider = provider();
    let sheet = build_attendance_sheet(
        ReportLevel::State,
        &selection,
        &records,
        &provider,
        "THE ORGANIZATION",
    )
    .await
    .unwrap();

    // header + (1 region x 1 month) + subtotal + blank separator
    assert_eq!(sheet.rows.len(), HEADER_ROWS + 1 + 1 + 1);

    // The region row carries the January aggregate only
    let region_row = &sheet.rows[HEADER_ROWS];
    assert_eq!(region_row[0], Cell::Text("January".into()));
    assert_eq!(region_row[1], Cell::Text("Uyo".into()));
    assert_eq!(region_row[2], Cell::Number(8)); // men
    assert_eq!(region_row[3], Cell::Number(6)); // women
    assert_eq!(region_row[4], Cell::Number(14)); // adults total
    assert_eq!(region_row[5], Cell::Number(1)); // youth boys
    assert_eq!(region_row[6], Cell::Number(3)); // youth girls
    assert_eq!(region_row[7], Cell::Number(4)); // youths total
    assert_eq!(region_row[8], Cell::Number(18)); // total adults
    assert_eq!(region_row[9], Cell::Number(3)); // children boys
    assert_eq!(region_row[10], Cell::Number(4)); // children girls
    assert_eq!(region_row[11], Cell::Number(7)); // children total
    assert_eq!(region_row[12], Cell::Number(25)); // grand total

    // The subtotal row equals sum_for over the whole state/month
    let january = filter_records(
        &records,
        &FilterCriteria {
            state_id: Some(1),
            year: Some(2025),
            month_range: Some(MonthRange { from: 1, to: 1 }),
            ..Default::default()
        },
        &provider,
    )
    .await
    .unwrap();
    let expected = sum_for(&january);

    let subtotal_row = &sheet.rows[HEADER_ROWS + 1];
    assert_eq!(subtotal_row[0], Cell::Text("SubTotal".into()));
    assert_eq!(subtotal_row[2], Cell::Number(expected.men));
    assert_eq!(subtotal_row[12], Cell::Number(expected.grand_total));
}

#[tokio::test]
async fn full_year_report_emits_one_block_per_month() {
    let selection = ScopeSelection {
        state_id: Some(1),
        year: Some(2025),
        month_spec: Some(MonthSpec::Range { from: 1, to: 12 }),
        ..Default::default()
    };
    let records = vec![record(1, 5, Month::June, (1, 1, 0, 0, 0, 0))];
    let sheet = build_attendance_sheet(
        ReportLevel::State,
        &selection,
        &records,
        &provider(),
        "THE ORGANIZATION",
    )
    .await
    .unwrap();

    // 12 months x (1 region row + subtotal + blank)
    assert_eq!(sheet.rows.len(), HEADER_ROWS + 12 * 3);

    // Subtitle reflects the full-year window
    assert_eq!(
        sheet.rows[1][0],
        Cell::Text("January - December 2025".into())
    );
}

#[test]
fn file_name_is_deterministic_for_a_fixed_clock() {
    use chrono::{Local, TimeZone};

    let clock = Local.with_ymd_and_hms(2025, 11, 30, 23, 59, 1).unwrap();
    assert_eq!(
        report_file_name(ReportKind::Level(ReportLevel::Region), clock),
        "Region Report Sheet File_2025_11_30__23_59_01.xlsx"
    );
}
