mod common;

use factcheck_jobs::ToolError;
use factcheck_jobs::check::{Verdict, check_equality, tables_equal};
use factcheck_jobs::io::timeline::{parse_timeline, read_timeline};
use factcheck_jobs::io::{CsvSource, EmploymentSource, WorkbookSource, csv_read};
use factcheck_jobs::model::FallbackCell;
use std::fs;
use tempfile::tempdir;

#[test]
fn csv_loader_skips_preamble_and_reads_header() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &common::sample_rows());

    let table = CsvSource::new(&path, 5).read_table().expect("CSV read");

    assert_eq!(table.columns, common::MONTHS.map(String::from).to_vec());
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].year, 2011);
    assert_eq!(table.rows[1].cells[9], Some(111_650.0));
    assert_eq!(table.missing_cells(), 2);
}

#[test]
fn preamble_counts_differing_by_blank_line_agree() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &common::sample_rows());

    let five = CsvSource::new(&path, 5).read_table().expect("CSV read");
    let six = CsvSource::new(&path, 6).read_table().expect("CSV read");

    assert_eq!(five, six);
}

#[test]
fn missing_cells_take_fallback_from_last_row() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &common::sample_rows());

    let matrix = CsvSource::new(&path, 5)
        .load(FallbackCell::default())
        .expect("matrix loaded");

    let last = &matrix.rows()[1];
    assert_eq!(last.months[9], 111_650);
    assert_eq!(last.months[10], 111_650);
    assert_eq!(last.months[11], 111_650);
}

#[test]
fn fallback_applies_to_gaps_in_earlier_rows() {
    let mut rows = common::sample_rows();
    rows[0].1[3] = None;
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &rows);

    let fallback = FallbackCell::from_month_number(1).expect("valid month");
    let matrix = CsvSource::new(&path, 5).load(fallback).expect("matrix loaded");

    assert_eq!(matrix.rows()[0].months[3], 110_300);
    assert_eq!(matrix.rows()[1].months[11], 110_300);
}

#[test]
fn loading_twice_is_identical() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &common::sample_rows());
    let source = CsvSource::new(&path, 5);

    let first = source.load(FallbackCell::default()).expect("first load");
    let second = source.load(FallbackCell::default()).expect("second load");

    assert_eq!(first, second);
}

#[test]
fn missing_fallback_cell_is_an_error() {
    let mut rows = common::sample_rows();
    rows[1].1[9] = None;
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &rows);

    let error = CsvSource::new(&path, 5)
        .load(FallbackCell::default())
        .expect_err("fallback missing");

    assert!(matches!(
        error,
        ToolError::MissingFallback {
            year: 2012,
            month: 10
        }
    ));
}

#[test]
fn rows_without_twelve_months_are_rejected() {
    let source = "Year,Jan,Feb,Mar\n1961,1,2,3\n";

    let table = csv_read::parse_table(source, 0).expect("table parsed");
    let error = table
        .impute(FallbackCell::from_month_number(1).expect("valid month"))
        .expect_err("short rows rejected");

    assert!(matches!(error, ToolError::InvalidTable(_)));
}

#[test]
fn non_numeric_cells_are_rejected() {
    let source = "Year,Jan\n1961,12x\n";

    let error = csv_read::parse_table(source, 0).expect_err("bad cell rejected");

    assert!(matches!(error, ToolError::InvalidTable(_)));
}

#[test]
fn non_integral_levels_are_rejected() {
    let mut rows = common::sample_rows();
    rows[0].1[2] = Some(109_200.5);
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_csv(temp_dir.path(), "BLS_private.csv", &rows);

    let error = CsvSource::new(&path, 5)
        .load(FallbackCell::default())
        .expect_err("fractional level rejected");

    assert!(matches!(error, ToolError::InvalidTable(_)));
}

#[test]
fn header_only_source_loads_empty_matrix() {
    let table = csv_read::parse_table("Year,Jan\n", 0).expect("table parsed");

    let matrix = table.impute(FallbackCell::default()).expect("empty matrix");

    assert!(matrix.is_empty());
}

#[test]
fn workbook_loader_reads_same_matrix_as_csv() {
    let temp_dir = tempdir().expect("temporary directory");
    let rows = common::sample_rows();
    let csv_path = common::write_csv(temp_dir.path(), "BLS_private.csv", &rows);
    let xlsx_path = common::write_workbook(temp_dir.path(), "labour.xlsx", 13, &rows);

    let from_csv = CsvSource::new(&csv_path, 5)
        .load(FallbackCell::default())
        .expect("CSV matrix");
    let from_xlsx = WorkbookSource::new(&xlsx_path, 13)
        .load(FallbackCell::default())
        .expect("workbook matrix");

    assert_eq!(from_csv, from_xlsx);
}

#[test]
fn workbook_preamble_is_counted_from_first_row() {
    let temp_dir = tempdir().expect("temporary directory");
    let rows = common::sample_rows();
    let with_title = common::write_workbook(temp_dir.path(), "titled.xlsx", 13, &rows);
    let bare = common::write_workbook(temp_dir.path(), "bare.xlsx", 0, &rows);

    let titled = WorkbookSource::new(&with_title, 13)
        .read_table()
        .expect("titled workbook read");
    let untitled = WorkbookSource::new(&bare, 0)
        .read_table()
        .expect("bare workbook read");

    assert!(tables_equal(&titled, &untitled));
}

#[test]
fn equality_check_matches_identical_sources() {
    let temp_dir = tempdir().expect("temporary directory");
    let rows = common::sample_rows();
    let csv_path = common::write_csv(temp_dir.path(), "BLS_private.csv", &rows);
    let xlsx_path = common::write_workbook(temp_dir.path(), "labour.xlsx", 13, &rows);

    let verdict = check_equality(
        &CsvSource::new(&csv_path, 6),
        &WorkbookSource::new(&xlsx_path, 13),
    );

    assert_eq!(verdict, Verdict::Equal);
}

#[test]
fn equality_check_detects_revised_values() {
    let temp_dir = tempdir().expect("temporary directory");
    let rows = common::sample_rows();
    let mut revised = rows.clone();
    revised[1].1[10] = Some(111_800.0);
    let csv_path = common::write_csv(temp_dir.path(), "BLS_private.csv", &rows);
    let xlsx_path = common::write_workbook(temp_dir.path(), "labour.xlsx", 13, &revised);

    let verdict = check_equality(
        &CsvSource::new(&csv_path, 6),
        &WorkbookSource::new(&xlsx_path, 13),
    );

    assert_eq!(verdict, Verdict::Different);
}

#[test]
fn equality_check_treats_unreadable_snapshot_as_different() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = common::write_csv(temp_dir.path(), "BLS_private.csv", &common::sample_rows());
    let bogus = temp_dir.path().join("labour.xlsx");
    fs::write(&bogus, "not a workbook").expect("bogus file written");

    let verdict = check_equality(
        &CsvSource::new(&csv_path, 6),
        &WorkbookSource::new(&bogus, 13),
    );

    assert_eq!(verdict, Verdict::Different);
}

#[test]
fn timeline_parses_one_year_per_line() {
    let timeline = parse_timeline("1969\n1977\n1981\n\n1993\n").expect("timeline parsed");

    assert_eq!(timeline.years().collect::<Vec<_>>(), vec![1969, 1977, 1981, 1993]);
}

#[test]
fn timeline_rejects_non_integer_lines() {
    let error = parse_timeline("1969\nNixon\n").expect_err("invalid entry rejected");

    match error {
        ToolError::InvalidTimelineEntry { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, "Nixon");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn timeline_file_is_read_from_disk() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = common::write_timeline(temp_dir.path(), &[1961, 1969, 1977]);

    let timeline = read_timeline(&path).expect("timeline read");

    assert_eq!(timeline.len(), 3);
    assert!(timeline.contains(1969));
}

#[test]
fn levels_beyond_i32_range_are_rejected() {
    let months = ["9000000000000000000", "-9000000000000000000"]
        .into_iter()
        .chain(std::iter::repeat("1").take(10))
        .collect::<Vec<_>>()
        .join(",");
    let source = format!("Year,{}\n1961,{months}\n", common::MONTHS.join(","));

    let table = csv_read::parse_table(&source, 0).expect("table parsed");
    let error = table
        .impute(FallbackCell::default())
        .expect_err("oversized level rejected");

    assert!(matches!(error, ToolError::InvalidTable(_)));
}

#[test]
fn levels_at_i32_bound_are_accepted() {
    let months = [i32::MAX.to_string(), (-i64::from(i32::MAX)).to_string()]
        .into_iter()
        .chain(std::iter::repeat("0".to_string()).take(10))
        .collect::<Vec<_>>()
        .join(",");
    let source = format!("Year,{}\n1961,{months}\n", common::MONTHS.join(","));

    let matrix = csv_read::parse_table(&source, 0)
        .expect("table parsed")
        .impute(FallbackCell::default())
        .expect("bounded levels accepted");

    assert_eq!(matrix.rows()[0].months[0], i64::from(i32::MAX));
}

#[test]
fn workbook_year_outside_i32_range_is_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("labour.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Year").expect("header written");
    worksheet.write_string(0, 1, "Jan").expect("header written");
    worksheet.write_number(1, 0, 3.0e9).expect("year written");
    worksheet.write_number(1, 1, 100.0).expect("cell written");
    workbook.save(&path).expect("workbook saved");

    let error = WorkbookSource::new(&path, 0)
        .read_table()
        .expect_err("oversized year rejected");

    assert!(matches!(error, ToolError::InvalidTable(_)));
}

#[test]
fn equality_check_treats_malformed_csv_as_different() {
    let temp_dir = tempdir().expect("temporary directory");
    let rows = common::sample_rows();
    let xlsx_path = common::write_workbook(temp_dir.path(), "labour.xlsx", 13, &rows);
    let csv_path = temp_dir.path().join("BLS_private.csv");
    let corrupted = common::bls_csv(&rows).replace("109000,", "1O9000,");
    fs::write(&csv_path, corrupted).expect("CSV written");

    let verdict = check_equality(
        &CsvSource::new(&csv_path, 6),
        &WorkbookSource::new(&xlsx_path, 13),
    );

    assert_eq!(verdict, Verdict::Different);
}
