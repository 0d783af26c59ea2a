#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Two years of private employment with November and December 2012 not yet
/// published.
pub fn sample_rows() -> Vec<(i32, Vec<Option<f64>>)> {
    let full_2011: Vec<Option<f64>> = (0..12).map(|m| Some(109_000.0 + 100.0 * m as f64)).collect();
    let mut partial_2012: Vec<Option<f64>> =
        (0..12).map(|m| Some(110_300.0 + 150.0 * m as f64)).collect();
    partial_2012[10] = None;
    partial_2012[11] = None;
    vec![(2011, full_2011), (2012, partial_2012)]
}

/// Renders rows in the layout of a BLS data-viewer CSV download: five lines of
/// series metadata, a blank line, the header, then one line per year.
pub fn bls_csv(rows: &[(i32, Vec<Option<f64>>)]) -> String {
    let mut csv = String::new();
    csv.push_str("Series Id:,CES0500000001\n");
    csv.push_str("Seasonally Adjusted\n");
    csv.push_str("Series Title:,\"All employees, thousands, total private, seasonally adjusted\"\n");
    csv.push_str("Super Sector:,Total private\n");
    csv.push_str("Industry:,Total private\n");
    csv.push('\n');
    csv.push_str("Year,");
    csv.push_str(&MONTHS.join(","));
    csv.push('\n');
    for (year, cells) in rows {
        let rendered: Vec<String> = cells
            .iter()
            .map(|cell| cell.map(|value| value.to_string()).unwrap_or_default())
            .collect();
        csv.push_str(&format!("{year},{}\n", rendered.join(",")));
    }
    csv
}

pub fn write_csv(dir: &Path, name: &str, rows: &[(i32, Vec<Option<f64>>)]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bls_csv(rows)).expect("CSV written");
    path
}

/// Writes rows into the first worksheet with `preamble` rows above the header.
/// The first preamble row carries a title so the used range starts at row 1.
pub fn write_workbook(
    dir: &Path,
    name: &str,
    preamble: u32,
    rows: &[(i32, Vec<Option<f64>>)],
) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    if preamble > 0 {
        worksheet
            .write_string(0, 0, "Employment, Hours, and Earnings from the CES survey")
            .expect("title written");
    }
    worksheet.write_string(preamble, 0, "Year").expect("header written");
    for (index, month) in MONTHS.iter().enumerate() {
        worksheet
            .write_string(preamble, index as u16 + 1, *month)
            .expect("header written");
    }
    for (offset, (year, cells)) in rows.iter().enumerate() {
        let row = preamble + 1 + offset as u32;
        worksheet
            .write_number(row, 0, f64::from(*year))
            .expect("year written");
        for (index, cell) in cells.iter().enumerate() {
            if let Some(value) = cell {
                worksheet
                    .write_number(row, index as u16 + 1, *value)
                    .expect("cell written");
            }
        }
    }
    workbook.save(&path).expect("workbook saved");
    path
}

pub fn write_timeline(dir: &Path, years: &[i32]) -> PathBuf {
    let path = dir.join("presidents.txt");
    let body: Vec<String> = years.iter().map(i32::to_string).collect();
    fs::write(&path, body.join("\n") + "\n").expect("timeline written");
    path
}
