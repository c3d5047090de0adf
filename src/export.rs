//! Result table and summary export.
//!
//! The result table is one row per gauged part:
//!
//! ```text
//! Batch,Diameter (mm),Result
//! 1,50.12,Go
//! 1,50.61,NoGo
//! ```
//!
//! The same table can be written as an Excel workbook with one `Results`
//! sheet. Column order, header names and the `Go` / `NoGo` labels are fixed
//! so downstream spreadsheets keep working between runs.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;
use crate::gauge::Verdict;
use crate::inspection::{Run, RunSummary};

/// Default location of the exported table, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "results/snap_gauge_results.csv";

/// Default location of the Excel workbook.
pub const DEFAULT_XLSX_PATH: &str = "results/snap_gauge_results.xlsx";

const HEADERS: [&str; 3] = ["Batch", "Diameter (mm)", "Result"];
const SHEET_NAME: &str = "Results";

/// One exported row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// One-based batch number.
    #[serde(rename = "Batch")]
    pub batch: usize,
    #[serde(rename = "Diameter (mm)")]
    pub diameter: f64,
    #[serde(rename = "Result")]
    pub result: Verdict,
}

/// Write `rows` as CSV with a header line.
pub fn write_csv<W: Write>(rows: &[ResultRow], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        wtr.write_record(HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the run's result table to `path`, creating parent directories.
pub fn export_csv(run: &Run, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    create_parent(path)?;
    let rows = run.rows();
    write_csv(&rows, File::create(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "result table exported");
    Ok(())
}

/// Build a workbook holding `rows` on a single `Results` sheet.
///
/// Non-finite diameters have no Excel number form and are written as text.
pub fn build_workbook(rows: &[ResultRow]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        // Past u32::MAX the writer's own row limit reports the error
        let r = u32::try_from(i + 1).unwrap_or(u32::MAX);
        sheet.write_number(r, 0, row.batch as f64)?;
        if row.diameter.is_finite() {
            sheet.write_number(r, 1, row.diameter)?;
        } else {
            sheet.write_string(r, 1, row.diameter.to_string())?;
        }
        sheet.write_string(r, 2, row.result.as_str())?;
    }
    Ok(workbook)
}

/// Write the run's result table as an `.xlsx` workbook at `path`, creating
/// parent directories.
pub fn export_xlsx(run: &Run, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    create_parent(path)?;
    let rows = run.rows();
    build_workbook(&rows)?.save(path)?;
    info!(path = %path.display(), rows = rows.len(), "result workbook exported");
    Ok(())
}

/// Write the summary (batch statistics, limits, chart points) as pretty JSON.
pub fn write_summary_json<W: Write>(summary: &RunSummary, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, summary)?;
    Ok(())
}

/// Write the summary JSON to `path`, creating parent directories.
pub fn export_summary_json(summary: &RunSummary, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    create_parent(path)?;
    let mut file = File::create(path)?;
    write_summary_json(summary, &mut file)?;
    file.flush()?;
    info!(path = %path.display(), "summary exported");
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::GaugeSpec;

    fn completed_run() -> Run {
        let gauge = GaugeSpec::new(50.0, 0.5).expect("gauge");
        let mut run = Run::new(gauge, 2, 2).expect("run");
        for d in [50.5, 50.6, 49.4, 50.0] {
            run.inspect(d).expect("inspect");
        }
        run
    }

    #[test]
    fn test_csv_layout() {
        let run = completed_run();
        let mut buf = Vec::new();
        write_csv(&run.rows(), &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Batch,Diameter (mm),Result",
                "1,50.5,Go",
                "1,50.6,NoGo",
                "2,49.4,NoGo",
                "2,50.0,Go",
            ]
        );
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "Batch,Diameter (mm),Result\n");
    }

    #[test]
    fn test_csv_reads_back() {
        let run = completed_run();
        let mut buf = Vec::new();
        write_csv(&run.rows(), &mut buf).expect("write");

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<ResultRow> = rdr
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("parse");
        assert_eq!(rows, run.rows());
    }

    #[test]
    fn test_export_csv_creates_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results").join("out.csv");
        export_csv(&completed_run(), &path).expect("export");
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("Batch,Diameter (mm),Result"));
        assert_eq!(text.lines().count(), 5);
    }

    fn read_sheet(path: &Path) -> Vec<Vec<String>> {
        use calamine::{open_workbook, Reader, Xlsx};

        let mut workbook: Xlsx<_> = open_workbook(path).expect("open workbook");
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(SHEET_NAME).expect("sheet");
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_export_xlsx_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("results").join("out.xlsx");
        let run = completed_run();
        export_xlsx(&run, &path).expect("export");

        let rows = read_sheet(&path);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec!["Batch", "Diameter (mm)", "Result"]);
        let results: Vec<&str> = rows[1..].iter().map(|r| r[2].as_str()).collect();
        assert_eq!(results, vec!["Go", "NoGo", "NoGo", "Go"]);

        for (cells, row) in rows[1..].iter().zip(run.rows()) {
            let batch: f64 = cells[0].parse().expect("batch");
            let diameter: f64 = cells[1].parse().expect("diameter");
            assert_eq!(batch as usize, row.batch);
            assert!((diameter - row.diameter).abs() < 1e-12);
        }
    }

    #[test]
    fn test_export_xlsx_header_only_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.xlsx");
        let gauge = GaugeSpec::new(50.0, 0.5).expect("gauge");
        let run = Run::new(gauge, 1, 2).expect("run");
        export_xlsx(&run, &path).expect("export");
        assert_eq!(read_sheet(&path), vec![vec!["Batch", "Diameter (mm)", "Result"]]);
    }

    #[test]
    fn test_xlsx_writes_nan_as_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nan.xlsx");
        let rows = [ResultRow {
            batch: 1,
            diameter: f64::NAN,
            result: Verdict::NoGo,
        }];
        build_workbook(&rows)
            .expect("workbook")
            .save(&path)
            .expect("save");
        let sheet = read_sheet(&path);
        assert_eq!(sheet[1], vec!["1", "NaN", "NoGo"]);
    }

    #[test]
    fn test_summary_json() {
        let run = completed_run();
        let summary = run.summary().expect("summary");
        let mut buf = Vec::new();
        write_summary_json(summary, &mut buf).expect("write");

        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["verdict"], "InControl");
        assert_eq!(value["batches"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["most_defective"], serde_json::json!([1, 2]));
        assert!((value["avg_p"].as_f64().expect("avg_p") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_export_summary_json_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.json");
        let run = completed_run();
        export_summary_json(run.summary().expect("summary"), &path).expect("export");
        assert!(fs::read_to_string(&path).expect("read").contains("\"limits\""));
    }
}
