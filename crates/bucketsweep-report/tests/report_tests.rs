use bucketsweep_analyze::{AgeAnalyzer, AgeConfig, DuplicateFinder};
use bucketsweep_core::units::BYTES_PER_MB;
use bucketsweep_core::{ContentHash, ObjectRecord, StorageTier};
use bucketsweep_report::{
    ReportError, ScanSummary, SweepDocument, render_cost_report, write_cost_report,
    write_record_report, write_record_report_file,
};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn sample_records() -> Vec<ObjectRecord> {
    let mut records = vec![
        ObjectRecord::new("/x/a.txt", 10 * BYTES_PER_MB, at(2024, 1, 1), ContentHash::from_etag("X")),
        ObjectRecord::new("/a.txt", 10 * BYTES_PER_MB, at(2024, 1, 2), ContentHash::from_etag("X")),
        ObjectRecord::new("/y/z/a.txt", 10 * BYTES_PER_MB, at(2024, 1, 3), ContentHash::from_etag("X")),
        ObjectRecord::new("old/report.pdf", BYTES_PER_MB, at(2019, 5, 4), ContentHash::from_etag("P"))
            .with_stale(true),
        ObjectRecord::new("recent.log", 512, at(2024, 12, 30), ContentHash::from_etag("L")),
    ];
    DuplicateFinder::new().find_duplicates(&mut records);
    records
}

#[test]
fn test_record_report_layout() {
    let records = sample_records();
    let mut buffer = Vec::new();

    let counts = write_record_report(&mut buffer, &records, now()).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "Type,FileName,Size_MB,LastModified,AgeDays,Path,DuplicateGroupID,Status",
            "=== DUPLICATE FILES ===,,,,,,,",
            "Duplicate,a.txt,10.00,2024-01-01,366,/x/a.txt,DUP-001,Can be deleted",
            "Duplicate,a.txt,10.00,2024-01-03,364,/y/z/a.txt,DUP-001,Can be deleted",
            "=== OLD FILES ===,,,,,,,",
            "Old,report.pdf,1.00,2019-05-04,2069,old/report.pdf,,Review for archival",
        ]
    );
    assert_eq!(counts.duplicates, 2);
    assert_eq!(counts.old, 1);
}

#[test]
fn test_stale_duplicate_only_in_duplicate_section() {
    let mut records = vec![
        ObjectRecord::new("a/dup.bin", 100, at(2015, 1, 1), ContentHash::from_etag("D"))
            .with_stale(true),
        ObjectRecord::new("b/dup.bin", 100, at(2015, 1, 2), ContentHash::from_etag("D"))
            .with_stale(true),
        ObjectRecord::new("solo.bin", 100, at(2021, 2, 10), ContentHash::from_etag("S"))
            .with_stale(true),
    ];
    DuplicateFinder::new().find_duplicates(&mut records);
    let mut buffer = Vec::new();

    write_record_report(&mut buffer, &records, now()).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let old_section = text.split("=== OLD FILES ===").nth(1).unwrap();
    assert!(old_section.contains("solo.bin,0.00,2021-02-10,1421,solo.bin,,Review for archival"));
    assert!(!old_section.contains("dup.bin"));
    assert_eq!(text.matches("Can be deleted").count(), 1);
}

#[test]
fn test_empty_sections_still_have_sentinels() {
    let mut buffer = Vec::new();

    let counts = write_record_report(&mut buffer, &[], now()).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("=== DUPLICATE FILES ==="));
    assert!(text.contains("=== OLD FILES ==="));
    assert_eq!(counts.duplicates + counts.old, 0);
}

#[test]
fn test_record_report_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.csv");

    write_record_report_file(&path, &sample_records(), now()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Type,FileName"));
}

#[test]
fn test_record_report_file_bad_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing-dir").join("report.csv");

    let err = write_record_report_file(&path, &sample_records(), now()).unwrap_err();

    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn test_cost_report_contents() {
    let summary = ScanSummary::new(250.0, 50.0);
    let costs = summary.project_costs(&StorageTier::default_table());

    let text = render_cost_report(&summary, &costs);
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], "Storage Summary:");
    assert_eq!(lines[1], "   Total Size Scanned         : 250.00 GB");
    assert_eq!(lines[2], "   Duplicate Size to Delete   : 50.00 GB");
    assert_eq!(lines[3], "   Remaining Size After Clean : 200.00 GB");
    assert_eq!(lines[4], "   Monthly Storage Costs:");
    assert_eq!(lines.len(), 5 + 7);
    assert_eq!(lines[5], "   - S3 Standard                   : $4.60");
    assert_eq!(lines[8], "   - S3 One Zone-IA                : $2.00");
    assert_eq!(lines[11], "   - S3 Glacier Deep Archive       : $0.20");
}

#[test]
fn test_cost_report_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("costs.txt");
    let summary = ScanSummary::new(1.0, 0.5);
    let text = render_cost_report(&summary, &summary.project_costs(&StorageTier::default_table()));

    write_cost_report(&path, &text).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn test_sweep_document_serializes() {
    let records = sample_records();
    let mut classified = records.clone();
    let duplicates = DuplicateFinder::new().find_duplicates(&mut classified);
    let age = AgeAnalyzer::with_config(
        AgeConfig::builder().reference_time(now()).build().unwrap(),
    )
    .analyze(&classified);
    let summary = ScanSummary::new(0.03, duplicates.duplicate_size_gb);
    let costs = summary.project_costs(&StorageTier::default_table());

    let document = SweepDocument {
        bucket: "archive",
        prefix: "",
        generated_at: now(),
        objects_scanned: classified.len(),
        summary,
        costs: &costs,
        duplicates: &duplicates,
        age: &age,
    };
    let json = serde_json::to_value(&document).unwrap();

    assert_eq!(json["bucket"], "archive");
    assert_eq!(json["duplicates"]["group_count"], 1);
    assert_eq!(json["summary"]["duplicate_gb"], 0.02);
    assert_eq!(json["summary"]["remaining_gb"], 0.01);
    assert_eq!(json["costs"].as_array().unwrap().len(), 7);
    assert_eq!(json["age"]["stale_count"], 1);
}
