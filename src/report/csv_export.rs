// ==========================================
// Class Assign - report CSV export
// ==========================================
// One file, three sections stacked: statistics, origin sheets,
// destination rosters. Section/heading rows have a single cell.
// ==========================================

use crate::i18n::t;
use crate::report::model::{
    AssignmentReport, DestinationRoster, OriginClassSheet, OriginRow, StatRow, StatisticsTable,
};
use csv::{Writer, WriterBuilder};
use std::io::Write;
use std::path::Path;

/// Write the report to any writer
pub fn write_csv<W: Write>(report: &AssignmentReport, writer: W) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record([report.title.as_str()])?;
    if !report.meta.teacher_name.trim().is_empty() {
        wtr.write_record([crate::i18n::t_with_args(
            "report.teacher",
            &[("name", report.meta.teacher_name.trim())],
        )])?;
    }

    write_statistics(&mut wtr, &report.statistics)?;
    for sheet in &report.origin_sheets {
        write_origin_sheet(&mut wtr, sheet)?;
    }
    for roster in &report.destination_rosters {
        write_destination_roster(&mut wtr, roster)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the report to a file, replacing it
pub fn export_to_path(report: &AssignmentReport, path: &Path) -> csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(report, file)
}

/// Render the report into a String
pub fn to_csv_string(report: &AssignmentReport) -> csv::Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(report, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_statistics<W: Write>(wtr: &mut Writer<W>, table: &StatisticsTable) -> csv::Result<()> {
    wtr.write_record([t("report.statistics")])?;

    let header = [
        t("report.columns.class"),
        t("report.columns.male"),
        t("report.columns.female"),
        t("report.columns.total"),
    ];

    for (heading, rows, total) in [
        (t("report.before"), &table.before, &table.before_total),
        (t("report.after"), &table.after, &table.after_total),
    ] {
        wtr.write_record([heading])?;
        wtr.write_record(&header)?;
        for row in rows.iter().chain(std::iter::once(total)) {
            write_stat_row(wtr, row)?;
        }
    }
    Ok(())
}

fn write_stat_row<W: Write>(wtr: &mut Writer<W>, row: &StatRow) -> csv::Result<()> {
    wtr.write_record([
        row.label.clone(),
        row.male.to_string(),
        row.female.to_string(),
        row.total.to_string(),
    ])
}

fn write_origin_sheet<W: Write>(wtr: &mut Writer<W>, sheet: &OriginClassSheet) -> csv::Result<()> {
    wtr.write_record([sheet.title.as_str()])?;

    let header = [
        t("report.columns.seq"),
        t("report.columns.name"),
        t("report.columns.new_class"),
        t("report.columns.remark"),
    ];

    for (heading, rows) in [(t("report.boys"), &sheet.boys), (t("report.girls"), &sheet.girls)] {
        wtr.write_record([heading])?;
        wtr.write_record(&header)?;
        for row in rows {
            write_origin_row(wtr, row)?;
        }
    }
    Ok(())
}

fn write_origin_row<W: Write>(wtr: &mut Writer<W>, row: &OriginRow) -> csv::Result<()> {
    wtr.write_record([
        row.seq.to_string(),
        row.name.clone(),
        row.new_class.clone(),
        row.remark.clone(),
    ])
}

fn write_destination_roster<W: Write>(
    wtr: &mut Writer<W>,
    roster: &DestinationRoster,
) -> csv::Result<()> {
    wtr.write_record([roster.title.as_str()])?;
    wtr.write_record([
        t("report.columns.seq"),
        t("report.columns.name"),
        t("report.columns.gender"),
        t("report.columns.origin_class"),
        t("report.columns.remark"),
    ])?;
    for row in &roster.rows {
        wtr.write_record([
            row.seq.to_string(),
            row.name.clone(),
            row.gender.clone(),
            row.origin_class.to_string(),
            row.remark.clone(),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::ReportMeta;
    use crate::domain::types::{AssignmentMethod, DestinationCode};
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};
    use crate::report::model::{DestinationRow, StatRow};

    fn report() -> AssignmentReport {
        let mut before_row = StatRow::new("1반");
        before_row.male = 1;
        before_row.total = 1;
        let mut total = StatRow::new("계");
        total.male = 1;
        total.total = 1;

        AssignmentReport {
            title: "2025학년도 1학년 반편성 결과".to_string(),
            meta: ReportMeta {
                teacher_name: "홍길동".to_string(),
                ..ReportMeta::default()
            },
            method: AssignmentMethod::Staggered,
            statistics: StatisticsTable {
                before: vec![before_row.clone()],
                before_total: total.clone(),
                after: vec![StatRow { label: "가반".to_string(), ..before_row }],
                after_total: total,
            },
            origin_sheets: vec![OriginClassSheet {
                origin_class: 1,
                title: "1반 반편성표".to_string(),
                boys: vec![OriginRow {
                    seq: 1,
                    student_id: 1,
                    name: "김민수".to_string(),
                    new_class: "가".to_string(),
                    remark: "반장, 성실함".to_string(),
                }],
                girls: vec![],
            }],
            destination_rosters: vec![DestinationRoster {
                code: DestinationCode::from_index(0).unwrap(),
                title: "가반 명렬표".to_string(),
                rows: vec![DestinationRow {
                    seq: 1,
                    student_id: 1,
                    name: "김민수".to_string(),
                    gender: "남".to_string(),
                    origin_class: 1,
                    remark: String::new(),
                }],
            }],
        }
    }

    #[test]
    fn test_csv_sections_in_order() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let csv = to_csv_string(&report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "2025학년도 1학년 반편성 결과");
        assert_eq!(lines[1], "담임: 홍길동");
        assert_eq!(lines[2], "반편성 통계");
        assert_eq!(lines[3], "편성 전");
        assert_eq!(lines[4], "반,남,여,계");
        assert_eq!(lines[5], "1반,1,0,1");

        let origin_at = lines.iter().position(|l| *l == "1반 반편성표").unwrap();
        let roster_at = lines.iter().position(|l| *l == "가반 명렬표").unwrap();
        assert!(origin_at < roster_at);
        // remark containing a comma is quoted
        assert!(lines.contains(&"1,김민수,가,\"반장, 성실함\""));
        assert_eq!(lines.last(), Some(&"1,김민수,남,1,"));
    }

    #[test]
    fn test_export_to_path() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        export_to_path(&report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("2025학년도"));
    }
}
