// ==========================================
// Class Assign - report builder
// ==========================================
// Input: engine result + the roster it was computed from
// Output: statistics table, per-origin sheets, per-destination rosters
// ==========================================

use crate::domain::assignment::AssignmentResult;
use crate::domain::settings::{AssignmentConfig, ReportMeta};
use crate::domain::student::{AssignedStudent, StudentRecord};
use crate::domain::types::{DestinationCode, Gender};
use crate::engine::ordering::compare_names;
use crate::i18n::{t, t_with_args};
use crate::report::model::{
    AssignmentReport, DestinationRoster, DestinationRow, OriginClassSheet, OriginRow, StatRow,
    StatisticsTable,
};
use tracing::debug;

pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(
        result: &AssignmentResult,
        roster: &[StudentRecord],
        config: &AssignmentConfig,
        meta: &ReportMeta,
    ) -> AssignmentReport {
        let statistics = Self::statistics(result, roster, config);
        let origin_sheets = (1..=config.total_current_classes)
            .map(|origin_class| Self::origin_sheet(result, origin_class))
            .collect();
        let destination_rosters = DestinationCode::first_n(config.total_new_classes)
            .into_iter()
            .filter_map(|code| Self::destination_roster(result, code))
            .collect::<Vec<_>>();

        debug!(
            origin_sheets = config.total_current_classes,
            destination_rosters = destination_rosters.len(),
            "report built"
        );

        AssignmentReport {
            title: t_with_args(
                "report.title",
                &[
                    ("year", meta.year.to_string().as_str()),
                    ("grade", meta.grade.to_string().as_str()),
                ],
            ),
            meta: meta.clone(),
            method: config.assignment_method,
            statistics,
            origin_sheets,
            destination_rosters,
        }
    }

    // ==========================================
    // Statistics
    // ==========================================

    fn statistics(
        result: &AssignmentResult,
        roster: &[StudentRecord],
        config: &AssignmentConfig,
    ) -> StatisticsTable {
        // "before" counts the same population the engine placed
        let mut before: Vec<StatRow> = (1..=config.total_current_classes)
            .map(|n| StatRow::new(origin_label(n)))
            .collect();
        for student in roster.iter().filter(|s| s.has_name()) {
            let slot = (student.original_class as usize).checked_sub(1);
            if let Some(row) = slot.and_then(|i| before.get_mut(i)) {
                row.add(student.gender, 1);
            }
        }

        let after: Vec<StatRow> = result
            .stats
            .iter()
            .map(|(code, stats)| {
                let mut row = StatRow::new(destination_label(*code));
                row.add(Gender::M, stats.male);
                row.add(Gender::F, stats.female);
                row
            })
            .collect();

        StatisticsTable {
            before_total: sum_rows(&before),
            before,
            after_total: sum_rows(&after),
            after,
        }
    }

    // ==========================================
    // Origin class sheet
    // ==========================================

    fn origin_sheet(result: &AssignmentResult, origin_class: u32) -> OriginClassSheet {
        let rows_for = |gender: Gender| {
            let mut members: Vec<&AssignedStudent> = result
                .assigned
                .iter()
                .filter(|a| a.student.original_class == origin_class && a.student.gender == gender)
                .collect();
            members.sort_by_key(|a| a.student.rank);

            members
                .into_iter()
                .enumerate()
                .map(|(i, a)| OriginRow {
                    seq: i as u32 + 1,
                    student_id: a.student.id,
                    name: a.student.name.clone(),
                    new_class: new_class_cell(a),
                    remark: origin_remark(&a.student),
                })
                .collect::<Vec<_>>()
        };

        OriginClassSheet {
            origin_class,
            title: t_with_args("report.origin_sheet", &[("n", origin_class.to_string().as_str())]),
            boys: rows_for(Gender::M),
            girls: rows_for(Gender::F),
        }
    }

    // ==========================================
    // Destination roster
    // ==========================================

    fn destination_roster(result: &AssignmentResult, code: DestinationCode) -> Option<DestinationRoster> {
        let mut members: Vec<&AssignedStudent> = result.members_of(code).collect();
        if members.is_empty() {
            return None;
        }
        members.sort_by(|a, b| {
            compare_names(&a.student.name, &b.student.name).then(a.student.id.cmp(&b.student.id))
        });

        let rows = members
            .into_iter()
            .enumerate()
            .map(|(i, a)| DestinationRow {
                seq: i as u32 + 1,
                student_id: a.student.id,
                name: a.student.name.clone(),
                gender: gender_label(a.student.gender),
                origin_class: a.student.original_class,
                remark: if a.student.is_transfer {
                    t("report.transfer")
                } else {
                    a.student.note.clone()
                },
            })
            .collect();

        Some(DestinationRoster {
            code,
            title: t_with_args("report.destination_roster", &[("label", code.label())]),
            rows,
        })
    }
}

fn sum_rows(rows: &[StatRow]) -> StatRow {
    let mut total = StatRow::new(t("common.total"));
    for row in rows {
        total.add(Gender::M, row.male);
        total.add(Gender::F, row.female);
    }
    total
}

fn new_class_cell(assigned: &AssignedStudent) -> String {
    if assigned.is_manual {
        format!("{}{}", assigned.new_class.label(), t("report.manual_mark"))
    } else {
        assigned.new_class.label().to_string()
    }
}

/// "전출예정", the note, or "전출예정, note"
fn origin_remark(student: &StudentRecord) -> String {
    let note = student.note.trim();
    match (student.is_transfer, note.is_empty()) {
        (true, true) => t("report.transfer_planned"),
        (true, false) => format!("{}, {}", t("report.transfer_planned"), note),
        (false, _) => note.to_string(),
    }
}

pub fn origin_label(origin_class: u32) -> String {
    t_with_args("class.origin", &[("n", origin_class.to_string().as_str())])
}

pub fn destination_label(code: DestinationCode) -> String {
    t_with_args("class.destination", &[("label", code.label())])
}

pub fn gender_label(gender: Gender) -> String {
    match gender {
        Gender::M => t("gender.male"),
        Gender::F => t("gender.female"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::AssignmentMethod;
    use crate::engine::AssignmentEngine;
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};

    fn student(id: i64, name: &str, gender: Gender, rank: u32, class: u32) -> StudentRecord {
        StudentRecord {
            id,
            name: name.to_string(),
            gender,
            rank,
            note: String::new(),
            is_transfer: false,
            original_class: class,
            manual_class: None,
        }
    }

    fn roster() -> Vec<StudentRecord> {
        let mut transfer = student(3, "박서준", Gender::M, 1, 1);
        transfer.is_transfer = true;
        transfer.note = "6월".to_string();

        let mut pinned = student(4, "최지아", Gender::F, 2, 1);
        pinned.manual_class = DestinationCode::from_label("다");

        vec![
            student(1, "김민수", Gender::M, 2, 1),
            student(2, "이하늘", Gender::F, 1, 1),
            transfer,
            pinned,
            student(5, "강도윤", Gender::M, 1, 2),
            student(6, "", Gender::M, 3, 2),
        ]
    }

    fn config() -> AssignmentConfig {
        AssignmentConfig {
            total_current_classes: 2,
            total_new_classes: 3,
            assignment_method: AssignmentMethod::Staggered,
        }
    }

    fn build() -> AssignmentReport {
        let roster = roster();
        let result = AssignmentEngine::new().recompute(&roster, &config()).unwrap();
        ReportBuilder::build(&result, &roster, &config(), &ReportMeta::default())
    }

    #[test]
    fn test_statistics_totals_match() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let report = build();
        let stats = &report.statistics;

        assert_eq!(stats.before.len(), 2);
        assert_eq!(stats.before[0].label, "1반");
        assert_eq!((stats.before[0].male, stats.before[0].female), (2, 2));
        // blank name not counted
        assert_eq!(stats.before[1].total, 1);
        assert_eq!(stats.before_total.total, 5);
        assert_eq!(stats.after.len(), 3);
        assert_eq!(stats.after_total.total, stats.before_total.total);
        assert_eq!(stats.after_total.label, "계");
    }

    #[test]
    fn test_origin_sheet_rows() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let report = build();
        let sheet = &report.origin_sheets[0];

        assert_eq!(sheet.title, "1반 반편성표");
        // rank order, transfers included
        let boys: Vec<&str> = sheet.boys.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(boys, vec!["박서준", "김민수"]);
        assert_eq!(sheet.boys[0].remark, "전출예정, 6월");
        assert_eq!(sheet.boys[0].seq, 1);

        let pinned = sheet.girls.iter().find(|r| r.student_id == 4).unwrap();
        assert_eq!(pinned.new_class, "다*");
    }

    #[test]
    fn test_destination_rosters_sorted_by_name() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let report = build();

        for roster in &report.destination_rosters {
            assert!(!roster.rows.is_empty());
            let names: Vec<&str> = roster.rows.iter().map(|r| r.name.as_str()).collect();
            let mut sorted = names.clone();
            sorted.sort_by(|a, b| compare_names(a, b));
            assert_eq!(names, sorted);
        }

        let transfer_row = report
            .destination_rosters
            .iter()
            .flat_map(|r| r.rows.iter())
            .find(|r| r.student_id == 3)
            .unwrap();
        assert_eq!(transfer_row.remark, "전출");
        assert_eq!(transfer_row.gender, "남");
    }

    #[test]
    fn test_empty_destinations_skipped() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let roster = vec![student(1, "김민수", Gender::M, 1, 1)];
        let result = AssignmentEngine::new().recompute(&roster, &config()).unwrap();
        let report = ReportBuilder::build(&result, &roster, &config(), &ReportMeta::default());

        assert_eq!(report.destination_rosters.len(), 1);
        assert_eq!(report.statistics.after.len(), 3);
        assert_eq!(report.title, "2025학년도 1학년 반편성 결과");
    }
}
