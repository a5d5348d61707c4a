// ==========================================
// Assignment engine integration tests
// ==========================================
// Whole-pipeline properties over realistic rosters
// ==========================================

mod helpers;

use class_assign::domain::assignment::ExcludedReason;
use class_assign::domain::settings::AssignmentConfig;
use class_assign::domain::types::{AssignmentMethod, DestinationCode};
use class_assign::engine::{AssignmentEngine, EngineError};
use helpers::test_data_builder::{uniform_roster, StudentBuilder};

fn config(method: AssignmentMethod, current: u32, new: u32) -> AssignmentConfig {
    AssignmentConfig {
        total_current_classes: current,
        total_new_classes: new,
        assignment_method: method,
    }
}

fn code(label: &str) -> DestinationCode {
    DestinationCode::from_label(label).unwrap()
}

const METHODS: [AssignmentMethod; 3] = [
    AssignmentMethod::Simple,
    AssignmentMethod::Staggered,
    AssignmentMethod::Snake,
];

#[test]
fn test_recompute_is_deterministic_and_order_independent() {
    let roster = uniform_roster(5, 6, 5);
    let mut reversed = roster.clone();
    reversed.reverse();
    let engine = AssignmentEngine::new();

    for method in METHODS {
        let cfg = config(method, 5, 4);
        let first = engine.recompute(&roster, &cfg).unwrap();
        let second = engine.recompute(&roster, &cfg).unwrap();
        assert_eq!(first, second);

        let from_reversed = engine.recompute(&reversed, &cfg).unwrap();
        for assigned in &first.assigned {
            let other = from_reversed.find(assigned.student.id).unwrap();
            assert_eq!(other.new_class, assigned.new_class, "method {}", method);
        }
        assert_eq!(first.stats, from_reversed.stats);
    }
}

#[test]
fn test_full_cycles_balance_every_destination() {
    // 4 boys + 4 girls per class and K=4: each class sends one of each to every destination
    let roster = uniform_roster(5, 4, 4);
    let engine = AssignmentEngine::new();

    for method in METHODS {
        let result = engine.recompute(&roster, &config(method, 5, 4)).unwrap();
        assert_eq!(result.stats.len(), 4);
        for (code, stats) in &result.stats {
            assert_eq!(stats.male, 5, "{} {}", method, code);
            assert_eq!(stats.female, 5, "{} {}", method, code);
            assert!(stats.by_original_class.values().all(|&n| n == 2));
        }
    }
}

#[test]
fn test_stats_are_consistent_with_assignments() {
    let mut roster = uniform_roster(3, 7, 6);
    roster.push(StudentBuilder::new(900, "전출생").class(2).rank(1).transfer().build());
    roster.push(StudentBuilder::new(901, "고정생").girl().class(3).pinned("나").build());
    let result = AssignmentEngine::new()
        .recompute(&roster, &config(AssignmentMethod::Staggered, 3, 5))
        .unwrap();

    let total: u32 = result.stats.values().map(|s| s.total).sum();
    assert_eq!(total as usize, result.assigned.len());
    assert_eq!(result.total_assigned(), total);

    for (code, stats) in &result.stats {
        assert_eq!(stats.male + stats.female, stats.total);
        assert_eq!(stats.by_original_class.values().sum::<u32>(), stats.total);
        assert_eq!(result.members_of(*code).count() as u32, stats.total);
    }
    assert_eq!(result.stats.values().map(|s| s.transfer).sum::<u32>(), 1);
}

#[test]
fn test_manual_override_wins_without_moving_others() {
    let roster = uniform_roster(2, 4, 4);
    let engine = AssignmentEngine::new();
    let cfg = config(AssignmentMethod::Staggered, 2, 4);
    let baseline = engine.recompute(&roster, &cfg).unwrap();

    let mut pinned_roster = roster.clone();
    pinned_roster[0].manual_class = Some(code("라"));
    let pinned = engine.recompute(&pinned_roster, &cfg).unwrap();

    let target = pinned.find(pinned_roster[0].id).unwrap();
    assert!(target.is_manual);
    assert_eq!(target.new_class, code("라"));
    assert_eq!(target.auto_class, baseline.find(target.student.id).unwrap().auto_class);

    for assigned in pinned.assigned.iter().filter(|a| a.student.id != target.student.id) {
        let before = baseline.find(assigned.student.id).unwrap();
        assert_eq!(assigned.new_class, before.new_class);
    }
}

#[test]
fn test_transfer_students_are_dealt_last() {
    let roster = vec![
        StudentBuilder::new(1, "가람").rank(1).transfer().build(),
        StudentBuilder::new(2, "나래").rank(2).build(),
        StudentBuilder::new(3, "다온").rank(3).build(),
        StudentBuilder::new(4, "라온").rank(4).build(),
    ];
    let result = AssignmentEngine::new()
        .recompute(&roster, &config(AssignmentMethod::Staggered, 1, 4))
        .unwrap();

    let label_of = |id: i64| result.find(id).unwrap().new_class.label();
    assert_eq!(label_of(2), "가");
    assert_eq!(label_of(3), "나");
    assert_eq!(label_of(4), "다");
    assert_eq!(label_of(1), "라");
}

#[test]
fn test_empty_roster_yields_zero_rows() {
    let result = AssignmentEngine::new()
        .recompute(&[], &config(AssignmentMethod::Snake, 5, 6))
        .unwrap();

    assert!(result.assigned.is_empty());
    assert!(result.excluded.is_empty());
    assert_eq!(result.stats.len(), 6);
    assert!(result.stats.values().all(|s| s.total == 0));
}

#[test]
fn test_blank_and_out_of_range_records_are_excluded() {
    let roster = vec![
        StudentBuilder::new(1, "김민수").class(1).build(),
        StudentBuilder::new(2, "   ").class(1).build(),
        StudentBuilder::new(3, "이서연").girl().class(7).build(),
    ];
    let result = AssignmentEngine::new()
        .recompute(&roster, &config(AssignmentMethod::Simple, 5, 4))
        .unwrap();

    assert_eq!(result.assigned.len(), 1);
    assert_eq!(result.excluded.len(), 2);

    let reason_of = |id: i64| {
        result
            .excluded
            .iter()
            .find(|e| e.student_id == id)
            .map(|e| e.reason)
    };
    assert_eq!(reason_of(2), Some(ExcludedReason::BlankName));
    assert_eq!(reason_of(3), Some(ExcludedReason::OriginClassOutOfRange));
}

#[test]
fn test_stale_override_falls_back_to_auto_class() {
    let roster = vec![StudentBuilder::new(1, "김민수").pinned("바").build()];
    let result = AssignmentEngine::new()
        .recompute(&roster, &config(AssignmentMethod::Simple, 1, 4))
        .unwrap();

    let assigned = result.find(1).unwrap();
    assert!(!assigned.is_manual);
    assert_eq!(assigned.new_class, assigned.auto_class);
    assert_eq!(result.stale_overrides, vec![1]);
}

#[test]
fn test_invalid_destination_count_rejected() {
    let roster = uniform_roster(1, 1, 1);
    let engine = AssignmentEngine::new();

    for k in [0, 10] {
        let err = engine
            .recompute(&roster, &config(AssignmentMethod::Simple, 1, k))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    }
}
