// ==========================================
// Class Assign - in-partition ordering
// ==========================================
// Sort keys, applied in order:
// 1) non-transfer before transfer
// 2) rank ascending (0 = unranked sorts first)
// 3) name by collation (case-folded, then raw scalar order)
// 4) id ascending
// ==========================================

use crate::domain::student::StudentRecord;
use std::cmp::Ordering;

// ==========================================
// StudentSorter
// ==========================================
pub struct StudentSorter {
    // stateless
}

impl StudentSorter {
    pub fn new() -> Self {
        Self {}
    }

    /// Sort one (origin class, gender) partition in place
    pub fn sort(&self, students: &mut [&StudentRecord]) {
        students.sort_by(|a, b| self.compare(a, b));
    }

    /// Total order used to hand out sequential destination slots
    ///
    /// `Ordering::Less` means `a` is placed before `b`.
    pub fn compare(&self, a: &StudentRecord, b: &StudentRecord) -> Ordering {
        // 1. transfer students go last
        match a.is_transfer.cmp(&b.is_transfer) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. rank ascending
        match a.rank.cmp(&b.rank) {
            Ordering::Equal => {}
            other => return other,
        }

        // 3. name
        match compare_names(&a.name, &b.name) {
            Ordering::Equal => {}
            other => return other,
        }

        // 4. id keeps identical rows reproducible
        a.id.cmp(&b.id)
    }
}

impl Default for StudentSorter {
    fn default() -> Self {
        Self::new()
    }
}

/// Name collation shared by the engine and the report rosters
///
/// Precomposed Hangul syllables are laid out in 가나다 order, so scalar order
/// is dictionary order for Korean names. Latin names compare case-insensitively
/// first; the raw comparison only separates names that differ in case.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let a = a.trim();
    let b = b.trim();
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
