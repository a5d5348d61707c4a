use crate::domain::types::{AssignmentMethod, Gender};

/// Start slot for one (origin class, gender) partition
///
/// - simple: 0 for everyone
/// - staggered: boys `(g-1) mod K`, girls `g mod K`
/// - snake: `(g-1) mod K` for both genders
///
/// `k` must be non-zero; the engine rejects such configs up front.
pub fn start_index(method: AssignmentMethod, origin_class: u32, gender: Gender, k: u32) -> u32 {
    let base = origin_class.saturating_sub(1) % k;
    match method {
        AssignmentMethod::Simple => 0,
        AssignmentMethod::Staggered => match gender {
            Gender::M => base,
            Gender::F => origin_class % k,
        },
        AssignmentMethod::Snake => base,
    }
}

/// Destination index for the member at `position` of a sorted partition
///
/// Snake reverses the direction on even origin classes:
/// `K - 1 - ((start + i) mod K)`.
pub fn target_index(
    method: AssignmentMethod,
    origin_class: u32,
    start: u32,
    position: usize,
    k: u32,
) -> u32 {
    let step = (position % k as usize) as u32;
    let forward = (start + step) % k;

    if method == AssignmentMethod::Snake && origin_class % 2 == 0 {
        k - 1 - forward
    } else {
        forward
    }
}
