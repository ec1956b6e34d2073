//! Completion arithmetic
//!
//! Pure, total functions. Rounding is to the nearest integer with ties
//! away from zero (`f64::round`); the choice only matters for display,
//! since the status label is exact-match sensitive only at 0 and 100.

use tmods_model::{Percent, Status, Step};

/// Percentage of completed steps in a checklist.
///
/// 0 for an empty list, else `round(100 * completed / total)`.
#[must_use]
pub fn step_completion(steps: &[Step]) -> Percent {
    if steps.is_empty() {
        return Percent::ZERO;
    }
    let completed = steps.iter().filter(|s| s.completed).count();
    ratio_percent(completed, steps.len())
}

/// Mean of already-derived percentages, rounded.
///
/// 0 for an empty collection. Used to roll actions into a part and parts
/// into a scope; a container with zero children is 0%, never "complete".
#[must_use]
pub fn mean_completion<I>(percents: I) -> Percent
where
    I: IntoIterator<Item = Percent>,
{
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for p in percents {
        sum += u64::from(p.value());
        count += 1;
    }
    if count == 0 {
        return Percent::ZERO;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    Percent::clamped((sum as f64 / count as f64).round() as i64)
}

/// Map a percentage to its status badge.
///
/// Exactly 100 is `Complete`, exactly 0 is `NotStarted`, everything in
/// between is `InProgress`. Never produces `NotApplicable`.
#[inline]
#[must_use]
pub fn status_label(percent: Percent) -> Status {
    if percent.is_complete() {
        Status::Complete
    } else if percent.is_zero() {
        Status::NotStarted
    } else {
        Status::InProgress
    }
}

/// `round(100 * numerator / denominator)` as a clamped percent.
/// Callers guarantee `denominator > 0`.
#[must_use]
pub(crate) fn ratio_percent(numerator: usize, denominator: usize) -> Percent {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    Percent::clamped((100.0 * numerator as f64 / denominator as f64).round() as i64)
}
