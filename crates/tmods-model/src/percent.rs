//! Percentage and status value types
//!
//! `Percent` is always in `0..=100`. Documents coming back from the store
//! are untrusted: deserialization clamps out-of-range values instead of
//! propagating garbage into the derivation functions.

use serde::{Deserialize, Deserializer, Serialize};

/// Whole-number completion percentage, clamped to `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    /// 0% complete
    pub const ZERO: Percent = Percent(0);
    /// 100% complete
    pub const COMPLETE: Percent = Percent(100);

    /// Construct from a value already known to be in range
    #[inline]
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    /// Construct by clamping arbitrary input into `0..=100`
    #[inline]
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(value.clamp(0, 100) as u8)
    }

    /// The raw percentage value
    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 == 100
    }

    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Corrupt documents may carry negative or over-100 values; clamp.
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::clamped(raw))
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Completion status shown on badges and written back to step-tracked
/// prerequisites. `NotApplicable` is the user-selectable `N/A` dropdown
/// value; the derivation functions never produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// 0% complete, or empty container
    #[serde(rename = "Not Started")]
    NotStarted,
    /// Strictly between 0% and 100%
    #[serde(rename = "In Progress")]
    InProgress,
    /// Exactly 100%
    Complete,
    /// User-selected "does not apply"
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Complete => "Complete",
            Status::NotApplicable => "N/A",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_new_rejects_out_of_range() {
        assert_eq!(Percent::new(100), Some(Percent::COMPLETE));
        assert_eq!(Percent::new(101), None);
    }

    #[test]
    fn percent_clamped_bounds() {
        assert_eq!(Percent::clamped(-5), Percent::ZERO);
        assert_eq!(Percent::clamped(250), Percent::COMPLETE);
        assert_eq!(Percent::clamped(42).value(), 42);
    }

    #[test]
    fn percent_deserialization_clamps_corrupt_values() {
        let p: Percent = serde_json::from_str("150").unwrap();
        assert_eq!(p, Percent::COMPLETE);
        let p: Percent = serde_json::from_str("-3").unwrap();
        assert_eq!(p, Percent::ZERO);
    }

    #[test]
    fn status_serializes_to_display_strings() {
        assert_eq!(
            serde_json::to_string(&Status::NotStarted).unwrap(),
            "\"Not Started\""
        );
        assert_eq!(serde_json::to_string(&Status::NotApplicable).unwrap(), "\"N/A\"");
    }
}
