//! Alignment tracking - a bounded three-axis state.
//!
//! A character sits at a position on a five-step moral/ethical track, with
//! two independent tick tracks recording progress toward shifting up or
//! down. The ticks never move the position by themselves; shifting alignment
//! is a deliberate admin edit, not an overflow rule.
//!
//! Stored as a bare JSON triple `[alignment, upTicks, downTicks]`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::coerce;
use crate::DomainError;

/// Lowest alignment position.
pub const ALIGNMENT_MIN: i64 = 1;
/// Highest alignment position.
pub const ALIGNMENT_MAX: i64 = 5;
/// Length of each tick track.
pub const ALIGNMENT_MAX_TICKS: usize = 4;

/// Validated alignment state. Construction always checks ranges, so a value
/// of this type is in-range by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentData {
    alignment: u8,
    up_ticks: u8,
    down_ticks: u8,
}

impl AlignmentData {
    /// Create validated alignment data.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the position is outside `1..=5` or
    /// either tick count is outside `0..=4`.
    pub fn new(alignment: i64, up_ticks: i64, down_ticks: i64) -> Result<Self, DomainError> {
        if !(ALIGNMENT_MIN..=ALIGNMENT_MAX).contains(&alignment) {
            return Err(DomainError::validation(format!(
                "alignment must be between {ALIGNMENT_MIN} and {ALIGNMENT_MAX}, got {alignment}"
            )));
        }
        for (name, ticks) in [("upTicks", up_ticks), ("downTicks", down_ticks)] {
            if !(0..=ALIGNMENT_MAX_TICKS as i64).contains(&ticks) {
                return Err(DomainError::validation(format!(
                    "{name} must be between 0 and {ALIGNMENT_MAX_TICKS}, got {ticks}"
                )));
            }
        }
        Ok(Self {
            alignment: alignment as u8,
            up_ticks: up_ticks as u8,
            down_ticks: down_ticks as u8,
        })
    }

    /// Parse a stored `[alignment, upTicks, downTicks]` triple.
    ///
    /// Accepts only a 3-element array whose elements coerce to in-range
    /// integers. Any failure means "no data": the tuple is rejected whole,
    /// never partially accepted.
    pub fn parse(payload: &Value) -> Option<Self> {
        let items = payload.as_array()?;
        if items.len() != 3 {
            return None;
        }
        let alignment = coerce::as_integer(&items[0])?;
        let up_ticks = coerce::as_integer(&items[1])?;
        let down_ticks = coerce::as_integer(&items[2])?;
        Self::new(alignment, up_ticks, down_ticks).ok()
    }

    /// Storage form: the bare triple.
    pub fn to_json(&self) -> Value {
        json!([self.alignment, self.up_ticks, self.down_ticks])
    }

    /// Position on the moral/ethical track, `1..=5`.
    pub fn alignment(&self) -> u8 {
        self.alignment
    }

    /// Progress toward shifting up, `0..=4`.
    pub fn up_ticks(&self) -> u8 {
        self.up_ticks
    }

    /// Progress toward shifting down, `0..=4`.
    pub fn down_ticks(&self) -> u8 {
        self.down_ticks
    }

    /// Up-tick slots for rendering: filled from the left.
    pub fn up_slots(&self) -> [bool; ALIGNMENT_MAX_TICKS] {
        let mut slots = [false; ALIGNMENT_MAX_TICKS];
        for slot in slots.iter_mut().take(self.up_ticks as usize) {
            *slot = true;
        }
        slots
    }

    /// Down-tick slots for rendering: filled from the right, closest to the
    /// alignment pointer first.
    pub fn down_slots(&self) -> [bool; ALIGNMENT_MAX_TICKS] {
        let mut slots = [false; ALIGNMENT_MAX_TICKS];
        for slot in slots.iter_mut().rev().take(self.down_ticks as usize) {
            *slot = true;
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_tuples_round_trip() {
        for payload in [json!([1, 0, 0]), json!([3, 2, 4]), json!([5, 4, 0])] {
            let data = AlignmentData::parse(&payload).expect("valid tuple");
            assert_eq!(data.to_json(), payload);
        }
    }

    #[test]
    fn boundary_failures_return_none() {
        for payload in [
            json!([0, 2, 2]),
            json!([6, 2, 2]),
            json!([3, 5, 2]),
            json!([3, 2, -1]),
        ] {
            assert_eq!(AlignmentData::parse(&payload), None, "payload: {payload}");
        }
    }

    #[test]
    fn wrong_shape_returns_none() {
        assert_eq!(AlignmentData::parse(&json!(null)), None);
        assert_eq!(AlignmentData::parse(&json!({"alignment": 3})), None);
        assert_eq!(AlignmentData::parse(&json!([3, 2])), None);
        assert_eq!(AlignmentData::parse(&json!([3, 2, 1, 0])), None);
    }

    #[test]
    fn non_integer_elements_reject_the_whole_tuple() {
        assert_eq!(AlignmentData::parse(&json!([3, 2.5, 1])), None);
        assert_eq!(AlignmentData::parse(&json!([3, "two", 1])), None);
        assert_eq!(AlignmentData::parse(&json!([[3], 2, 1])), None);
    }

    #[test]
    fn null_and_bool_elements_are_not_coerced_to_numbers() {
        // Stricter than loose dynamic coercion: no null-means-zero or
        // true-means-one reading of a tick slot.
        assert_eq!(AlignmentData::parse(&json!([3, null, 0])), None);
        assert_eq!(AlignmentData::parse(&json!([3, true, 0])), None);
    }

    #[test]
    fn numeric_strings_coerce_like_stored_legacy_rows() {
        let data = AlignmentData::parse(&json!(["3", "2", "1"])).expect("coerced tuple");
        assert_eq!(data.to_json(), json!([3, 2, 1]));
    }

    #[test]
    fn new_rejects_out_of_range_components() {
        assert!(AlignmentData::new(0, 0, 0).is_err());
        assert!(AlignmentData::new(3, 5, 0).is_err());
        assert!(AlignmentData::new(3, 0, 5).is_err());
        assert!(AlignmentData::new(5, 4, 4).is_ok());
    }

    #[test]
    fn up_slots_fill_from_the_left() {
        let data = AlignmentData::new(3, 2, 0).expect("valid");
        assert_eq!(data.up_slots(), [true, true, false, false]);
    }

    #[test]
    fn down_slots_fill_from_the_right() {
        let data = AlignmentData::new(3, 0, 2).expect("valid");
        assert_eq!(data.down_slots(), [false, false, true, true]);
    }

    #[test]
    fn four_down_ticks_do_not_shift_alignment() {
        // Observed behavior: a full down track is just a full track. There
        // is no automatic transition rule.
        let data = AlignmentData::parse(&json!([3, 0, 4])).expect("valid");
        assert_eq!(data.alignment(), 3);
        assert_eq!(data.down_slots(), [true, true, true, true]);
    }
}
