/// Brightness classification with a noise-suppressing dead-band
use crate::models::{Brightness, PollState};

// Tier thresholds for the raw clear-channel reading.
const HIGH_THRESHOLD: i32 = 270;
const LOW_THRESHOLD: i32 = 3;

// The sensor's absolute noise grows with ambient light, so the dead-band
// widens once the last accepted reading passes this point.
const WIDE_TOLERANCE_ABOVE: i32 = 75;
const WIDE_TOLERANCE: i32 = 25;
const NARROW_TOLERANCE: i32 = 2;

/// An accepted reading: the tier now in effect, and whether it differs from
/// the tier that was in effect before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub tier: Brightness,
    pub changed: bool,
}

fn tolerance(last_reading: i32) -> i32 {
    if last_reading > WIDE_TOLERANCE_ABOVE {
        WIDE_TOLERANCE
    } else {
        NARROW_TOLERANCE
    }
}

fn classify(reading: i32) -> Brightness {
    if reading >= HIGH_THRESHOLD {
        Brightness::High
    } else if reading < LOW_THRESHOLD {
        Brightness::Low
    } else {
        Brightness::Medium
    }
}

/// Evaluate a new raw reading against the current poll state.
///
/// Readings within the tolerance window of the last accepted reading are
/// ignored entirely: no state change, no tier recomputation. Anything
/// outside the window is accepted, the state is updated and the new tier is
/// returned; `changed` reports whether the tier actually transitioned and
/// therefore whether the server should be notified.
///
/// Note the window is inclusive on both edges, and the tier thresholds are
/// independent of it: a reading in `[3, 270)` is always MEDIUM once
/// accepted, however small the jump that got it there.
pub fn process_reading(state: &mut PollState, reading: i32) -> Option<Update> {
    if (reading - state.last_reading).abs() <= tolerance(state.last_reading) {
        return None;
    }

    state.last_reading = reading;
    state.previous = state.current;
    state.current = classify(reading);

    Some(Update {
        tier: state.current,
        changed: state.previous != state.current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reading_escapes_sentinel() {
        // last_reading starts at -100, so even a reading of 1 is accepted
        let mut state = PollState::new();
        let update = process_reading(&mut state, 1).unwrap();
        assert_eq!(update.tier, Brightness::Low);
        assert!(update.changed); // previous was None
        assert_eq!(state.previous, Brightness::None);
        assert_eq!(state.last_reading, 1);
    }

    #[test]
    fn reading_inside_dead_band_is_ignored() {
        let mut state = PollState::new();
        process_reading(&mut state, 1);

        assert_eq!(process_reading(&mut state, 2), None);
        assert_eq!(state.last_reading, 1);
        assert_eq!(state.current, Brightness::Low);
    }

    #[test]
    fn dead_band_is_inclusive() {
        let mut state = PollState::new();
        process_reading(&mut state, 10);

        // |12 - 10| == 2, exactly on the narrow tolerance
        assert_eq!(process_reading(&mut state, 12), None);
        // |13 - 10| == 3 steps outside it
        assert!(process_reading(&mut state, 13).is_some());
    }

    #[test]
    fn small_jump_crosses_into_medium() {
        let mut state = PollState::new();
        process_reading(&mut state, 1);

        let update = process_reading(&mut state, 5).unwrap();
        assert_eq!(update.tier, Brightness::Medium);
        assert!(update.changed);
        assert_eq!(state.previous, Brightness::Low);
    }

    #[test]
    fn wide_tolerance_above_75() {
        let mut state = PollState::new();
        process_reading(&mut state, 80);

        // last_reading 80 > 75, so the window is 25 wide
        assert_eq!(process_reading(&mut state, 85), None);
        assert_eq!(process_reading(&mut state, 105), None);
        assert!(process_reading(&mut state, 106).is_some());
    }

    #[test]
    fn boundary_75_still_uses_narrow_tolerance() {
        let mut state = PollState::new();
        process_reading(&mut state, 75);

        // exactly 75 keeps the narrow window
        assert_eq!(process_reading(&mut state, 77), None);
        assert!(process_reading(&mut state, 78).is_some());
    }

    #[test]
    fn jump_to_high_from_bright_room() {
        let mut state = PollState::new();
        process_reading(&mut state, 80);

        let update = process_reading(&mut state, 270).unwrap();
        assert_eq!(update.tier, Brightness::High);
        assert!(update.changed);
        assert_eq!(state.previous, Brightness::Medium);
    }

    #[test]
    fn high_threshold_is_inclusive() {
        let mut state = PollState::new();
        process_reading(&mut state, 269);
        assert_eq!(state.current, Brightness::Medium);

        let mut state = PollState::new();
        process_reading(&mut state, 270);
        assert_eq!(state.current, Brightness::High);
    }

    #[test]
    fn low_threshold_is_exclusive() {
        let mut state = PollState::new();
        process_reading(&mut state, 2);
        assert_eq!(state.current, Brightness::Low);

        let mut state = PollState::new();
        process_reading(&mut state, 3);
        assert_eq!(state.current, Brightness::Medium);
    }

    #[test]
    fn accepted_reading_with_same_tier_does_not_flag_change() {
        let mut state = PollState::new();
        process_reading(&mut state, 10);
        process_reading(&mut state, 100);

        // 10 -> 100 -> 200 stays MEDIUM throughout the last step
        let update = process_reading(&mut state, 200).unwrap();
        assert_eq!(update.tier, Brightness::Medium);
        assert!(!update.changed);
    }

    #[test]
    fn darkening_back_to_low() {
        let mut state = PollState::new();
        process_reading(&mut state, 100);
        assert_eq!(state.current, Brightness::Medium);

        let update = process_reading(&mut state, 0).unwrap();
        assert_eq!(update.tier, Brightness::Low);
        assert!(update.changed);
    }
}
