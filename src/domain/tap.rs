//! Single-tap vs. double-tap disambiguation
//!
//! This module tracks one finger's touch lifecycle and decides whether a
//! touch-down is the start of a single tap or the second half of a double
//! tap. Resolution is synchronous: a double tap is only reported when the
//! second touch-down arrives, never from a timer.
//!
//! ## Transitions
//! - `TouchUp` + down → `FirstTouchDown` (records the time, provisional down)
//! - `FirstTouchDown` + up → `TouchUp` (commits the tap)
//! - `TouchUp` + recognized tap → `FirstTouchUp` (arms double-tap detection)
//! - `FirstTouchUp` + down in time → `SecondTouchDown` (double tap)
//! - `SecondTouchDown` + up → `TouchUp`

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::core::Point;

/// Default window in which a second touch-down counts as a double tap
pub const DEFAULT_DOUBLE_TAP_INTERVAL: Duration = Duration::from_millis(800);

/// Touch lifecycle state for a single finger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapState {
    /// No finger is down and no double tap is pending
    #[default]
    TouchUp,
    /// First finger contact of a potential double tap
    FirstTouchDown,
    /// A tap completed and the double-tap window is open
    FirstTouchUp,
    /// Second contact of a recognized double tap
    SecondTouchDown,
}

/// What to do when a touch-down arrives in `FirstTouchUp` after the
/// double-tap window has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleDoubleTap {
    /// Start over: the touch-down is handled as a fresh first touch-down
    #[default]
    Restart,
    /// Stay in `FirstTouchUp` and drop the touch-down
    Hold,
}

/// Result of feeding one event to the tap machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// Provisional single touch-down, not yet confirmed as a tap
    SingleTouchDown(Point),
    /// Confirmed single tap
    SingleTouchUp(Point),
    /// Finger moved while down
    SingleTouchMoved(Point),
    /// Second touch-down within the double-tap window
    DoubleTap(Point),
    /// Contact was lost before it was lifted
    Cancelled,
    /// Event has no effect in the current state
    Ignored,
}

/// State machine classifying single-finger touch events
#[derive(Debug, Clone)]
pub struct TapMachine {
    state: TapState,
    first_touch_time: Option<Duration>,
    interval: Duration,
    stale_policy: StaleDoubleTap,
}

impl Default for TapMachine {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_INTERVAL, StaleDoubleTap::default())
    }
}

impl TapMachine {
    /// Creates a tap machine in the `TouchUp` state
    ///
    /// # Arguments
    /// * `interval` - Maximum delay between the first touch-down and the
    ///   second touch-down of a double tap
    /// * `stale_policy` - Behaviour when the window has already elapsed
    pub fn new(interval: Duration, stale_policy: StaleDoubleTap) -> Self {
        Self {
            state: TapState::TouchUp,
            first_touch_time: None,
            interval,
            stale_policy,
        }
    }

    /// Returns the current state
    pub fn state(&self) -> TapState {
        self.state
    }

    /// Returns the time of the first touch-down of the pending sequence
    pub fn first_touch_time(&self) -> Option<Duration> {
        self.first_touch_time
    }

    /// Returns the configured double-tap interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Handles a touch-down at `point` happening at `now`
    pub fn touch_down(&mut self, point: Point, now: Duration) -> TapOutcome {
        match self.state {
            TapState::TouchUp => self.begin_first_touch(point, now),
            TapState::FirstTouchUp => {
                let in_time = self
                    .first_touch_time
                    .is_some_and(|first| now <= first + self.interval);

                if in_time {
                    log::debug!(
                        "tap: FirstTouchUp -> SecondTouchDown at ({}, {})",
                        point.x,
                        point.y
                    );
                    self.state = TapState::SecondTouchDown;
                    return TapOutcome::DoubleTap(point);
                }

                match self.stale_policy {
                    StaleDoubleTap::Restart => self.begin_first_touch(point, now),
                    StaleDoubleTap::Hold => {
                        log::debug!("tap: stale double tap held in FirstTouchUp");
                        TapOutcome::Ignored
                    }
                }
            }
            TapState::FirstTouchDown | TapState::SecondTouchDown => TapOutcome::Ignored,
        }
    }

    /// Handles a touch-up at `point`
    pub fn touch_up(&mut self, point: Point) -> TapOutcome {
        match self.state {
            TapState::FirstTouchDown => {
                log::debug!("tap: FirstTouchDown -> TouchUp at ({}, {})", point.x, point.y);
                self.state = TapState::TouchUp;
                TapOutcome::SingleTouchUp(point)
            }
            TapState::SecondTouchDown => {
                log::debug!("tap: SecondTouchDown -> TouchUp");
                self.state = TapState::TouchUp;
                self.first_touch_time = None;
                TapOutcome::Ignored
            }
            TapState::TouchUp | TapState::FirstTouchUp => TapOutcome::Ignored,
        }
    }

    /// Handles a move while the finger is down; the state never changes
    pub fn touch_moved(&self, point: Point) -> TapOutcome {
        match self.state {
            TapState::FirstTouchDown | TapState::SecondTouchDown => {
                TapOutcome::SingleTouchMoved(point)
            }
            TapState::TouchUp | TapState::FirstTouchUp => TapOutcome::Ignored,
        }
    }

    /// Arms double-tap detection after a recognized single tap
    ///
    /// # Returns
    /// true if the machine moved to `FirstTouchUp`
    pub fn tap_recognized(&mut self) -> bool {
        if self.state == TapState::TouchUp && self.first_touch_time.is_some() {
            log::debug!("tap: TouchUp -> FirstTouchUp");
            self.state = TapState::FirstTouchUp;
            true
        } else {
            false
        }
    }

    /// Drops the current sequence after the platform lost the contact
    pub fn cancel(&mut self) -> TapOutcome {
        let was_down = matches!(
            self.state,
            TapState::FirstTouchDown | TapState::SecondTouchDown
        );
        self.reset();

        if was_down {
            TapOutcome::Cancelled
        } else {
            TapOutcome::Ignored
        }
    }

    /// Returns to `TouchUp` and forgets the first touch time
    pub fn reset(&mut self) {
        self.state = TapState::TouchUp;
        self.first_touch_time = None;
    }

    fn begin_first_touch(&mut self, point: Point, now: Duration) -> TapOutcome {
        log::debug!("tap: {:?} -> FirstTouchDown at ({}, {})", self.state, point.x, point.y);
        self.state = TapState::FirstTouchDown;
        self.first_touch_time = Some(now);
        TapOutcome::SingleTouchDown(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    const A: Point = Point::new(10.0, 20.0);
    const B: Point = Point::new(30.0, 40.0);

    #[test]
    fn default_state_is_touch_up() {
        let machine = TapMachine::default();
        assert_eq!(machine.state(), TapState::TouchUp);
        assert_eq!(machine.first_touch_time(), None);
        assert_eq!(machine.interval(), DEFAULT_DOUBLE_TAP_INTERVAL);
    }

    #[test]
    fn down_up_is_a_single_tap() {
        let mut machine = TapMachine::default();

        assert_eq!(machine.touch_down(A, ms(100)), TapOutcome::SingleTouchDown(A));
        assert_eq!(machine.state(), TapState::FirstTouchDown);
        assert_eq!(machine.first_touch_time(), Some(ms(100)));

        assert_eq!(machine.touch_up(A), TapOutcome::SingleTouchUp(A));
        assert_eq!(machine.state(), TapState::TouchUp);
    }

    #[test]
    fn moves_are_forwarded_only_while_down() {
        let mut machine = TapMachine::default();
        assert_eq!(machine.touch_moved(A), TapOutcome::Ignored);

        machine.touch_down(A, ms(0));
        assert_eq!(machine.touch_moved(B), TapOutcome::SingleTouchMoved(B));
        assert_eq!(machine.state(), TapState::FirstTouchDown);
    }

    #[test]
    fn second_down_within_interval_is_double_tap() {
        let mut machine = TapMachine::default();
        machine.touch_down(A, ms(1000));
        machine.touch_up(A);
        assert!(machine.tap_recognized());
        assert_eq!(machine.state(), TapState::FirstTouchUp);

        assert_eq!(machine.touch_down(B, ms(1800)), TapOutcome::DoubleTap(B));
        assert_eq!(machine.state(), TapState::SecondTouchDown);

        assert_eq!(machine.touch_moved(B), TapOutcome::SingleTouchMoved(B));
        assert_eq!(machine.touch_up(B), TapOutcome::Ignored);
        assert_eq!(machine.state(), TapState::TouchUp);
        assert_eq!(machine.first_touch_time(), None);
    }

    #[test]
    fn stale_second_down_restarts_by_default() {
        let mut machine = TapMachine::default();
        machine.touch_down(A, ms(0));
        machine.touch_up(A);
        machine.tap_recognized();

        assert_eq!(machine.touch_down(B, ms(801)), TapOutcome::SingleTouchDown(B));
        assert_eq!(machine.state(), TapState::FirstTouchDown);
        assert_eq!(machine.first_touch_time(), Some(ms(801)));
    }

    #[test]
    fn stale_second_down_can_be_held() {
        let mut machine = TapMachine::new(ms(800), StaleDoubleTap::Hold);
        machine.touch_down(A, ms(0));
        machine.touch_up(A);
        machine.tap_recognized();

        assert_eq!(machine.touch_down(B, ms(900)), TapOutcome::Ignored);
        assert_eq!(machine.state(), TapState::FirstTouchUp);
        assert_eq!(machine.first_touch_time(), Some(ms(0)));
    }

    #[test]
    fn tap_recognition_requires_a_completed_touch() {
        let mut machine = TapMachine::default();
        assert!(!machine.tap_recognized());

        machine.touch_down(A, ms(0));
        assert!(!machine.tap_recognized());
        assert_eq!(machine.state(), TapState::FirstTouchDown);
    }

    #[test]
    fn repeated_cycles_always_return_to_touch_up() {
        let mut machine = TapMachine::default();
        for cycle in 0..5u64 {
            machine.touch_down(A, ms(cycle * 2000));
            machine.touch_up(A);
            assert_eq!(machine.state(), TapState::TouchUp);
        }
    }

    #[test]
    fn cancel_resets_sequence() {
        let mut machine = TapMachine::default();
        assert_eq!(machine.cancel(), TapOutcome::Ignored);

        machine.touch_down(A, ms(0));
        assert_eq!(machine.cancel(), TapOutcome::Cancelled);
        assert_eq!(machine.state(), TapState::TouchUp);
        assert_eq!(machine.first_touch_time(), None);
        assert_eq!(machine.touch_up(A), TapOutcome::Ignored);
    }

    #[test]
    fn duplicate_down_is_ignored() {
        let mut machine = TapMachine::default();
        machine.touch_down(A, ms(0));
        assert_eq!(machine.touch_down(B, ms(10)), TapOutcome::Ignored);
        assert_eq!(machine.first_touch_time(), Some(ms(0)));
    }
}
