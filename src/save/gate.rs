//! Save safety gate
//!
//! A save taken while pieces are mid-swap would record a board that never
//! existed at rest. The gate is asked before every capture; when it says no,
//! the save is deferred and nothing on disk changes.

use std::time::Duration;

use crate::match3::BoardActivity;

/// Decides whether the live game is in a state worth saving
pub trait SaveGate {
    fn is_safe_to_save(&self) -> bool;
}

/// Unsafe only while a board exists and is animating
#[derive(Clone, Copy, Default)]
pub struct BoardSafetyGate<'a> {
    board: Option<&'a dyn BoardActivity>,
}

impl<'a> BoardSafetyGate<'a> {
    pub fn new(board: Option<&'a dyn BoardActivity>) -> Self {
        BoardSafetyGate { board }
    }
}

impl SaveGate for BoardSafetyGate<'_> {
    fn is_safe_to_save(&self) -> bool {
        self.board.is_none_or(|board| !board.is_processing())
    }
}

/// Always safe; for saves made outside gameplay
pub struct AlwaysSafe;

impl SaveGate for AlwaysSafe {
    fn is_safe_to_save(&self) -> bool {
        true
    }
}

/// Result of one [`SettleWait::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// Board still busy and time remains
    Waiting,
    /// Safe to save now
    Ready,
    /// Gave up; the caller should report a failed save
    TimedOut,
}

/// Bounded "wait for a stable board" timer
///
/// Polled once per frame with the frame delta. Never blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct SettleWait {
    elapsed: Duration,
    timeout: Duration,
}

impl SettleWait {
    pub fn new(timeout: Duration) -> Self {
        SettleWait { elapsed: Duration::ZERO, timeout }
    }

    /// Advances the timer and checks the gate
    ///
    /// Safety is checked before the timeout, so a board that settles on the
    /// last frame still saves.
    pub fn poll(&mut self, dt: Duration, gate: &dyn SaveGate) -> WaitStatus {
        if gate.is_safe_to_save() {
            return WaitStatus::Ready;
        }
        self.elapsed += dt;
        if self.elapsed >= self.timeout {
            tracing::warn!(elapsed = ?self.elapsed, "board never settled, giving up on save");
            WaitStatus::TimedOut
        } else {
            WaitStatus::Waiting
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeBoard(Cell<bool>);

    impl BoardActivity for FakeBoard {
        fn is_processing(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_no_board_is_safe() {
        assert!(BoardSafetyGate::new(None).is_safe_to_save());
    }

    #[test]
    fn test_busy_board_is_unsafe() {
        let board = FakeBoard(Cell::new(true));
        let gate = BoardSafetyGate::new(Some(&board));
        assert!(!gate.is_safe_to_save());
        board.0.set(false);
        assert!(gate.is_safe_to_save());
    }

    #[test]
    fn test_settle_wait_ready_when_idle() {
        let board = FakeBoard(Cell::new(true));
        let gate = BoardSafetyGate::new(Some(&board));
        let mut wait = SettleWait::new(Duration::from_secs(5));

        assert_eq!(wait.poll(Duration::from_millis(16), &gate), WaitStatus::Waiting);
        board.0.set(false);
        assert_eq!(wait.poll(Duration::from_millis(16), &gate), WaitStatus::Ready);
    }

    #[test]
    fn test_settle_wait_times_out() {
        let board = FakeBoard(Cell::new(true));
        let gate = BoardSafetyGate::new(Some(&board));
        let mut wait = SettleWait::new(Duration::from_secs(1));

        for _ in 0..3 {
            assert_eq!(wait.poll(Duration::from_millis(300), &gate), WaitStatus::Waiting);
        }
        assert_eq!(wait.poll(Duration::from_millis(300), &gate), WaitStatus::TimedOut);
        assert_eq!(wait.elapsed(), Duration::from_millis(1200));
    }
}
