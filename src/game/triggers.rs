// Save triggers and player-facing notifications
//
// A hotkey save can't just call save: the board may be mid-swap. Instead
// the request is parked here and polled every frame until the board
// settles or the wait times out. While a request is parked, further save
// and load requests are ignored.

use std::fmt;
use std::time::Duration;

use crate::save::{SaveGate, SettleWait, WaitStatus};

/// Short messages shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    GameSaved,
    SaveFailed,
    SaveDeferred,
    NoSaveFound,
    LoadFailed,
    GameLoaded,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GameSaved => "Game Saved",
            Self::SaveFailed => "Save Failed",
            Self::SaveDeferred => "Save Deferred",
            Self::NoSaveFound => "No Save Found",
            Self::LoadFailed => "Load Failed",
            Self::GameLoaded => "Game Loaded",
        })
    }
}

/// What a frame's poll decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The board is idle; save to this slot now
    SaveNow(u32),
    /// The board never settled
    TimedOut(u32),
}

#[derive(Debug, Clone)]
struct PendingSave {
    slot: u32,
    wait: SettleWait,
}

#[derive(Debug, Clone)]
pub struct SaveTriggers {
    pending: Option<PendingSave>,
    settle_timeout: Duration,
}

impl SaveTriggers {
    pub fn new(settle_timeout: Duration) -> Self {
        SaveTriggers { pending: None, settle_timeout }
    }

    /// True while a hotkey save is waiting for the board
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Parks a save request until the board settles
    ///
    /// Returns false, and changes nothing, if one is already parked.
    pub fn request_save(&mut self, slot: u32) -> bool {
        if let Some(pending) = &self.pending {
            tracing::info!(slot, pending = pending.slot, "save already in progress, request ignored");
            return false;
        }
        self.pending = Some(PendingSave { slot, wait: SettleWait::new(self.settle_timeout) });
        true
    }

    /// Polls the parked request, once per frame
    pub fn update(&mut self, dt: Duration, gate: &dyn SaveGate) -> Option<TriggerEvent> {
        let pending = self.pending.as_mut()?;
        let slot = pending.slot;
        let event = match pending.wait.poll(dt, gate) {
            WaitStatus::Waiting => return None,
            WaitStatus::Ready => TriggerEvent::SaveNow(slot),
            WaitStatus::TimedOut => TriggerEvent::TimedOut(slot),
        };
        self.pending = None;
        Some(event)
    }
}
