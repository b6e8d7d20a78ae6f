//! Send-slot arithmetic.
//!
//! The cursor is a plain value threaded through the dispatch loop —
//! no global clock state. Minute overflow carries into the hour; the
//! hour is deliberately NOT wrapped at 24 (upstream behavior past
//! midnight is unspecified, so we flag it instead of fixing it).

use chrono::{Local, Timelike};

/// One scheduled delivery time, local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendSlot {
    pub hour: u32,
    pub minute: u32,
}

impl SendSlot {
    /// True once the cursor has walked past 23:59. Such slots have no
    /// defined delivery semantics; the dispatcher warns about them.
    pub fn past_midnight(&self) -> bool {
        self.hour > 23
    }
}

impl std::fmt::Display for SendSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Generator of evenly spaced send slots.
#[derive(Debug, Clone, Copy)]
pub struct SlotCursor {
    slot: SendSlot,
    step_minutes: u32,
}

impl SlotCursor {
    /// Seed from an explicit start time. The first slot produced is
    /// `lead_minutes` after (`hour`, `minute`), giving the channel
    /// time to get ready.
    pub fn from_time(hour: u32, minute: u32, lead_minutes: u32, step_minutes: u32) -> Self {
        Self {
            slot: normalize(hour, minute + lead_minutes),
            step_minutes,
        }
    }

    /// Seed from the local wall clock.
    pub fn starting_now(lead_minutes: u32, step_minutes: u32) -> Self {
        let now = Local::now();
        Self::from_time(now.hour(), now.minute(), lead_minutes, step_minutes)
    }

    /// Produce the next slot and the advanced cursor. Pure: calling
    /// it twice on the same cursor gives the same answer.
    pub fn next(self) -> (SendSlot, SlotCursor) {
        let slot = self.slot;
        let advanced = Self {
            slot: normalize(slot.hour, slot.minute + self.step_minutes),
            step_minutes: self.step_minutes,
        };
        (slot, advanced)
    }
}

/// Carry minute overflow into the hour. The hour itself is left
/// unbounded on purpose.
fn normalize(hour: u32, minute: u32) -> SendSlot {
    SendSlot {
        hour: hour + minute / 60,
        minute: minute % 60,
    }
}
