//! # Cobranca Scheduler
//!
//! Spaces a batch of reminders out over wall-clock time and drives
//! the one-pass dispatch loop.
//!
//! ```text
//! SlotCursor (start + lead)
//!   ├── record 0 → slot t+2min → send
//!   ├── record 1 → slot t+4min → send
//!   └── record n → slot t+2(n+1)min → send
//! each step: render → send → outcome → fixed pause
//! ```

pub mod dispatch;
pub mod slots;

pub use dispatch::{BatchReport, DispatchOptions, SendOutcome, run_batch};
pub use slots::{SendSlot, SlotCursor};
