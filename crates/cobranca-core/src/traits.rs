//! The channel seam — anything that can deliver a reminder.

use async_trait::async_trait;

use crate::error::Result;

/// A messaging channel that delivers reminders at a scheduled
/// wall-clock slot. Implementations own their session state and are
/// expected to prepare the delivery surface themselves before the
/// scheduled time.
#[async_trait]
pub trait ReminderSender: Send + Sync {
    /// Channel name for logs.
    fn name(&self) -> &str;

    /// Establish/verify the channel session. Called once before the
    /// batch starts.
    async fn connect(&mut self) -> Result<()>;

    /// Deliver `message` to `to` (full international number) at the
    /// scheduled `hour`:`minute`, with `wait_secs` of preparation
    /// time before the send.
    async fn send_at(
        &self,
        to: &str,
        message: &str,
        hour: u32,
        minute: u32,
        wait_secs: u64,
    ) -> Result<()>;
}
