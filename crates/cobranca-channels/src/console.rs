//! Console channel — dry-run sink that prints instead of sending.

use async_trait::async_trait;
use cobranca_core::error::Result;
use cobranca_core::traits::ReminderSender;

/// Prints each reminder to stdout. No session, no waiting; useful for
/// checking the rendered messages and slots before a real run.
#[derive(Debug, Default)]
pub struct ConsoleChannel;

#[async_trait]
impl ReminderSender for ConsoleChannel {
    fn name(&self) -> &str { "console" }

    async fn connect(&mut self) -> Result<()> {
        tracing::info!("Console channel: dry-run mode, nothing will be sent");
        Ok(())
    }

    async fn send_at(
        &self,
        to: &str,
        message: &str,
        hour: u32,
        minute: u32,
        _wait_secs: u64,
    ) -> Result<()> {
        println!("--- {to} @ {hour:02}:{minute:02} ---");
        println!("{message}");
        Ok(())
    }
}
