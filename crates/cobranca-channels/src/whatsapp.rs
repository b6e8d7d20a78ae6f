//! WhatsApp Business Cloud API channel.
//!
//! Uses the official WhatsApp Business Platform (Cloud API) for messaging.
//! Requires: Access Token + Phone Number ID from Meta Business Suite.

use async_trait::async_trait;
use chrono::{Local, Timelike};
use cobranca_core::config::WhatsAppConfig;
use cobranca_core::error::{CobrancaError, Result};
use cobranca_core::traits::ReminderSender;
use std::time::Duration;

/// WhatsApp Business channel implementation.
pub struct WhatsAppChannel {
    config: WhatsAppConfig,
    client: reqwest::Client,
}

impl WhatsAppChannel {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Send a text message via WhatsApp Cloud API.
    async fn send_text_message(&self, to: &str, text: &str) -> Result<String> {
        let url = format!(
            "https://graph.facebook.com/v21.0/{}/messages",
            self.config.phone_number_id
        );

        let body = serde_json::json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": to,
            "type": "text",
            "text": {
                "preview_url": false,
                "body": text
            }
        });

        let response = self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.access_token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CobrancaError::Channel(format!("WhatsApp API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CobrancaError::Channel(format!(
                "WhatsApp API error {}: {}", status, error_text
            )));
        }

        let result: serde_json::Value = response.json().await
            .map_err(|e| CobrancaError::Channel(format!("Invalid WhatsApp response: {e}")))?;

        let msg_id = result["messages"][0]["id"]
            .as_str()
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!("WhatsApp message sent: {} → {}", msg_id, to);
        Ok(msg_id)
    }

    /// Verify the session against the Graph API. Used both at connect
    /// time and during the pre-send preparation window.
    async fn verify_session(&self) -> Result<()> {
        let url = format!(
            "https://graph.facebook.com/v21.0/{}",
            self.config.phone_number_id
        );

        let response = self.client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.access_token))
            .send()
            .await
            .map_err(|e| CobrancaError::Channel(format!("WhatsApp verification failed: {e}")))?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CobrancaError::AuthFailed(format!(
                "WhatsApp token verification failed: {}", text
            )));
        }
        Ok(())
    }
}

/// Seconds from `now` until today's `hour`:`minute`. Negative when the
/// slot is already behind us. Hours past 23 are taken literally (the
/// scheduler never wraps them), so a 24:05 slot lands 5 minutes after
/// the next midnight.
pub fn secs_until_slot(now_secs_from_midnight: u32, hour: u32, minute: u32) -> i64 {
    let target = i64::from(hour) * 3600 + i64::from(minute) * 60;
    target - i64::from(now_secs_from_midnight)
}

#[async_trait]
impl ReminderSender for WhatsAppChannel {
    fn name(&self) -> &str { "whatsapp" }

    async fn connect(&mut self) -> Result<()> {
        if self.config.access_token.is_empty() {
            return Err(CobrancaError::Config(
                "WhatsApp access_token not configured".into()
            ));
        }
        if self.config.phone_number_id.is_empty() {
            return Err(CobrancaError::Config(
                "WhatsApp phone_number_id not configured".into()
            ));
        }

        self.verify_session().await?;
        tracing::info!("WhatsApp Business: connected (phone_id={})", self.config.phone_number_id);
        Ok(())
    }

    async fn send_at(
        &self,
        to: &str,
        message: &str,
        hour: u32,
        minute: u32,
        wait_secs: u64,
    ) -> Result<()> {
        let now = Local::now().time().num_seconds_from_midnight();
        let delay = secs_until_slot(now, hour, minute);

        if delay < 0 {
            tracing::warn!("Slot {:02}:{:02} already passed, sending immediately", hour, minute);
        } else {
            // Sleep up to the preparation window, use it to re-verify
            // the session, then sleep the remainder of the way to the
            // slot itself.
            let prep = delay.min(wait_secs as i64) as u64;
            let idle = (delay as u64).saturating_sub(prep);
            if idle > 0 {
                tracing::debug!("Waiting {}s until slot {:02}:{:02}", idle, hour, minute);
                tokio::time::sleep(Duration::from_secs(idle)).await;
            }
            self.verify_session().await?;
            if prep > 0 {
                tokio::time::sleep(Duration::from_secs(prep)).await;
            }
        }

        self.send_text_message(to, message).await?;
        Ok(())
    }
}
