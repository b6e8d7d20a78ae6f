//! Cobranca configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CobrancaConfig {
    /// Path to the contact spreadsheet (CSV).
    #[serde(default = "default_input")]
    pub input: String,
    /// Reminder message template with `{nome}`, `{valor}` and
    /// `{vencimento}` placeholders.
    #[serde(default = "default_template")]
    pub template: String,
    /// Country code prefixed to every phone number.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Pause between messages, in seconds. Keeps the send rate low
    /// enough to stay under the channel's anti-automation radar.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Seconds the channel gets to prepare its delivery surface
    /// before each send.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
    /// Minutes between the start of the run and the first slot.
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: u32,
    /// Minutes between consecutive slots.
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

fn default_input() -> String { "contatos.csv".into() }
fn default_country_code() -> String { "+55".into() }
fn default_interval_secs() -> u64 { 15 }
fn default_wait_secs() -> u64 { 15 }
fn default_lead_minutes() -> u32 { 2 }
fn default_step_minutes() -> u32 { 2 }

fn default_template() -> String {
    "Olá {nome}, tudo bem?\n\n\
     Este é um lembrete amigável sobre o pagamento pendente no valor de \
     R${valor} com vencimento em {vencimento}.\n\n\
     Por favor, regularize sua situação o quanto antes.\n\n\
     Atenciosamente,\nSua Empresa"
        .into()
}

impl Default for CobrancaConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            template: default_template(),
            country_code: default_country_code(),
            interval_secs: default_interval_secs(),
            wait_secs: default_wait_secs(),
            lead_minutes: default_lead_minutes(),
            step_minutes: default_step_minutes(),
            whatsapp: WhatsAppConfig::default(),
        }
    }
}

impl CobrancaConfig {
    /// Load config from the default path (~/.cobranca/config.toml).
    /// Missing file means defaults — only a present-but-broken file
    /// is an error.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::CobrancaError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::CobrancaError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::CobrancaError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cobranca")
            .join("config.toml")
    }

    /// Input path with `~` expanded.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.input).to_string())
    }
}

/// WhatsApp Business channel configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Facebook Graph API access token
    #[serde(default)]
    pub access_token: String,
    /// WhatsApp Phone Number ID
    #[serde(default)]
    pub phone_number_id: String,
}
