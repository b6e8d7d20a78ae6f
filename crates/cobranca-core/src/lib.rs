//! # Cobranca Core
//! Shared foundation for the Cobranca reminder sender:
//! configuration, errors, the contact record source, the message
//! template engine, and the channel trait.

pub mod config;
pub mod error;
pub mod records;
pub mod template;
pub mod traits;

pub use config::CobrancaConfig;
pub use error::{CobrancaError, Result};
pub use records::{ContactRecord, load_records};
pub use template::MessageTemplate;
pub use traits::ReminderSender;
