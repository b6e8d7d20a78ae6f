//! # Cobranca Channels
//! Messaging channel implementations.

pub mod console;
pub mod whatsapp;

pub use console::ConsoleChannel;
pub use whatsapp::WhatsAppChannel;
