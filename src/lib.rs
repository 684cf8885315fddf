//! Telegram Channel Members Exporter
//!
//! This library provides tools to:
//! - Resolve configured channel names to addressable channel handles
//! - Page through each channel's participant list with an offset cursor
//! - Filter out bot accounts and normalize usernames
//! - Write the remaining members to per-channel UTF-16 CSV files

pub mod channel;
pub mod config;
pub mod error;
pub mod export;
pub mod members;
pub mod session;

// Re-export common types
pub use channel::ChannelHandle;
pub use config::Config;
pub use error::{Error, Result};
pub use members::{Member, Participant};
pub use session::{get_client, SessionLock};

pub mod commands;
