//! Channel name resolution

use grammers_client::types::peer::Peer;
use grammers_client::Client;
use grammers_tl_types as tl;

use crate::error::{Error, Result};

/// Resolved channel identity, held for the lifetime of that channel's
/// export task.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    pub id: i64,
    pub name: String,
    pub access_hash: i64,
}

impl ChannelHandle {
    /// Build the input form used to address the channel in raw requests.
    pub fn to_input(&self) -> tl::enums::InputChannel {
        tl::enums::InputChannel::Channel(tl::types::InputChannel {
            channel_id: self.id,
            access_hash: self.access_hash,
        })
    }
}

/// Resolve a channel name to its numeric id and access hash.
///
/// The name is accepted with or without a leading `@`. Anything that does
/// not resolve to a channel fails the whole run: resolution happens before
/// any export task is spawned.
pub async fn resolve_channel(client: &Client, name: &str) -> Result<ChannelHandle> {
    let username = name.trim_start_matches('@');

    let peer = client
        .resolve_username(username)
        .await
        .map_err(|e| Error::TelegramError(e.to_string()))?;

    match peer {
        Some(Peer::Channel(channel)) => {
            let access_hash = channel.raw.access_hash.ok_or_else(|| {
                Error::TelegramError(format!("Channel {} has no access hash", name))
            })?;

            Ok(ChannelHandle {
                id: channel.raw.id,
                name: name.to_string(),
                access_hash,
            })
        }
        Some(_) => {
            eprintln!("'{}' resolved to something that is not a channel", name);
            Err(Error::ChannelNotFound(name.to_string()))
        }
        None => {
            eprintln!("Chat/channel not found: {}", name);
            Err(Error::ChannelNotFound(name.to_string()))
        }
    }
}
