//! Participant pagination and member filtering
//!
//! The paginator walks a channel's participant list with an offset cursor;
//! filtering and username normalization are pure transforms over the
//! gathered pages.

use std::future::Future;

use grammers_client::Client;
use grammers_tl_types as tl;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::ChannelHandle;
use crate::config::{PAGE_DELAY, PAGE_LIMIT};
use crate::error::Result;

/// One exported row. Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
}

/// Raw participant as returned by the API, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Participant {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub bot: bool,
}

impl Participant {
    /// Map a raw API user. Empty user records carry nothing exportable.
    pub fn from_tl(user: &tl::enums::User) -> Option<Self> {
        match user {
            tl::enums::User::User(user) => Some(Self {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                username: user.username.clone(),
                phone: user.phone.clone(),
                bot: user.bot,
            }),
            tl::enums::User::Empty(_) => None,
        }
    }

    /// Turn an accepted participant into an export row. Bots are dropped.
    pub fn into_member(self) -> Option<Member> {
        if self.bot {
            return None;
        }

        Some(Member {
            first_name: self.first_name,
            last_name: self.last_name,
            username: normalize_username(self.username.as_deref()),
            phone: self.phone,
        })
    }
}

/// Prefix a present handle with `@`; an absent or empty handle stays absent.
pub fn normalize_username(username: Option<&str>) -> Option<String> {
    username
        .filter(|u| !u.is_empty())
        .map(|u| format!("@{}", u))
}

/// Drop bot accounts and normalize the rest, preserving page-arrival order.
pub fn filter_members(participants: Vec<Participant>) -> Vec<Member> {
    participants
        .into_iter()
        .filter_map(Participant::into_member)
        .collect()
}

/// Gather successive pages until one comes back empty.
///
/// The cursor starts at zero and advances by the length of each returned
/// page; a page that is shorter than requested but nonzero does not stop
/// the loop. A fixed delay separates consecutive requests.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(i32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut offset = 0i32;
    let mut items = Vec::new();

    loop {
        let page = fetch_page(offset).await?;
        if page.is_empty() {
            break;
        }

        offset += page.len() as i32;
        items.extend(page);

        tokio::time::sleep(PAGE_DELAY).await;
    }

    Ok(items)
}

/// Request one page of channel participants starting at `offset`.
pub async fn fetch_participants_page(
    client: &Client,
    channel: &ChannelHandle,
    offset: i32,
) -> Result<Vec<Participant>> {
    let request = tl::functions::channels::GetParticipants {
        channel: channel.to_input(),
        filter: tl::enums::ChannelParticipantsFilter::ChannelParticipantsSearch(
            tl::types::ChannelParticipantsSearch { q: String::new() },
        ),
        offset,
        limit: PAGE_LIMIT,
        hash: 0,
    };

    let users = match client.invoke(&request).await? {
        tl::enums::channels::ChannelParticipants::Participants(page) => page.users,
        tl::enums::channels::ChannelParticipants::NotModified => Vec::new(),
    };

    debug!(offset, count = users.len(), "Fetched participants page for {}", channel.name);

    Ok(users.iter().filter_map(Participant::from_tl).collect())
}
