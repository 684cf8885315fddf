//! Channel members export command
//!
//! Resolves every configured channel first, then runs one export task per
//! channel and waits for all of them together.

use std::future::Future;

use futures::future;
use grammers_client::Client;
use tracing::info;

use crate::channel::{resolve_channel, ChannelHandle};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::write_members_csv;
use crate::members::{collect_pages, fetch_participants_page, filter_members, Participant};
use crate::session::{get_client, SessionLock};

pub async fn run(config: &Config) -> Result<()> {
    let _lock = SessionLock::acquire()?;
    let client = get_client(config).await?;

    // Resolution is strictly sequential; a name that fails to resolve
    // aborts the run before any further task is spawned.
    let mut tasks = Vec::with_capacity(config.chat_names.len());
    for chat_name in &config.chat_names {
        let channel = resolve_channel(&client, chat_name).await?;
        let client = client.client.clone();
        tasks.push(tokio::spawn(async move {
            export_channel(&client, &channel).await
        }));
    }

    let results = future::try_join_all(tasks)
        .await
        .map_err(|e| Error::TaskFailed(e.to_string()))?;
    results.into_iter().collect::<Result<Vec<_>>>()?;

    Ok(())
}

/// Export one channel: paginate, filter, report, write.
async fn export_channel(client: &Client, channel: &ChannelHandle) -> Result<()> {
    info!("Gathering participants of {}", channel.name);

    export_from_pages(&channel.name, |offset| {
        fetch_participants_page(client, channel, offset)
    })
    .await?;

    Ok(())
}

/// Run the gather/filter/write pipeline against any page source.
///
/// Returns the number of exported members. The summary line is printed
/// before the file is written.
pub async fn export_from_pages<F, Fut>(chat_name: &str, fetch_page: F) -> Result<usize>
where
    F: FnMut(i32) -> Fut,
    Fut: Future<Output = Result<Vec<Participant>>>,
{
    let participants = collect_pages(fetch_page).await?;
    let members = filter_members(participants);

    println!("Gathered {} from {}", members.len(), chat_name);

    write_members_csv(chat_name, &members)?;

    Ok(members.len())
}
