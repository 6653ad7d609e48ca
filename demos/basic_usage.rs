use std::sync::Arc;

use anyhow::Result;
use mirror_api::api::{LocationApi, TimelineApi};
use mirror_api::models::{MenuAction, MenuItem, TimelineItem};
use mirror_api::{Client, ClientConfig, StaticToken};

#[tokio::main]
async fn main() -> Result<()> {
    let token = std::env::var("MIRROR_ACCESS_TOKEN")
        .expect("set MIRROR_ACCESS_TOKEN to a valid bearer token");

    let config = ClientConfig::new("https://www.googleapis.com/mirror/v1").with_timeout(30);
    let client = Client::new(config, Arc::new(StaticToken::new(token)))?;

    // Post a card with a reply action and an auto-generated delete action
    let mut item = TimelineItem::builder()
        .text("Hello from mirror-api")
        .menu_item(MenuItem::new("reply-1", MenuAction::Reply, None)?)
        .with_delete_action()
        .notify()
        .build()?;

    let id = client.insert_item_mut(&mut item).await?;
    println!("posted timeline item {id}");

    // Walk the feed
    let mut cursor = client.items();
    while let Some(item) = cursor.next().await? {
        println!(
            "{}: {}",
            item.id.as_deref().unwrap_or("?"),
            item.text.as_deref().unwrap_or("<html card>")
        );
    }

    // Where is the wearer?
    let location = client.latest_location().await?;
    println!(
        "last seen at ({}, {}) ±{}m",
        location.latitude, location.longitude, location.accuracy
    );

    // Clean up the card we just posted
    client.delete_item(&id).await?;
    println!("deleted timeline item {id}");

    Ok(())
}
