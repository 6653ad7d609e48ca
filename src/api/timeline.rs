use std::collections::VecDeque;

use crate::client::{Client, RequestOptions};
use crate::error::{ApiError, ApiResult};
use crate::models::timeline::{TimelineItem, TimelineListResponse};
use async_trait::async_trait;

/// Timeline API methods
#[async_trait]
pub trait TimelineApi {
    /// Post an item to the timeline, returning the server's copy with
    /// the assigned `id` and metadata
    async fn insert_item(&self, item: &TimelineItem) -> ApiResult<TimelineItem>;

    /// Post an item and write the server-assigned metadata back onto the
    /// caller's copy, returning the assigned id
    async fn insert_item_mut(&self, item: &mut TimelineItem) -> ApiResult<String>;

    /// Delete a timeline item by id
    async fn delete_item(&self, id: &str) -> ApiResult<()>;

    /// Fetch one page of the timeline feed
    async fn list_page(&self, page_token: Option<&str>) -> ApiResult<TimelineListResponse>;

    /// Lazily walk the whole feed, page by page.
    ///
    /// Each call starts over from the first page; a cursor cannot be
    /// resumed mid-iteration.
    fn items(&self) -> TimelineItems<'_>;
}

#[async_trait]
impl TimelineApi for Client {
    async fn insert_item(&self, item: &TimelineItem) -> ApiResult<TimelineItem> {
        self.post("/timeline", item).await
    }

    async fn insert_item_mut(&self, item: &mut TimelineItem) -> ApiResult<String> {
        let created = self.insert_item(item).await?;
        let id = created
            .id
            .clone()
            .ok_or_else(|| ApiError::Decode("server response carried no item id".to_string()))?;

        item.id = created.id;
        item.kind = created.kind;
        item.created = created.created;
        item.updated = created.updated;
        item.etag = created.etag;
        item.self_link = created.self_link;
        item.creator = created.creator;

        Ok(id)
    }

    async fn delete_item(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/timeline/{}", urlencoding::encode(id)))
            .await
    }

    async fn list_page(&self, page_token: Option<&str>) -> ApiResult<TimelineListResponse> {
        let mut options = RequestOptions::new();
        if let Some(token) = page_token {
            options = options.query("pageToken", token);
        }
        self.get("/timeline", options).await
    }

    fn items(&self) -> TimelineItems<'_> {
        TimelineItems {
            client: self,
            buffer: VecDeque::new(),
            page_token: None,
            done: false,
        }
    }
}

/// Cursor over the timeline feed.
///
/// Fetches pages on demand: items of the current page are yielded in
/// order, then the next page is requested with the continuation token.
/// Iteration ends when a page comes back empty or without a token.
pub struct TimelineItems<'a> {
    client: &'a Client,
    buffer: VecDeque<TimelineItem>,
    page_token: Option<String>,
    done: bool,
}

impl TimelineItems<'_> {
    /// The next item of the feed, or `None` once the feed is exhausted
    pub async fn next(&mut self) -> ApiResult<Option<TimelineItem>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.done {
                return Ok(None);
            }

            let page = self.client.list_page(self.page_token.as_deref()).await?;
            if page.items.is_empty() {
                self.done = true;
                return Ok(None);
            }

            match page.next_page_token {
                Some(token) => self.page_token = Some(token),
                None => self.done = true,
            }
            self.buffer.extend(page.items);
        }
    }

    /// Drain the remaining feed into a vector
    pub async fn collect_all(mut self) -> ApiResult<Vec<TimelineItem>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}
