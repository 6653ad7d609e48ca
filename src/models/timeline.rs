use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// The only `kind` value the timeline endpoint produces for items
pub const TIMELINE_ITEM_KIND: &str = "mirror#timelineItem";

/// Actions selectable from a timeline item's menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuAction {
    /// Triggers a callback to the API
    Custom,
    Reply,
    ReplyAll,
    Delete,
    Share,
    ReadAloud,
    VoiceCall,
    Navigate,
    TogglePinned,
    /// Needs a payload
    OpenUri,
    /// Needs a payload
    PlayVideo,
}

impl MenuAction {
    /// Whether this action requires a payload at construction time
    pub fn requires_payload(&self) -> bool {
        matches!(self, MenuAction::OpenUri | MenuAction::PlayVideo)
    }
}

/// A single entry in a timeline item's menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub action: MenuAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl MenuItem {
    /// Create a menu item, validating the payload requirement up front
    /// so a malformed item never reaches the network
    pub fn new(
        id: impl Into<String>,
        action: MenuAction,
        payload: Option<String>,
    ) -> ApiResult<Self> {
        if action.requires_payload() && payload.is_none() {
            return Err(ApiError::Validation(format!(
                "action {action:?} requires a payload"
            )));
        }

        Ok(Self {
            id: id.into(),
            action,
            payload,
        })
    }

    /// A DELETE menu item with a freshly generated identifier
    pub fn delete() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: MenuAction::Delete,
            payload: None,
        }
    }
}

/// Notification settings attached to a timeline item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: String,
}

impl Default for Notification {
    fn default() -> Self {
        // The API only defines one level
        Self {
            level: "DEFAULT".to_string(),
        }
    }
}

/// A single message/card entry in the remote feed.
///
/// Built locally through [`TimelineItem::builder`]; the server-assigned
/// fields (`id`, `created`, `updated`, `etag`, `self_link`, `creator`)
/// stay unset until the item has been posted. Absent fields are omitted
/// from the encoded JSON entirely, never emitted as nulls, and unknown
/// remote fields are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<serde_json::Value>,
}

impl TimelineItem {
    /// Start building a new item
    pub fn builder() -> TimelineItemBuilder {
        TimelineItemBuilder::default()
    }

    /// Append a menu item. Duplicate identifiers are the caller's
    /// responsibility; no uniqueness is enforced.
    pub fn add_menu_item(&mut self, item: MenuItem) {
        self.menu_items.push(item);
    }
}

/// Builder for [`TimelineItem`].
///
/// Exactly one of `text`/`html` must be supplied; `build` validates this
/// before the item can go anywhere near the network.
#[derive(Debug, Default)]
pub struct TimelineItemBuilder {
    text: Option<String>,
    html: Option<String>,
    kind: Option<String>,
    menu_items: Vec<MenuItem>,
    notification: Option<Notification>,
}

impl TimelineItemBuilder {
    /// Plain-text body, mutually exclusive with `html`
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// HTML body, mutually exclusive with `text`
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn menu_item(mut self, item: MenuItem) -> Self {
        self.menu_items.push(item);
        self
    }

    /// Attach a DELETE menu item with a freshly generated identifier
    pub fn with_delete_action(mut self) -> Self {
        self.menu_items.push(MenuItem::delete());
        self
    }

    /// Notify the wearer when the item arrives
    pub fn notify(mut self) -> Self {
        self.notification = Some(Notification::default());
        self
    }

    pub fn build(self) -> ApiResult<TimelineItem> {
        match (&self.text, &self.html) {
            (Some(_), Some(_)) => {
                return Err(ApiError::Validation(
                    "a timeline item takes either text or html, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(ApiError::Validation(
                    "a timeline item requires either text or html".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(kind) = &self.kind {
            if kind != TIMELINE_ITEM_KIND {
                return Err(ApiError::Validation(format!("kind `{kind}` is invalid")));
            }
        }

        Ok(TimelineItem {
            id: None,
            kind: self.kind,
            text: self.text,
            html: self.html,
            menu_items: self.menu_items,
            notification: self.notification,
            created: None,
            updated: None,
            etag: None,
            self_link: None,
            creator: None,
        })
    }
}

/// One page of the timeline feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineListResponse {
    pub kind: Option<String>,
    pub items: Vec<TimelineItem>,
    pub next_page_token: Option<String>,
}
