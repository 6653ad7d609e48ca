pub mod location;
pub mod timeline;

pub use location::Location;
pub use timeline::{
    MenuAction, MenuItem, Notification, TimelineItem, TimelineItemBuilder, TimelineListResponse,
};
