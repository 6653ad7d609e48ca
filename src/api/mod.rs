pub mod location;
pub mod timeline;

// Re-export for convenience
pub use location::LocationApi;
pub use timeline::{TimelineApi, TimelineItems};
