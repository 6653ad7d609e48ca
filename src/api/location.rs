use crate::client::{Client, RequestOptions};
use crate::error::ApiResult;
use crate::models::location::Location;
use async_trait::async_trait;

/// Location API methods
#[async_trait]
pub trait LocationApi {
    /// Get the wearer's last known location
    async fn latest_location(&self) -> ApiResult<Location>;
}

#[async_trait]
impl LocationApi for Client {
    async fn latest_location(&self) -> ApiResult<Location> {
        self.get("/locations/latest", RequestOptions::new()).await
    }
}
