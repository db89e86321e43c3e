//! Space API - tables, bar seats and delivery slots

use crate::error::ClientResult;
use crate::http::HttpTransport;
use shared::models::{Space, SpaceCreate, SpaceStatus, SpaceUpdate, SpaceUpdateStatus};

/// Typed handle for space endpoints.
#[derive(Debug, Clone)]
pub struct SpaceApi {
    http: HttpTransport,
}

impl SpaceApi {
    pub(crate) fn new(http: HttpTransport) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Space>> {
        self.http.get("/api/spaces").await
    }

    pub async fn create(&self, data: &SpaceCreate) -> ClientResult<Space> {
        self.http.post("/api/spaces", data).await
    }

    pub async fn update(&self, id: &str, data: &SpaceUpdate) -> ClientResult<Space> {
        self.http.put(&format!("/api/spaces/{id}"), data).await
    }

    /// Changes the occupancy status of a space.
    pub async fn update_status(&self, id: &str, status: SpaceStatus) -> ClientResult<Space> {
        let body = SpaceUpdateStatus { status };
        self.http
            .put(&format!("/api/spaces/{id}/status"), &body)
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("/api/spaces/{id}")).await
    }
}
