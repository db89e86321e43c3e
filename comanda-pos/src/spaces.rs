//! Space desk - occupancy management
//!
//! Staff flip tables between LIBRE, OCUPADA, RESERVADA and
//! MANTENIMIENTO by hand; nothing here derives occupancy from orders.
//! Same reload-after-write discipline as the order desk.

use crate::service::SpaceService;
use shared::error::AppResult;
use shared::models::{Space, SpaceStatus};
use std::sync::Arc;

pub struct SpaceDesk {
    service: Arc<dyn SpaceService>,
    spaces: Vec<Space>,
}

impl SpaceDesk {
    pub fn new(service: Arc<dyn SpaceService>) -> Self {
        Self {
            service,
            spaces: Vec::new(),
        }
    }

    pub async fn reload(&mut self) -> AppResult<()> {
        self.spaces = self.service.list_spaces().await?;
        tracing::debug!(count = self.spaces.len(), "spaces reloaded");
        Ok(())
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn space(&self, id: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id.as_deref() == Some(id))
    }

    /// Spaces a new order can target.
    pub fn free(&self) -> Vec<&Space> {
        self.spaces
            .iter()
            .filter(|s| s.is_active && s.status == SpaceStatus::Libre)
            .collect()
    }

    /// Changes a space's occupancy status.
    pub async fn set_status(&mut self, space_id: &str, status: SpaceStatus) -> AppResult<Space> {
        let updated = self.service.update_space_status(space_id, status).await?;
        tracing::info!(space_id = %space_id, status = ?status, "space status updated");
        self.reload().await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use shared::ErrorCode;
    use shared::models::SpaceKind;

    fn space(id: &str, status: SpaceStatus) -> Space {
        Space {
            id: Some(id.to_string()),
            code: id.to_uppercase(),
            name: format!("Mesa {}", id),
            kind: SpaceKind::Mesa,
            capacity: 4,
            status,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_set_status_reloads() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_space(space("m1", SpaceStatus::Libre));

        let mut desk = SpaceDesk::new(backend.clone());
        desk.reload().await.unwrap();
        assert_eq!(desk.free().len(), 1);

        let updated = desk.set_status("m1", SpaceStatus::Ocupada).await.unwrap();
        assert_eq!(updated.status, SpaceStatus::Ocupada);
        assert_eq!(desk.space("m1").unwrap().status, SpaceStatus::Ocupada);
        assert!(desk.free().is_empty());
    }

    #[tokio::test]
    async fn test_set_status_unknown_space_leaves_copy_untouched() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_space(space("m1", SpaceStatus::Libre));

        let mut desk = SpaceDesk::new(backend.clone());
        desk.reload().await.unwrap();

        let err = desk
            .set_status("m99", SpaceStatus::Ocupada)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SpaceNotFound);
        assert_eq!(desk.space("m1").unwrap().status, SpaceStatus::Libre);
    }
}
