//! Entities API.

use crate::client::ApiAiClient;
use crate::error::Result;
use crate::types::{Entity, EntityDescription, EntityEntry, StatusResponse};

/// Entities API client.
pub struct EntitiesApi {
    client: ApiAiClient,
}

impl EntitiesApi {
    pub(crate) fn new(client: ApiAiClient) -> Self {
        Self { client }
    }

    /// List all developer entities.
    pub async fn list(&self) -> Result<Vec<EntityDescription>> {
        self.client.get("entities").await
    }

    /// Get an entity with its full entry list, by ID or name.
    pub async fn get(&self, id: &str) -> Result<Entity> {
        self.client.get(&format!("entities/{}", id)).await
    }

    /// Create a new entity.
    pub async fn create(&self, entity: &Entity) -> Result<StatusResponse> {
        self.client.post("entities", entity).await
    }

    /// Replace several entities in one call.
    pub async fn update_all(&self, entities: &[Entity]) -> Result<StatusResponse> {
        self.client.put("entities", entities).await
    }

    /// Update an entity by ID or name.
    pub async fn update(&self, id: &str, entity: &Entity) -> Result<StatusResponse> {
        self.client.put(&format!("entities/{}", id), entity).await
    }

    /// Add entries to an entity.
    pub async fn add_entries(&self, id: &str, entries: &[EntityEntry]) -> Result<StatusResponse> {
        self.client
            .post(&format!("entities/{}/entries", id), entries)
            .await
    }

    /// Update entries of an entity. Entries are matched by canonical value.
    pub async fn update_entries(&self, id: &str, entries: &[EntityEntry]) -> Result<StatusResponse> {
        self.client
            .put(&format!("entities/{}/entries", id), entries)
            .await
    }

    /// Delete an entity by ID or name.
    pub async fn delete(&self, id: &str) -> Result<StatusResponse> {
        self.client.delete(&format!("entities/{}", id)).await
    }

    /// Delete entries from an entity by canonical value.
    pub async fn delete_entries(&self, id: &str, values: &[String]) -> Result<StatusResponse> {
        self.client
            .delete_with_body(&format!("entities/{}/entries", id), values)
            .await
    }
}
