//! The remote API seam
//!
//! Everything the add-ins need from the fleet platform: list records of a
//! type (optionally filtered), and persist one record.

use crate::ClientResult;
use async_trait::async_trait;
use shared::{Entity, Search};
use std::sync::Arc;

/// Get/Set over typed records
#[async_trait]
pub trait FleetApi: Send + Sync {
    /// List records of `T`, optionally narrowed by search criteria
    async fn get<T: Entity>(&self, search: Option<&Search>) -> ClientResult<Vec<T>>;

    /// Persist a full record. Fails with `VersionConflict` when the record's
    /// version token no longer matches the stored one.
    async fn set<T: Entity>(&self, entity: &T) -> ClientResult<()>;

    /// Look up a single record by identifier
    async fn get_by_id<T: Entity>(&self, id: &str) -> ClientResult<Option<T>> {
        let search = Search::by_id(id);
        Ok(self.get::<T>(Some(&search)).await?.into_iter().next())
    }
}

#[async_trait]
impl<A: FleetApi> FleetApi for Arc<A> {
    async fn get<T: Entity>(&self, search: Option<&Search>) -> ClientResult<Vec<T>> {
        (**self).get(search).await
    }

    async fn set<T: Entity>(&self, entity: &T) -> ClientResult<()> {
        (**self).set(entity).await
    }

    async fn get_by_id<T: Entity>(&self, id: &str) -> ClientResult<Option<T>> {
        (**self).get_by_id(id).await
    }
}
