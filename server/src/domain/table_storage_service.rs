use std::sync::Arc;

use async_trait::async_trait;

use super::{TableClient, TableEntity, TableServiceClient, TableStorageError};

/// Point-key access to named tables over any [`TableEntity`].
#[async_trait]
pub trait TableStorage: Send + Sync {
    /// Creates the table if needed, then inserts the entity. Never upserts.
    async fn add_entity<T>(&self, table_name: &str, entity: &T) -> Result<(), TableStorageError>
    where
        T: TableEntity;

    /// Returns `Ok(None)` when the store answers 404; every other failure is returned as is.
    async fn get_entity<T>(
        &self,
        table_name: &str,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<T>, TableStorageError>
    where
        T: TableEntity;
}

pub struct TableStorageService<C: TableServiceClient> {
    table_service_client: Arc<C>,
}

impl<C: TableServiceClient> TableStorageService<C> {
    pub fn new(table_service_client: Arc<C>) -> Self {
        Self {
            table_service_client,
        }
    }
}

#[async_trait]
impl<C: TableServiceClient> TableStorage for TableStorageService<C> {
    async fn add_entity<T>(&self, table_name: &str, entity: &T) -> Result<(), TableStorageError>
    where
        T: TableEntity,
    {
        let table_client = self.table_service_client.table_client(table_name);
        table_client.create_if_not_exists().await?;
        table_client.add_entity(entity).await
    }

    async fn get_entity<T>(
        &self,
        table_name: &str,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<T>, TableStorageError>
    where
        T: TableEntity,
    {
        let table_client = self.table_service_client.table_client(table_name);

        match table_client.get_entity::<T>(partition_key, row_key).await {
            Ok(entity) => Ok(Some(entity)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
