use async_trait::async_trait;

use super::{TableEntity, TableStorageError};

/// Handle to a single named table.
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Creates the table unless it already exists.
    async fn create_if_not_exists(&self) -> Result<(), TableStorageError>;

    /// Inserts the entity. Fails with a conflict if its key is already taken.
    async fn add_entity<T>(&self, entity: &T) -> Result<(), TableStorageError>
    where
        T: TableEntity;

    /// Point lookup. Fails with a 404 when the table or the entity is absent.
    async fn get_entity<T>(&self, partition_key: &str, row_key: &str) -> Result<T, TableStorageError>
    where
        T: TableEntity;
}

/// Process-wide client for a storage account. Constructed once by the host and
/// shared by reference; handing out table clients never touches the network.
pub trait TableServiceClient: Send + Sync + 'static {
    type TableClient: TableClient;

    fn table_client(&self, table_name: &str) -> Self::TableClient;
}
