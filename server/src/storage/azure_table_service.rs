use async_trait::async_trait;
use azure_data_tables::{
    clients::TableServiceClientBuilder, operations::InsertEntityResponse, prelude,
};
use azure_storage::{CloudLocation, StorageCredentials};

use crate::domain::{
    ConnectionString, TableClient, TableEntity, TableServiceClient, TableStorageError,
};

static TABLE_ALREADY_EXISTS: &str = "TableAlreadyExists";

impl From<azure_core::error::Error> for TableStorageError {
    fn from(err: azure_core::error::Error) -> Self {
        match err.kind() {
            azure_core::error::ErrorKind::HttpResponse {
                status,
                error_code,
                ..
            } => TableStorageError::RequestFailed {
                status: *status as u16,
                error_code: error_code.clone(),
                message: err.to_string(),
            },
            _ => TableStorageError::Transport(err.to_string()),
        }
    }
}

/// Table service backed by an Azure storage account.
pub struct AzureTableServiceClient {
    endpoint: String,
    table_service: prelude::TableServiceClient,
}

impl AzureTableServiceClient {
    /// Public cloud endpoint of the account.
    pub fn new(account: String, access_key: String) -> Self {
        let endpoint = format!("https://{account}.table.core.windows.net");
        Self::with_endpoint(account, access_key, endpoint)
    }

    pub fn with_endpoint(account: String, access_key: String, endpoint: String) -> Self {
        let storage_credentials = StorageCredentials::access_key(account.clone(), access_key);
        let location = CloudLocation::Custom {
            account,
            uri: endpoint.clone(),
        };
        let table_service =
            TableServiceClientBuilder::with_location(location, storage_credentials).build();

        Self {
            endpoint,
            table_service,
        }
    }

    /// Honours `TableEndpoint`, `DefaultEndpointsProtocol` and `EndpointSuffix`.
    pub fn from_connection_string(
        connection_string: &ConnectionString,
    ) -> Result<Self, TableStorageError> {
        let endpoint = connection_string.table_endpoint_uri();

        match (
            connection_string.account_name.clone(),
            connection_string.account_key.clone(),
            endpoint,
        ) {
            (Some(account), Some(access_key), Some(endpoint)) => {
                Ok(Self::with_endpoint(account, access_key, endpoint))
            }
            _ => Err(TableStorageError::Transport(
                "connection string carries no account credentials".to_string(),
            )),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TableServiceClient for AzureTableServiceClient {
    type TableClient = AzureTableClient;

    fn table_client(&self, table_name: &str) -> AzureTableClient {
        AzureTableClient {
            table_name: table_name.to_string(),
            table_client: self.table_service.table_client(table_name),
        }
    }
}

pub struct AzureTableClient {
    table_name: String,
    table_client: prelude::TableClient,
}

#[async_trait]
impl TableClient for AzureTableClient {
    async fn create_if_not_exists(&self) -> Result<(), TableStorageError> {
        match self.table_client.create().await {
            Ok(_) => {
                tracing::info!(table = %self.table_name, "Created table");
                Ok(())
            }
            Err(err) => {
                let err = TableStorageError::from(err);
                if err.is_conflict() && err.error_code() == Some(TABLE_ALREADY_EXISTS) {
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }

    async fn add_entity<T>(&self, entity: &T) -> Result<(), TableStorageError>
    where
        T: TableEntity,
    {
        let _response: InsertEntityResponse<serde_json::Value> =
            self.table_client.insert(entity)?.await?;

        tracing::debug!(
            table = %self.table_name,
            partition_key = entity.get_partition_key(),
            row_key = entity.get_row_key(),
            "Inserted entity"
        );

        Ok(())
    }

    async fn get_entity<T>(&self, partition_key: &str, row_key: &str) -> Result<T, TableStorageError>
    where
        T: TableEntity,
    {
        let entity_client = self
            .table_client
            .partition_key_client(partition_key)
            .entity_client(row_key);

        let response = entity_client.get::<T>().await?;

        Ok(response.entity)
    }
}
