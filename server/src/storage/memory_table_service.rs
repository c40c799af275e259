use std::collections::{btree_map::Entry, BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::domain::{
    is_valid_key, is_valid_table_name, TableClient, TableEntity, TableServiceClient,
    TableStorageError, ETAG_FIELD, PARTITION_KEY_FIELD, ROW_KEY_FIELD, TIMESTAMP_FIELD,
};

type EntityKey = (String, String);
type Table = BTreeMap<EntityKey, Map<String, Value>>;

/// Table service kept in process memory. Answers with the same statuses and
/// error codes as the remote store, so it can stand in for it locally and in tests.
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryTableServiceClient {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl MemoryTableServiceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn table_exists(&self, table_name: &str) -> bool {
        self.tables
            .read()
            .await
            .contains_key(&table_key(table_name))
    }

    pub async fn entity_count(&self, table_name: &str) -> usize {
        self.tables
            .read()
            .await
            .get(&table_key(table_name))
            .map_or(0, |table| table.len())
    }
}

impl TableServiceClient for MemoryTableServiceClient {
    type TableClient = MemoryTableClient;

    fn table_client(&self, table_name: &str) -> MemoryTableClient {
        MemoryTableClient {
            table_name: table_name.to_string(),
            tables: self.tables.clone(),
        }
    }
}

pub struct MemoryTableClient {
    table_name: String,
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

// Table names are case-insensitive.
fn table_key(table_name: &str) -> String {
    table_name.to_ascii_lowercase()
}

impl MemoryTableClient {
    fn validate_table_name(&self) -> Result<(), TableStorageError> {
        if is_valid_table_name(&self.table_name) {
            Ok(())
        } else {
            Err(TableStorageError::invalid_resource_name(&self.table_name))
        }
    }
}

fn validate_keys(partition_key: &str, row_key: &str) -> Result<(), TableStorageError> {
    if !is_valid_key(partition_key) {
        return Err(TableStorageError::out_of_range_input(
            PARTITION_KEY_FIELD,
            partition_key,
        ));
    }

    if !is_valid_key(row_key) {
        return Err(TableStorageError::out_of_range_input(ROW_KEY_FIELD, row_key));
    }

    Ok(())
}

#[async_trait]
impl TableClient for MemoryTableClient {
    async fn create_if_not_exists(&self) -> Result<(), TableStorageError> {
        self.validate_table_name()?;

        let mut tables = self.tables.write().await;
        if !tables.contains_key(&table_key(&self.table_name)) {
            tables.insert(table_key(&self.table_name), Table::new());
            tracing::debug!(table = %self.table_name, "Created table");
        }

        Ok(())
    }

    async fn add_entity<T>(&self, entity: &T) -> Result<(), TableStorageError>
    where
        T: TableEntity,
    {
        self.validate_table_name()?;

        let partition_key = entity.get_partition_key();
        let row_key = entity.get_row_key();
        validate_keys(partition_key, row_key)?;

        let mut properties = match serde_json::to_value(entity)? {
            Value::Object(properties) => properties,
            other => {
                return Err(TableStorageError::InvalidEntity(format!(
                    "expected a JSON object, got {other}"
                )))
            }
        };

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
        let etag = format!("W/\"datetime'{}'\"", timestamp.replace(':', "%3A"));
        properties.insert(PARTITION_KEY_FIELD.to_string(), Value::from(partition_key));
        properties.insert(ROW_KEY_FIELD.to_string(), Value::from(row_key));
        properties.insert(TIMESTAMP_FIELD.to_string(), Value::from(timestamp));
        properties.insert(ETAG_FIELD.to_string(), Value::from(etag));

        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(&table_key(&self.table_name))
            .ok_or_else(|| TableStorageError::table_not_found(&self.table_name))?;

        match table.entry((partition_key.to_string(), row_key.to_string())) {
            Entry::Occupied(_) => Err(TableStorageError::entity_already_exists(
                partition_key,
                row_key,
            )),
            Entry::Vacant(slot) => {
                slot.insert(properties);
                tracing::debug!(
                    table = %self.table_name,
                    partition_key,
                    row_key,
                    "Inserted entity"
                );
                Ok(())
            }
        }
    }

    async fn get_entity<T>(&self, partition_key: &str, row_key: &str) -> Result<T, TableStorageError>
    where
        T: TableEntity,
    {
        self.validate_table_name()?;

        let properties = {
            let tables = self.tables.read().await;
            let table = tables
                .get(&table_key(&self.table_name))
                .ok_or_else(|| TableStorageError::table_not_found(&self.table_name))?;

            table
                .get(&(partition_key.to_string(), row_key.to_string()))
                .cloned()
                .ok_or_else(TableStorageError::resource_not_found)?
        };

        tracing::debug!(
            table = %self.table_name,
            partition_key,
            row_key,
            "Read entity"
        );

        Ok(serde_json::from_value(Value::Object(properties))?)
    }
}
