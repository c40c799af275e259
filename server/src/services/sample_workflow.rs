use crate::domain::{TableStorage, TableStorageError};
use crate::no_sql::{SampleEntity, SAMPLE_PARTITION_KEY};

pub static SAMPLE_DATA: &str = "Hello, Azure Table Storage!";

/// Inserts a fresh sample entity into `table_name` and reads it back.
pub async fn run_sample<S: TableStorage>(
    storage: &S,
    table_name: &str,
) -> Result<Option<SampleEntity>, TableStorageError> {
    let new_entity = SampleEntity::new(SAMPLE_PARTITION_KEY, SAMPLE_DATA);

    storage.add_entity(table_name, &new_entity).await?;
    tracing::info!(
        table = table_name,
        partition_key = %new_entity.partition_key,
        row_key = %new_entity.row_key,
        "Added new entity"
    );

    let retrieved: Option<SampleEntity> = storage
        .get_entity(table_name, &new_entity.partition_key, &new_entity.row_key)
        .await?;

    match &retrieved {
        Some(entity) => tracing::info!(data = %entity.data, "Retrieved entity"),
        None => tracing::warn!("Entity not found."),
    }

    Ok(retrieved)
}
