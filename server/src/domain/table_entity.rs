use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub static PARTITION_KEY_FIELD: &str = "PartitionKey";
pub static ROW_KEY_FIELD: &str = "RowKey";
pub static TIMESTAMP_FIELD: &str = "Timestamp";
pub static ETAG_FIELD: &str = "odata.etag";

/// A record that can live in a table. `(partition_key, row_key)` is its identity
/// within one table; every other field is opaque payload for the client.
///
/// Implementors serialize their keys as `PartitionKey` / `RowKey`. `Timestamp`
/// and `odata.etag` are assigned by the store and ignored on insert.
pub trait TableEntity: Serialize + DeserializeOwned + Send + Sync {
    fn get_partition_key(&self) -> &str;

    fn get_row_key(&self) -> &str;

    fn get_time_stamp(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn get_etag(&self) -> Option<&str> {
        None
    }
}
