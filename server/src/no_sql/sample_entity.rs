use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TableEntity;

pub static SAMPLE_TABLE_NAME: &str = "SampleTable";
pub static SAMPLE_PARTITION_KEY: &str = "samplePartition";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SampleEntity {
    #[serde(rename = "PartitionKey")]
    pub partition_key: String,
    #[serde(rename = "RowKey")]
    pub row_key: String,
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "odata.etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl SampleEntity {
    /// New entity with a freshly generated row key.
    pub fn new(partition_key: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: uuid::Uuid::new_v4().to_string(),
            data: data.into(),
            timestamp: None,
            etag: None,
        }
    }
}

impl TableEntity for SampleEntity {
    fn get_partition_key(&self) -> &str {
        &self.partition_key[..]
    }
    fn get_row_key(&self) -> &str {
        &self.row_key[..]
    }
    fn get_time_stamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
    fn get_etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let entity = SampleEntity {
            partition_key: "samplePartition".to_string(),
            row_key: "1".to_string(),
            data: "Hello".to_string(),
            timestamp: None,
            etag: None,
        };

        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "PartitionKey": "samplePartition", "RowKey": "1", "Data": "Hello" })
        );
    }

    #[test]
    fn test_reads_server_assigned_fields() {
        let entity: SampleEntity = serde_json::from_value(serde_json::json!({
            "odata.etag": "W/\"datetime'2024-05-01T10%3A00%3A00.1234567Z'\"",
            "PartitionKey": "samplePartition",
            "RowKey": "1",
            "Timestamp": "2024-05-01T10:00:00.1234567Z",
            "Data": "Hello"
        }))
        .unwrap();

        assert!(entity.get_time_stamp().is_some());
        assert!(entity.get_etag().unwrap().starts_with("W/"));
    }

    #[test]
    fn test_new_generates_distinct_row_keys() {
        let a = SampleEntity::new(SAMPLE_PARTITION_KEY, "a");
        let b = SampleEntity::new(SAMPLE_PARTITION_KEY, "b");
        assert_ne!(a.row_key, b.row_key);
        assert_eq!(a.get_partition_key(), "samplePartition");
    }
}
