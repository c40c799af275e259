use thiserror::Error;

pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;

/// Coarse classification of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Other,
}

#[derive(Debug, Error)]
pub enum TableStorageError {
    #[error("request failed with status {status} ({}): {message}", code_or_unknown(.error_code))]
    RequestFailed {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("entity serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid entity: {0}")]
    InvalidEntity(String),
}

fn code_or_unknown(error_code: &Option<String>) -> &str {
    error_code.as_deref().unwrap_or("no error code")
}

impl TableStorageError {
    pub fn request_failed(status: u16, error_code: &str, message: impl Into<String>) -> Self {
        TableStorageError::RequestFailed {
            status,
            error_code: Some(error_code.to_string()),
            message: message.into(),
        }
    }

    pub fn resource_not_found() -> Self {
        Self::request_failed(
            STATUS_NOT_FOUND,
            "ResourceNotFound",
            "The specified resource does not exist.",
        )
    }

    pub fn table_not_found(table_name: &str) -> Self {
        Self::request_failed(
            STATUS_NOT_FOUND,
            "TableNotFound",
            format!("The table '{table_name}' specified does not exist."),
        )
    }

    pub fn entity_already_exists(partition_key: &str, row_key: &str) -> Self {
        Self::request_failed(
            STATUS_CONFLICT,
            "EntityAlreadyExists",
            format!("The specified entity already exists (PartitionKey='{partition_key}', RowKey='{row_key}')."),
        )
    }

    pub fn invalid_resource_name(table_name: &str) -> Self {
        Self::request_failed(
            STATUS_BAD_REQUEST,
            "InvalidResourceName",
            format!("The specified resource name '{table_name}' contains invalid characters."),
        )
    }

    pub fn out_of_range_input(parameter: &str, value: &str) -> Self {
        Self::request_failed(
            STATUS_BAD_REQUEST,
            "OutOfRangeInput",
            format!("The '{parameter}' parameter of value '{value}' is out of range."),
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TableStorageError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            TableStorageError::RequestFailed { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status() {
            Some(STATUS_NOT_FOUND) => ErrorKind::NotFound,
            Some(STATUS_CONFLICT) => ErrorKind::Conflict,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
