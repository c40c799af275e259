use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("connection string is empty")]
    Empty,

    #[error("malformed connection string segment '{0}', expected Key=Value")]
    MalformedSegment(String),

    #[error("connection string is missing {0}")]
    MissingField(&'static str),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Storage account connection string, `Key=Value;Key=Value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    pub default_endpoints_protocol: Option<String>,
    pub account_name: Option<String>,
    pub account_key: Option<String>,
    pub endpoint_suffix: Option<String>,
    pub table_endpoint: Option<String>,
    pub use_development_storage: bool,
}

impl ConnectionString {
    pub fn parse(src: &str) -> Result<Self, ConnectionStringError> {
        if src.trim().is_empty() {
            return Err(ConnectionStringError::Empty);
        }

        let mut result = ConnectionString::default();

        for segment in src.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            // Account keys are base64 and end with '='; only the first one separates.
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_string()))?;
            let key = key.trim();
            let value = value.trim();

            if key.is_empty() {
                return Err(ConnectionStringError::MalformedSegment(segment.to_string()));
            }

            match key.to_ascii_lowercase().as_str() {
                "defaultendpointsprotocol" => {
                    result.default_endpoints_protocol = Some(value.to_string())
                }
                "accountname" => result.account_name = Some(value.to_string()),
                "accountkey" => result.account_key = Some(value.to_string()),
                "endpointsuffix" => result.endpoint_suffix = Some(value.to_string()),
                "tableendpoint" => result.table_endpoint = Some(value.to_string()),
                "usedevelopmentstorage" => {
                    result.use_development_storage = match value.to_ascii_lowercase().as_str() {
                        "true" => true,
                        "false" => false,
                        _ => {
                            return Err(ConnectionStringError::InvalidValue {
                                key: key.to_string(),
                                value: value.to_string(),
                            })
                        }
                    }
                }
                _ => {
                    tracing::debug!(key, "Ignoring unknown connection string key");
                }
            }
        }

        if result.use_development_storage {
            return Ok(result);
        }

        if result.account_name.as_deref().map_or(true, str::is_empty) {
            return Err(ConnectionStringError::MissingField("AccountName"));
        }

        if result.account_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConnectionStringError::MissingField("AccountKey"));
        }

        Ok(result)
    }

    pub fn is_development_storage(&self) -> bool {
        self.use_development_storage
    }

    /// Table service endpoint: `TableEndpoint` when given, otherwise
    /// `{protocol}://{account}.table.{suffix}`. `None` without an account.
    pub fn table_endpoint_uri(&self) -> Option<String> {
        if let Some(endpoint) = self.table_endpoint.as_deref().filter(|e| !e.is_empty()) {
            return Some(endpoint.trim_end_matches('/').to_string());
        }

        let account = self.account_name.as_deref().filter(|a| !a.is_empty())?;
        let protocol = self
            .default_endpoints_protocol
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROTOCOL);
        let suffix = self
            .endpoint_suffix
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT_SUFFIX);

        Some(format!("{protocol}://{account}.table.{suffix}"))
    }
}

impl FromStr for ConnectionString {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionString::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_connection_string() {
        let cs: ConnectionString = "DefaultEndpointsProtocol=https;AccountName=myaccount;AccountKey=c2VjcmV0a2V5==;EndpointSuffix=core.windows.net"
            .parse()
            .unwrap();

        assert_eq!(cs.default_endpoints_protocol.as_deref(), Some("https"));
        assert_eq!(cs.account_name.as_deref(), Some("myaccount"));
        assert_eq!(cs.account_key.as_deref(), Some("c2VjcmV0a2V5=="));
        assert_eq!(cs.endpoint_suffix.as_deref(), Some("core.windows.net"));
        assert!(!cs.is_development_storage());
    }

    #[test]
    fn test_development_storage() {
        let cs = ConnectionString::parse("UseDevelopmentStorage=true").unwrap();
        assert!(cs.is_development_storage());
        assert_eq!(cs.account_name, None);

        let cs = ConnectionString::parse("usedevelopmentstorage=TRUE;").unwrap();
        assert!(cs.is_development_storage());
    }

    #[test]
    fn test_table_endpoint_uri() {
        let cs = ConnectionString::parse("AccountName=myaccount;AccountKey=abc==").unwrap();
        assert_eq!(
            cs.table_endpoint_uri().as_deref(),
            Some("https://myaccount.table.core.windows.net")
        );

        let cs = ConnectionString::parse(
            "DefaultEndpointsProtocol=http;AccountName=myaccount;AccountKey=abc==;EndpointSuffix=core.usgovcloudapi.net",
        )
        .unwrap();
        assert_eq!(
            cs.table_endpoint_uri().as_deref(),
            Some("http://myaccount.table.core.usgovcloudapi.net")
        );

        let cs = ConnectionString::parse(
            "AccountName=myaccount;AccountKey=abc==;EndpointSuffix=ignored.net;TableEndpoint=https://tables.example.com/",
        )
        .unwrap();
        assert_eq!(
            cs.table_endpoint_uri().as_deref(),
            Some("https://tables.example.com")
        );

        let cs = ConnectionString::parse("UseDevelopmentStorage=true").unwrap();
        assert_eq!(cs.table_endpoint_uri(), None);
    }

    #[test]
    fn test_invalid_connection_strings() {
        assert_eq!(ConnectionString::parse("   "), Err(ConnectionStringError::Empty));
        assert_eq!(
            ConnectionString::parse("AccountName"),
            Err(ConnectionStringError::MalformedSegment("AccountName".to_string()))
        );
        assert_eq!(
            ConnectionString::parse("AccountKey=abc=="),
            Err(ConnectionStringError::MissingField("AccountName"))
        );
        assert_eq!(
            ConnectionString::parse("AccountName=myaccount;AccountKey="),
            Err(ConnectionStringError::MissingField("AccountKey"))
        );
        assert_eq!(
            ConnectionString::parse("UseDevelopmentStorage=maybe"),
            Err(ConnectionStringError::InvalidValue {
                key: "UseDevelopmentStorage".to_string(),
                value: "maybe".to_string(),
            })
        );
    }
}
