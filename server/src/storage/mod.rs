mod memory_table_service;
#[cfg(feature = "azure")]
mod azure_table_service;

pub use memory_table_service::*;
#[cfg(feature = "azure")]
pub use azure_table_service::*;
