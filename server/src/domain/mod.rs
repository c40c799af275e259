mod connection_string;
mod errors;
mod table_client;
mod table_entity;
mod table_names;
mod table_storage_service;

pub use connection_string::*;
pub use errors::*;
pub use table_client::*;
pub use table_entity::*;
pub use table_names::*;
pub use table_storage_service::*;
