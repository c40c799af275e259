use std::sync::Arc;

use crate::{
    domain::{TableServiceClient, TableStorageService},
    settings_model::SettingsModel,
};

pub struct AppContext<C: TableServiceClient> {
    pub table_service: Arc<C>,
    pub table_storage: TableStorageService<C>,
    pub settings: SettingsModel,
}

impl<C: TableServiceClient> AppContext<C> {
    /// `table_service` is built by the host and only borrowed by the storage facade.
    pub fn new(settings: SettingsModel, table_service: Arc<C>) -> Self {
        let table_storage = TableStorageService::new(table_service.clone());

        Self {
            table_service,
            table_storage,
            settings,
        }
    }
}
