use std::sync::Arc;

use bootstrap_interface::accounts::service::AccountsServiceHandle;

use crate::database_connection::DatabaseConnection;

pub mod accounts_service;

use accounts_service::MongoAccountsService;

#[derive(Clone)]
pub struct ServiceRegistry {
    pub accounts_service: AccountsServiceHandle,
}

impl ServiceRegistry {
    pub fn new(db: DatabaseConnection) -> Self {
        let accounts_service = Arc::new(MongoAccountsService::new(db));

        Self { accounts_service }
    }
}
