use std::sync::Arc;

use async_trait::async_trait;

use crate::accounts::model::{UserData, UserGrantSpec};
use crate::errors::Result;

#[async_trait]
pub trait AccountsService {
    // Not idempotent: fails with DuplicateUserError when the user exists.
    async fn create_user(&self, spec: &UserGrantSpec) -> Result<()>;
    async fn get_user(&self, username: &str) -> Result<Option<UserData>>;
}

pub type AccountsServiceHandle = Arc<dyn AccountsService + Send + Sync>;
