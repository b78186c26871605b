use tracing::{info, warn};

use bootstrap_interface::accounts::model::{UserData, UserGrantSpec};
use bootstrap_interface::accounts::service::AccountsServiceHandle;
use bootstrap_interface::errors::Result;

use crate::database_connection::DatabaseManager;
use crate::services::ServiceRegistry;
use crate::settings::Settings;

pub struct BootstrapRunner;

impl BootstrapRunner {
    /// Connects as administrator, selects the target database and creates the
    /// configured user. Running it twice fails with a duplicate user error.
    pub async fn run(settings: &Settings) -> Result<Option<UserData>> {
        info!(
            "Connecting to {}",
            settings.connection.redacted_connection_string()
        );
        let client = DatabaseManager::connect(&settings.connection).await?;
        info!("Connected to the '{}' auth database", settings.connection.auth_database);

        let db = DatabaseManager::select_database(&client, &settings.grant.target_database);
        info!("Selected database '{}'", db.name());

        let services = ServiceRegistry::new(db);

        Self::grant(&services.accounts_service, &settings.grant).await
    }

    pub async fn grant(
        accounts_service: &AccountsServiceHandle,
        spec: &UserGrantSpec,
    ) -> Result<Option<UserData>> {
        // No command is sent when the grant itself is wrong.
        spec.validate()?;

        accounts_service.create_user(spec).await?;

        let roles: Vec<String> = spec.roles.iter().map(ToString::to_string).collect();
        info!(
            "Created user '{}' on '{}' with roles [{}]",
            spec.username,
            spec.target_database,
            roles.join(", ")
        );

        // The user exists at this point, a failed read back must not fail the run.
        match accounts_service.get_user(&spec.username).await {
            Ok(Some(user)) => Ok(Some(user)),
            Ok(None) => {
                warn!(
                    "User '{}' was created but is not reported by the server",
                    spec.username
                );
                Ok(None)
            }
            Err(e) => {
                warn!("User '{}' was created but could not be read back: {}", spec.username, e);
                Ok(None)
            }
        }
    }
}
