use std::time::Duration;

use mongodb::bson::doc;
use mongodb::error::{Error as MongoDriverError, ErrorKind};
use mongodb::options::{ClientOptions, Credential, ServerAddress};

use bootstrap_interface::accounts::model::ConnectionDescriptor;
use bootstrap_interface::errors::{AppError, Result};

pub type ClientConnection = mongodb::Client;
pub type DatabaseConnection = mongodb::Database;

// Server error codes that map onto our own error kinds.
const ROLE_NOT_FOUND: i32 = 31;
const AUTHENTICATION_FAILED: i32 = 18;
const DUPLICATE_KEY: i32 = 11000;
const USER_ALREADY_EXISTS: i32 = 51003;

pub struct DatabaseManager;

impl DatabaseManager {
    /// Opens an authenticated connection against the descriptor's auth database.
    ///
    /// The driver connects lazily, so a `ping` is issued to surface an
    /// unreachable server or rejected credentials right away.
    pub async fn connect(descriptor: &ConnectionDescriptor) -> Result<ClientConnection> {
        let client = mongodb::Client::with_options(Self::client_options(descriptor))
            .map_err(|e| AppError::MongoError { msg: e.to_string() })?;

        client
            .database(&descriptor.auth_database)
            .run_command(doc! {"ping": 1}, None)
            .await
            .map_err(classify_mongo_error)?;

        Ok(client)
    }

    /// Rebinds the working database. No round trip and no re-authentication.
    pub fn select_database(client: &ClientConnection, name: &str) -> DatabaseConnection {
        client.database(name)
    }

    fn client_options(descriptor: &ConnectionDescriptor) -> ClientOptions {
        let credential = Credential::builder()
            .username(descriptor.admin_username.clone())
            .password(descriptor.admin_password.clone())
            .source(descriptor.auth_database.clone())
            .build();

        let mut options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: descriptor.host.clone(),
                port: Some(descriptor.port),
            }])
            .credential(credential)
            .build();

        options.app_name = descriptor.app_name.clone();
        options.server_selection_timeout = descriptor
            .server_selection_timeout_secs
            .map(Duration::from_secs);

        options
    }
}

pub fn classify_mongo_error(error: MongoDriverError) -> AppError {
    let msg = error.to_string();

    match error.kind.as_ref() {
        ErrorKind::Authentication { .. } => AppError::AuthError { msg },
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => AppError::ConnectionError { msg },
        ErrorKind::Command(command_error) => classify_command_failure(command_error.code, msg),
        _ => AppError::MongoError { msg },
    }
}

pub fn classify_command_failure(code: i32, msg: String) -> AppError {
    match code {
        AUTHENTICATION_FAILED => AppError::AuthError { msg },
        USER_ALREADY_EXISTS | DUPLICATE_KEY => AppError::DuplicateUserError { msg },
        ROLE_NOT_FOUND => AppError::InvalidRoleError { msg },
        _ => AppError::MongoError { msg },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ConnectionDescriptor {
        ConnectionDescriptor {
            host: "db.internal".to_string(),
            port: 27018,
            admin_username: "admin".to_string(),
            admin_password: "p@ss:word".to_string(),
            auth_database: "admin".to_string(),
            app_name: Some("mongo-bootstrap".to_string()),
            server_selection_timeout_secs: Some(5),
        }
    }

    #[test]
    fn client_options_carry_the_admin_credential() {
        let options = DatabaseManager::client_options(&descriptor());
        let credential = options.credential.unwrap();

        assert_eq!(credential.username.as_deref(), Some("admin"));
        assert_eq!(credential.password.as_deref(), Some("p@ss:word"));
        assert_eq!(credential.source.as_deref(), Some("admin"));
    }

    #[test]
    fn client_options_target_the_descriptor_host() {
        let options = DatabaseManager::client_options(&descriptor());

        assert_eq!(
            options.hosts,
            vec![ServerAddress::Tcp {
                host: "db.internal".to_string(),
                port: Some(27018),
            }]
        );
        assert_eq!(options.app_name.as_deref(), Some("mongo-bootstrap"));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn existing_user_is_a_duplicate() {
        let msg = "User \"user@tix_member_external\" already exists".to_string();

        assert_eq!(
            classify_command_failure(51003, msg.clone()),
            AppError::DuplicateUserError { msg }
        );
    }

    #[test]
    fn duplicate_key_is_a_duplicate() {
        assert!(matches!(
            classify_command_failure(11000, "E11000".to_string()),
            AppError::DuplicateUserError { .. }
        ));
    }

    #[test]
    fn unknown_role_is_an_invalid_role() {
        assert!(matches!(
            classify_command_failure(31, "Could not find role: readEverything".to_string()),
            AppError::InvalidRoleError { .. }
        ));
    }

    #[test]
    fn failed_authentication_is_an_auth_error() {
        assert!(matches!(
            classify_command_failure(18, "Authentication failed.".to_string()),
            AppError::AuthError { .. }
        ));
    }

    #[test]
    fn other_codes_stay_mongo_errors() {
        assert!(matches!(
            classify_command_failure(13, "not authorized".to_string()),
            AppError::MongoError { .. }
        ));
    }

    #[test]
    fn io_failure_is_a_connection_error() {
        let error = MongoDriverError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));

        assert!(matches!(
            classify_mongo_error(error),
            AppError::ConnectionError { .. }
        ));
    }

    #[test]
    fn rejected_handshake_is_an_auth_error() {
        let error = MongoDriverError::from(ErrorKind::Authentication {
            message: "SCRAM failure: Authentication failed.".to_string(),
        });

        assert!(matches!(
            classify_mongo_error(error),
            AppError::AuthError { .. }
        ));
    }

    #[test]
    fn server_selection_timeout_is_a_connection_error() {
        let error = MongoDriverError::from(ErrorKind::ServerSelection {
            message: "Server selection timeout: No available servers.".to_string(),
        });

        assert!(matches!(
            classify_mongo_error(error),
            AppError::ConnectionError { .. }
        ));
    }
}
