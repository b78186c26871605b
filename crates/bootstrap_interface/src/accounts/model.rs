use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

// Where and how to reach the server with administrative privileges.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    pub auth_database: String,

    // Reported to the server in the connection handshake.
    pub app_name: Option<String>,
    pub server_selection_timeout_secs: Option<u64>,
}

impl ConnectionDescriptor {
    /// The connection string with the password masked, for logging only.
    pub fn redacted_connection_string(&self) -> String {
        format!(
            "mongodb://{}:****@{}:{}/{}",
            self.admin_username, self.host, self.port, self.auth_database
        )
    }
}

// A role conferring a permission set scoped to one database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.role, self.db)
    }
}

// Who hashes the password before it is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordDigestor {
    // The server receives the plaintext password and digests it.
    #[default]
    Server,
    // The client sends a pre-digested password.
    Client,
}

// The user to create, passed verbatim to the createUser command.
#[derive(Debug, Clone, Deserialize)]
pub struct UserGrantSpec {
    pub username: String,
    pub password: String,
    pub target_database: String,
    pub roles: Vec<RoleGrant>,
    #[serde(default)]
    pub password_digestor: PasswordDigestor,
}

impl UserGrantSpec {
    /// Checks the grant before anything is sent to the server. Every role must
    /// be scoped to the target database, otherwise the created user's
    /// permissions would not apply where they are meant to.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(AppError::GrantError {
                msg: "username must not be empty".to_string(),
            });
        }

        if self.password.is_empty() {
            return Err(AppError::GrantError {
                msg: format!("password of user '{}' must not be empty", self.username),
            });
        }

        if self.target_database.is_empty() {
            return Err(AppError::GrantError {
                msg: "target database must not be empty".to_string(),
            });
        }

        if self.roles.is_empty() {
            return Err(AppError::GrantError {
                msg: format!("user '{}' must be granted at least one role", self.username),
            });
        }

        if let Some(role) = self
            .roles
            .iter()
            .find(|role| role.role.is_empty() || role.db != self.target_database)
        {
            return Err(AppError::GrantError {
                msg: format!(
                    "role '{}' does not apply to the target database '{}'",
                    role, self.target_database
                ),
            });
        }

        Ok(())
    }
}

// A user as reported back by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserData {
    pub user: String,
    pub db: String,
    pub roles: Vec<RoleGrant>,
}
