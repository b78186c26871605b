use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use serde::Deserialize;

use bootstrap_interface::accounts::model::{PasswordDigestor, UserData, UserGrantSpec};
use bootstrap_interface::accounts::service::AccountsService;
use bootstrap_interface::errors::{AppError, Result};

use crate::database_connection::{classify_mongo_error, DatabaseConnection};

pub struct MongoAccountsService {
    db: DatabaseConnection,
}

impl MongoAccountsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Reply of the usersInfo command.
#[derive(Debug, Deserialize)]
struct UsersInfoReply {
    users: Vec<UserData>,
}

/// Builds the createUser command for the grant.
///
/// With the server digestor the plaintext password is sent and the server
/// hashes it. With the client digestor the legacy `user:mongo:password` MD5
/// digest is sent instead and the server stores it as is.
pub fn create_user_command(spec: &UserGrantSpec) -> Document {
    let (pwd, digest_password) = match spec.password_digestor {
        PasswordDigestor::Server => (spec.password.clone(), true),
        PasswordDigestor::Client => (client_digest(&spec.username, &spec.password), false),
    };

    let roles: Vec<Document> = spec
        .roles
        .iter()
        .map(|grant| doc! {"role": grant.role.as_str(), "db": grant.db.as_str()})
        .collect();

    doc! {
        "createUser": spec.username.as_str(),
        "pwd": pwd,
        "roles": roles,
        "digestPassword": digest_password,
    }
}

fn client_digest(username: &str, password: &str) -> String {
    format!("{:x}", md5::compute(format!("{username}:mongo:{password}")))
}

#[async_trait]
impl AccountsService for MongoAccountsService {
    async fn create_user(&self, spec: &UserGrantSpec) -> Result<()> {
        if self.db.name() != spec.target_database {
            return Err(AppError::GrantError {
                msg: format!(
                    "user '{}' targets '{}' but the selected database is '{}'",
                    spec.username,
                    spec.target_database,
                    self.db.name()
                ),
            });
        }

        self.db
            .run_command(create_user_command(spec), None)
            .await
            .map_err(classify_mongo_error)?;

        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserData>> {
        let reply = self
            .db
            .run_command(doc! {"usersInfo": username}, None)
            .await
            .map_err(classify_mongo_error)?;

        let reply: UsersInfoReply = mongodb::bson::from_document(reply)
            .map_err(|e| AppError::BsonError { msg: e.to_string() })?;

        Ok(reply.users.into_iter().next())
    }
}
