use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    ConnectionError { msg: String },
    AuthError { msg: String },
    DuplicateUserError { msg: String },
    InvalidRoleError { msg: String },
    MongoError { msg: String },
    BsonError { msg: String },
    ConfigError { msg: String },
    GrantError { msg: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ConnectionError { msg } => write!(f, "Connection Error: '{}'", msg),
            AppError::AuthError { msg } => write!(f, "Authentification Error: '{}'", msg),
            AppError::DuplicateUserError { msg } => write!(f, "Duplicate User Error: '{}'", msg),
            AppError::InvalidRoleError { msg } => write!(f, "Invalid Role Error: '{}'", msg),
            AppError::MongoError { msg } => write!(f, "MongoDB Error: '{}'", msg),
            AppError::BsonError { msg } => write!(f, "Bson Deserialization Error: '{}'", msg),
            AppError::ConfigError { msg } => write!(f, "Configuration Error: '{}'", msg),
            AppError::GrantError { msg } => write!(f, "Invalid Grant Error: '{}'", msg),
        }
    }
}
