pub mod accounts {
    pub mod model;
    pub mod service;
}
pub mod errors;
