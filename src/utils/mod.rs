pub mod auth;
pub mod emails;
pub mod uid;
pub mod validation;
