#[path = "home.rs"]
mod home_route;
mod users;
pub(crate) mod utils;

pub use home_route::{health_check, home};
pub use users::account_routes_config;
