//! HTTP request handlers.

pub mod profile_handler;
pub mod users_handler;

pub use profile_handler::profile_routes;
pub use users_handler::users_routes;
