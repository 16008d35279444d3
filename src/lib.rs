pub mod app;
pub mod auth;
pub mod config;
pub mod courses;
pub mod db;
pub mod error;
pub mod json;
pub mod state;
pub mod users;
pub mod validation;

pub use app::build_app;
pub use state::AppState;
