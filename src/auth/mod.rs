pub mod credentials;
pub mod extractors;
pub mod guard;
pub mod password;

pub use extractors::AuthUser;
