pub mod errors;
pub mod generator;

pub use errors::RefreshTokenError;
pub use generator::generate_refresh_token;
pub use generator::REFRESH_TOKEN_BYTES;
pub use generator::REFRESH_TOKEN_LIFETIME_DAYS;
