pub mod claims;
pub mod errors;
pub mod signer;

pub use claims::AccessClaims;
pub use claims::ACCESS_TOKEN_ISSUER;
pub use claims::ACCESS_TOKEN_LIFETIME_SECONDS;
pub use errors::TokenError;
pub use signer::TokenSigner;
