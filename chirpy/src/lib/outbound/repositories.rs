pub mod chirp;
pub mod session;
pub mod user;

pub use chirp::PostgresChirpRepository;
pub use session::PostgresSessionRepository;
pub use user::PostgresUserRepository;
