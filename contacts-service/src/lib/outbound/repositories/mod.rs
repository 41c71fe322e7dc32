pub mod contact;
pub mod user;

pub use contact::PostgresContactRepository;
pub use user::PostgresUserRepository;
