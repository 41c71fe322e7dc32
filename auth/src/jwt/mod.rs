pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::TokenScope;
pub use codec::JwtHandler;
pub use errors::JwtError;
