//! Bearer token claims: decoding without signature verification, and
//! unsigned encoding for fixtures.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{ClaimsDecoder, DecodeError};
pub use encoder::TokenEncoder;
