//! Session store implementations and the keys the session lives under.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the absolute expiry as milliseconds since the Unix epoch.
pub const EXPIRATION_KEY: &str = "tokenExpiration";
