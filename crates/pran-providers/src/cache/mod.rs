//! Cache provider implementations

/// Moka in-memory cache
pub mod moka;

pub use self::moka::MokaCacheProvider;
