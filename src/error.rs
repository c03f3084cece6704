use thiserror::Error;

/// Errors raised while configuring or constructing a world.
///
/// Ticking a built world never fails; invalid moves are rejected silently.
#[derive(Debug, Error)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for `WorldConfig`
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    /// A construction parameter is out of range
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// No food location satisfied the distance constraints
    #[error("Could not place food source after {attempts} attempts")]
    FoodPlacement { attempts: u32 },
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
