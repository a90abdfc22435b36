use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardroomError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BoardroomError>;

/// Why an engine command was ignored. A rejected command never touches state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("command not available in the current phase")]
    WrongPhase,

    #[error("no option at index {0}")]
    UnknownOption(usize),

    #[error("option requirements not met")]
    Ineligible,

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("loan exceeds the credit-scaled ceiling of {0}")]
    ExceedsLoanCeiling(i64),

    #[error("amount exceeds available capital")]
    ExceedsCapital,

    #[error("laissez-faire already used this round")]
    LaissezFaireSpent,

    #[error("last resort action already used in this crisis")]
    LastResortSpent,
}
