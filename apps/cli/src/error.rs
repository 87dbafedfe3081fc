//! # CLI Error Type
//!
//! Every command returns [`CliResult`]. `main` logs the error and exits with
//! [`CliError::exit_code`].
//!
//! ## Exit Codes
//! ```text
//! ┌──────────────────────────┬──────┬─────────────────────────────────────┐
//! │ Error                    │ Code │ Meaning (sysexits.h)                │
//! ├──────────────────────────┼──────┼─────────────────────────────────────┤
//! │ Config*                  │  78  │ EX_CONFIG                           │
//! │ Offers (rejected/parse)  │  65  │ EX_DATAERR                          │
//! │ Offers (transport)       │  69  │ EX_UNAVAILABLE                      │
//! │ Store, Output            │  74  │ EX_IOERR                            │
//! └──────────────────────────┴──────┴─────────────────────────────────────┘
//! ```

use bookcart_offers::OffersError;
use bookcart_store::StoreError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read config file: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to render config: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cart store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Offers(#[from] OffersError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigRead(_)
            | CliError::ConfigParse(_)
            | CliError::ConfigRender(_)
            | CliError::InvalidConfig(_) => 78,
            CliError::Offers(OffersError::InvalidConfig(_) | OffersError::InvalidUrl(_)) => 78,
            CliError::Offers(OffersError::Rejected { .. } | OffersError::Parse(_)) => 65,
            CliError::Offers(_) => 69,
            CliError::Store(_) | CliError::Output(_) => 74,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::InvalidConfig("ttl".into()).exit_code(), 78);
        assert_eq!(
            CliError::from(OffersError::InvalidUrl("x".into())).exit_code(),
            78
        );
        assert_eq!(
            CliError::from(OffersError::Rejected {
                status: 500,
                body: serde_json::Value::Null,
            })
            .exit_code(),
            65
        );
        assert_eq!(
            CliError::from(OffersError::Transport("down".into())).exit_code(),
            69
        );
        assert_eq!(
            CliError::from(StoreError::InvalidKey("..".into())).exit_code(),
            74
        );
    }
}
