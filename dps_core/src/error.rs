//! Calculator errors

use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised while building or querying a calculator
#[derive(Error, Debug)]
pub enum CalcError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Spell '{0}' has no fixed max hit and no level-dependent formula")]
    UnknownSpellMaxHit(String),
    #[error("Invalid calculator input: {0}")]
    InvalidInput(String),
}
