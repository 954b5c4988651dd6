use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown product category `{0}` (expected jacket|shoes|shirt|pants|dress)")]
    UnknownCategory(String),
    #[error("unknown style `{0}` (expected casual|formal|sporty)")]
    UnknownStyle(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_validation",
            Self::Catalog(_) => "catalog_load",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => {
                "The configuration could not be loaded. Check shopmate.toml and SHOPMATE_* variables."
            }
            Self::Catalog(_) => {
                "The product catalog could not be loaded. Check the catalog path and its records."
            }
        }
    }
}
