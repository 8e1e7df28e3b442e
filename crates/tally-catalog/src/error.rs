//! # Catalog Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      File       │  │      Parse      │  │       Domain            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Toml           │  │  Core (bad price, dup   │ │
//! │  │  Io             │  │  TomlSerialize  │  │  id, invalid rule)      │ │
//! │  │                 │  │  Json           │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// An explicitly requested catalog file does not exist.
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML, or a rule whose parameters fail validation.
    #[error("Invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize catalog: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Prices or identifiers rejected while building the catalog.
    #[error(transparent)]
    Core(#[from] CoreError),
}
