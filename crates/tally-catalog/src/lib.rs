//! # tally-catalog: Catalog Configuration for Tally
//!
//! Turns configuration files into the [`tally_core::Catalog`] that checkouts
//! borrow. The catalog is built once at startup; nothing here is global.
//!
//! ```rust,no_run
//! use tally_catalog::CatalogConfig;
//! use tally_core::Checkout;
//!
//! let catalog = CatalogConfig::load(None)?.into_catalog()?;
//! let mut co = Checkout::new(&catalog);
//! co.scan("atv");
//! println!("{}", co.total()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;

pub use config::{
    reference_catalog, reference_config, CatalogConfig, CatalogSource, ProductEntry,
    CATALOG_PATH_ENV, REFERENCE_CATALOG_TOML,
};
pub use error::{CatalogError, CatalogResult};
