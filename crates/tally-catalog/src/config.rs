//! # Catalog Configuration
//!
//! Loads the product catalog that every checkout borrows.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Source Priority                              │
//! │                                                                         │
//! │  1. Environment Variable (highest priority)                            │
//! │     TALLY_CATALOG_PATH=/etc/tally/catalog.toml                         │
//! │                                                                         │
//! │  2. Explicit path passed to CatalogConfig::load                        │
//! │                                                                         │
//! │  3. Platform config directory                                          │
//! │     ~/.config/tally/catalog.toml (Linux)                               │
//! │     ~/Library/Application Support/com.tally.tally/catalog.toml (macOS) │
//! │                                                                         │
//! │  4. Built-in reference catalog (lowest priority)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An explicitly named file (1 or 2) must exist. A missing file in the
//! platform directory falls back to the reference catalog.
//!
//! ## Configuration File Format
//! ```toml
//! [products.atv]
//! price_cents = 10950
//! rules = [{ kind = "buy_x_get_y_free", buy = 2, free = 1 }]
//!
//! [products.vga]
//! price_cents = 3000
//! ```
//!
//! Files ending in `.json` use the same shape in JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tally_core::{Catalog, Money, PricingRule, Product};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// Environment variable naming the catalog file.
pub const CATALOG_PATH_ENV: &str = "TALLY_CATALOG_PATH";

/// The reference store catalog (ipd, mbp, atv, vga).
pub const REFERENCE_CATALOG_TOML: &str = include_str!("../catalog/reference.toml");

// =============================================================================
// Product Entry
// =============================================================================

/// One `[products.<id>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Unit price in cents.
    pub price_cents: i64,

    /// Pricing rules, applied in order. Each rule is validated while the
    /// file is parsed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<PricingRule>,
}

// =============================================================================
// Catalog Source
// =============================================================================

/// Where `CatalogConfig::load` reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Named by the caller or the environment; must exist.
    Explicit(PathBuf),

    /// Platform config directory; optional.
    Default(PathBuf),

    /// No file location available at all.
    Builtin,
}

impl CatalogSource {
    /// Applies the priority order: environment, explicit path, default path.
    pub fn resolve(
        config_path: Option<PathBuf>,
        env_path: Option<PathBuf>,
        default_path: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = env_path {
            return CatalogSource::Explicit(path);
        }
        if let Some(path) = config_path {
            return CatalogSource::Explicit(path);
        }
        match default_path {
            Some(path) => CatalogSource::Default(path),
            None => CatalogSource::Builtin,
        }
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Serialized form of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: BTreeMap<String, ProductEntry>,
}

impl CatalogConfig {
    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Reads a catalog file, choosing the parser by extension.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        info!(?path, "Loading catalog from file");
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Loads the catalog configuration.
    ///
    /// ## Load Order
    /// See the module docs: `TALLY_CATALOG_PATH`, then `config_path`, then
    /// the platform config directory, then the reference catalog.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let env_path = std::env::var_os(CATALOG_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        if let Some(ref path) = env_path {
            debug!(?path, "Catalog path overridden from environment");
        }

        match CatalogSource::resolve(config_path, env_path, Self::default_config_path()) {
            CatalogSource::Explicit(path) => {
                if !path.exists() {
                    return Err(CatalogError::NotFound(path));
                }
                Self::from_path(&path)
            }
            CatalogSource::Default(path) if path.exists() => Self::from_path(&path),
            CatalogSource::Default(path) => {
                debug!(?path, "Catalog file not found, using reference catalog");
                reference_config()
            }
            CatalogSource::Builtin => reference_config(),
        }
    }

    /// Builds the runtime catalog, logging any rule that cannot behave as
    /// its author probably intended.
    pub fn into_catalog(self) -> CatalogResult<Catalog> {
        let mut catalog = Catalog::new();

        for (item_id, entry) in self.products {
            let product = Product::new(Money::from_cents(entry.price_cents), entry.rules)?;
            catalog.insert(item_id, product)?;
        }

        for warning in catalog.validate_rules() {
            warn!(%warning, "Suspicious pricing rule");
        }

        info!(products = catalog.len(), "Catalog ready");
        Ok(catalog)
    }

    pub fn to_toml_string(&self) -> CatalogResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// `catalog.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

/// Parsed reference catalog configuration.
pub fn reference_config() -> CatalogResult<CatalogConfig> {
    CatalogConfig::from_toml_str(REFERENCE_CATALOG_TOML)
}

/// The reference store catalog, ready for checkout.
///
/// ```rust
/// use tally_catalog::reference_catalog;
/// use tally_core::Checkout;
///
/// let catalog = reference_catalog().unwrap();
/// let mut co = Checkout::new(&catalog);
/// co.scan("mbp");
/// co.scan("vga");
/// co.scan("ipd");
/// assert_eq!(co.total().unwrap().to_string(), "$1949.98");
/// ```
pub fn reference_catalog() -> CatalogResult<Catalog> {
    reference_config()?.into_catalog()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{Checkout, CoreError};

    fn total_of(catalog: &Catalog, items: &[&str]) -> Result<Money, CoreError> {
        let mut co = Checkout::new(catalog);
        for item in items {
            co.scan(item);
        }
        co.total()
    }

    /// Writes `contents` to a per-test file in the system temp dir.
    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tally-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reference_catalog_contents() {
        let catalog = reference_catalog().unwrap();
        assert_eq!(catalog.item_ids(), vec!["atv", "ipd", "mbp", "vga"]);
        assert_eq!(
            catalog.get("ipd").map(Product::unit_price),
            Some(Money::from_cents(54999))
        );
        assert!(catalog.get("vga").unwrap().rules().is_empty());
        assert!(catalog.validate_rules().is_empty());
    }

    #[test]
    fn test_reference_scenarios() {
        let catalog = reference_catalog().unwrap();

        let cases: &[(&[&str], i64)] = &[
            (&["atv", "atv", "atv", "vga"], 24900),
            (&["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"], 271895),
            (&["mbp", "vga", "ipd"], 194998),
            (&[], 0),
            (&["mbp", "mbp", "vga", "vga", "vga"], 282998),
            (&["mbp", "ipd", "ipd", "ipd", "ipd", "ipd", "vga"], 389994),
        ];

        for (items, cents) in cases {
            assert_eq!(
                total_of(&catalog, items).unwrap(),
                Money::from_cents(*cents),
                "items: {items:?}"
            );
        }
    }

    #[test]
    fn test_reference_unknown_item() {
        let catalog = reference_catalog().unwrap();
        assert_eq!(
            total_of(&catalog, &["xyz"]),
            Err(CoreError::UnknownItem("xyz".to_string()))
        );
    }

    #[test]
    fn test_parse_toml() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [products.tee]
            price_cents = 1500
            rules = [
                { kind = "bulk_discount", min_quantity = 3, discounted_price_cents = 1200 },
                { kind = "buy_x_get_y_free", buy = 3, free = 1 },
            ]

            [products.cap]
            price_cents = 900
            "#,
        )
        .unwrap();

        let tee = &config.products["tee"];
        assert_eq!(tee.price_cents, 1500);
        assert_eq!(tee.rules.len(), 2);
        assert_eq!(tee.rules[1], PricingRule::buy_x_get_y_free(3, 1).unwrap());
        assert!(config.products["cap"].rules.is_empty());

        // Last rule wins: 4 tees → 1 free → 3 × $15.00
        let catalog = config.into_catalog().unwrap();
        assert_eq!(
            total_of(&catalog, &["tee", "tee", "tee", "tee"]).unwrap(),
            Money::from_cents(4500)
        );
    }

    #[test]
    fn test_parse_json() {
        let config = CatalogConfig::from_json_str(
            r#"{
                "products": {
                    "mbp": {
                        "price_cents": 139999,
                        "rules": [{ "kind": "free_item_with_purchase", "required_item": "mbp", "free_item": "vga" }]
                    },
                    "vga": { "price_cents": 3000 }
                }
            }"#,
        )
        .unwrap();

        let catalog = config.into_catalog().unwrap();
        assert_eq!(
            total_of(&catalog, &["mbp", "vga"]).unwrap(),
            Money::from_cents(139999)
        );
    }

    #[test]
    fn test_invalid_rule_rejected_at_parse() {
        let result = CatalogConfig::from_toml_str(
            r#"
            [products.atv]
            price_cents = 10950
            rules = [{ kind = "buy_x_get_y_free", buy = 0, free = 0 }]
            "#,
        );
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [products.bad]
            price_cents = -5
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.into_catalog(),
            Err(CatalogError::Core(CoreError::Validation(_)))
        ));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [products.big]
            price_cents = 9223372036854775807
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.into_catalog(),
            Err(CatalogError::Core(CoreError::Validation(_)))
        ));

        let result = CatalogConfig::from_toml_str(
            r#"
            [products.atv]
            price_cents = 10950
            rules = [{ kind = "buy_x_get_y_free", buy = 9223372036854775807, free = 1 }]
            "#,
        );
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn test_bad_item_id_rejected() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [products."apple tv"]
            price_cents = 10950
            "#,
        )
        .unwrap();

        assert!(matches!(config.into_catalog(), Err(CatalogError::Core(_))));
    }

    #[test]
    fn test_to_toml_string_reparses() {
        let config = reference_config().unwrap();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[products.atv]"));
        assert!(toml_str.contains("buy_x_get_y_free"));

        assert_eq!(CatalogConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_from_path_picks_parser_by_extension() {
        let toml_path = temp_file("store.toml", "[products.vga]\nprice_cents = 3000\n");
        let json_path = temp_file("store.json", r#"{"products":{"vga":{"price_cents":3000}}}"#);

        let from_toml = CatalogConfig::from_path(&toml_path).unwrap();
        let from_json = CatalogConfig::from_path(&json_path).unwrap();
        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.products["vga"].price_cents, 3000);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("tally-catalog-does-not-exist.toml");
        let source = CatalogSource::resolve(Some(path.clone()), None, None);
        assert_eq!(source, CatalogSource::Explicit(path.clone()));

        // Skip when the environment already points somewhere else
        if std::env::var_os(CATALOG_PATH_ENV).is_none() {
            assert!(matches!(
                CatalogConfig::load(Some(path)),
                Err(CatalogError::NotFound(_))
            ));
        }
    }

    #[test]
    fn test_source_priority() {
        let env = PathBuf::from("/env/catalog.toml");
        let explicit = PathBuf::from("/explicit/catalog.toml");
        let default = PathBuf::from("/default/catalog.toml");

        assert_eq!(
            CatalogSource::resolve(
                Some(explicit.clone()),
                Some(env.clone()),
                Some(default.clone())
            ),
            CatalogSource::Explicit(env)
        );
        assert_eq!(
            CatalogSource::resolve(Some(explicit.clone()), None, Some(default.clone())),
            CatalogSource::Explicit(explicit)
        );
        assert_eq!(
            CatalogSource::resolve(None, None, Some(default.clone())),
            CatalogSource::Default(default)
        );
        assert_eq!(CatalogSource::resolve(None, None, None), CatalogSource::Builtin);
    }

    #[test]
    fn test_load_explicit_file() {
        let path = temp_file(
            "load.toml",
            "[products.atv]\nprice_cents = 10950\nrules = [{ kind = \"buy_x_get_y_free\", buy = 2, free = 1 }]\n",
        );

        if std::env::var_os(CATALOG_PATH_ENV).is_none() {
            let catalog = CatalogConfig::load(Some(path)).unwrap().into_catalog().unwrap();
            assert_eq!(
                total_of(&catalog, &["atv", "atv", "atv"]).unwrap(),
                Money::from_cents(21900)
            );
        }
    }
}
