//! Seed catalog: the static reference data sampled to build documents.
//!
//! The catalog is loaded once per run and never mutated afterwards. Every
//! sequence must be non-empty, otherwise generation has nothing to draw from.

use crate::format::{self, FileFormat, ParseError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for seed catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Error reading the seed file
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON
    #[error("Failed to parse seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing YAML
    #[error("Failed to parse seed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A required sequence has no entries
    #[error("Seed catalog has no {0}")]
    Empty(&'static str),
}

impl From<ParseError> for CatalogError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Json(e) => CatalogError::Json(e),
            ParseError::Yaml(e) => CatalogError::Yaml(e),
        }
    }
}

/// Postal address of a store. Every part is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A retail store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub address: Address,
}

impl Store {
    /// Create a store without address details.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: Address::default(),
        }
    }
}

/// A clerk operating a till.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clerk {
    pub id: String,
    pub name: String,
}

impl Clerk {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A product that can be placed in a basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
}

/// Static reference data for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeedCatalog {
    pub stores: Vec<Store>,
    pub clerks: Vec<Clerk>,
    pub products: Vec<Product>,
}

impl SeedCatalog {
    /// Create a catalog from its three sequences.
    pub fn new(stores: Vec<Store>, clerks: Vec<Clerk>, products: Vec<Product>) -> Self {
        Self {
            stores,
            clerks,
            products,
        }
    }

    /// Load a catalog from a JSON or YAML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content, FileFormat::from_path(path))
    }

    /// Parse a catalog from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::parse(json, FileFormat::Json)
    }

    /// Parse a catalog from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Self::parse(yaml, FileFormat::Yaml)
    }

    fn parse(content: &str, format: FileFormat) -> Result<Self, CatalogError> {
        let catalog: SeedCatalog = format::parse(content, format)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that no sequence is empty.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.stores.is_empty() {
            return Err(CatalogError::Empty("stores"));
        }
        if self.clerks.is_empty() {
            return Err(CatalogError::Empty("clerks"));
        }
        if self.products.is_empty() {
            return Err(CatalogError::Empty("products"));
        }
        Ok(())
    }
}
