//! Product catalog and the name index used for reconciliation.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::models::config::CatalogConfig;

/// A canonical product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product code.
    pub product_id: String,

    /// Canonical display name.
    pub product_name: String,
}

impl Product {
    pub fn new(product_id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
        }
    }
}

/// Ordered collection of products. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load a goods CSV from a file.
    pub fn from_csv_path(path: &Path, columns: &CatalogConfig) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file, columns)
    }

    /// Load a goods CSV with a header row.
    ///
    /// Only the code and name columns are read; rows with an empty name are
    /// skipped.
    pub fn from_csv_reader<R: Read>(reader: R, columns: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
        };
        let id_idx = position(&columns.id_column)?;
        let name_idx = position(&columns.name_column)?;

        let mut products = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let name = record.get(name_idx).unwrap_or("");
            if name.is_empty() {
                continue;
            }
            let id = record.get(id_idx).unwrap_or("");
            products.push(Product::new(id, name));
        }

        debug!("Loaded catalog with {} products", products.len());
        Ok(Self { products })
    }
}

/// Read-only name index over a [`Catalog`], built once per run.
///
/// Keeps the catalog's name order for matching and resolves a name to the
/// first product carrying it.
#[derive(Debug)]
pub struct CatalogIndex<'a> {
    names: Vec<&'a str>,
    by_name: HashMap<&'a str, &'a Product>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut by_name = HashMap::with_capacity(catalog.len());
        for product in &catalog.products {
            by_name.entry(product.product_name.as_str()).or_insert(product);
        }

        Self {
            names: catalog.products.iter().map(|p| p.product_name.as_str()).collect(),
            by_name,
        }
    }

    /// All product names in catalog order, duplicates included.
    pub fn names(&self) -> &[&'a str] {
        &self.names
    }

    /// First product whose name is exactly `name`.
    pub fn lookup(&self, name: &str) -> Option<&'a Product> {
        self.by_name.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_goods_csv() {
        let data = "\u{feff}品號,品名,單價\nA001,蘋果汁330ml,25\nA002,,30\nA003,紅茶,15\n";
        let catalog = Catalog::from_csv_reader(data.as_bytes(), &CatalogConfig::default()).unwrap();

        assert_eq!(
            catalog.products,
            vec![Product::new("A001", "蘋果汁330ml"), Product::new("A003", "紅茶")]
        );
    }

    #[test]
    fn test_missing_column() {
        let data = "code,name\nA001,x\n";
        let err = Catalog::from_csv_reader(data.as_bytes(), &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(ref c) if c == "品號"));
    }

    #[test]
    fn test_custom_columns() {
        let columns = CatalogConfig {
            id_column: "code".to_string(),
            name_column: "name".to_string(),
        };
        let catalog = Catalog::from_csv_reader("code,name\nX1,Widget\n".as_bytes(), &columns).unwrap();
        assert_eq!(catalog.products[0], Product::new("X1", "Widget"));
    }

    #[test]
    fn test_index_first_wins() {
        let catalog = Catalog::new(vec![
            Product::new("1", "紅茶"),
            Product::new("2", "綠茶"),
            Product::new("3", "紅茶"),
        ]);
        let index = CatalogIndex::new(&catalog);

        assert_eq!(index.names(), &["紅茶", "綠茶", "紅茶"]);
        assert_eq!(index.lookup("紅茶").unwrap().product_id, "1");
        assert!(index.lookup("奶茶").is_none());
    }
}
