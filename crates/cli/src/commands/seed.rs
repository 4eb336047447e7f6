//! Seed the product catalog from a YAML file.
//!
//! Products are matched by name: existing rows are updated in place, new
//! names are inserted. Cart and order rows are never touched.
//!
//! # File format
//!
//! ```yaml
//! products:
//!   - name: Milk
//!     description: Fresh full-cream milk, 1 litre
//!     price: 60
//!     availability_status: in stock   # optional, defaults to "in stock"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use sales_chatbot_core::{Availability, Price};
use sales_chatbot_webhook::db::{NewProduct, ProductRepository};

use super::connect;

/// Top-level catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<CatalogEntry>,
}

/// One product entry in the catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i32,
    #[serde(default)]
    pub availability_status: Option<String>,
}

impl CatalogEntry {
    fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            price: Price::new(self.price),
            availability_status: self
                .availability_status
                .as_deref()
                .map_or_else(Availability::in_stock, |status| Availability::new(status.trim())),
        }
    }
}

/// Check a parsed catalog and return every problem found.
#[must_use]
pub fn validate_catalog(catalog: &CatalogFile) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    if catalog.products.is_empty() {
        errors.push("catalog contains no products".to_owned());
    }

    for (index, entry) in catalog.products.iter().enumerate() {
        let name = entry.name.trim();
        if name.is_empty() {
            errors.push(format!("product #{}: name is empty", index + 1));
            continue;
        }
        if !seen.insert(name) {
            errors.push(format!("product '{name}': duplicate name"));
        }
        if entry.price < 0 {
            errors.push(format!("product '{name}': price must not be negative"));
        }
        if entry
            .availability_status
            .as_deref()
            .is_some_and(|status| status.trim().is_empty())
        {
            errors.push(format!("product '{name}': availability_status is empty"));
        }
    }

    errors
}

/// Seed catalog products from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `dry_run` - If true, only parse and validate the file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, validation fails,
/// or database operations fail.
pub async fn products(file_path: &str, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    info!(products = catalog.products.len(), "Parsed catalog");

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!("Catalog validated successfully");

    if dry_run {
        info!("Dry run, skipping database writes");
        return Ok(());
    }

    let pool = connect().await?;
    let repo = ProductRepository::new(&pool);

    let mut seeded = 0usize;
    for entry in &catalog.products {
        let product = repo.upsert(&entry.to_new_product()).await?;
        info!(
            product_id = %product.product_id,
            name = %product.name,
            "Upserted product"
        );
        seeded += 1;
    }

    info!("Seeding complete!");
    info!("  Products upserted: {seeded}");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CatalogFile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_catalog_with_defaults() {
        let catalog = parse(
            r"
products:
  - name: Milk
    description: Fresh milk
    price: 60
  - name: Bread
    price: 40
    availability_status: out of stock
",
        );

        assert_eq!(catalog.products.len(), 2);
        let milk = catalog.products[0].to_new_product();
        assert_eq!(milk.name, "Milk");
        assert_eq!(milk.price.minor_units(), 60);
        assert!(milk.availability_status.is_in_stock());

        let bread = catalog.products[1].to_new_product();
        assert_eq!(bread.description, "");
        assert_eq!(bread.availability_status.as_str(), "out of stock");
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_price() {
        let result: Result<CatalogFile, _> = serde_yaml::from_str(
            r"
products:
  - name: Milk
",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let catalog = parse(
            r"
products:
  - name: Milk
    price: 60
  - name: ' Milk '
    price: 10
  - name: ''
    price: 5
  - name: Eggs
    price: -1
    availability_status: '  '
",
        );

        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("duplicate name")));
        assert!(errors.iter().any(|e| e.contains("#3")));
        assert!(errors.iter().any(|e| e.contains("negative")));
        assert!(errors.iter().any(|e| e.contains("availability_status")));
    }

    #[test]
    fn test_validate_empty_catalog() {
        let catalog = parse("products: []");
        assert_eq!(validate_catalog(&catalog), vec!["catalog contains no products"]);
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = parse(include_str!("../../data/products.yaml"));
        assert!(validate_catalog(&catalog).is_empty());
    }
}
