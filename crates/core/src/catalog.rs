use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::product::{Category, Product, Style};
use crate::errors::DomainError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog record {index} is invalid: {source}")]
    InvalidRecord { index: usize, source: DomainError },
    #[error("catalog `{0}` contains no products")]
    Empty(PathBuf),
}

/// Read-only ordered product collection shared by every conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let catalog = Self::from_json_str(&raw)?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }

        info!(
            event_name = "catalog.loaded",
            path = %path.display(),
            products = catalog.len(),
            "product catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let records = serde_json::from_str::<Vec<CatalogRecord>>(raw)?;
        let products = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .into_product()
                    .map_err(|source| CatalogError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(products))
    }

    /// Built-in fixture covering every category/style pair.
    pub fn demo() -> Self {
        let products = DEMO_SEEDS
            .iter()
            .map(|seed| {
                let price = Decimal::new(seed.price_pence, 2);
                Product::new(seed.name, seed.category, seed.style, price)
            })
            .collect();
        Self::new(products)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    name: String,
    category: String,
    style: String,
    price: Decimal,
}

impl CatalogRecord {
    fn into_product(self) -> Result<Product, DomainError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::InvariantViolation("product name must not be empty".into()));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::InvariantViolation(format!(
                "price for `{name}` must be positive, got {}",
                self.price
            )));
        }

        let category = self.category.parse::<Category>()?;
        let style = self.style.parse::<Style>()?;
        Ok(Product::new(name, category, style, self.price))
    }
}

#[derive(Debug, Clone, Copy)]
struct ProductSeed {
    name: &'static str,
    category: Category,
    style: Style,
    price_pence: i64,
}

const fn seed(
    name: &'static str,
    category: Category,
    style: Style,
    price_pence: i64,
) -> ProductSeed {
    ProductSeed { name, category, style, price_pence }
}

const DEMO_SEEDS: &[ProductSeed] = &[
    seed("Denim Trucker Jacket", Category::Jacket, Style::Casual, 45_00),
    seed("Quilted Puffer Jacket", Category::Jacket, Style::Casual, 89_99),
    seed("Wool Blend Blazer", Category::Jacket, Style::Formal, 129_00),
    seed("Tailored Overcoat", Category::Jacket, Style::Formal, 189_50),
    seed("Running Windbreaker", Category::Jacket, Style::Sporty, 39_99),
    seed("Thermal Track Jacket", Category::Jacket, Style::Sporty, 64_00),
    seed("Canvas Low-Top Sneakers", Category::Shoes, Style::Casual, 35_00),
    seed("Suede Desert Boots", Category::Shoes, Style::Casual, 74_99),
    seed("Leather Oxford Shoes", Category::Shoes, Style::Formal, 110_00),
    seed("Patent Derby Shoes", Category::Shoes, Style::Formal, 95_00),
    seed("Cushioned Road Trainers", Category::Shoes, Style::Sporty, 79_99),
    seed("Trail Running Shoes", Category::Shoes, Style::Sporty, 99_00),
    seed("Washed Cotton Tee", Category::Shirt, Style::Casual, 12_50),
    seed("Linen Camp Collar Shirt", Category::Shirt, Style::Casual, 32_00),
    seed("Slim Fit Poplin Shirt", Category::Shirt, Style::Formal, 42_00),
    seed("Double Cuff Dress Shirt", Category::Shirt, Style::Formal, 58_00),
    seed("Moisture Wicking Training Top", Category::Shirt, Style::Sporty, 22_99),
    seed("Performance Polo", Category::Shirt, Style::Sporty, 29_50),
    seed("Relaxed Chinos", Category::Pants, Style::Casual, 38_00),
    seed("Straight Leg Jeans", Category::Pants, Style::Casual, 49_99),
    seed("Pleated Wool Trousers", Category::Pants, Style::Formal, 85_00),
    seed("Tailored Suit Trousers", Category::Pants, Style::Formal, 69_00),
    seed("Tapered Joggers", Category::Pants, Style::Sporty, 27_99),
    seed("Compression Leggings", Category::Pants, Style::Sporty, 34_50),
    seed("Floral Summer Dress", Category::Dress, Style::Casual, 44_00),
    seed("Jersey Wrap Dress", Category::Dress, Style::Casual, 39_00),
    seed("Satin Evening Gown", Category::Dress, Style::Formal, 160_00),
    seed("Structured Midi Dress", Category::Dress, Style::Formal, 98_00),
    seed("Tennis Dress", Category::Dress, Style::Sporty, 48_00),
    seed("Seamless Active Dress", Category::Dress, Style::Sporty, 55_00),
];
