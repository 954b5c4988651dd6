use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Jacket,
    Shoes,
    Shirt,
    Pants,
    Dress,
}

impl Category {
    /// Fixed scan order used by every matcher.
    pub const ALL: [Category; 5] =
        [Category::Jacket, Category::Shoes, Category::Shirt, Category::Pants, Category::Dress];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jacket => "jacket",
            Self::Shoes => "shoes",
            Self::Shirt => "shirt",
            Self::Pants => "pants",
            Self::Dress => "dress",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownCategory(value.trim().to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Casual,
    Formal,
    Sporty,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Casual, Style::Formal, Style::Sporty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Sporty => "sporty",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownStyle(value.trim().to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: Category,
    pub style: Style,
    pub price: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, category: Category, style: Style, price: Decimal) -> Self {
        Self { name: name.into(), category, style, price }
    }
}
