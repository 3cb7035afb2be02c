use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Currency code for Telegram Stars. Every price in the catalog is expressed in it.
pub const POINT_CURRENCY: &str = "XTR";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown item: {0}")]
    NotFound(String),
    #[error("catalog item has an empty id")]
    EmptyId,
    #[error("catalog item {0} has an empty display name")]
    EmptyName(String),
    #[error("catalog item {0} must have a positive price")]
    ZeroPrice(String),
    #[error("duplicate catalog item id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub display_name: String,
    pub price: u32,
    pub description: String,
}

struct Tier {
    id: &'static str,
    display_name: &'static str,
    price: u32,
    description: &'static str,
}

// Ids double as invoice payloads, so they must stay stable across releases.
const STANDARD_ITEMS: [Tier; 5] = [
    Tier {
        id: "basic",
        display_name: "+0.2× Mining Power — 50 ⭐️",
        price: 50,
        description: "upgrade your mining power by +0.2×",
    },
    Tier {
        id: "advanced",
        display_name: "+0.4× Mining Power — 100 ⭐️",
        price: 100,
        description: "uprade your mining power by +0.4×",
    },
    Tier {
        id: "recommended",
        display_name: "+0.6× Mining Power — 150 ⭐️",
        price: 150,
        description: "upgrade your mining power by +0.6×",
    },
    Tier {
        id: "ultra",
        display_name: "+0.8× Mining Power — 200 ⭐️",
        price: 200,
        description: "upgrade your mining power by +0.8×",
    },
    Tier {
        id: "ultimate",
        display_name: "+1.0× Mining Power — 250 ⭐️",
        price: 250,
        description: "upgrade your mining power by +1.0×",
    },
];

/// Read-only table of upgrade tiers, kept in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog, rejecting any record that could not be sold.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if item.display_name.trim().is_empty() {
                return Err(CatalogError::EmptyName(item.id.clone()));
            }
            if item.price == 0 {
                return Err(CatalogError::ZeroPrice(item.id.clone()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// The compiled-in mining power tiers.
    pub fn standard() -> Result<Self, CatalogError> {
        let items = STANDARD_ITEMS
            .iter()
            .map(|tier| CatalogItem {
                id: tier.id.to_string(),
                display_name: tier.display_name.to_string(),
                price: tier.price,
                description: tier.description.to_string(),
            })
            .collect();
        Self::new(items)
    }

    pub fn get(&self, id: &str) -> Result<&CatalogItem, CatalogError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
