//! Catalog-level views.

use serde::{Deserialize, Serialize};

use super::{Category, Service};

/// One category tab with its services in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListing {
    pub category: Category,
    pub label: String,
    pub services: Vec<Service>,
}

/// The full category to services mapping, categories in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub categories: Vec<CategoryListing>,
}

impl CatalogSnapshot {
    pub fn services(&self, category: Category) -> &[Service] {
        self.categories
            .iter()
            .find(|listing| listing.category == category)
            .map(|listing| listing.services.as_slice())
            .unwrap_or_default()
    }
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}

/// Result of a delete call; deletes of unknown ids still succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub removed: bool,
}
