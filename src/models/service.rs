//! Service model matching the portal's Service interface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Practice area partitioning the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Litigation,
    Family,
    Business,
    Estate,
}

impl Category {
    /// Declaration order, used for every cross-category listing.
    pub const ALL: [Category; 4] = [
        Category::Litigation,
        Category::Family,
        Category::Business,
        Category::Estate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Litigation => "litigation",
            Category::Family => "family",
            Category::Business => "business",
            Category::Estate => "estate",
        }
    }

    /// Tab label shown in both portals.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Litigation => "Litigation",
            Category::Family => "Family Law",
            Category::Business => "Business Law",
            Category::Estate => "Estate Planning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category key is not one of the four practice areas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "litigation" => Ok(Category::Litigation),
            "family" => Ok(Category::Family),
            "business" => Ok(Category::Business),
            "estate" => Ok(Category::Estate),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A cataloged service offered by the practice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub details: Vec<String>,
    pub price: String,
    pub popular: bool,
}

/// An in-progress service record, possibly incomplete.
///
/// Used as the request body for both creating and replacing a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub popular: bool,
}

impl ServiceDraft {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.price.trim().is_empty() {
            missing.push("price");
        }
        missing
    }

    /// Attach an id, producing a full record.
    pub fn into_service(self, id: i64) -> Service {
        Service {
            id,
            title: self.title,
            description: self.description,
            details: self.details,
            price: self.price,
            popular: self.popular,
        }
    }
}

impl From<Service> for ServiceDraft {
    fn from(service: Service) -> Self {
        Self {
            title: service.title,
            description: service.description,
            details: service.details,
            price: service.price,
            popular: service.popular,
        }
    }
}

/// Detail line stored when every submitted detail was blank.
pub const DETAILS_PLACEHOLDER: &str = "Details available on request";

/// Drop blank detail lines; fall back to a single placeholder line.
pub fn normalize_details(details: Vec<String>) -> Vec<String> {
    let kept: Vec<String> = details
        .into_iter()
        .filter(|detail| !detail.trim().is_empty())
        .collect();

    if kept.is_empty() {
        vec![DETAILS_PLACEHOLDER.to_string()]
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_and_order() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!(
            "tax".parse::<Category>(),
            Err(UnknownCategory("tax".to_string()))
        );
        assert_eq!(Category::Family.label(), "Family Law");
        assert_eq!(
            serde_json::to_string(&Category::Estate).unwrap(),
            "\"estate\""
        );
    }

    #[test]
    fn test_missing_fields_lists_blank_required_fields() {
        let draft = ServiceDraft {
            title: "Tax Appeal".to_string(),
            description: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.missing_fields(), vec!["description", "price"]);
    }

    #[test]
    fn test_normalize_details_drops_blank_lines() {
        let details = vec!["a".to_string(), "".to_string(), "  ".to_string()];
        assert_eq!(normalize_details(details), vec!["a".to_string()]);
    }

    #[test]
    fn test_normalize_details_is_idempotent() {
        let details = vec!["Case evaluation".to_string(), "Trial".to_string()];
        let once = normalize_details(details.clone());
        assert_eq!(once, details);
        assert_eq!(normalize_details(once.clone()), once);
    }

    #[test]
    fn test_normalize_details_placeholder_when_all_blank() {
        let details = vec![String::new(); 5];
        assert_eq!(
            normalize_details(details),
            vec![DETAILS_PLACEHOLDER.to_string()]
        );
        assert_eq!(
            normalize_details(Vec::new()),
            vec![DETAILS_PLACEHOLDER.to_string()]
        );
    }
}
