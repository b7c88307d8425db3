//! Dish Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name shown when a dish was stored without one
pub const UNTITLED_DISH: &str = "Untitled Dish";

/// Dish entity as stored in the remote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    /// Store-assigned document id
    pub id: String,
    pub name: String,
    /// Public URL on the image host
    pub image_url: String,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DishRecord {
    /// Name to render on a slide
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { UNTITLED_DISH } else { name }
    }
}

/// Create dish payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishCreate {
    pub name: String,
    pub image_url: String,
    pub category: Option<String>,
}

impl DishCreate {
    /// Build a payload from raw form input.
    ///
    /// Name and category are trimmed; a blank category is stored as null.
    pub fn new(name: &str, image_url: impl Into<String>, category: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self {
            name: name.trim().to_string(),
            image_url: image_url.into(),
            category,
        }
    }

    /// Check required fields, returning the first problem found
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name");
        }
        if self.image_url.trim().is_empty() {
            return Err("imageUrl");
        }
        Ok(())
    }
}
