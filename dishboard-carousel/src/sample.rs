//! Built-in sample dishes
//!
//! Shown when the dish store is not configured or fails before delivering
//! any data.

use chrono::{DateTime, Utc};
use shared::DishRecord;

const SAMPLES: [(&str, &str, &str); 3] = [
    (
        "sample-1",
        "Spicy Paneer Tikka",
        "https://images.unsplash.com/photo-1604908176997-431972db9adb?q=80&w=1600&auto=format&fit=crop",
    ),
    (
        "sample-2",
        "Classic Margherita Pizza",
        "https://images.unsplash.com/photo-1542281286-9e0a16bb7366?q=80&w=1600&auto=format&fit=crop",
    ),
    (
        "sample-3",
        "Berry Cheesecake",
        "https://images.unsplash.com/photo-1519681393784-d120267933ba?q=80&w=1600&auto=format&fit=crop",
    ),
];

/// The fixed sample list, in display order
pub fn sample_dishes() -> Vec<DishRecord> {
    // Same timestamp for all, so the stable oldest-first sort keeps this order
    let created_at = DateTime::<Utc>::UNIX_EPOCH;
    SAMPLES
        .iter()
        .map(|(id, name, url)| DishRecord {
            id: (*id).to_string(),
            name: (*name).to_string(),
            image_url: (*url).to_string(),
            category: None,
            created_at,
        })
        .collect()
}
