//! Display WebSocket protocol
//!
//! Cloud → Display: DisplayMessage (slide frames and indicator changes)
//! Display → Cloud: DisplayCommand (navigation and fullscreen requests)

use serde::{Deserialize, Serialize};

use crate::models::DishRecord;

/// Text shown in place of an image that failed to load
pub const IMAGE_UNAVAILABLE: &str = "Image not available";

/// How a slide is laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideLayout {
    /// Landscape image covering the whole frame
    FullBleed,
    /// Portrait image centered, a blurred copy fills the sides
    Letterboxed,
    /// Image failed to load, text only
    Placeholder,
}

/// One rendered slide: a dish image with its name overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideFrame {
    pub dish_id: String,
    /// Overlay text
    pub name: String,
    /// None for placeholder slides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub layout: SlideLayout,
    /// Placeholder body, present only for [`SlideLayout::Placeholder`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl SlideFrame {
    /// Slide for a successfully loaded image
    pub fn image(dish: &DishRecord, layout: SlideLayout) -> Self {
        Self {
            dish_id: dish.id.clone(),
            name: dish.display_name().to_string(),
            image_url: Some(dish.image_url.clone()),
            layout,
            placeholder: None,
        }
    }

    /// Text-only slide for an image that could not be loaded
    pub fn placeholder(dish: &DishRecord) -> Self {
        let name = dish.display_name().to_string();
        Self {
            dish_id: dish.id.clone(),
            placeholder: Some(format!("{IMAGE_UNAVAILABLE}: {name}")),
            name,
            image_url: None,
            layout: SlideLayout::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.layout == SlideLayout::Placeholder
    }
}

/// Cloud → Display push message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayMessage {
    /// Sent on connect (and after lag): the complete current frame
    Ready {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slide: Option<SlideFrame>,
        /// Whether the slide has finished fading in
        visible: bool,
        badge: bool,
        fullscreen: bool,
        fullscreen_label: String,
    },

    /// Replace the slide; it starts transparent
    Slide { slide: SlideFrame },

    /// Fade the current slide to full opacity
    FadeIn,

    /// Remove the slide (dish list became empty)
    Clear,

    /// Show or hide the "updated" indicator
    Badge { visible: bool },

    /// Enter or leave fullscreen and relabel the toggle
    Fullscreen { active: bool, label: String },
}

/// Display → Cloud command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayCommand {
    Next,
    Prev,
    ToggleFullscreen,
}
