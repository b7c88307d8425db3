//! Dish photos: hosting uploads and probing dimensions for the carousel

mod cloudinary;
mod loader;

pub use cloudinary::{CloudinaryClient, ImageHost, UploadError};
pub use loader::HttpImageLoader;

/// Maximum upload size (20MB)
pub const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

/// Accepted upload extensions
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Lowercased extension of `file_name` if it is an accepted image format
pub fn supported_extension(file_name: &str) -> Option<String> {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())?;
    SUPPORTED_FORMATS.contains(&ext.as_str()).then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check() {
        assert_eq!(supported_extension("tikka.JPG").as_deref(), Some("jpg"));
        assert_eq!(supported_extension("cake.webp").as_deref(), Some("webp"));
        assert_eq!(supported_extension("menu.pdf"), None);
        assert_eq!(supported_extension("noext"), None);
        assert_eq!(supported_extension(""), None);
    }
}
