//! Mocked image upload: no storage exists, so an "upload" of N files hands
//! back up to N static stock references.

pub const STOCK_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800&q=80",
    "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=800&q=80",
    "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=800&q=80",
];

/// Image used when a listing is published with no photos at all.
pub const FALLBACK_IMAGE: &str = STOCK_IMAGES[0];

/// Return stock references for a requested file count, capped at the stock
/// pool size.
pub fn upload_images(count: usize) -> Vec<String> {
    STOCK_IMAGES
        .iter()
        .take(count)
        .map(|url| url.to_string())
        .collect()
}
