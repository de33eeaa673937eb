//! Display images for brand cards. Resolution happens at render time only.

use crate::brands::Brand;

pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1506617420156-8e4536971650?auto=format&fit=crop&q=80&w=1200";

const BRAND_IMAGES: &[(&str, &str)] = &[
    (
        "Biossance",
        "https://images.unsplash.com/photo-1676803704299-b59cd8fecb7d?auto=format&fit=crop&q=80&w=1200",
    ),
    (
        "ILIA Beauty",
        "https://iliabeauty.com/cdn/shop/files/WEB-About_Us-_Image_Update_2025-0.jpg?v=1738871646&width=1500",
    ),
    (
        "Youth To The People",
        "https://blogscdn.thehut.net/app/uploads/sites/1778/2021/12/Blog-700x400_0007_YouthToThePeople_BOTM_3StepSuperfoodStarterKit_HighRes_1638532910.jpg",
    ),
];

/// Look up the curated image for a brand name (exact match).
#[must_use]
pub fn brand_image(name: &str) -> Option<&'static str> {
    BRAND_IMAGES
        .iter()
        .find(|(brand, _)| *brand == name)
        .map(|(_, url)| *url)
}

/// Fill in `image_url`: explicit value, then the curated table, then the default.
#[must_use]
pub fn resolve_image(mut brand: Brand) -> Brand {
    let explicit = brand
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    if explicit.is_none() {
        let url = brand_image(&brand.name).unwrap_or(DEFAULT_IMAGE_URL);
        brand.image_url = Some(url.to_string());
    }

    brand
}
