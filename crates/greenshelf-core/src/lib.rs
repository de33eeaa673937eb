pub mod app_config;
pub mod brands;
pub mod config;
pub mod images;
pub mod pagination;
pub mod validation;

pub use app_config::{AppConfig, Environment};
pub use brands::{
    normalize_certifications, sample_brands, Brand, BrandInput, CertificationCount, PRICE_TIERS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use images::{resolve_image, DEFAULT_IMAGE_URL};
pub use pagination::{page_count, page_offset, parse_page, BROWSE_PAGE_SIZE, HOME_TEASER_SIZE};
pub use validation::{validate, BrandForm, ValidationErrors};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
