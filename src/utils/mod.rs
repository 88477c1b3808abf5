pub mod colors;
pub mod url_validator;

pub use colors::{contrast_text_color, is_hex_color};
pub use url_validator::{UrlValidationError, normalize_target_url, validate_http_url};
