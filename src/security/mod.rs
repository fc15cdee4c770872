//! Security utilities for the static file server

pub mod escape;
pub mod exposure;
pub mod path;

pub use escape::{encode_href, encode_html};
pub use exposure::{exposure_warnings, log_exposure_warnings, ExposureWarning};
pub use path::resolve_request_path;
