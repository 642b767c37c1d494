pub mod chunk;
pub mod convert;
pub mod encoding;
pub mod error;

use std::sync::OnceLock;

// Re-export key types for easier usage
pub use chunk::*;
pub use convert::{ConversionState, MrkdwnConverter, fence::FenceState};
pub use encoding::OutputEncoding;
pub use error::ConvertError;

fn default_converter() -> Option<&'static MrkdwnConverter> {
    static DEFAULT: OnceLock<Option<MrkdwnConverter>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            MrkdwnConverter::new()
                .inspect_err(|e| log::warn!("Failed to build mrkdwn converter: {e}"))
                .ok()
        })
        .as_ref()
}

/// Converts Markdown to Slack mrkdwn with the shared UTF-8 converter.
///
/// Returns the input unchanged if conversion is impossible.
pub fn convert(markdown: &str) -> String {
    match default_converter() {
        Some(converter) => converter.convert(markdown),
        None => markdown.to_string(),
    }
}

/// Like [`convert`], treating a missing answer as empty text.
pub fn convert_opt(markdown: Option<&str>) -> String {
    markdown.map(convert).unwrap_or_default()
}
