use encoding_rs::{Encoding, UTF_8};

use crate::error::ConvertError;

/// Text encoding the converted output must be representable in.
///
/// Labels follow the WHATWG Encoding Standard (`utf-8`, `windows-1252`,
/// `shift_jis`, ...). Rust strings are always UTF-8, so the check only
/// matters for legacy targets where some characters have no mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEncoding(&'static Encoding);

impl OutputEncoding {
    pub fn for_label(label: &str) -> Result<Self, ConvertError> {
        Encoding::for_label(label.as_bytes())
            .map(Self)
            .ok_or_else(|| ConvertError::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Fails if any character of `text` has no mapping in this encoding.
    pub fn ensure_representable(&self, text: &str) -> Result<(), ConvertError> {
        if self.0 == UTF_8 {
            return Ok(());
        }
        let (_, _, had_errors) = self.0.encode(text);
        if had_errors {
            return Err(ConvertError::Unencodable {
                encoding: self.name(),
            });
        }
        Ok(())
    }
}

impl Default for OutputEncoding {
    fn default() -> Self {
        Self(UTF_8)
    }
}
