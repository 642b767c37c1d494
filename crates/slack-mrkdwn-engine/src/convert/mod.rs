//! Markdown to Slack mrkdwn conversion.
//!
//! The pipeline runs in three stages:
//!
//! 1. **Table extraction** ([`tables`]): block tables are rendered up front and
//!    replaced by opaque placeholder tokens, so no line rule can touch cells.
//! 2. **Line rewriting** ([`rules`]): each line passes through the code fence
//!    state machine ([`fence`]) and, outside fences, the ordered rule list.
//! 3. **Restoration**: placeholders are swapped back for the rendered tables.
//!
//! A [`MrkdwnConverter`] is immutable once built. Everything that changes
//! during a conversion lives in a [`ConversionState`] owned by that call, so
//! one converter can serve any number of threads.

pub mod emphasis;
pub mod fence;
pub mod rules;
pub mod tables;

#[cfg(test)]
mod tests;

use crate::encoding::OutputEncoding;
use crate::error::ConvertError;

use fence::{CodeFence, FenceState};
use rules::RuleSet;
use tables::{TableExtractor, TablePlaceholders};

/// Mutable state for a single conversion.
#[derive(Debug, Default)]
pub struct ConversionState {
    pub fence: FenceState,
    pub tables: TablePlaceholders,
}

#[derive(Debug)]
pub struct MrkdwnConverter {
    tables: TableExtractor,
    rules: RuleSet,
    encoding: OutputEncoding,
}

impl MrkdwnConverter {
    /// Builds a converter producing UTF-8 output.
    pub fn new() -> Result<Self, ConvertError> {
        Self::with_encoding(OutputEncoding::default())
    }

    /// Builds a converter whose output must be representable in `encoding`.
    pub fn with_encoding(encoding: OutputEncoding) -> Result<Self, ConvertError> {
        Ok(Self {
            tables: TableExtractor::compile()?,
            rules: RuleSet::compile()?,
            encoding,
        })
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Converts Markdown to mrkdwn.
    ///
    /// Never fails: if anything goes wrong internally the input is returned
    /// exactly as given and the fault is logged.
    pub fn convert(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }

        match self.try_convert(markdown) {
            Ok(converted) => converted,
            Err(e) => {
                log::warn!("mrkdwn conversion failed, sending original text: {e}");
                markdown.to_string()
            }
        }
    }

    fn try_convert(&self, markdown: &str) -> Result<String, ConvertError> {
        let mut state = ConversionState::default();
        let text = self.tables.extract(markdown.trim(), &mut state.tables);

        let mut lines = Vec::new();
        for line in text.split('\n') {
            let (converted, fence) = self.convert_line(line, state.fence);
            state.fence = fence;
            lines.push(converted);
        }

        if state.fence.is_inside() {
            log::debug!("unclosed code fence; trailing lines were left as-is");
        }
        log::debug!(
            "converted {} lines with {} tables",
            lines.len(),
            state.tables.len()
        );

        let result = state.tables.restore(&lines.join("\n"))?;
        self.encoding.ensure_representable(&result)?;
        Ok(result)
    }

    /// Converts one line given the fence state before it, returning the
    /// converted line and the fence state after it.
    pub fn convert_line(&self, line: &str, fence: FenceState) -> (String, FenceState) {
        if TablePlaceholders::is_placeholder(line) {
            return (line.to_string(), fence);
        }

        if let Some(tag) = CodeFence::sig(line) {
            let (next, marker) = CodeFence::cross(fence, tag);
            return (marker, next);
        }

        if fence.is_inside() {
            return (line.to_string(), fence);
        }

        (self.rules.rewrite(line), fence)
    }
}
