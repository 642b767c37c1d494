use std::collections::HashMap;

use regex::{Captures, Regex};
use uuid::Uuid;

use crate::error::ConvertError;

pub const PLACEHOLDER_PREFIX: &str = "%%TABLE_PLACEHOLDER_";
pub const PLACEHOLDER_SUFFIX: &str = "%%";

/// Header row, separator row, then any number of body rows, all pipe-delimited
/// and on consecutive lines. Trailing blanks never reach past the line end.
const TABLE_PATTERN: &str = r"(?m)^\|(.+)\|[ \t\r]*$\n^\|[-:| ]+\|[ \t\r]*$(\n^\|.+\|[ \t\r]*$)*";

/// Rendered tables keyed by the placeholder token standing in for them.
#[derive(Debug, Default)]
pub struct TablePlaceholders {
    rendered: HashMap<String, String>,
}

impl TablePlaceholders {
    /// Stores `rendered` under a fresh token and returns the token.
    pub fn insert(&mut self, rendered: String) -> String {
        let token = format!(
            "{PLACEHOLDER_PREFIX}{}{PLACEHOLDER_SUFFIX}",
            Uuid::new_v4().simple()
        );
        self.rendered.insert(token.clone(), rendered);
        token
    }

    pub fn is_placeholder(line: &str) -> bool {
        line.starts_with(PLACEHOLDER_PREFIX) && line.ends_with(PLACEHOLDER_SUFFIX)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// Substitutes every token in `text` with its rendered table.
    ///
    /// A token missing from `text` means a line rule altered it; that is a
    /// fault, never silently ignored.
    pub fn restore(&self, text: &str) -> Result<String, ConvertError> {
        let mut out = text.to_string();
        for (token, table) in &self.rendered {
            if !out.contains(token.as_str()) {
                return Err(ConvertError::LostPlaceholder(token.clone()));
            }
            out = out.replace(token.as_str(), table);
        }
        Ok(out)
    }
}

/// Finds Markdown tables and swaps them for placeholders.
#[derive(Debug)]
pub struct TableExtractor {
    pattern: Regex,
}

impl TableExtractor {
    pub fn compile() -> Result<Self, ConvertError> {
        Ok(Self {
            pattern: Regex::new(TABLE_PATTERN)?,
        })
    }

    /// Replaces each table block in `markdown` with a placeholder token whose
    /// rendered mrkdwn is recorded in `placeholders`.
    pub fn extract(&self, markdown: &str, placeholders: &mut TablePlaceholders) -> String {
        self.pattern
            .replace_all(markdown, |caps: &Captures<'_>| {
                placeholders.insert(render_table(&caps[0]))
            })
            .into_owned()
    }
}

/// Renders a matched table block: bold header cells, plain body rows.
///
/// The separator row is dropped. Rows are not padded, so ragged tables come
/// out ragged.
pub fn render_table(block: &str) -> String {
    let mut rows = block.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = rows.next() else {
        return String::new();
    };
    let _separator = rows.next();

    let mut rendered = vec![
        split_cells(header)
            .map(|cell| format!("*{cell}*"))
            .collect::<Vec<_>>()
            .join(" | "),
    ];
    rendered.extend(rows.map(|row| split_cells(row).collect::<Vec<_>>().join(" | ")));
    rendered.join("\n")
}

fn split_cells(row: &str) -> impl Iterator<Item = &str> {
    row.trim().trim_matches('|').split('|').map(str::trim)
}
