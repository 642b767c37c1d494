use std::borrow::Cow;

use regex::Regex;

use super::emphasis::GuardedSpan;
use crate::error::ConvertError;

/// Replacement for a horizontal rule: ten box-drawing dashes.
pub const RULE_LINE: &str = "──────────";

/// Private-use code points tried, in pairs, as triple-emphasis sentinels.
const SENTINEL_RANGE: std::ops::Range<u32> = 0xE000..0xF900;

/// A pair of characters absent from the line being rewritten, wrapping the
/// inner text of `***...***` while the ordered rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TripleSentinels {
    start: char,
    end: char,
}

impl TripleSentinels {
    /// First private-use pair that occurs nowhere in `line`.
    fn absent_from(line: &str) -> Option<Self> {
        SENTINEL_RANGE.step_by(2).find_map(|code| {
            let start = char::from_u32(code)?;
            let end = char::from_u32(code + 1)?;
            (!line.contains(start) && !line.contains(end)).then_some(Self { start, end })
        })
    }

    fn protect(self, line: &str) -> String {
        GuardedSpan::TRIPLE
            .replace_all(line, |inner| format!("{}{inner}{}", self.start, self.end))
            .into_owned()
    }

    /// Turns each `start..end` pair into `*_..._*`, pairing every start with
    /// the nearest end after it. Sentinels a rule moved out of order go back
    /// to the `***` they replaced.
    fn restore(self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() + 4);
        let mut rest = line;
        while let Some(open) = rest.find(self.start) {
            let after = &rest[open + self.start.len_utf8()..];
            let Some(close) = after.find(self.end) else {
                break;
            };
            out.push_str(&rest[..open]);
            out.push_str("*_");
            out.push_str(&after[..close]);
            out.push_str("_*");
            rest = &after[close + self.end.len_utf8()..];
        }
        out.push_str(rest);
        out.replace([self.start, self.end], "***")
    }
}

/// One rewrite applied to a single line.
#[derive(Debug)]
pub enum Rule {
    /// Regex with a `${n}` replacement template.
    Pattern {
        name: &'static str,
        regex: Regex,
        template: &'static str,
    },
    /// Guarded emphasis span, inner text wrapped in `wrap` on both sides.
    Emphasis {
        name: &'static str,
        span: GuardedSpan,
        wrap: &'static str,
    },
}

impl Rule {
    fn pattern(
        name: &'static str,
        pattern: &str,
        template: &'static str,
    ) -> Result<Self, ConvertError> {
        Ok(Rule::Pattern {
            name,
            regex: Regex::new(pattern)?,
            template,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Pattern { name, .. } | Rule::Emphasis { name, .. } => name,
        }
    }

    pub fn apply<'t>(&self, line: &'t str) -> Cow<'t, str> {
        match self {
            Rule::Pattern {
                regex, template, ..
            } => regex.replace_all(line, *template),
            Rule::Emphasis { span, wrap, .. } => {
                span.replace_all(line, |inner| format!("{wrap}{inner}{wrap}"))
            }
        }
    }
}

/// The ordered line rules plus the triple-emphasis guard around them.
///
/// Order matters: list items are rewritten before italics so `- ` bullets are
/// never read as emphasis, headings become `*...*` only after the italic pass,
/// and bold runs after the tilde-bold edge case.
#[derive(Debug)]
pub struct RuleSet {
    ordered: Vec<Rule>,
}

impl RuleSet {
    pub fn compile() -> Result<Self, ConvertError> {
        let ordered = vec![
            Rule::pattern("unchecked_task", r"^(\s*)- \[([ ])\] (.+)", "${1}• ☐ ${3}")?,
            Rule::pattern("checked_task", r"^(\s*)- \[([xX])\] (.+)", "${1}• ☑ ${3}")?,
            Rule::pattern("unordered_item", r"^(\s*)- (.+)", "${1}• ${2}")?,
            Rule::pattern("ordered_item", r"^(\s*)(\d+)\. (.+)", "${1}${2}. ${3}")?,
            Rule::pattern("image", r"!\[.*?\]\((.+?)\)", "<${1}>")?,
            Rule::Emphasis {
                name: "italic",
                span: GuardedSpan::ITALIC,
                wrap: "_",
            },
            Rule::pattern("heading_6", r"^###### (.+)$", "*${1}*")?,
            Rule::pattern("heading_5", r"^##### (.+)$", "*${1}*")?,
            Rule::pattern("heading_4", r"^#### (.+)$", "*${1}*")?,
            Rule::pattern("heading_3", r"^### (.+)$", "*${1}*")?,
            Rule::pattern("heading_2", r"^## (.+)$", "*${1}*")?,
            Rule::pattern("heading_1", r"^# (.+)$", "*${1}*")?,
            Rule::pattern(
                "tilde_bold",
                r"(^|\s)~\*\*(.+?)\*\*(\s|$)",
                "${1} *${2}* ${3}",
            )?,
            Rule::Emphasis {
                name: "bold",
                span: GuardedSpan::BOLD,
                wrap: "*",
            },
            Rule::pattern("underline", r"__(.+?)__", "*${1}*")?,
            Rule::pattern("link", r"\[(.+?)\]\((.+?)\)", "<${2}|${1}>")?,
            Rule::pattern("inline_code", r"`(.+?)`", "`${1}`")?,
            Rule::pattern("blockquote", r"^> (.+)", "> ${1}")?,
            Rule::pattern("horizontal_rule", r"^(---|\*\*\*|___)$", RULE_LINE)?,
            Rule::pattern("strikethrough", r"~~(.+?)~~", "~${1}~")?,
        ];

        Ok(Self { ordered })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.ordered
    }

    /// Rewrites one line that is outside any code fence.
    pub fn rewrite(&self, line: &str) -> String {
        let sentinels = TripleSentinels::absent_from(line);
        let mut line = match sentinels {
            Some(sentinels) => sentinels.protect(line),
            None => {
                log::debug!("no free sentinel pair, ***spans*** left unprotected");
                line.to_string()
            }
        };

        for rule in &self.ordered {
            let next = match rule.apply(&line) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(next) => next,
            };
            log::trace!("rule {} rewrote {line:?} -> {next:?}", rule.name());
            line = next;
        }

        if let Some(sentinels) = sentinels {
            line = sentinels.restore(&line);
        }
        line.trim_end().to_string()
    }
}
