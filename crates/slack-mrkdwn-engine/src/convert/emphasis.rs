use std::borrow::Cow;

const STAR: u8 = b'*';

/// A `*`-delimited span that must not touch any further `*`.
///
/// Equivalent to the pattern `(?<!\*)M(inner)M(?!\*)` with a lazy inner
/// group, where `M` is the marker. The `regex` crate has no lookaround, so
/// candidates are checked by hand: a start preceded by `*` is skipped, and
/// the first closing marker not followed by `*` ends the span.
#[derive(Debug, Clone, Copy)]
pub struct GuardedSpan {
    marker: &'static str,
    /// When false the inner text is `[^*\n]+`, otherwise `.+` (no newline).
    inner_may_contain_star: bool,
}

impl GuardedSpan {
    /// `*text*`
    pub const ITALIC: Self = Self {
        marker: "*",
        inner_may_contain_star: false,
    };

    /// `**text**`
    pub const BOLD: Self = Self {
        marker: "**",
        inner_may_contain_star: true,
    };

    /// `***text***`
    pub const TRIPLE: Self = Self {
        marker: "***",
        inner_may_contain_star: false,
    };

    /// Replaces every non-overlapping span, left to right, with `render(inner)`.
    pub fn replace_all<'t>(&self, line: &'t str, render: impl Fn(&str) -> String) -> Cow<'t, str> {
        let mut out: Option<String> = None;
        let mut copied = 0;
        let mut pos = 0;

        while let Some(rel) = line[pos..].find(self.marker) {
            let start = pos + rel;
            match self.end_of_span(line, start) {
                Some(end) => {
                    let m = self.marker.len();
                    let buf = out.get_or_insert_with(|| String::with_capacity(line.len()));
                    buf.push_str(&line[copied..start]);
                    buf.push_str(&render(&line[start + m..end - m]));
                    copied = end;
                    pos = end;
                }
                None => pos = start + 1,
            }
        }

        match out {
            Some(mut buf) => {
                buf.push_str(&line[copied..]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(line),
        }
    }

    /// Byte offset just past the closing marker of a span opening at `start`.
    fn end_of_span(&self, line: &str, start: usize) -> Option<usize> {
        let bytes = line.as_bytes();
        if start > 0 && bytes[start - 1] == STAR {
            return None;
        }

        let m = self.marker.len();
        let inner_start = start + m;
        let limit = line[inner_start..]
            .find('\n')
            .map_or(line.len(), |i| inner_start + i);
        let followed_by_star = |end: usize| bytes.get(end) == Some(&STAR);

        if !self.inner_may_contain_star {
            // The inner text stops at the first `*`, which must open the closer.
            let close = inner_start + line[inner_start..limit].find('*')?;
            if close == inner_start || !line[close..limit].starts_with(self.marker) {
                return None;
            }
            let end = close + m;
            return (!followed_by_star(end)).then_some(end);
        }

        let first = line[inner_start..limit].chars().next()?;
        let mut search = inner_start + first.len_utf8();
        while let Some(rel) = line[search..limit].find(self.marker) {
            let close = search + rel;
            let end = close + m;
            if !followed_by_star(end) {
                return Some(end);
            }
            search = close + 1;
        }
        None
    }
}
