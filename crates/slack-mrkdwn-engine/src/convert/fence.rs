/// Whether the line cursor currently sits inside a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceState {
    #[default]
    Outside,
    Inside,
}

impl FenceState {
    pub fn is_inside(self) -> bool {
        matches!(self, FenceState::Inside)
    }

    fn flipped(self) -> Self {
        match self {
            FenceState::Outside => FenceState::Inside,
            FenceState::Inside => FenceState::Outside,
        }
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Returns the language tag when `line` is a fence marker.
    ///
    /// A marker is exactly three backticks followed by an optional word
    /// (letters, digits, underscore) and nothing else.
    pub fn sig(line: &str) -> Option<&str> {
        let tag = line.strip_prefix(Self::BACKTICKS)?;
        tag.chars()
            .all(|c| c.is_alphanumeric() || c == '_')
            .then_some(tag)
    }

    /// Crosses a fence marker, returning the new state and the line to emit.
    ///
    /// Only an opening marker keeps its language tag; closers are always bare.
    pub fn cross(state: FenceState, tag: &str) -> (FenceState, String) {
        let next = state.flipped();
        let line = if next.is_inside() && !tag.is_empty() {
            format!("{}{tag}", Self::BACKTICKS)
        } else {
            Self::BACKTICKS.to_string()
        };
        (next, line)
    }
}
