//! One-shot variant patches applied to the next recalled section.
//!
//! ```text
//! {start_of_variant: replace_last_line}
//! And the last line is new
//! {end_of_variant}
//! {chorus: R1}        <- patched copy of R1
//! {chorus: R1}        <- original R1 again
//! ```

use std::mem;

/// How a patch rewrites the recalled body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    ReplaceFirstLine,
    ReplaceLastLine,
    /// `replace_last_n_lines: n`
    ReplaceLastLines(usize),
    PrependContent,
    AppendContent,
}

impl VariantKind {
    /// Parse the argument of `{start_of_variant: ...}`
    pub fn parse(argument: &str) -> Option<Self> {
        let (name, count) = match argument.split_once(':') {
            Some((name, count)) => (name.trim(), Some(count.trim())),
            None => (argument.trim(), None),
        };

        match (name, count) {
            ("replace_first_line", None) => Some(Self::ReplaceFirstLine),
            ("replace_last_line", None) => Some(Self::ReplaceLastLine),
            ("prepend_content", None) => Some(Self::PrependContent),
            ("append_content", None) => Some(Self::AppendContent),
            ("replace_last_n_lines", None) => Some(Self::ReplaceLastLines(1)),
            ("replace_last_n_lines", Some(count)) => count.parse().ok().map(Self::ReplaceLastLines),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ReplaceFirstLine => "replace_first_line",
            Self::ReplaceLastLine => "replace_last_line",
            Self::ReplaceLastLines(_) => "replace_last_n_lines",
            Self::PrependContent => "prepend_content",
            Self::AppendContent => "append_content",
        }
    }
}

/// A captured `{start_of_variant}` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPatch {
    pub kind: VariantKind,
    pub content: Vec<String>,
}

impl VariantPatch {
    /// Leading and trailing blank lines of the content are dropped
    pub fn new(kind: VariantKind, content: Vec<String>) -> Self {
        let start = content.iter().position(|l| !l.trim().is_empty());
        let end = content.iter().rposition(|l| !l.trim().is_empty());
        let content = match (start, end) {
            (Some(start), Some(end)) => content[start..=end].to_vec(),
            _ => Vec::new(),
        };
        Self { kind, content }
    }

    /// The patched copy of `body`; `body` itself is left untouched
    pub fn apply(&self, body: &[String]) -> Vec<String> {
        let content = self.content.iter().cloned();
        match self.kind {
            VariantKind::ReplaceFirstLine => content.chain(body.iter().skip(1).cloned()).collect(),
            VariantKind::ReplaceLastLine => replace_tail(body, 1, content),
            VariantKind::ReplaceLastLines(n) => replace_tail(body, n, content),
            VariantKind::PrependContent => content.chain(body.iter().cloned()).collect(),
            VariantKind::AppendContent => body.iter().cloned().chain(content).collect(),
        }
    }

    /// Short form shown on the collapsed copy: only what deviates from the original
    pub fn summary(&self) -> Vec<String> {
        let mut lines = self.content.clone();
        let Some(last) = lines.len().checked_sub(1) else {
            return lines;
        };
        match self.kind {
            VariantKind::ReplaceLastLine | VariantKind::ReplaceLastLines(_) => {
                lines[0] = format!("...{}", lines[0].trim_start());
            }
            VariantKind::AppendContent => {
                lines[0] = format!("+ {}", lines[0].trim_start());
            }
            VariantKind::ReplaceFirstLine => {
                lines[last] = format!("{}...", lines[last].trim_end());
            }
            VariantKind::PrependContent => {
                lines[last] = format!("{}+", lines[last].trim_end());
            }
        }
        lines
    }
}

fn replace_tail(
    body: &[String],
    count: usize,
    content: impl Iterator<Item = String>,
) -> Vec<String> {
    let keep = body.len().saturating_sub(count);
    body[..keep].iter().cloned().chain(content).collect()
}

/// The one-shot slot a patch waits in until the next recall consumes it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingVariant {
    #[default]
    None,
    Pending(VariantPatch),
}

impl PendingVariant {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Consume the patch, leaving the slot empty
    pub fn take(&mut self) -> Option<VariantPatch> {
        match mem::take(self) {
            Self::Pending(patch) => Some(patch),
            Self::None => None,
        }
    }

    /// Store a patch, returning the one it replaces
    pub fn replace(&mut self, patch: VariantPatch) -> Option<VariantPatch> {
        match mem::replace(self, Self::Pending(patch)) {
            Self::Pending(previous) => Some(previous),
            Self::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|l| l.to_string()).collect()
    }

    fn patch(kind: VariantKind, content: &[&str]) -> VariantPatch {
        VariantPatch::new(kind, lines(content))
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(VariantKind::parse("replace_last_line"), Some(VariantKind::ReplaceLastLine));
        assert_eq!(VariantKind::parse(" prepend_content "), Some(VariantKind::PrependContent));
        assert_eq!(
            VariantKind::parse("replace_last_n_lines: 3"),
            Some(VariantKind::ReplaceLastLines(3))
        );
        assert_eq!(VariantKind::parse("replace_last_n_lines: x"), None);
        assert_eq!(VariantKind::parse("append_content: 2"), None);
        assert_eq!(VariantKind::parse("absolute_garbage"), None);
        assert_eq!(VariantKind::ReplaceLastLines(2).name(), "replace_last_n_lines");
    }

    #[test]
    fn test_apply_each_kind() {
        let body = lines(&["Line 1", "Line 2", "Line 3"]);
        assert_eq!(
            patch(VariantKind::ReplaceFirstLine, &["New"]).apply(&body),
            lines(&["New", "Line 2", "Line 3"])
        );
        assert_eq!(
            patch(VariantKind::ReplaceLastLine, &["New"]).apply(&body),
            lines(&["Line 1", "Line 2", "New"])
        );
        assert_eq!(
            patch(VariantKind::ReplaceLastLines(2), &["A", "B"]).apply(&body),
            lines(&["Line 1", "A", "B"])
        );
        assert_eq!(
            patch(VariantKind::PrependContent, &["Pre"]).apply(&body),
            lines(&["Pre", "Line 1", "Line 2", "Line 3"])
        );
        assert_eq!(
            patch(VariantKind::AppendContent, &["Post"]).apply(&body),
            lines(&["Line 1", "Line 2", "Line 3", "Post"])
        );
    }

    #[test]
    fn test_apply_does_not_touch_body() {
        let body = lines(&["Line 1", "Line 2"]);
        let _ = patch(VariantKind::ReplaceLastLine, &["New"]).apply(&body);
        assert_eq!(body, lines(&["Line 1", "Line 2"]));
    }

    #[test]
    fn test_replace_more_lines_than_body() {
        let body = lines(&["Only"]);
        assert_eq!(
            patch(VariantKind::ReplaceLastLines(5), &["New"]).apply(&body),
            lines(&["New"])
        );
        assert_eq!(patch(VariantKind::ReplaceFirstLine, &["New"]).apply(&[]), lines(&["New"]));
    }

    #[test]
    fn test_blank_content_edges_are_trimmed() {
        let trimmed = patch(VariantKind::AppendContent, &["", "Post", "  "]);
        assert_eq!(trimmed.content, lines(&["Post"]));
        let empty = patch(VariantKind::AppendContent, &["", " "]);
        assert!(empty.content.is_empty());
        assert!(empty.summary().is_empty());
    }

    #[test]
    fn test_summaries() {
        assert_eq!(
            patch(VariantKind::ReplaceLastLine, &["Final line"]).summary(),
            lines(&["...Final line"])
        );
        assert_eq!(
            patch(VariantKind::ReplaceLastLines(2), &["A", "B"]).summary(),
            lines(&["...A", "B"])
        );
        assert_eq!(patch(VariantKind::AppendContent, &["Post"]).summary(), lines(&["+ Post"]));
        assert_eq!(
            patch(VariantKind::ReplaceFirstLine, &["New start "]).summary(),
            lines(&["New start..."])
        );
        assert_eq!(patch(VariantKind::PrependContent, &["Pre"]).summary(), lines(&["Pre+"]));
    }

    #[test]
    fn test_pending_slot_is_consumed_once() {
        let mut slot = PendingVariant::default();
        assert!(!slot.is_pending());
        assert_eq!(slot.replace(patch(VariantKind::AppendContent, &["a"])), None);
        let previous = slot.replace(patch(VariantKind::AppendContent, &["b"]));
        assert_eq!(previous.map(|p| p.content), Some(lines(&["a"])));
        assert_eq!(slot.take().map(|p| p.content), Some(lines(&["b"])));
        assert_eq!(slot.take(), None);
        assert!(!slot.is_pending());
    }
}
