//! Marker comments passed from the preprocessor to the post-processor.
//!
//! The formatter knows nothing about recalls, so the preprocessor smuggles what it
//! knows through ordinary `{comment: %...%}` directives. The formatter renders them as
//! comment lines and the post-processor turns them back into classes and titles.

pub(crate) const EXPANDED_SECTION: &str = "%expanded_section%";
pub(crate) const SHORTHAND_SECTION: &str = "%shorthand_section%";

const SECTION_TITLE_PREFIX: &str = "%section_title:";
const RECALL_PREFIX: &str = "%recall:";
const RECALL_VARIANT_PREFIX: &str = "%recall_variant:";
const UNKNOWN_RECALL_PREFIX: &str = "%unknown_recall:";

/// A marker recognized in a rendered comment line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Marker {
    ExpandedSection,
    ShorthandSection,
    SectionTitle(String),
    Recall { label: String, variant: bool },
    UnknownRecall,
}

/// Wrap marker text in a comment directive
pub(crate) fn comment(marker: &str) -> String {
    format!("{{comment: {}}}", marker)
}

pub(crate) fn section_title(title: &str) -> String {
    format!("{} {}%", SECTION_TITLE_PREFIX, title)
}

pub(crate) fn recall(label: &str, variant: bool) -> String {
    let prefix = if variant {
        RECALL_VARIANT_PREFIX
    } else {
        RECALL_PREFIX
    };
    format!("{} {}%", prefix, label)
}

pub(crate) fn unknown_recall(kind: &str, label: &str) -> String {
    format!("{} {} {}%", UNKNOWN_RECALL_PREFIX, kind, label)
}

/// Recognize the text of a rendered comment line
pub(crate) fn parse(text: &str) -> Option<Marker> {
    let text = text.trim();
    if !(text.starts_with('%') && text.ends_with('%') && text.len() >= 2) {
        return None;
    }
    if text == EXPANDED_SECTION {
        return Some(Marker::ExpandedSection);
    }
    if text == SHORTHAND_SECTION {
        return Some(Marker::ShorthandSection);
    }

    let inner = |prefix: &str| -> Option<String> {
        text.strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix('%'))
            .map(|rest| rest.trim().to_string())
    };

    if let Some(title) = inner(SECTION_TITLE_PREFIX) {
        return Some(Marker::SectionTitle(title));
    }
    if let Some(label) = inner(RECALL_VARIANT_PREFIX) {
        return Some(Marker::Recall {
            label,
            variant: true,
        });
    }
    if let Some(label) = inner(RECALL_PREFIX) {
        return Some(Marker::Recall {
            label,
            variant: false,
        });
    }
    inner(UNKNOWN_RECALL_PREFIX).map(|_| Marker::UnknownRecall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_parse_back() {
        assert_eq!(parse(EXPANDED_SECTION), Some(Marker::ExpandedSection));
        assert_eq!(parse(" %shorthand_section% "), Some(Marker::ShorthandSection));
        assert_eq!(
            parse(&section_title("(2x) R1")),
            Some(Marker::SectionTitle("(2x) R1".to_string()))
        );
        assert_eq!(
            parse(&recall("R1", true)),
            Some(Marker::Recall {
                label: "R1".to_string(),
                variant: true
            })
        );
        assert_eq!(parse(&unknown_recall("chorus", "R9")), Some(Marker::UnknownRecall));
    }

    #[test]
    fn test_ordinary_comments_are_not_markers() {
        assert_eq!(parse("Slowly"), None);
        assert_eq!(parse("100% love"), None);
        assert_eq!(parse("%"), None);
    }

    #[test]
    fn test_comment_directive() {
        assert_eq!(comment(EXPANDED_SECTION), "{comment: %expanded_section%}");
    }
}
