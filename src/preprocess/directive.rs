//! Recognizer for the structural directives the preprocessor rewrites.
//!
//! Works on whole lines: a line is a directive when, once trimmed, it is exactly
//! `{name}` or `{name: argument}`. Everything else is text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Label, SectionKind};

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\s*([A-Za-z_]+)\s*(?::\s*(.*?))?\s*\}$").expect("directive pattern is valid")
});

// Letters of any script, digits, spaces and + _ - / .
static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}_ +\-/.]+$").expect("label pattern is valid"));

/// A directive that takes part in recall expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `{start_of_chorus: R1}`
    StartOfSection { kind: SectionKind, label: Label },
    /// `{end_of_chorus}`
    EndOfSection(SectionKind),
    /// `{chorus: R1}` or `{chorus}`
    Recall { kind: SectionKind, label: Label },
    /// `{start_of_variant: replace_last_line}`, argument kept raw
    StartOfVariant(String),
    /// `{end_of_variant}`
    EndOfVariant,
}

/// Classification of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Directive(Directive),
    /// A section or recall directive whose label has disallowed characters
    MalformedLabel,
    Text,
}

/// Split a `{name: argument}` line into its name and trimmed argument
pub(crate) fn split_directive(line: &str) -> Option<(&str, Option<&str>)> {
    let captures = DIRECTIVE.captures(line.trim())?;
    let name = captures.get(1).map_or("", |m| m.as_str());
    let argument = captures.get(2).map(|m| m.as_str().trim());
    Some((name, argument))
}

/// Classify a single line of markup
pub fn recognize(line: &str) -> Line {
    let Some((name, argument)) = split_directive(line) else {
        return Line::Text;
    };

    match name {
        "start_of_variant" => {
            return Line::Directive(Directive::StartOfVariant(
                argument.unwrap_or_default().to_string(),
            ))
        }
        "end_of_variant" => return Line::Directive(Directive::EndOfVariant),
        _ => {}
    }

    if let Some(kind) = section_name(name, "end_of_", "e") {
        return Line::Directive(Directive::EndOfSection(kind));
    }

    let (kind, is_start) = if let Some(kind) = section_name(name, "start_of_", "s") {
        (kind, true)
    } else if let Some(kind) = SectionKind::from_name(name) {
        (kind, false)
    } else {
        return Line::Text;
    };

    let label = match argument {
        Some(text) if !text.is_empty() && !LABEL.is_match(text) => return Line::MalformedLabel,
        other => Label::from_argument(other),
    };

    Line::Directive(if is_start {
        Directive::StartOfSection { kind, label }
    } else {
        Directive::Recall { kind, label }
    })
}

/// Match `start_of_chorus` style names and the ChordPro abbreviations `soc`, `eov`, …
pub(crate) fn section_name(name: &str, long_prefix: &str, short_prefix: &str) -> Option<SectionKind> {
    if let Some(rest) = name.strip_prefix(long_prefix) {
        return SectionKind::from_name(rest);
    }
    let rest = name.strip_prefix(short_prefix)?.strip_prefix('o')?;
    match rest {
        "v" => Some(SectionKind::Verse),
        "c" => Some(SectionKind::Chorus),
        "b" => Some(SectionKind::Bridge),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Label {
        Label::Named(name.to_string())
    }

    #[test]
    fn test_section_directives() {
        assert_eq!(
            recognize("{start_of_chorus: R1}"),
            Line::Directive(Directive::StartOfSection {
                kind: SectionKind::Chorus,
                label: named("R1")
            })
        );
        assert_eq!(
            recognize("  {start_of_verse}  "),
            Line::Directive(Directive::StartOfSection {
                kind: SectionKind::Verse,
                label: Label::Default
            })
        );
        assert_eq!(
            recognize("{end_of_bridge}"),
            Line::Directive(Directive::EndOfSection(SectionKind::Bridge))
        );
        assert_eq!(
            recognize("{soc}"),
            Line::Directive(Directive::StartOfSection {
                kind: SectionKind::Chorus,
                label: Label::Default
            })
        );
        assert_eq!(
            recognize("{eov}"),
            Line::Directive(Directive::EndOfSection(SectionKind::Verse))
        );
    }

    #[test]
    fn test_recall_directives() {
        assert_eq!(
            recognize("{chorus}"),
            Line::Directive(Directive::Recall {
                kind: SectionKind::Chorus,
                label: Label::Default
            })
        );
        assert_eq!(
            recognize("{bridge: Most 2}"),
            Line::Directive(Directive::Recall {
                kind: SectionKind::Bridge,
                label: named("Most 2")
            })
        );
        assert_eq!(
            recognize("{chorus:}"),
            Line::Directive(Directive::Recall {
                kind: SectionKind::Chorus,
                label: Label::Default
            })
        );
    }

    #[test]
    fn test_label_characters() {
        for label in ["R1", "Refrén", "Припев 2", "A+B", "x_y-z", "1/2", "v.2"] {
            let line = format!("{{chorus: {}}}", label);
            assert_eq!(
                recognize(&line),
                Line::Directive(Directive::Recall {
                    kind: SectionKind::Chorus,
                    label: named(label)
                }),
                "label {label} should be accepted"
            );
        }
        assert_eq!(recognize("{chorus: R#1}"), Line::MalformedLabel);
        assert_eq!(recognize("{start_of_chorus: label=\"R\"}"), Line::MalformedLabel);
    }

    #[test]
    fn test_variant_directives() {
        assert_eq!(
            recognize("{start_of_variant: replace_last_n_lines: 2}"),
            Line::Directive(Directive::StartOfVariant("replace_last_n_lines: 2".to_string()))
        );
        assert_eq!(recognize("{end_of_variant}"), Line::Directive(Directive::EndOfVariant));
    }

    #[test]
    fn test_other_lines_are_text() {
        assert_eq!(recognize("[C]Hello [G]world"), Line::Text);
        assert_eq!(recognize("{title: Song}"), Line::Text);
        assert_eq!(recognize("{comment: %section_title: R%}"), Line::Text);
        assert_eq!(recognize("text {chorus}"), Line::Text);
        assert_eq!(recognize(""), Line::Text);
    }
}
