//! Section and recall type definitions shared by the preprocessor and post-processor.

use std::fmt;

/// The structural section types that can be defined and recalled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Verse,
    Chorus,
    Bridge,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Verse, SectionKind::Chorus, SectionKind::Bridge];

    /// Directive name: `verse`, `chorus`, `bridge`
    pub fn name(self) -> &'static str {
        match self {
            Self::Verse => "verse",
            Self::Chorus => "chorus",
            Self::Bridge => "bridge",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "verse" => Some(Self::Verse),
            "chorus" => Some(Self::Chorus),
            "bridge" => Some(Self::Bridge),
            _ => None,
        }
    }

    /// Class carried by the rendered section element
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Verse => "verse-section",
            Self::Chorus => "chorus-section",
            Self::Bridge => "bridge-section",
        }
    }

    pub fn from_css_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.css_class() == class)
    }

    /// Title shown on collapsed copies when the section has no label
    pub fn shorthand(self) -> &'static str {
        match self {
            Self::Verse => "V",
            Self::Chorus => "R",
            Self::Bridge => "B",
        }
    }

    /// Title shown on full copies when the section has no label; verses stay untitled
    pub fn default_title(self) -> Option<&'static str> {
        match self {
            Self::Verse => None,
            Self::Chorus => Some("R"),
            Self::Bridge => Some("B"),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Section label; `Default` is the sentinel used when a directive carries none
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Label {
    #[default]
    Default,
    Named(String),
}

impl Label {
    /// Build a label from an optional, already validated directive argument
    pub fn from_argument(argument: Option<&str>) -> Self {
        match argument.map(str::trim) {
            Some(name) if !name.is_empty() => Self::Named(name.to_string()),
            _ => Self::Default,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Title for full copies of a section
    pub fn title(&self, kind: SectionKind) -> Option<String> {
        match self {
            Self::Named(name) => Some(name.clone()),
            Self::Default => kind.default_title().map(str::to_string),
        }
    }

    /// Title for collapsed copies of a section
    pub fn shorthand_title(&self, kind: SectionKind) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::Default => kind.shorthand().to_string(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Default => Ok(()),
        }
    }
}

/// A section captured the first time it is defined, replayed on every recall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecallSection {
    pub kind: SectionKind,
    pub label: Label,
    /// The `{start_of_...}` line exactly as written
    pub start_line: String,
    /// Lines between start and end, verbatim
    pub body: Vec<String>,
}

/// Switches for the parts of the preprocessor that go beyond plain recall expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Emit a collapsed copy after each recalled section
    pub shorthand: bool,
    /// Merge consecutive identical recalls into one titled `(Nx) label`
    pub compress_recalls: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            shorthand: true,
            compress_recalls: true,
        }
    }
}
