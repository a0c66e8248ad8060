//! # Song Model
//!
//! The parsed form of a ChordPro lead sheet.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── Metadata (title, subtitle, artist, key, capo)
//!   └── Vec<Section>
//!         ├── kind: Option<SectionKind> (None for text outside any section)
//!         ├── label: Option<String>
//!         └── Vec<SongLine>
//!               ├── Lyrics(Vec<Segment>)   chord + the lyrics sung on it
//!               ├── Comment(String)
//!               └── Empty
//! ```
//!
//! Chords are kept as written; they are only interpreted when the song is formatted or
//! its key is guessed.

use crate::preprocess::SectionKind;

/// Song-level directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub artist: Option<String>,
    /// Raw value of `{key: ...}`
    pub key: Option<String>,
    /// Raw value of `{capo: ...}`
    pub capo: Option<String>,
}

/// One chord and the lyrics that follow it up to the next chord
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub chord: Option<String>,
    pub lyrics: String,
}

impl Segment {
    pub fn new(chord: Option<&str>, lyrics: &str) -> Self {
        Self {
            chord: chord.map(str::to_string),
            lyrics: lyrics.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongLine {
    Lyrics(Vec<Segment>),
    Comment(String),
    Empty,
}

/// A block of lines: a verse, chorus or bridge, or a paragraph outside any of them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub kind: Option<SectionKind>,
    pub label: Option<String>,
    pub lines: Vec<SongLine>,
}

impl Section {
    pub fn new(kind: Option<SectionKind>, label: Option<String>) -> Self {
        Self {
            kind,
            label,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub metadata: Metadata,
    pub sections: Vec<Section>,
}

impl Song {
    /// Every chord of the song in document order, as written
    pub fn chords(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter())
            .filter_map(|line| match line {
                SongLine::Lyrics(segments) => Some(segments),
                _ => None,
            })
            .flatten()
            .filter_map(|segment| segment.chord.as_deref())
    }

    /// The capo fret from `{capo: n}`, if it is a number
    pub fn capo(&self) -> Option<i32> {
        self.metadata.capo.as_deref()?.trim().parse().ok()
    }
}
