//! # ChordPro Module
//!
//! The built-in [`SongBackend`]: a small ChordPro parser and HTML formatter.
//!
//! ## Sub-modules
//! - `song` - Song, Section, SongLine, Segment
//! - `parser` - Markup to [`Song`]
//! - `formatter` - [`Song`] to [`Document`]
//! - `key_detect` - Key inference from chords
//!
//! ## Example
//! ```rust
//! use chordbook::backend::SongBackend;
//! use chordbook::chordpro::ChordProBackend;
//! use chordbook::{NotationConvention, Transposition, Warnings};
//!
//! let backend = ChordProBackend::new(NotationConvention::English);
//! let song = backend.parse("{capo: 3}\n[Am]Hello [F]there");
//!
//! assert_eq!(backend.capo(&song), Some(3));
//! assert_eq!(backend.possible_key(&song).map(|k| k.to_string()), Some("Am".to_string()));
//!
//! let mut warnings = Warnings::new();
//! let doc = backend.format(&song, &Transposition::by(2), &mut warnings);
//! assert!(doc.to_html().contains(r#"<span class="chord">Bm</span>"#));
//! ```

mod formatter;
mod key_detect;
mod parser;
mod song;

pub use formatter::format;
pub use key_detect::guess_key;
pub use parser::{parse, parse_segments};
pub use song::{Metadata, Section, Segment, Song, SongLine};

use crate::backend::SongBackend;
use crate::chord::NotationConvention;
use crate::dom::Document;
use crate::error::Warnings;
use crate::key::Key;
use crate::transpose::Transposition;

/// ChordPro backend reading chords in a fixed input notation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChordProBackend {
    pub input_notation: NotationConvention,
}

impl ChordProBackend {
    pub fn new(input_notation: NotationConvention) -> Self {
        Self { input_notation }
    }
}

impl SongBackend for ChordProBackend {
    type Song = Song;

    fn parse(&self, source: &str) -> Song {
        parse(source)
    }

    fn capo(&self, song: &Song) -> Option<i32> {
        song.capo()
    }

    fn declared_key(&self, song: &Song) -> Option<Key> {
        let key = song.metadata.key.as_deref()?;
        Key::parse(key, self.input_notation).ok()
    }

    fn possible_key(&self, song: &Song) -> Option<Key> {
        self.declared_key(song)
            .or_else(|| guess_key(song.chords(), self.input_notation))
    }

    fn format(&self, song: &Song, transposition: &Transposition, warnings: &mut Warnings) -> Document {
        format(song, transposition, self.input_notation, warnings)
    }
}
