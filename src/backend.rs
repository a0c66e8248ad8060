//! The seam between the rewriting pipeline and the lead-sheet parser/formatter.
//!
//! The pipeline only needs five things from a lead-sheet library: parse text, read the
//! capo, read or guess the key, and format into a [`Document`]. Any library that can do
//! those can be plugged into [`render_song_with`](crate::render_song_with).

use crate::dom::Document;
use crate::error::Warnings;
use crate::key::Key;
use crate::transpose::Transposition;

/// A lead-sheet parser and formatter
pub trait SongBackend {
    /// Parsed song representation
    type Song;

    /// Parse already preprocessed markup. Parsing never fails; unknown input is kept
    /// as text.
    fn parse(&self, source: &str) -> Self::Song;

    /// Capo fret declared by the song, if any
    fn capo(&self, song: &Self::Song) -> Option<i32>;

    /// Key declared by the song (`{key: G}`), if any
    fn declared_key(&self, song: &Self::Song) -> Option<Key>;

    /// Best guess at the song's key: the declared key, else one inferred from the chords
    fn possible_key(&self, song: &Self::Song) -> Option<Key>;

    /// Format the song into a display tree, transposing every chord with `transposition`.
    ///
    /// Chord leaves must be written in English notation; the pipeline converts them to
    /// the requested notation afterwards.
    fn format(
        &self,
        song: &Self::Song,
        transposition: &Transposition,
        warnings: &mut Warnings,
    ) -> Document;
}
