//! HTML formatter: turns a [`Song`] into a [`Document`].
//!
//! ```text
//! div.song
//!   └── div.section[.chorus-section]
//!         ├── div.line.lyrics-line
//!         │     └── div.word
//!         │           ├── span.chord      (only for segments with a chord)
//!         │           └── span.lyrics
//!         ├── div.line.comment-line
//!         └── div.line.empty-line
//! ```
//!
//! Metadata is not rendered. Chords are transposed and written in English notation;
//! a chord that does not parse is kept as written and reported.

use super::song::{Segment, Song, SongLine};
use crate::chord::{ChordSymbol, NotationConvention};
use crate::dom::{Document, NodeId};
use crate::error::{Warning, Warnings};
use crate::transpose::Transposition;

pub fn format(
    song: &Song,
    transposition: &Transposition,
    input_notation: NotationConvention,
    warnings: &mut Warnings,
) -> Document {
    let mut formatter = Formatter {
        doc: Document::new("div", &["song"]),
        transposition,
        input_notation,
        warnings,
    };

    for section in &song.sections {
        let classes: Vec<&str> = std::iter::once("section")
            .chain(section.kind.map(|kind| kind.css_class()))
            .collect();
        let section_node = formatter.doc.create_element("div", &classes);
        let root = formatter.doc.root();
        formatter.doc.append_child(root, section_node);

        for line in &section.lines {
            let line_node = formatter.line(line);
            formatter.doc.append_child(section_node, line_node);
        }
    }

    formatter.doc
}

struct Formatter<'a> {
    doc: Document,
    transposition: &'a Transposition,
    input_notation: NotationConvention,
    warnings: &'a mut Warnings,
}

impl Formatter<'_> {
    fn line(&mut self, line: &SongLine) -> NodeId {
        match line {
            SongLine::Lyrics(segments) => {
                let node = self.doc.create_element("div", &["line", "lyrics-line"]);
                for segment in segments {
                    let word = self.word(segment);
                    self.doc.append_child(node, word);
                }
                node
            }
            SongLine::Comment(text) => {
                let node = self.doc.create_element("div", &["line", "comment-line"]);
                let text = self.doc.create_text(text);
                self.doc.append_child(node, text);
                node
            }
            SongLine::Empty => self.doc.create_element("div", &["line", "empty-line"]),
        }
    }

    fn word(&mut self, segment: &Segment) -> NodeId {
        let word = self.doc.create_element("div", &["word"]);

        if let Some(chord) = &segment.chord {
            let rendered = self.chord(chord);
            let span = self.doc.create_element("span", &["chord"]);
            let text = self.doc.create_text(&rendered);
            self.doc.append_child(span, text);
            self.doc.append_child(word, span);
        }

        let lyrics = self.doc.create_element("span", &["lyrics"]);
        let text = self.doc.create_text(&segment.lyrics);
        self.doc.append_child(lyrics, text);
        self.doc.append_child(word, lyrics);
        word
    }

    fn chord(&mut self, chord: &str) -> String {
        if chord.trim().is_empty() {
            return String::new();
        }
        match ChordSymbol::parse(chord, self.input_notation) {
            Ok(symbol) => self
                .transposition
                .apply(&symbol)
                .to_string_in(NotationConvention::English),
            Err(_) => {
                self.warnings.push(Warning::InvalidChordSymbol {
                    symbol: chord.to_string(),
                });
                chord.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chordpro::parser::parse;

    fn render(source: &str, transposition: Transposition) -> (String, Vec<Warning>) {
        let mut warnings = Warnings::new();
        let doc = format(
            &parse(source),
            &transposition,
            NotationConvention::English,
            &mut warnings,
        );
        (doc.to_html(), warnings.into_vec())
    }

    #[test]
    fn test_lyrics_line_structure() {
        let (html, _) = render("[G]Hello", Transposition::identity());
        assert_eq!(
            html,
            concat!(
                r#"<div class="song"><div class="section"><div class="line lyrics-line">"#,
                r#"<div class="word"><span class="chord">G</span><span class="lyrics">Hello</span></div>"#,
                r#"</div></div></div>"#
            )
        );
    }

    #[test]
    fn test_section_classes_and_comments() {
        let (html, _) = render(
            "{start_of_chorus}\n{comment: Slowly}\n\n{end_of_chorus}",
            Transposition::identity(),
        );
        assert_eq!(
            html,
            concat!(
                r#"<div class="song"><div class="section chorus-section">"#,
                r#"<div class="line comment-line">Slowly</div>"#,
                r#"<div class="line empty-line"></div>"#,
                r#"</div></div>"#
            )
        );
    }

    #[test]
    fn test_chords_are_transposed() {
        let (html, warnings) = render("[Am]a [F]b [C]c [G]d", Transposition::by(2));
        assert!(warnings.is_empty());
        for chord in ["Bm", ">G<", ">D<", ">A<"] {
            assert!(html.contains(chord), "missing {chord} in {html}");
        }
    }

    #[test]
    fn test_invalid_chord_is_kept() {
        let (html, warnings) = render("[N.C.]Silence", Transposition::by(1));
        assert!(html.contains(r#"<span class="chord">N.C.</span>"#));
        assert_eq!(
            warnings,
            vec![Warning::InvalidChordSymbol {
                symbol: "N.C.".to_string()
            }]
        );
    }

    #[test]
    fn test_lyrics_are_escaped() {
        let (html, _) = render("Rock & <roll>", Transposition::identity());
        assert!(html.contains("Rock &amp; &lt;roll&gt;"));
    }
}
