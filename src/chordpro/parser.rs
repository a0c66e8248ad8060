//! Line-oriented ChordPro parser.
//!
//! Recognizes the metadata directives (`title`, `subtitle`, `artist`, `key`, `capo`),
//! comments, and `start_of_*`/`end_of_*` section environments for verse, chorus and
//! bridge. Other directives are dropped. Lines outside any environment are grouped into
//! anonymous sections split at blank lines.

use once_cell::sync::Lazy;
use regex::Regex;

use super::song::{Section, Segment, Song, SongLine};
use crate::preprocess::{section_name, split_directive};

static CHORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("chord pattern is valid"));

/// Parse ChordPro markup into a [`Song`]. Never fails.
pub fn parse(source: &str) -> Song {
    let mut parser = Parser::default();
    for line in source.lines() {
        parser.line(line.trim_end());
    }
    parser.finish()
}

#[derive(Default)]
struct Parser {
    song: Song,
    current: Section,
}

impl Parser {
    fn line(&mut self, line: &str) {
        if line.trim().is_empty() {
            if self.current.kind.is_some() {
                self.current.lines.push(SongLine::Empty);
            } else {
                self.close_section(Section::default());
            }
            return;
        }

        match split_directive(line) {
            Some((name, argument)) => self.directive(name, argument),
            None => {
                let segments = parse_segments(line);
                self.current.lines.push(SongLine::Lyrics(segments));
            }
        }
    }

    fn directive(&mut self, name: &str, argument: Option<&str>) {
        let value = || argument.map(str::to_string);
        let metadata = &mut self.song.metadata;

        match name {
            "title" | "t" => metadata.title = value(),
            "subtitle" | "st" => metadata.subtitle = value(),
            "artist" => metadata.artist = value(),
            "key" => metadata.key = value(),
            "capo" => metadata.capo = value(),
            "comment" | "c" | "comment_italic" | "ci" | "comment_box" | "cb" => {
                let text = argument.unwrap_or_default().to_string();
                self.current.lines.push(SongLine::Comment(text));
            }
            _ => {
                if let Some(kind) = section_name(name, "start_of_", "s") {
                    let label = argument.filter(|a| !a.is_empty()).map(str::to_string);
                    self.close_section(Section::new(Some(kind), label));
                } else if section_name(name, "end_of_", "e").is_some() {
                    self.close_section(Section::default());
                }
            }
        }
    }

    /// Store the current section and continue with `next`
    fn close_section(&mut self, next: Section) {
        let finished = std::mem::replace(&mut self.current, next);
        // Empty environments are kept so they still render as a section
        if finished.kind.is_some() || !finished.is_empty() {
            self.song.sections.push(finished);
        }
    }

    fn finish(mut self) -> Song {
        self.close_section(Section::default());
        self.song
    }
}

/// Split a lyrics line at its `[chord]` annotations
pub fn parse_segments(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chord: Option<&str> = None;
    let mut position = 0;

    for captures in CHORD.captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let lyrics = &line[position..whole.start()];
        if chord.is_some() || !lyrics.is_empty() {
            segments.push(Segment::new(chord, lyrics));
        }
        chord = captures.get(1).map(|m| m.as_str().trim());
        position = whole.end();
    }

    let lyrics = &line[position..];
    if chord.is_some() || !lyrics.is_empty() {
        segments.push(Segment::new(chord, lyrics));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::SectionKind;

    #[test]
    fn test_parse_segments() {
        assert_eq!(
            parse_segments("[G]Hello [D/F#]world"),
            vec![
                Segment::new(Some("G"), "Hello "),
                Segment::new(Some("D/F#"), "world"),
            ]
        );
        assert_eq!(
            parse_segments("Oh [Am]yes[C]"),
            vec![
                Segment::new(None, "Oh "),
                Segment::new(Some("Am"), "yes"),
                Segment::new(Some("C"), ""),
            ]
        );
        assert_eq!(parse_segments("no chords"), vec![Segment::new(None, "no chords")]);
    }

    #[test]
    fn test_metadata() {
        let song = parse("{title: Amazing}\n{artist: Someone}\n{key: G}\n{capo: 2}");
        assert_eq!(song.metadata.title.as_deref(), Some("Amazing"));
        assert_eq!(song.metadata.artist.as_deref(), Some("Someone"));
        assert_eq!(song.metadata.key.as_deref(), Some("G"));
        assert_eq!(song.capo(), Some(2));
        assert!(song.sections.is_empty());
    }

    #[test]
    fn test_sections() {
        let source = r#"[C]Intro line

{start_of_chorus: R1}
{comment: %section_title: R1%}
[G]Sing

[D]along
{end_of_chorus}
Outro"#;
        let song = parse(source);
        assert_eq!(song.sections.len(), 3);

        assert_eq!(song.sections[0].kind, None);
        let chorus = &song.sections[1];
        assert_eq!(chorus.kind, Some(SectionKind::Chorus));
        assert_eq!(chorus.label.as_deref(), Some("R1"));
        assert_eq!(chorus.lines.len(), 4);
        assert_eq!(chorus.lines[0], SongLine::Comment("%section_title: R1%".to_string()));
        assert_eq!(chorus.lines[2], SongLine::Empty);
        assert_eq!(song.sections[2].kind, None);

        let chords: Vec<&str> = song.chords().collect();
        assert_eq!(chords, vec!["C", "G", "D"]);
    }

    #[test]
    fn test_blank_lines_split_paragraphs() {
        let song = parse("one\ntwo\n\n\nthree");
        assert_eq!(song.sections.len(), 2);
        assert_eq!(song.sections[0].lines.len(), 2);
    }

    #[test]
    fn test_short_environment_names() {
        let song = parse("{soc}\n[C]La\n{eoc}\n{sov}\nWords\n{eov}");
        let kinds: Vec<_> = song.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![Some(SectionKind::Chorus), Some(SectionKind::Verse)]);
    }

    #[test]
    fn test_unknown_directives_are_dropped() {
        let song = parse("{tempo: 120}\n{chorus}\nText");
        assert_eq!(song.sections.len(), 1);
        assert_eq!(song.sections[0].lines.len(), 1);
    }

    #[test]
    fn test_invalid_capo_is_ignored() {
        assert_eq!(parse("{capo: high}").capo(), None);
    }
}
