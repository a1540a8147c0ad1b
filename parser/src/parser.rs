use diapo_common::{Deck, Section, Slide};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: slide defined before any section header")]
    SlideBeforeSection { line: usize },
    #[error("line {line}: unrecognized deck line: {text}")]
    UnrecognizedLine { line: usize, text: String },
}

/// Parses the deck manifest format:
///
/// ```text
/// # intro: Introduction    section with hash "intro" and a title
/// # Gallery                hash and title both "Gallery"
/// #                        anonymous section, unreachable via deep link
///   - g1                   slide with hash "g1"
///   -                      slide with positional hash fallback
/// ```
///
/// Slides attach to the most recent section header.
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&mut self, source: &str) -> Result<Deck, ParseError> {
        let mut deck = Deck::new();

        for (number, raw) in source.lines().enumerate() {
            let line = raw.trim();
            let number = number + 1;

            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if let Some(rest) = line.strip_prefix('#') {
                deck.add_section(parse_section(rest));
            } else if let Some(rest) = line.strip_prefix('-') {
                let slide = parse_slide(rest);
                match deck.sections.last_mut() {
                    Some(section) => section.slides.push(slide),
                    None => return Err(ParseError::SlideBeforeSection { line: number }),
                }
            } else {
                return Err(ParseError::UnrecognizedLine {
                    line: number,
                    text: line.to_string(),
                });
            }
        }

        Ok(deck)
    }
}

fn parse_section(rest: &str) -> Section {
    let rest = rest.trim();
    if rest.is_empty() {
        return Section::default();
    }

    // "hash: Title" carries both; a bare label doubles as its own hash.
    let (hash, title) = match rest.split_once(':') {
        Some((hash, title)) => (non_empty(hash), non_empty(title)),
        None => (non_empty(rest), non_empty(rest)),
    };

    Section {
        hash,
        title,
        slides: Vec::new(),
    }
}

fn parse_slide(rest: &str) -> Slide {
    Slide {
        hash: non_empty(rest),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_sections_with_hash_and_title() {
        let deck = crate::parse("# intro: Introduction\n# gallery: Gallery").unwrap();

        assert_eq!(deck.section_count(), 2);
        assert_eq!(deck.sections[0].hash.as_deref(), Some("intro"));
        assert_eq!(deck.sections[0].title.as_deref(), Some("Introduction"));
        assert_eq!(deck.sections[1].hash.as_deref(), Some("gallery"));
    }

    #[test]
    fn bare_label_doubles_as_hash() {
        let deck = crate::parse("# Gallery").unwrap();
        assert_eq!(deck.sections[0].hash.as_deref(), Some("Gallery"));
        assert_eq!(deck.sections[0].title.as_deref(), Some("Gallery"));
    }

    #[test]
    fn anonymous_section_has_no_hash() {
        let deck = crate::parse("#").unwrap();
        assert_eq!(deck.sections[0].hash, None);
        assert_eq!(deck.sections[0].title, None);
    }

    #[test]
    fn title_only_section() {
        let deck = crate::parse("# : Credits").unwrap();
        assert_eq!(deck.sections[0].hash, None);
        assert_eq!(deck.sections[0].title.as_deref(), Some("Credits"));
    }

    #[test]
    fn slides_attach_to_preceding_section() {
        let deck = crate::parse("# gallery: Gallery\n  - g1\n  - g2\n  -").unwrap();

        let section = &deck.sections[0];
        assert_eq!(section.slide_count(), 3);
        assert_eq!(section.slides[0].hash.as_deref(), Some("g1"));
        assert_eq!(section.slides[2].hash, None);
    }

    #[test]
    fn slide_before_section_is_an_error() {
        let err = crate::parse("- orphan").unwrap_err();
        assert_eq!(err, ParseError::SlideBeforeSection { line: 1 });
    }

    #[test]
    fn unrecognized_line_reports_position() {
        let err = crate::parse("# intro\nwhat is this").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedLine {
                line: 2,
                text: "what is this".to_string()
            }
        );
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let deck = crate::parse("// deck\n\n# intro\n\n  - a\n").unwrap();
        assert_eq!(deck.section_count(), 1);
        assert_eq!(deck.sections[0].slide_count(), 1);
    }
}
