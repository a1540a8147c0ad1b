//! Two-way mapping between the current position and the URL fragment
//! grammar `<sectionHash>[<separator><slideHash-or-1-based-number>]`.

use diapo_common::{Config, Deck, Section, SectionIndex, SlideIndex};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub section: SectionIndex,
    pub slide: SlideIndex,
}

impl ResolvedTarget {
    pub const START: ResolvedTarget = ResolvedTarget {
        section: 0,
        slide: 0,
    };
}

/// Fragment for a position, or `None` when the section carries no hash —
/// in that case nothing is written and the existing fragment stays as is.
/// The slide token only appears when the section has at least two slides.
pub fn encode(
    deck: &Deck,
    config: &Config,
    section: SectionIndex,
    slide: SlideIndex,
) -> Option<String> {
    let sec = deck.section(section)?;
    let mut fragment = sec.hash.clone()?;

    if sec.slide_count() >= 2 {
        fragment.push_str(&config.hash_separator);
        fragment.push_str(&sec.slide_hash(config, slide));
    }

    Some(fragment)
}

/// Resolves a fragment to an absolute position. Unresolvable tokens never
/// error; they fall back to the start of the deck or of the section.
pub fn resolve(deck: &Deck, config: &Config, fragment: &str) -> ResolvedTarget {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);

    let (section_token, slide_token) = match raw.split_once(config.hash_separator.as_str()) {
        Some((section, slide)) => (section, Some(slide)),
        None => (raw, None),
    };

    let Some(section) = deck.section_by_hash(section_token) else {
        warn!("unresolved section token {section_token:?}, falling back to start");
        return ResolvedTarget::START;
    };

    let slide = match slide_token {
        Some(token) => resolve_slide(&deck.sections[section], config, token),
        None => 0,
    };

    ResolvedTarget { section, slide }
}

/// Exact hash match first, then a 1-based position within bounds, then 0.
fn resolve_slide(section: &Section, config: &Config, token: &str) -> SlideIndex {
    if let Some(slide) = section.slide_by_hash(config, token) {
        return slide;
    }

    if let Ok(number) = token.parse::<usize>() {
        if number >= 1 && number <= section.slide_count() {
            return number - 1;
        }
    }

    warn!("unresolved slide token {token:?}, falling back to first slide");
    0
}

#[cfg(test)]
mod test {
    use super::*;
    use diapo_common::{Section, Slide};

    fn deck() -> Deck {
        let mut deck = Deck::new();
        deck.add_section(Section {
            hash: Some("intro".to_string()),
            title: Some("Introduction".to_string()),
            slides: Vec::new(),
        });
        deck.add_section(Section {
            hash: Some("gallery".to_string()),
            title: Some("Gallery".to_string()),
            slides: vec![
                Slide::anchored("g1"),
                Slide::anchored("g2"),
                Slide::anchored("g3"),
            ],
        });
        deck.add_section(Section::default());
        deck
    }

    #[test]
    fn encodes_section_without_slides() {
        let config = Config::default();
        assert_eq!(encode(&deck(), &config, 0, 0).as_deref(), Some("intro"));
    }

    #[test]
    fn encodes_section_and_slide() {
        let config = Config::default();
        assert_eq!(
            encode(&deck(), &config, 1, 1).as_deref(),
            Some("gallery--g2")
        );
    }

    #[test]
    fn anonymous_section_encodes_nothing() {
        let config = Config::default();
        assert_eq!(encode(&deck(), &config, 2, 0), None);
    }

    #[test]
    fn resolves_round_trip() {
        let config = Config::default();
        let target = resolve(&deck(), &config, "gallery--g2");
        assert_eq!(
            target,
            ResolvedTarget {
                section: 1,
                slide: 1
            }
        );
    }

    #[test]
    fn leading_hash_mark_is_accepted() {
        let config = Config::default();
        let target = resolve(&deck(), &config, "#gallery--g3");
        assert_eq!(target.slide, 2);
    }

    #[test]
    fn numeric_slide_token_is_one_based() {
        let config = Config::default();
        let mut deck = deck();
        // Strip the explicit anchors so only positions remain
        deck.sections[1].slides = vec![Slide::default(), Slide::default(), Slide::default()];

        let target = resolve(&deck, &config, "gallery--2");
        assert_eq!(target.slide, 1);
    }

    #[test]
    fn out_of_range_numeric_falls_back_to_first_slide() {
        let config = Config::default();
        let target = resolve(&deck(), &config, "gallery--9");
        assert_eq!(
            target,
            ResolvedTarget {
                section: 1,
                slide: 0
            }
        );
    }

    #[test]
    fn unknown_section_falls_back_to_start() {
        let config = Config::default();
        let target = resolve(&deck(), &config, "unknown");
        assert_eq!(target, ResolvedTarget::START);
    }

    #[test]
    fn unknown_section_ignores_slide_token() {
        let config = Config::default();
        let target = resolve(&deck(), &config, "unknown--g2");
        assert_eq!(target, ResolvedTarget::START);
    }

    #[test]
    fn custom_separator_is_honored() {
        let config = Config {
            hash_separator: "/".to_string(),
            ..Default::default()
        };
        let target = resolve(&deck(), &config, "gallery/g3");
        assert_eq!(target.slide, 2);
        assert_eq!(encode(&deck(), &config, 1, 2).as_deref(), Some("gallery/g3"));
    }
}
