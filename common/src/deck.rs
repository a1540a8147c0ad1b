use crate::Config;
use serde::{Deserialize, Serialize};

pub type SectionIndex = usize;
pub type SlideIndex = usize;

/// A horizontally ordered sub-page nested within one section.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Slide {
    pub hash: Option<String>,
}

impl Slide {
    pub fn anchored(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
        }
    }
}

/// A vertically ordered top-level page of the presentation.
///
/// A section without a hash is valid but unreachable through a deep link;
/// the fragment writer skips it entirely.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Section {
    pub hash: Option<String>,
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

impl Section {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn has_slides(&self) -> bool {
        !self.slides.is_empty()
    }

    pub fn last_slide_index(&self) -> SlideIndex {
        self.slides.len().saturating_sub(1)
    }

    /// Resolve the URL hash for one slide. Precedence: configured anchor
    /// mapping, then the slide's own hash, then the 1-based position.
    pub fn slide_hash(&self, config: &Config, slide: SlideIndex) -> String {
        if let Some(section_hash) = &self.hash {
            if let Some(anchors) = config.slide_anchors.get(section_hash) {
                if let Some(anchor) = anchors.get(slide) {
                    return anchor.clone();
                }
            }
        }

        if let Some(hash) = self.slides.get(slide).and_then(|s| s.hash.clone()) {
            return hash;
        }

        (slide + 1).to_string()
    }

    /// Reverse lookup of a slide by its resolved hash. Duplicate hashes are
    /// not rejected; the first match wins.
    pub fn slide_by_hash(&self, config: &Config, token: &str) -> Option<SlideIndex> {
        (0..self.slides.len()).find(|&slide| self.slide_hash(config, slide) == token)
    }
}

/// The scanned presentation content: an ordered list of sections, each with
/// its ordered slides. Index is identity for the lifetime of the deck.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Deck {
    pub sections: Vec<Section>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: Section) -> SectionIndex {
        let index = self.sections.len();
        self.sections.push(section);
        index
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: SectionIndex) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn last_section_index(&self) -> SectionIndex {
        self.sections.len().saturating_sub(1)
    }

    /// First section whose hash matches `token`.
    pub fn section_by_hash(&self, token: &str) -> Option<SectionIndex> {
        self.sections
            .iter()
            .position(|section| section.hash.as_deref() == Some(token))
    }
}
