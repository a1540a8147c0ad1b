use diapo_common::{SectionIndex, SlideIndex};

/// The one coherent current position: section index plus a per-section slide
/// index that survives while the section is not current. Pure state holder —
/// bounds enforcement is the navigator's job, so out-of-range input is only
/// caught by debug assertions here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Position {
    current_section: SectionIndex,
    slide_of: Vec<SlideIndex>,
}

impl Position {
    pub fn new(section_count: usize) -> Self {
        Self {
            current_section: 0,
            slide_of: vec![0; section_count],
        }
    }

    /// Fresh position for a rescanned deck: all slide indices reset, the
    /// section index preserved when still in bounds.
    pub fn rebuilt(&self, section_count: usize) -> Self {
        let mut position = Self::new(section_count);
        if self.current_section < section_count {
            position.current_section = self.current_section;
        }
        position
    }

    pub fn current_section(&self) -> SectionIndex {
        self.current_section
    }

    /// Does not touch the target section's slide index.
    pub fn set_section(&mut self, index: SectionIndex) {
        debug_assert!(index < self.slide_of.len() || self.slide_of.is_empty());
        self.current_section = index;
    }

    pub fn set_slide(&mut self, section: SectionIndex, slide: SlideIndex) {
        debug_assert!(section < self.slide_of.len());
        if let Some(slot) = self.slide_of.get_mut(section) {
            *slot = slide;
        }
    }

    pub fn slide_in(&self, section: SectionIndex) -> SlideIndex {
        self.slide_of.get(section).copied().unwrap_or(0)
    }

    pub fn current_slide(&self) -> SlideIndex {
        self.slide_in(self.current_section)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let position = Position::new(3);
        assert_eq!(position.current_section(), 0);
        assert_eq!(position.current_slide(), 0);
    }

    #[test]
    fn slide_index_is_kept_per_section() {
        let mut position = Position::new(3);

        position.set_slide(1, 2);
        position.set_section(2);
        // Section 1 is no longer current, its slide index survives
        assert_eq!(position.slide_in(1), 2);
        assert_eq!(position.current_slide(), 0);

        position.set_section(1);
        assert_eq!(position.current_slide(), 2);
    }

    #[test]
    fn set_section_does_not_touch_slides() {
        let mut position = Position::new(2);
        position.set_slide(0, 1);
        position.set_section(1);
        position.set_section(0);
        assert_eq!(position.current_slide(), 1);
    }

    #[test]
    fn rebuilt_preserves_section_in_bounds() {
        let mut position = Position::new(4);
        position.set_section(2);
        position.set_slide(2, 3);

        let rebuilt = position.rebuilt(4);
        assert_eq!(rebuilt.current_section(), 2);
        // Slide map starts over
        assert_eq!(rebuilt.current_slide(), 0);
    }

    #[test]
    fn rebuilt_resets_section_out_of_bounds() {
        let mut position = Position::new(4);
        position.set_section(3);

        let rebuilt = position.rebuilt(2);
        assert_eq!(rebuilt.current_section(), 0);
    }
}
