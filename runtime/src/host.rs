use diapo_common::{Config, SectionIndex, SlideIndex};

/// The environment the engine writes through: URL fragment and document
/// title. Modeled as an explicit port so no global state hides inside the
/// core.
pub trait Host {
    /// Current fragment without the leading `#`, if any.
    fn fragment(&self) -> Option<String>;
    /// Replace semantics: must not create a history entry.
    fn replace_fragment(&mut self, fragment: &str);
    fn set_title(&mut self, title: &str);
}

/// In-memory host for tests and scripted drivers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryHost {
    pub fragment: Option<String>,
    pub title: Option<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            title: None,
        }
    }
}

impl Host for MemoryHost {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}

/// Shared handle so a driver can keep inspecting the host it handed to the
/// engine.
impl Host for std::rc::Rc<std::cell::RefCell<MemoryHost>> {
    fn fragment(&self) -> Option<String> {
        self.borrow().fragment.clone()
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.borrow_mut().fragment = Some(fragment.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.borrow_mut().title = Some(title.to_string());
    }
}

/// Everything the render collaborator needs after a committed section move:
/// marker classes, title and pagination highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChange {
    pub active: SectionIndex,
    pub previous: Option<SectionIndex>,
    pub title: Option<String>,
    pub section_count: usize,
}

/// Slide-scoped refresh: markers across the current section's slides and
/// arrow visibility at the two edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideChange {
    pub section: SectionIndex,
    pub active: SlideIndex,
    pub previous: Option<SlideIndex>,
    pub slide_count: usize,
    pub at_first: bool,
    pub at_last: bool,
}

pub trait Renderer {
    fn section_changed(&mut self, change: &SectionChange);
    fn slide_changed(&mut self, change: &SlideChange);
}

#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn section_changed(&mut self, _change: &SectionChange) {}
    fn slide_changed(&mut self, _change: &SlideChange) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    Window,
    Document,
    Container,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    FragmentChange,
    KeyDown,
    Wheel,
    TouchStart,
    TouchEnd,
}

/// One listener registration record. The host binds and unbinds the whole
/// batch atomically so `init`/`destroy` stay symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSpec {
    pub target: ListenerTarget,
    pub event: EventKind,
}

/// The listener batch for one configuration. Keyboard listening is skipped
/// entirely when disabled.
pub fn listener_batch(config: &Config) -> Vec<ListenerSpec> {
    let mut batch = vec![
        ListenerSpec {
            target: ListenerTarget::Window,
            event: EventKind::FragmentChange,
        },
        ListenerSpec {
            target: ListenerTarget::Container,
            event: EventKind::Wheel,
        },
        ListenerSpec {
            target: ListenerTarget::Container,
            event: EventKind::TouchStart,
        },
        ListenerSpec {
            target: ListenerTarget::Container,
            event: EventKind::TouchEnd,
        },
    ];

    if config.keyboard {
        batch.push(ListenerSpec {
            target: ListenerTarget::Document,
            event: EventKind::KeyDown,
        });
    }

    batch
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn memory_host_round_trips_fragment() {
        let mut host = MemoryHost::new();
        assert_eq!(host.fragment(), None);

        host.replace_fragment("gallery--g2");
        assert_eq!(host.fragment().as_deref(), Some("gallery--g2"));
    }

    #[test]
    fn listener_batch_includes_keyboard_when_enabled() {
        let config = Config::default();
        let batch = listener_batch(&config);
        assert_eq!(batch.len(), 5);
        assert!(batch.iter().any(|spec| spec.event == EventKind::KeyDown));
    }

    #[test]
    fn listener_batch_skips_keyboard_when_disabled() {
        let config = Config {
            keyboard: false,
            ..Default::default()
        };
        let batch = listener_batch(&config);
        assert_eq!(batch.len(), 4);
        assert!(batch.iter().all(|spec| spec.event != EventKind::KeyDown));
    }
}
