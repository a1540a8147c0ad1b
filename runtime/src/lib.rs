use std::rc::Rc;

use diapo_common::{Config, Deck, SectionIndex, SlideIndex};
use log::{debug, warn};

mod clock;
pub use clock::{Clock, ManualClock, WallClock};

mod error;
pub use error::Error;

mod gate;
pub use gate::{Axis, TransitionGate};

mod gesture;
pub use gesture::{
    Direction, GestureClassifier, Intent, Key, KeyPress, ScrollArea, TouchPoint, WheelTick,
};

pub mod fragment;
pub use fragment::ResolvedTarget;

mod host;
pub use host::{
    listener_batch, EventKind, Host, ListenerSpec, ListenerTarget, MemoryHost, NullRenderer,
    Renderer, SectionChange, SlideChange,
};

mod position;
pub use position::Position;

/// The navigation engine: owns the position, validates every requested move
/// against bounds and the transition gate, and reflects each committed
/// change into the renderer and the URL fragment.
///
/// Single-threaded and event-driven: nothing blocks, nothing queues. A move
/// that loses the race against an in-flight transition is dropped, not
/// deferred.
pub struct Presentation {
    deck: Deck,
    config: Config,
    position: Position,
    gate: TransitionGate,
    gestures: GestureClassifier,
    clock: Rc<dyn Clock>,
    host: Box<dyn Host>,
    renderer: Box<dyn Renderer>,
    attached: bool,
}

impl Presentation {
    pub fn new(
        deck: Deck,
        config: Config,
        host: Box<dyn Host>,
        renderer: Box<dyn Renderer>,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, Error> {
        if deck.sections.is_empty() {
            return Err(Error::EmptyDeck);
        }

        for warning in config.validate() {
            warn!("{warning}");
        }

        let position = Position::new(deck.section_count());
        Ok(Self {
            deck,
            config,
            position,
            gate: TransitionGate::new(),
            gestures: GestureClassifier::new(),
            clock,
            host,
            renderer,
            attached: false,
        })
    }

    /// Attaches the listener batch, applies the startup fragment and renders
    /// the first position. The startup jump always applies once, even when
    /// it resolves to the default position, and engages no lock: the first
    /// paint is not animated.
    pub fn init(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;

        let target = match self.host.fragment() {
            Some(frag) => fragment::resolve(&self.deck, &self.config, &frag),
            None => ResolvedTarget::START,
        };
        self.apply_absolute(target, None);
    }

    /// Swaps in a rescanned deck. The position is rebuilt, not merged: slide
    /// indices reset, the section index survives when still in bounds.
    pub fn refresh(&mut self, deck: Deck) -> Result<(), Error> {
        if deck.sections.is_empty() {
            return Err(Error::EmptyDeck);
        }

        self.deck = deck;
        self.position = self.position.rebuilt(self.deck.section_count());
        self.gate.release_all();
        self.gestures.reset();

        if self.attached {
            self.render_section(None);
            self.sync_fragment();
        }
        Ok(())
    }

    /// Detaches listeners and discards the position. Idempotent.
    pub fn destroy(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.gate.release_all();
        self.gestures.reset();
        self.position = Position::new(self.deck.section_count());
    }

    pub fn attached(&self) -> bool {
        self.attached
    }

    /// The listener registration batch for the current configuration.
    pub fn listeners(&self) -> Vec<ListenerSpec> {
        listener_batch(&self.config)
    }

    pub fn current_section(&self) -> SectionIndex {
        self.position.current_section()
    }

    pub fn current_slide(&self) -> SlideIndex {
        self.position.current_slide()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    // --- public navigation surface ---

    /// Composite forward move: walks the current section's slides first,
    /// then steps to the next section.
    pub fn next(&mut self) {
        if self.slide_headroom(Direction::Forward) {
            self.next_slide();
        } else {
            self.next_section();
        }
    }

    pub fn prev(&mut self) {
        if self.slide_headroom(Direction::Backward) {
            self.prev_slide();
        } else {
            self.prev_section();
        }
    }

    pub fn next_section(&mut self) {
        let current = self.position.current_section();
        let target = if current >= self.deck.last_section_index() {
            if self.config.loop_sections {
                0
            } else {
                current
            }
        } else {
            current + 1
        };
        self.go_to_section(target, false);
    }

    /// Backward section moves land on the target's last slide so walking
    /// back through a multi-slide section stays continuous.
    pub fn prev_section(&mut self) {
        let current = self.position.current_section();
        let target = if current == 0 {
            if self.config.loop_sections {
                self.deck.last_section_index()
            } else {
                current
            }
        } else {
            current - 1
        };
        self.go_to_section(target, true);
    }

    /// Slides never wrap, regardless of the loop setting.
    pub fn next_slide(&mut self) {
        self.go_to_slide(self.position.current_slide() + 1);
    }

    pub fn prev_slide(&mut self) {
        let current = self.position.current_slide();
        if current == 0 {
            debug!("slide move dropped, already at the first slide");
            return;
        }
        self.go_to_slide(current - 1);
    }

    /// Absolute section move. Drops silently when detached, out of bounds,
    /// already there, or while a section transition is in flight.
    ///
    /// A committed move always overwrites the target's slide slot — last
    /// slide when landing backward, first otherwise. The per-section slide
    /// index that `Position` retains only feeds rendering and `slide_in`
    /// queries for non-current sections.
    pub fn go_to_section(&mut self, index: SectionIndex, land_on_last_slide: bool) {
        if !self.attached {
            return;
        }

        let current = self.position.current_section();
        if index >= self.deck.section_count() || index == current {
            debug!("section move to {index} dropped");
            return;
        }

        let now = self.clock.now_ms();
        if !self
            .gate
            .try_acquire(Axis::Section, now, self.config.scroll_timeout)
        {
            debug!("section move to {index} dropped, transition in flight");
            return;
        }

        self.position.set_section(index);
        let section = &self.deck.sections[index];
        if section.has_slides() {
            let slide = if land_on_last_slide {
                section.last_slide_index()
            } else {
                0
            };
            self.position.set_slide(index, slide);
        }

        self.render_section(Some(current));
        self.sync_fragment();
    }

    /// Absolute slide move within the current section.
    pub fn go_to_slide(&mut self, index: SlideIndex) {
        if !self.attached {
            return;
        }

        let section_index = self.position.current_section();
        let Some(section) = self.deck.section(section_index) else {
            return;
        };

        let current = self.position.current_slide();
        if index >= section.slide_count() || index == current {
            debug!("slide move to {index} dropped");
            return;
        }

        let now = self.clock.now_ms();
        if !self
            .gate
            .try_acquire(Axis::Slide, now, self.config.slide_scroll_timeout)
        {
            debug!("slide move to {index} dropped, transition in flight");
            return;
        }

        self.position.set_slide(section_index, index);
        self.render_slide(Some(current));
        self.sync_fragment();
    }

    pub fn scroll_to(&mut self, index: SectionIndex) {
        self.go_to_section(index, false);
    }

    // --- inbound events ---

    pub fn handle_key(&mut self, press: &KeyPress) {
        if !self.attached || !self.config.keyboard {
            return;
        }
        if let Some(intent) = self.gestures.classify_key(press) {
            self.dispatch(intent);
        }
    }

    pub fn handle_wheel(&mut self, tick: &WheelTick) {
        if !self.attached {
            return;
        }
        let now = self.clock.now_ms();
        let intent = self.gestures.classify_wheel(
            tick,
            self.config.wheel_delta_threshold,
            self.config.wheel_gesture_end_delay,
            now,
        );
        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    pub fn handle_touch_start(&mut self, x: f32, y: f32) {
        if !self.attached {
            return;
        }
        let now = self.clock.now_ms();
        let mid_transition =
            self.gate.engaged(Axis::Section, now) || self.gate.engaged(Axis::Slide, now);
        self.gestures.touch_start(x, y, mid_transition);
    }

    pub fn handle_touch_end(&mut self, point: &TouchPoint) {
        if !self.attached {
            return;
        }
        let slides_in_current = self.deck.sections[self.position.current_section()].slide_count();
        let intent =
            self.gestures
                .classify_touch_end(point, self.config.touch_threshold, slides_in_current);
        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    /// External fragment change. Unlike the startup jump this applies only
    /// when the resolved position differs from the current one, and it goes
    /// through the same gate as any other section move.
    pub fn handle_fragment_change(&mut self, fragment: &str) {
        if !self.attached {
            return;
        }

        let target = fragment::resolve(&self.deck, &self.config, fragment);
        let current_section = self.position.current_section();
        if target.section == current_section && target.slide == self.position.current_slide() {
            return;
        }

        if target.section == current_section {
            self.go_to_slide(target.slide);
            return;
        }

        let now = self.clock.now_ms();
        if !self
            .gate
            .try_acquire(Axis::Section, now, self.config.scroll_timeout)
        {
            debug!("fragment jump dropped, transition in flight");
            return;
        }
        self.apply_absolute(target, Some(current_section));
    }

    // --- internals ---

    fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Step(Direction::Forward) => self.next(),
            Intent::Step(Direction::Backward) => self.prev(),
            Intent::StepSection(Direction::Forward) => self.next_section(),
            Intent::StepSection(Direction::Backward) => self.prev_section(),
            Intent::StepSlide(Direction::Forward) => self.next_slide(),
            Intent::StepSlide(Direction::Backward) => self.prev_slide(),
            Intent::First => self.go_to_section(0, false),
            Intent::Last => self.go_to_section(self.deck.last_section_index(), false),
        }
    }

    fn slide_headroom(&self, direction: Direction) -> bool {
        let Some(section) = self.deck.section(self.position.current_section()) else {
            return false;
        };
        if section.slide_count() < 2 {
            return false;
        }
        match direction {
            Direction::Forward => self.position.current_slide() < section.last_slide_index(),
            Direction::Backward => self.position.current_slide() > 0,
        }
    }

    /// Sets the position wholesale, bypassing the already-there check.
    fn apply_absolute(&mut self, target: ResolvedTarget, previous: Option<SectionIndex>) {
        self.position.set_section(target.section);
        if self.deck.sections[target.section].has_slides() {
            self.position.set_slide(target.section, target.slide);
        }
        self.render_section(previous);
        self.sync_fragment();
    }

    fn render_section(&mut self, previous: Option<SectionIndex>) {
        let active = self.position.current_section();
        let section = &self.deck.sections[active];
        let title = section.title.clone();
        let has_slides = section.has_slides();

        if let Some(title) = &title {
            self.host.set_title(title);
        }

        let change = SectionChange {
            active,
            previous,
            title,
            section_count: self.deck.section_count(),
        };
        self.renderer.section_changed(&change);

        if has_slides {
            self.render_slide(None);
        }
    }

    fn render_slide(&mut self, previous: Option<SlideIndex>) {
        let section_index = self.position.current_section();
        let section = &self.deck.sections[section_index];
        let active = self.position.current_slide();

        let change = SlideChange {
            section: section_index,
            active,
            previous,
            slide_count: section.slide_count(),
            at_first: active == 0,
            at_last: active + 1 >= section.slide_count(),
        };
        self.renderer.slide_changed(&change);
    }

    /// Writes the fragment with replace semantics, only when it differs and
    /// only when the current section has a hash at all.
    fn sync_fragment(&mut self) {
        let encoded = fragment::encode(
            &self.deck,
            &self.config,
            self.position.current_section(),
            self.position.current_slide(),
        );
        let Some(encoded) = encoded else {
            return;
        };
        if self.host.fragment().as_deref() != Some(encoded.as_str()) {
            self.host.replace_fragment(&encoded);
        }
    }
}
