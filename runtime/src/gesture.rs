//! Translates raw keyboard, wheel and touch input into navigation intents.
//! Stateless per call apart from the last touch origin and the wheel
//! gesture window.

/// Direction of travel along either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A classified navigation request. `Step` is the composite form that walks
/// slides before sections; the touch classifier emits axis-specific steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Step(Direction),
    StepSection(Direction),
    StepSlide(Direction),
    First,
    Last,
}

/// The fixed key set the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Space,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// The focused element accepts text input; all keys are suppressed.
    pub editable_target: bool,
}

/// Scroll geometry of one ancestor between the event target and the
/// presentation container (exclusive), as observed by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArea {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
    pub overflow_scrolls: bool,
}

impl ScrollArea {
    /// Fractional-pixel tolerance at the scroll boundaries.
    const TOLERANCE: f32 = 1.0;

    /// Whether this node still has headroom to absorb a scroll in
    /// `direction` instead of letting the presentation navigate.
    fn absorbs(&self, direction: Direction) -> bool {
        if !self.overflow_scrolls || self.scroll_height <= self.client_height {
            return false;
        }
        match direction {
            Direction::Backward => self.scroll_top > Self::TOLERANCE,
            Direction::Forward => {
                self.scroll_top + self.client_height < self.scroll_height - Self::TOLERANCE
            }
        }
    }
}

/// First absorbing ancestor short-circuits and suppresses the gesture.
fn absorbed(ancestors: &[ScrollArea], direction: Direction) -> bool {
    ancestors.iter().any(|area| area.absorbs(direction))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WheelTick {
    pub delta_y: f32,
    pub ancestors: Vec<ScrollArea>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub ancestors: Vec<ScrollArea>,
}

#[derive(Debug, Default)]
pub struct GestureClassifier {
    touch_origin: Option<(f32, f32)>,
    wheel_gesture_until: u64,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.touch_origin = None;
        self.wheel_gesture_until = 0;
    }

    /// Editable targets are checked before any key mapping happens.
    pub fn classify_key(&self, press: &KeyPress) -> Option<Intent> {
        if press.editable_target {
            return None;
        }

        let intent = match press.key {
            Key::ArrowDown | Key::ArrowRight | Key::PageDown | Key::Space => {
                Intent::Step(Direction::Forward)
            }
            Key::ArrowUp | Key::ArrowLeft | Key::PageUp => Intent::Step(Direction::Backward),
            Key::Home => Intent::First,
            Key::End => Intent::Last,
        };
        Some(intent)
    }

    /// One intent per continuous gesture, emitted on the first qualifying
    /// event. Every event inside `gesture_end_delay` re-arms the window and
    /// emits nothing, threshold or not, so a momentum tail that dips under
    /// the threshold cannot split one physical gesture in two.
    pub fn classify_wheel(
        &mut self,
        tick: &WheelTick,
        delta_threshold: f32,
        gesture_end_delay: u64,
        now_ms: u64,
    ) -> Option<Intent> {
        if now_ms < self.wheel_gesture_until {
            self.wheel_gesture_until = now_ms + gesture_end_delay;
            return None;
        }

        if tick.delta_y.abs() < delta_threshold {
            return None;
        }

        let direction = if tick.delta_y > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };

        if absorbed(&tick.ancestors, direction) {
            return None;
        }

        self.wheel_gesture_until = now_ms + gesture_end_delay;
        Some(Intent::Step(direction))
    }

    /// Records the touch origin unless a transition is mid-flight.
    pub fn touch_start(&mut self, x: f32, y: f32, mid_transition: bool) {
        if mid_transition {
            return;
        }
        self.touch_origin = Some((x, y));
    }

    /// Dominant axis wins; vertical swipes navigate sections, horizontal
    /// swipes navigate slides when the current section has at least two.
    pub fn classify_touch_end(
        &mut self,
        end: &TouchPoint,
        touch_threshold: f32,
        slides_in_current: usize,
    ) -> Option<Intent> {
        let (start_x, start_y) = self.touch_origin.take()?;
        let dx = start_x - end.x;
        let dy = start_y - end.y;

        if dy.abs() >= dx.abs() {
            if dy.abs() <= touch_threshold {
                return None;
            }
            let direction = if dy > 0.0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            if absorbed(&end.ancestors, direction) {
                return None;
            }
            Some(Intent::StepSection(direction))
        } else {
            if dx.abs() <= touch_threshold || slides_in_current < 2 {
                return None;
            }
            let direction = if dx > 0.0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            Some(Intent::StepSlide(direction))
        }
    }
}
