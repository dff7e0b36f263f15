//=========================================================================
// Input Cache
//
// Level- and edge-queryable input state, fed by the window's platform
// callbacks and polled by application and game code.
//
// Responsibilities:
// - Hold per-key and per-button timestamped state, cursor position,
//   the last scroll event and the active modifier set
// - Answer state queries (`is_key_pressed`) and recency queries
//   (`is_key_just_pressed`) in O(1), non-blocking
// - Attach to / detach from a window's input channel
//
// Design:
// The cache is an explicitly constructed context object, not global
// state: `InputContext` is a cheap cloneable handle, dependency-injected
// into the window and the application. Any number of independent caches
// can coexist (tests rely on this); call-site ergonomics stay close to a
// global thanks to the handle being `Clone`.
//
// The "just" queries model "edge happened recently", not true edge
// detection: two polls inside the window both see `true`, and a poll
// after the window sees `false` even if no new event arrived. Callers
// must poll more often than the interval and must not rely on
// exactly-once semantics.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state;

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::{error, warn};

//=== Internal Dependencies ===============================================

use crate::core::defaults;
use crate::platform::window::Window;
use event::{ButtonState, InputEvent, Key, Modifiers, MouseButton};
use state::InputState;

//=== InputContext ========================================================

/// Cloneable handle to one logical input cache.
///
/// All clones share the same state; queries never block and never
/// allocate. Single-threaded by design - callbacks and polls both run on
/// the frame-loop thread, so the interior `RefCell` is never contended.
#[derive(Clone)]
pub struct InputContext {
    state: Rc<RefCell<InputState>>,
}

impl InputContext {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(InputState::new())),
        }
    }

    //--- Window Attachment ------------------------------------------------

    /// Registers this cache on the window's input channel. Replaces any
    /// previously attached cache. Logs and returns if the window is
    /// invalid - a silent no-op, not an error.
    pub fn assign(&self, window: &mut Window) {
        if !window.valid() {
            error!("Input assign skipped: window is invalid");
            return;
        }
        window.attach_input(self.clone());
    }

    /// Unregisters from the window's input channel and clears all cached
    /// state back to defaults.
    pub fn reset(&self, window: &mut Window) {
        if !window.valid() {
            warn!("Input reset requested, but there is no window context");
            return;
        }
        window.detach_input();
        self.clear();
    }

    /// Resets every key and button to default-released, zeroes cursor and
    /// scroll. Independent of any window; idempotent.
    pub fn clear(&self) {
        self.state.borrow_mut().clear();
    }

    //--- Keyboard Queries -------------------------------------------------

    /// Level query: `true` iff the key's current state is pressed.
    /// A repeating key answers `false` - repeat is its own state.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.key_in_state(key, ButtonState::Pressed)
    }

    /// Level query: `true` iff the key's current state is released.
    pub fn is_key_released(&self, key: Key) -> bool {
        self.key_in_state(key, ButtonState::Released)
    }

    /// `true` iff the key is pressed and the press happened within the
    /// default recency window ([`defaults::timeout::JUST_ACTION`]).
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.is_key_just_pressed_within(key, defaults::timeout::JUST_ACTION)
    }

    pub fn is_key_just_pressed_within(&self, key: Key, interval: Duration) -> bool {
        self.key_in_state_within(key, ButtonState::Pressed, interval)
    }

    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.is_key_just_released_within(key, defaults::timeout::JUST_ACTION)
    }

    pub fn is_key_just_released_within(&self, key: Key, interval: Duration) -> bool {
        self.key_in_state_within(key, ButtonState::Released, interval)
    }

    //--- Modifier-Gated Keyboard Queries ----------------------------------
    //
    // Chorded sugar: the base query, additionally requiring the given
    // modifier set to be active. An empty set never matches.
    //

    pub fn is_key_pressed_with(&self, modifiers: Modifiers, key: Key) -> bool {
        self.has_modifiers(modifiers) && self.is_key_pressed(key)
    }

    pub fn is_key_released_with(&self, modifiers: Modifiers, key: Key) -> bool {
        self.has_modifiers(modifiers) && self.is_key_released(key)
    }

    pub fn is_key_just_pressed_with(&self, modifiers: Modifiers, key: Key) -> bool {
        self.has_modifiers(modifiers) && self.is_key_just_pressed(key)
    }

    pub fn is_key_just_released_with(&self, modifiers: Modifiers, key: Key) -> bool {
        self.has_modifiers(modifiers) && self.is_key_just_released(key)
    }

    //--- Mouse Button Queries ---------------------------------------------

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.button_in_state(button, ButtonState::Pressed)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.button_in_state(button, ButtonState::Released)
    }

    pub fn is_button_just_pressed(&self, button: MouseButton) -> bool {
        self.is_button_just_pressed_within(button, defaults::timeout::JUST_ACTION)
    }

    pub fn is_button_just_pressed_within(&self, button: MouseButton, interval: Duration) -> bool {
        self.button_in_state_within(button, ButtonState::Pressed, interval)
    }

    pub fn is_button_just_released(&self, button: MouseButton) -> bool {
        self.is_button_just_released_within(button, defaults::timeout::JUST_ACTION)
    }

    pub fn is_button_just_released_within(&self, button: MouseButton, interval: Duration) -> bool {
        self.button_in_state_within(button, ButtonState::Released, interval)
    }

    //--- Modifier Queries -------------------------------------------------

    /// `true` iff the given single modifier bit is active.
    pub fn has_modifier(&self, modifier: Modifiers) -> bool {
        self.has_modifiers(modifier)
    }

    /// `true` iff every bit of the requested set is active. An empty
    /// request returns `false`, never vacuously `true`.
    pub fn has_modifiers(&self, modifiers: Modifiers) -> bool {
        !modifiers.is_empty() && self.state.borrow().modifiers().contains(modifiers)
    }

    //--- Cursor Queries ---------------------------------------------------

    /// Cursor position truncated to whole pixels.
    pub fn mouse_position(&self) -> (i32, i32) {
        let (x, y) = self.state.borrow().cursor();
        (x as i32, y as i32)
    }

    /// Cursor position in window space, as reported by the platform.
    pub fn cursor_position(&self) -> (f64, f64) {
        self.state.borrow().cursor()
    }

    //--- Scroll Queries ---------------------------------------------------

    pub fn just_scrolled(&self) -> bool {
        self.just_scrolled_within(defaults::timeout::JUST_ACTION)
    }

    pub fn just_scrolled_within(&self, interval: Duration) -> bool {
        self.state.borrow().scroll().is_recent(interval, Instant::now())
    }

    /// Like [`just_scrolled`](Self::just_scrolled), additionally requiring
    /// a non-zero vertical delta.
    pub fn just_vertical_scrolled(&self) -> bool {
        self.just_vertical_scrolled_within(defaults::timeout::JUST_ACTION)
    }

    pub fn just_vertical_scrolled_within(&self, interval: Duration) -> bool {
        self.state.borrow().scroll().delta.1 != 0.0 && self.just_scrolled_within(interval)
    }

    pub fn just_horizontal_scrolled(&self) -> bool {
        self.just_horizontal_scrolled_within(defaults::timeout::JUST_ACTION)
    }

    pub fn just_horizontal_scrolled_within(&self, interval: Duration) -> bool {
        self.state.borrow().scroll().delta.0 != 0.0 && self.just_scrolled_within(interval)
    }

    //--- Event Ingestion --------------------------------------------------

    /// Applies one translated platform event. Called by the window during
    /// `poll_events`; everything runs on the frame-loop thread.
    pub(crate) fn apply(&self, event: InputEvent) {
        self.state.borrow_mut().apply(event);
    }

    /// Timestamp-injecting variant for tests.
    #[cfg(test)]
    pub(crate) fn apply_at(&self, event: InputEvent, at: Instant) {
        self.state.borrow_mut().apply_at(event, at);
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_in_state(&self, key: Key, wanted: ButtonState) -> bool {
        self.state
            .borrow()
            .key(key)
            .map_or(false, |slot| slot.state == wanted)
    }

    fn key_in_state_within(&self, key: Key, wanted: ButtonState, interval: Duration) -> bool {
        let now = Instant::now();
        self.state
            .borrow()
            .key(key)
            .map_or(false, |slot| slot.state == wanted && slot.is_recent(interval, now))
    }

    fn button_in_state(&self, button: MouseButton, wanted: ButtonState) -> bool {
        self.state
            .borrow()
            .button(button)
            .map_or(false, |slot| slot.state == wanted)
    }

    fn button_in_state_within(
        &self,
        button: MouseButton,
        wanted: ButtonState,
        interval: Duration,
    ) -> bool {
        let now = Instant::now();
        self.state
            .borrow()
            .button(button)
            .map_or(false, |slot| slot.state == wanted && slot.is_recent(interval, now))
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
