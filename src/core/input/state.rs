//=========================================================================
// Input State
//
// The raw cache behind the input context: one timestamped slot per key
// and per mouse button, the cursor position, the last scroll event and
// the active modifier set.
//
// Pure data plus mutation logic - no platform types, no I/O. The platform
// layer feeds it `InputEvent`s; the context handle reads it back out.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== Internal Dependencies ===============================================

use super::event::{
    ButtonState, InputEvent, Key, Modifiers, MouseButton, ScrollState, TimedState,
};

//=== InputState ==========================================================

/// Cached input state. Every slot is always defined: keys and buttons
/// default to released, stamped at construction or clear time.
pub(crate) struct InputState {
    keys: [TimedState; Key::COUNT],
    buttons: [TimedState; MouseButton::COUNT],
    modifiers: Modifiers,
    cursor: (f64, f64),
    scroll: ScrollState,
}

impl InputState {
    pub(crate) fn new() -> Self {
        let now = Instant::now();
        Self {
            keys: [TimedState::released_at(now); Key::COUNT],
            buttons: [TimedState::released_at(now); MouseButton::COUNT],
            modifiers: Modifiers::empty(),
            cursor: (0.0, 0.0),
            scroll: ScrollState::zeroed_at(now),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Resets every slot to default-released and zeroes cursor and scroll.
    /// Idempotent up to the clear timestamp.
    pub(crate) fn clear(&mut self) {
        let now = Instant::now();
        self.keys.fill(TimedState::released_at(now));
        self.buttons.fill(TimedState::released_at(now));
        self.modifiers = Modifiers::empty();
        self.cursor = (0.0, 0.0);
        self.scroll = ScrollState::zeroed_at(now);
    }

    /// Applies one translated platform event, stamped with the current time.
    pub(crate) fn apply(&mut self, event: InputEvent) {
        self.apply_at(event, Instant::now());
    }

    /// Applies one event with an explicit timestamp. Tests use this to
    /// back-date events and exercise the recency window.
    pub(crate) fn apply_at(&mut self, event: InputEvent, at: Instant) {
        match event {
            InputEvent::Key { key, state } => {
                if let Some(slot) = self.keys.get_mut(key.index()) {
                    *slot = TimedState::new(state, at);
                }
            }
            InputEvent::Button { button, state } => {
                if let Some(slot) = self.buttons.get_mut(button.index()) {
                    *slot = TimedState::new(state, at);
                }
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor = (x, y);
            }
            InputEvent::Scrolled { dx, dy } => {
                self.scroll = ScrollState::new((dx, dy), at);
            }
            InputEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
            }
        }
    }

    //--- Slot Access --------------------------------------------------------

    /// Returns the slot for `key`, or `None` for an out-of-range index.
    /// Unreachable with the closed enum, but queries answer "no state"
    /// rather than faulting.
    pub(crate) fn key(&self, key: Key) -> Option<&TimedState> {
        self.keys.get(key.index())
    }

    pub(crate) fn button(&self, button: MouseButton) -> Option<&TimedState> {
        self.buttons.get(button.index())
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub(crate) fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    pub(crate) fn scroll(&self) -> &ScrollState {
        &self.scroll
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_slots_default_to_released() {
        let state = InputState::new();

        for slot in state.keys.iter() {
            assert_eq!(slot.state, ButtonState::Released);
        }
        for slot in state.buttons.iter() {
            assert_eq!(slot.state, ButtonState::Released);
        }
        assert_eq!(state.cursor(), (0.0, 0.0));
        assert_eq!(state.scroll().delta, (0.0, 0.0));
        assert!(state.modifiers().is_empty());
    }

    #[test]
    fn key_event_updates_slot_and_timestamp() {
        let mut state = InputState::new();
        let at = Instant::now();

        state.apply_at(
            InputEvent::Key { key: Key::KeyW, state: ButtonState::Pressed },
            at,
        );

        let slot = state.key(Key::KeyW).unwrap();
        assert_eq!(slot.state, ButtonState::Pressed);
        assert_eq!(slot.at, at);

        // Other keys untouched.
        assert_eq!(state.key(Key::KeyA).unwrap().state, ButtonState::Released);
    }

    #[test]
    fn modifiers_are_replaced_wholesale() {
        let mut state = InputState::new();

        state.apply(InputEvent::ModifiersChanged(Modifiers::SHIFT | Modifiers::ALT));
        state.apply(InputEvent::ModifiersChanged(Modifiers::CONTROL));

        assert_eq!(state.modifiers(), Modifiers::CONTROL);
    }

    #[test]
    fn cursor_moves_overwrite_without_history() {
        let mut state = InputState::new();

        state.apply(InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        state.apply(InputEvent::CursorMoved { x: 300.5, y: 400.5 });

        assert_eq!(state.cursor(), (300.5, 400.5));
    }

    #[test]
    fn scroll_overwrites_previous_delta() {
        let mut state = InputState::new();

        state.apply(InputEvent::Scrolled { dx: 0.0, dy: 1.0 });
        state.apply(InputEvent::Scrolled { dx: -2.0, dy: 0.0 });

        assert_eq!(state.scroll().delta, (-2.0, 0.0));
    }

    #[test]
    fn clear_twice_equals_clear_once() {
        let mut state = InputState::new();

        state.apply(InputEvent::Key { key: Key::Space, state: ButtonState::Pressed });
        state.apply(InputEvent::Button {
            button: MouseButton::LEFT,
            state: ButtonState::Pressed,
        });
        state.apply(InputEvent::CursorMoved { x: 5.0, y: 5.0 });
        state.apply(InputEvent::ModifiersChanged(Modifiers::SUPER));

        state.clear();
        assert_eq!(state.key(Key::Space).unwrap().state, ButtonState::Released);

        state.clear();
        assert_eq!(state.key(Key::Space).unwrap().state, ButtonState::Released);
        assert_eq!(state.button(MouseButton::LEFT).unwrap().state, ButtonState::Released);
        assert_eq!(state.cursor(), (0.0, 0.0));
        assert_eq!(state.scroll().delta, (0.0, 0.0));
        assert!(state.modifiers().is_empty());
    }
}
