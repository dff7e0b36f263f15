//=========================================================================
// Input Data Model
//
// Defines the portable identities and timestamped states the input cache
// is built from.
//
// This module abstracts away platform-specific input (e.g. Winit, SDL)
// into a unified, engine-friendly format used by the input subsystem.
//
// Responsibilities:
// - Represent keyboard keys and mouse buttons in a stable, portable way
// - Pair every key/button with a timestamped press state
// - Track the active modifier combination as a bit set
// - Carry the last scroll delta with its timestamp
//
// Design:
// - `Key` and `MouseButton` are dense enums: each variant owns exactly one
//   slot in the cache arrays, addressed by its integer value
// - Every state is Copy-cheap; nothing here allocates
// - Timestamps are monotonic (`Instant`), never wall-clock
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use bitflags::bitflags;

//=== Key =================================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// The set is closed and platform-independent: digits, letters, F1-F25,
/// the keypad, navigation, punctuation and the modifier keys themselves.
/// `Unidentified` is a real variant with its own cache slot - the
/// translation layer maps every unrecognized platform code onto it, so
/// translation is total over its input domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    /// Fallback for keys not covered by the closed set below.
    Unidentified,

    //--- Printable Keys ---------------------------------------------------

    Space,
    Quote,
    Comma,
    Minus,
    Period,
    Slash,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Semicolon,
    Equal,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    BracketLeft,
    BracketRight,
    Backslash,
    Backquote,

    //--- Function Keys ----------------------------------------------------

    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,

    ArrowRight, ArrowLeft, ArrowDown, ArrowUp,

    PageUp, PageDown,
    Home, End,

    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, F13,
    F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24, F25,

    //--- Keypad -----------------------------------------------------------

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    NumpadDecimal,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    NumpadAdd,
    NumpadEnter,
    NumpadEqual,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ControlLeft,
    AltLeft,
    SuperLeft,
    ShiftRight,
    ControlRight,
    AltRight,
    SuperRight,

    ContextMenu,
}

impl Key {
    /// Number of variants; sizes the per-key cache array.
    pub const COUNT: usize = Key::ContextMenu as usize + 1;

    /// Dense cache-array index of this key.
    pub const fn index(self) -> usize {
        self as usize
    }
}

//=== MouseButton =========================================================

/// Physical mouse button identifier, `Button1` through `Button8`.
///
/// The first three buttons carry the conventional aliases
/// [`MouseButton::LEFT`], [`MouseButton::RIGHT`] and [`MouseButton::MIDDLE`].
/// Platform buttons past the eighth clamp to `Button8` - a conscious
/// fallback, not undefined behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

impl MouseButton {
    /// Primary button (button 1).
    pub const LEFT: Self = Self::Button1;

    /// Secondary button (button 2).
    pub const RIGHT: Self = Self::Button2;

    /// Wheel click (button 3).
    pub const MIDDLE: Self = Self::Button3;

    /// Number of variants; sizes the per-button cache array.
    pub const COUNT: usize = MouseButton::Button8 as usize + 1;

    /// Dense cache-array index of this button.
    pub const fn index(self) -> usize {
        self as usize
    }
}

//=== ButtonState =========================================================

/// Press state of a key or mouse button.
///
/// `Repeating` is produced by OS key-repeat while a key is held; it is a
/// distinct state, answered by neither the pressed nor the released query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
    /// Keyboard auto-repeat (keys only).
    Repeating,
}

//=== Modifiers ===========================================================

bitflags! {
    /// Modifier key combination, tracked as a bit set.
    ///
    /// The current combination is fully replaced - never merged - every
    /// time the platform reports a modifier change.
    ///
    /// `CAPS_LOCK` and `NUM_LOCK` are part of the data model but are never
    /// produced by the winit backend, which does not surface lock-key
    /// state (see the platform event mapper).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT     = 0b0000_0001;
        const CONTROL   = 0b0000_0010;
        const ALT       = 0b0000_0100;
        const SUPER     = 0b0000_1000;
        const CAPS_LOCK = 0b0001_0000;
        const NUM_LOCK  = 0b0010_0000;
    }
}

//=== TimedState ==========================================================

/// A press state plus the monotonic instant it was recorded at.
///
/// Every key and button always has one of these: the default is
/// `Released`, stamped at cache construction or clear time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedState {
    pub state: ButtonState,
    pub at: Instant,
}

impl TimedState {
    pub fn new(state: ButtonState, at: Instant) -> Self {
        Self { state, at }
    }

    /// The default slot value: released, stamped `at`.
    pub fn released_at(at: Instant) -> Self {
        Self::new(ButtonState::Released, at)
    }

    /// Whether the recorded instant still falls inside the recency window
    /// ending at `now`.
    pub fn is_recent(&self, interval: Duration, now: Instant) -> bool {
        self.at + interval >= now
    }
}

//=== ScrollState =========================================================

/// The last scroll delta and when it happened.
///
/// Scrolls are overwritten, never queued: a fast double-scroll before a
/// consumer polls loses the earlier delta. Documented limitation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub delta: (f64, f64),
    pub at: Instant,
}

impl ScrollState {
    pub fn new(delta: (f64, f64), at: Instant) -> Self {
        Self { delta, at }
    }

    pub fn zeroed_at(at: Instant) -> Self {
        Self::new((0.0, 0.0), at)
    }

    pub fn is_recent(&self, interval: Duration, now: Instant) -> bool {
        self.at + interval >= now
    }
}

//=== InputEvent ==========================================================

/// A single cache mutation, as translated from a platform callback.
///
/// The platform layer produces these; the input state consumes them.
/// Unlike the cached slots, events carry no timestamps - the cache stamps
/// them on arrival.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: ButtonState },
    Button { button: MouseButton, state: ButtonState },
    CursorMoved { x: f64, y: f64 },
    Scrolled { dx: f64, dy: f64 },
    /// Full replacement of the active modifier combination.
    ModifiersChanged(Modifiers),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_indices_are_dense_and_bounded() {
        assert_eq!(Key::Unidentified.index(), 0);
        assert_eq!(Key::ContextMenu.index(), Key::COUNT - 1);
        assert!(Key::KeyQ.index() < Key::COUNT);
        assert!(Key::F25.index() < Key::COUNT);
    }

    #[test]
    fn key_count_covers_the_full_set() {
        // Sentinel + 48 printable + 44 function + 17 keypad + 9 modifier keys.
        assert_eq!(Key::COUNT, 119);
    }

    #[test]
    fn mouse_button_aliases_map_to_first_three_slots() {
        assert_eq!(MouseButton::LEFT, MouseButton::Button1);
        assert_eq!(MouseButton::RIGHT, MouseButton::Button2);
        assert_eq!(MouseButton::MIDDLE, MouseButton::Button3);
        assert_eq!(MouseButton::COUNT, 8);
    }

    #[test]
    fn timed_state_recency_window() {
        let t0 = Instant::now();
        let state = TimedState::new(ButtonState::Pressed, t0);

        assert!(state.is_recent(Duration::from_millis(10), t0));
        assert!(state.is_recent(Duration::from_millis(10), t0 + Duration::from_millis(10)));
        assert!(!state.is_recent(Duration::from_millis(10), t0 + Duration::from_millis(11)));
    }

    #[test]
    fn modifier_subset_check() {
        let active = Modifiers::CONTROL | Modifiers::SHIFT;

        assert!(active.contains(Modifiers::CONTROL));
        assert!(active.contains(Modifiers::CONTROL | Modifiers::SHIFT));
        assert!(!active.contains(Modifiers::CONTROL | Modifiers::ALT));
        assert!(active.contains(Modifiers::empty()), "contains() is vacuous on empty sets");
    }
}
