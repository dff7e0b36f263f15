//=========================================================================
// Platform Event Mapper
//
// Converts Winit input types to the engine's portable input model.
// Provides a clean separation between OS-specific input and the
// engine's internal representation.
//
// Responsibilities:
// - Translate keyboard key codes, mouse buttons and modifier state
// - Normalize scroll deltas to one unit
// - Provide fallbacks for unmapped inputs: unknown keys become
//   `Key::Unidentified`, out-of-range mouse buttons clamp to the last
//   slot - translation is total over its input domain
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{ButtonState, Key, Modifiers, MouseButton};

//=== Key Conversion ======================================================
//
// Maps `WinitKeyCode` values onto the engine's closed `Key` set. Codes
// outside the set (F26+, media keys, international layouts) fall back to
// `Key::Unidentified`, which owns a real cache slot.
//

impl From<WinitKeyCode> for Key {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Printable keys ---------------------------------------------------
            Space => Key::Space,
            Quote => Key::Quote,
            Comma => Key::Comma,
            Minus => Key::Minus,
            Period => Key::Period,
            Slash => Key::Slash,

            Digit0 => Key::Digit0, Digit1 => Key::Digit1,
            Digit2 => Key::Digit2, Digit3 => Key::Digit3,
            Digit4 => Key::Digit4, Digit5 => Key::Digit5,
            Digit6 => Key::Digit6, Digit7 => Key::Digit7,
            Digit8 => Key::Digit8, Digit9 => Key::Digit9,

            Semicolon => Key::Semicolon,
            Equal => Key::Equal,

            KeyA => Key::KeyA, KeyB => Key::KeyB, KeyC => Key::KeyC,
            KeyD => Key::KeyD, KeyE => Key::KeyE, KeyF => Key::KeyF,
            KeyG => Key::KeyG, KeyH => Key::KeyH, KeyI => Key::KeyI,
            KeyJ => Key::KeyJ, KeyK => Key::KeyK, KeyL => Key::KeyL,
            KeyM => Key::KeyM, KeyN => Key::KeyN, KeyO => Key::KeyO,
            KeyP => Key::KeyP, KeyQ => Key::KeyQ, KeyR => Key::KeyR,
            KeyS => Key::KeyS, KeyT => Key::KeyT, KeyU => Key::KeyU,
            KeyV => Key::KeyV, KeyW => Key::KeyW, KeyX => Key::KeyX,
            KeyY => Key::KeyY, KeyZ => Key::KeyZ,

            BracketLeft => Key::BracketLeft,
            BracketRight => Key::BracketRight,
            Backslash => Key::Backslash,
            Backquote => Key::Backquote,

            //--- Function keys ----------------------------------------------------
            Escape => Key::Escape,
            Enter => Key::Enter,
            Tab => Key::Tab,
            Backspace => Key::Backspace,
            Insert => Key::Insert,
            Delete => Key::Delete,

            ArrowRight => Key::ArrowRight, ArrowLeft => Key::ArrowLeft,
            ArrowDown => Key::ArrowDown, ArrowUp => Key::ArrowUp,

            PageUp => Key::PageUp, PageDown => Key::PageDown,
            Home => Key::Home, End => Key::End,

            CapsLock => Key::CapsLock,
            ScrollLock => Key::ScrollLock,
            NumLock => Key::NumLock,
            PrintScreen => Key::PrintScreen,
            Pause => Key::Pause,

            F1 => Key::F1, F2 => Key::F2, F3 => Key::F3, F4 => Key::F4,
            F5 => Key::F5, F6 => Key::F6, F7 => Key::F7, F8 => Key::F8,
            F9 => Key::F9, F10 => Key::F10, F11 => Key::F11, F12 => Key::F12,
            F13 => Key::F13, F14 => Key::F14, F15 => Key::F15, F16 => Key::F16,
            F17 => Key::F17, F18 => Key::F18, F19 => Key::F19, F20 => Key::F20,
            F21 => Key::F21, F22 => Key::F22, F23 => Key::F23, F24 => Key::F24,
            F25 => Key::F25,

            //--- Keypad -----------------------------------------------------------
            Numpad0 => Key::Numpad0, Numpad1 => Key::Numpad1,
            Numpad2 => Key::Numpad2, Numpad3 => Key::Numpad3,
            Numpad4 => Key::Numpad4, Numpad5 => Key::Numpad5,
            Numpad6 => Key::Numpad6, Numpad7 => Key::Numpad7,
            Numpad8 => Key::Numpad8, Numpad9 => Key::Numpad9,

            NumpadDecimal => Key::NumpadDecimal,
            NumpadDivide => Key::NumpadDivide,
            NumpadMultiply => Key::NumpadMultiply,
            NumpadSubtract => Key::NumpadSubtract,
            NumpadAdd => Key::NumpadAdd,
            NumpadEnter => Key::NumpadEnter,
            NumpadEqual => Key::NumpadEqual,

            //--- Modifier keys ----------------------------------------------------
            ShiftLeft => Key::ShiftLeft,
            ControlLeft => Key::ControlLeft,
            AltLeft => Key::AltLeft,
            SuperLeft => Key::SuperLeft,
            ShiftRight => Key::ShiftRight,
            ControlRight => Key::ControlRight,
            AltRight => Key::AltRight,
            SuperRight => Key::SuperRight,

            ContextMenu => Key::ContextMenu,

            //--- Fallback ---------------------------------------------------------
            _ => Key::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================
//
// Buttons 1-5 map directly (back/forward are buttons 4/5 by convention);
// anything else clamps to the last slot.
//

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Button1,
            WinitMouseButton::Right => MouseButton::Button2,
            WinitMouseButton::Middle => MouseButton::Button3,
            WinitMouseButton::Back => MouseButton::Button4,
            WinitMouseButton::Forward => MouseButton::Button5,
            WinitMouseButton::Other(_) => MouseButton::Button8,
        }
    }
}

//=== Modifier Conversion =================================================
//
// Winit's `ModifiersState` carries shift/control/alt/super only; it does
// not surface lock-key state, so `CAPS_LOCK`/`NUM_LOCK` are never set by
// this backend. The resulting set fully replaces the cached combination.
//

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, state.shift_key());
        modifiers.set(Modifiers::CONTROL, state.control_key());
        modifiers.set(Modifiers::ALT, state.alt_key());
        modifiers.set(Modifiers::SUPER, state.super_key());
        modifiers
    }
}

//=== State Conversion ====================================================

/// Maps a key/button element state to the engine's press trichotomy.
/// OS auto-repeat (keys only) becomes `Repeating`.
pub(crate) fn button_state(state: ElementState, repeat: bool) -> ButtonState {
    match state {
        ElementState::Pressed if repeat => ButtonState::Repeating,
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

//=== Scroll Conversion ===================================================

/// Pixels per scroll line when normalizing pixel deltas from touchpads.
const PIXELS_PER_LINE: f64 = 40.0;

/// Normalizes a wheel delta to line units, `(horizontal, vertical)`.
pub(crate) fn scroll_delta(delta: MouseScrollDelta) -> (f64, f64) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
        MouseScrollDelta::PixelDelta(position) => {
            (position.x / PIXELS_PER_LINE, position.y / PIXELS_PER_LINE)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn keycode_conversion_alphabetic_and_digits() {
        assert_eq!(Key::from(WinitKeyCode::KeyA), Key::KeyA);
        assert_eq!(Key::from(WinitKeyCode::KeyZ), Key::KeyZ);
        assert_eq!(Key::from(WinitKeyCode::Digit0), Key::Digit0);
        assert_eq!(Key::from(WinitKeyCode::Digit9), Key::Digit9);
    }

    #[test]
    fn keycode_conversion_covers_the_edges_of_the_set() {
        assert_eq!(Key::from(WinitKeyCode::F25), Key::F25);
        assert_eq!(Key::from(WinitKeyCode::NumpadEqual), Key::NumpadEqual);
        assert_eq!(Key::from(WinitKeyCode::ContextMenu), Key::ContextMenu);
    }

    #[test]
    fn unmapped_keycodes_fall_back_to_unidentified() {
        assert_eq!(Key::from(WinitKeyCode::F26), Key::Unidentified);
        assert_eq!(Key::from(WinitKeyCode::MediaPlayPause), Key::Unidentified);
    }

    #[test]
    fn mouse_buttons_map_onto_the_eight_slots() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::LEFT);
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::RIGHT);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::MIDDLE);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Button4);
        assert_eq!(MouseButton::from(WinitMouseButton::Forward), MouseButton::Button5);
    }

    #[test]
    fn out_of_range_mouse_buttons_clamp_to_the_last_slot() {
        assert_eq!(MouseButton::from(WinitMouseButton::Other(9)), MouseButton::Button8);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(255)), MouseButton::Button8);
    }

    #[test]
    fn modifier_state_translates_the_four_available_bits() {
        let state = ModifiersState::SHIFT | ModifiersState::CONTROL;
        let modifiers = Modifiers::from(state);

        assert!(modifiers.contains(Modifiers::SHIFT | Modifiers::CONTROL));
        assert!(!modifiers.contains(Modifiers::ALT));
        assert!(!modifiers.contains(Modifiers::CAPS_LOCK));
    }

    #[test]
    fn empty_modifier_state_translates_to_empty_set() {
        assert_eq!(Modifiers::from(ModifiersState::empty()), Modifiers::empty());
    }

    #[test]
    fn repeat_presses_become_repeating() {
        assert_eq!(button_state(ElementState::Pressed, false), ButtonState::Pressed);
        assert_eq!(button_state(ElementState::Pressed, true), ButtonState::Repeating);
        assert_eq!(button_state(ElementState::Released, false), ButtonState::Released);
    }

    #[test]
    fn line_deltas_pass_through() {
        assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(1.0, -2.0)), (1.0, -2.0));
    }

    #[test]
    fn pixel_deltas_are_normalized_to_lines() {
        let delta = scroll_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(80.0, -40.0)));
        assert_eq!(delta, (2.0, -1.0));
    }
}
