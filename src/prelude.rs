//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use vitric::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application facade
pub use crate::application::{Application, ExitCode, EXIT_FAILURE, EXIT_SUCCESS};

// Game contract
pub use crate::core::game::{Game, Notification};

// Input cache
pub use crate::core::input::event::{ButtonState, Key, Modifiers, MouseButton};
pub use crate::core::input::InputContext;

// Windowing
pub use crate::platform::{Listener, Subscriptions, Window, WindowConfig};
