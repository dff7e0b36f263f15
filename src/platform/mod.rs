//=========================================================================
// Platform Subsystem
//
// Bridges Winit/glutin (OS window + GL surface) with the engine's core
// systems, under a polled model.
//
// Architecture:
// ```text
//  poll_events()                    (one zero-timeout pump)
//   │
//   ├─ WindowEvent::KeyboardInput ──┐
//   ├─ WindowEvent::MouseInput      ├─ event_mapper ─► InputContext
//   ├─ WindowEvent::CursorMoved     │                  (attached cache)
//   ├─ WindowEvent::MouseWheel    ──┘
//   │
//   ├─ WindowEvent::CloseRequested ─┐
//   ├─ WindowEvent::Focused         ├─► ListenerSlot ─► Listener
//   ├─ WindowEvent::Resized         │   (subscription-gated optionals)
//   └─ WindowEvent::DroppedFile   ──┘
// ```
//
// Key Design Decisions:
// - **Polled, not run**: the window drains the pending backlog with
//   `pump_app_events(Duration::ZERO)` and returns; the frame loop owns
//   control flow, the platform never does
// - **Translation only**: routing performs no business logic - raw codes
//   become portable identities, drop paths become one batch, and
//   everything is forwarded to the cache or the listener
// - **Invalid over thrown**: creation failure yields a null-object
//   window that absorbs every call, so callers decide whether to abort
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod gl_surface;

pub mod listener;
pub mod window;

//=== Public Exports ======================================================

pub use listener::{Listener, Subscriptions};
pub use window::{Window, WindowConfig};
