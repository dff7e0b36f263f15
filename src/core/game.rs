//=========================================================================
// Game Contract
//
// The capability interface the application drives. The shell owns the
// window and the frame loop; everything game-specific - simulation,
// rendering, reaction to lifecycle changes - lives behind this trait.
//
// Call-order guarantees (upheld by `Application::run`):
// - `start` is called exactly once before the first `update`/`draw`
// - `update(delta)` then `draw()` once per frame, in that order
// - `stop` is called exactly once after the loop exits; no `update` or
//   `draw` follows it
// - `pause`/`resume` and `notification` may arrive between frames
//
//=========================================================================

//=== Notification ========================================================

/// High-level lifecycle event routed from the application to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// The quit hotkey fired; the window is about to be asked to close.
    Quit,
    /// The platform requested the window to close.
    Closing,
    FocusLost,
    FocusGained,
    /// The drawable area changed; the viewport has already been updated.
    FramebufferSizeChanged,
}

//=== Game ================================================================

/// A pluggable simulation/rendering object driven by the frame loop.
pub trait Game {
    fn start(&mut self);
    fn update(&mut self, delta: f64);
    fn draw(&mut self);
    fn stop(&mut self);

    fn pause(&mut self);
    fn resume(&mut self);

    fn notification(&mut self, kind: Notification);
}
