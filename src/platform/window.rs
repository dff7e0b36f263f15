//=========================================================================
// Window
//
// Owns the native window, its GL surface and the event loop, and
// translates raw platform callbacks into two channels:
//
// - input events   → the attached `InputContext` (if any)
// - lifecycle events → the registered `Listener` (if any)
//
// The polled model: `poll_events()` drains the platform's pending event
// backlog with a zero-timeout pump, synchronously invoking the routing
// above, and returns - it never blocks waiting for new events. The
// window is its own winit `ApplicationHandler` during these pumps.
//
// Construction quirk: winit 0.30 only hands out windows inside the
// `resumed()` callback, so `Window::new` pumps once with a small creation
// handler to force that callback, then keeps the result. A failure at
// any step yields an *invalid* window - every operation on it is a no-op
// or a default, never a panic.
//
// Event routing performs no business logic beyond translation: raw key
// codes become `Key` values, drop paths are collected into one batch,
// and everything is forwarded. Events reported for a foreign window id
// are ignored.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Weak;
use std::time::Duration;

//=== External Crates =====================================================

use log::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as WinitWindow, WindowId};

//=== Internal Dependencies ===============================================

use super::event_mapper::{button_state, scroll_delta};
use super::gl_surface::RenderSurface;
use super::listener::{Listener, LifecycleEvent, ListenerSlot};
use crate::core::defaults;
use crate::core::input::event::{InputEvent, Key, Modifiers, MouseButton};
use crate::core::input::InputContext;

//=== WindowConfig ========================================================

/// Creation parameters for a window: size, title, fullscreen request.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: defaults::window::WIDTH,
            height: defaults::window::HEIGHT,
            title: defaults::window::TITLE.to_string(),
            fullscreen: defaults::window::FULL_SCREEN,
        }
    }
}

//=== Window ==============================================================

/// The valid half of a window. Field order matters: the GL surface drops
/// before the native window it draws to.
struct WindowInner {
    surface: RenderSurface,
    window: WinitWindow,
}

/// A native window with an OpenGL surface, driven by explicit polling.
///
/// Move-only and exclusively owned; an invalid instance (failed
/// creation) stays usable as a null object. `inner` is declared before
/// `event_loop` so the window and surface are released while the loop
/// still exists.
pub struct Window {
    inner: Option<WindowInner>,
    event_loop: Option<EventLoop<()>>,
    listener: ListenerSlot,
    input: Option<InputContext>,
    title: String,
    close_requested: bool,
    pending_drops: Vec<PathBuf>,
}

//--- Creation Handler ----------------------------------------------------
//
// One-shot handler pumped exactly once by `Window::new` to reach the
// `resumed()` trampoline where winit allows window creation.
//
struct SurfaceCreator {
    config: WindowConfig,
    result: Option<Result<(WinitWindow, RenderSurface), super::gl_surface::SurfaceError>>,
}

impl ApplicationHandler for SurfaceCreator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.result.is_some() {
            return;
        }
        self.result = Some(RenderSurface::create(event_loop, &self.config));
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

impl Window {
    //--- Construction -----------------------------------------------------

    /// Requests a window with a usable GL surface. Failure is recorded,
    /// not thrown: the returned instance answers `valid() == false` and
    /// absorbs every subsequent call.
    pub fn new(config: &WindowConfig) -> Self {
        let mut event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                error!("Event loop creation failed: {}", e);
                return Self::invalid_instance();
            }
        };

        let mut creator = SurfaceCreator { config: config.clone(), result: None };

        // resumed() fires synchronously on all desktop platforms.
        let _ = event_loop.pump_app_events(Some(Duration::from_millis(100)), &mut creator);

        let inner = match creator.result {
            Some(Ok((window, surface))) => {
                info!(
                    "Window created: {}x{} \"{}\" (GL {}.{} core)",
                    window.inner_size().width,
                    window.inner_size().height,
                    config.title,
                    defaults::opengl::VERSION_MAJOR,
                    defaults::opengl::VERSION_MINOR,
                );
                WindowInner { surface, window }
            }
            Some(Err(e)) => {
                error!("Window creation failed: {}", e);
                return Self::invalid_instance();
            }
            None => {
                error!("Window creation failed: the platform never resumed");
                return Self::invalid_instance();
            }
        };

        Self {
            inner: Some(inner),
            event_loop: Some(event_loop),
            listener: ListenerSlot::new(),
            input: None,
            title: config.title.clone(),
            close_requested: false,
            pending_drops: Vec::new(),
        }
    }

    fn invalid_instance() -> Self {
        Self {
            inner: None,
            event_loop: None,
            listener: ListenerSlot::new(),
            input: None,
            title: String::new(),
            close_requested: false,
            pending_drops: Vec::new(),
        }
    }

    /// An invalid window without touching the platform, for tests that
    /// exercise the null-object behavior.
    #[cfg(test)]
    pub(crate) fn invalid() -> Self {
        Self::invalid_instance()
    }

    //--- Validity & Introspection -----------------------------------------

    /// Whether construction produced a usable native window and surface.
    pub fn valid(&self) -> bool {
        self.inner.is_some()
    }

    /// Current framebuffer size, or `(0, 0)` when invalid.
    pub fn size(&self) -> (u32, u32) {
        self.inner.as_ref().map_or((0, 0), |inner| {
            let size = inner.window.inner_size();
            (size.width, size.height)
        })
    }

    /// The locally cached title (mirrors the platform window).
    pub fn title(&self) -> &str {
        &self.title
    }

    //--- Listener Registration --------------------------------------------

    /// Registers the listener, replacing any previous one without
    /// notifying it.
    pub fn set_listener(&mut self, listener: Weak<RefCell<dyn Listener>>) {
        self.listener.set(listener);
    }

    pub fn reset_listener(&mut self) {
        self.listener.reset();
    }

    //--- Input Attachment -------------------------------------------------

    pub(crate) fn attach_input(&mut self, input: InputContext) {
        self.input = Some(input);
    }

    pub(crate) fn detach_input(&mut self) {
        self.input = None;
    }

    #[cfg(test)]
    pub(crate) fn has_input(&self) -> bool {
        self.input.is_some()
    }

    //--- Lifecycle Operations ---------------------------------------------

    /// Marks the window for closing; nothing is destroyed yet. The frame
    /// loop observes this through `should_close`.
    pub fn close(&mut self) {
        if !self.valid() {
            return;
        }
        self.close_requested = true;
    }

    /// Level query of the close-request flag.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Drains all pending platform events without blocking, invoking
    /// input and listener routing synchronously before returning.
    pub fn poll_events(&mut self) {
        if !self.valid() {
            return;
        }
        // The event loop moves out of `self` so `self` can be the handler.
        let Some(mut event_loop) = self.event_loop.take() else {
            return;
        };
        let status = event_loop.pump_app_events(Some(Duration::ZERO), self);
        self.event_loop = Some(event_loop);

        if let PumpStatus::Exit(code) = status {
            debug!("Platform requested exit (code {}); treating as close", code);
            self.close_requested = true;
        }
    }

    /// Presents the current framebuffer.
    pub fn swap_buffers(&self) {
        let Some(inner) = self.inner.as_ref() else {
            return;
        };
        if let Err(e) = inner.surface.swap_buffers() {
            error!("Buffer swap failed: {}", e);
        }
    }

    /// Updates the platform window title and the local cache together.
    pub fn set_title(&mut self, title: &str) {
        let Some(inner) = self.inner.as_ref() else {
            return;
        };
        inner.window.set_title(title);
        self.title.clear();
        self.title.push_str(title);
    }

    /// Applies the configured clear color to the GL state.
    pub fn set_clear_color(&self, color: [f32; 4]) {
        if let Some(inner) = self.inner.as_ref() {
            inner.surface.set_clear_color(color);
        }
    }

    /// Clears the color and depth buffers of the current frame.
    pub fn clear_frame(&self) {
        if let Some(inner) = self.inner.as_ref() {
            inner.surface.clear();
        }
    }

    /// Shared GL function table for render code, when the window is valid.
    pub fn gl(&self) -> Option<std::rc::Rc<glow::Context>> {
        self.inner.as_ref().map(|inner| inner.surface.gl())
    }

    //--- Internal Helpers -------------------------------------------------

    fn feed_input(&self, event: InputEvent) {
        if let Some(input) = &self.input {
            input.apply(event);
        }
    }

    fn flush_pending_drops(&mut self) {
        if self.pending_drops.is_empty() {
            return;
        }
        let paths = std::mem::take(&mut self.pending_drops);
        self.listener.dispatch(LifecycleEvent::FilesDropped(paths));
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Window {
    fn resumed(&mut self, _: &ActiveEventLoop) {
        // The window already exists; nothing to re-create. Mobile
        // suspend/resume cycles are outside this shell's platform set.
        debug!("Resumed with an existing window");
    }

    fn window_event(&mut self, _: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        // Handle→instance check: only events for the owned window pass.
        let owned = self
            .inner
            .as_ref()
            .map_or(false, |inner| inner.window.id() == window_id);
        if !owned {
            return;
        }

        match event {
            //--- Lifecycle → Listener ------------------------------------
            WindowEvent::CloseRequested => {
                info!("Window close requested");
                self.close_requested = true;
                self.listener.dispatch(LifecycleEvent::CloseRequested);
            }

            WindowEvent::Focused(focused) => {
                // Held keys are unreliable once focus is gone; drop the
                // cached state before anyone polls it.
                if !focused {
                    if let Some(input) = &self.input {
                        input.clear();
                    }
                }
                self.listener.dispatch(LifecycleEvent::FocusChanged(focused));
            }

            WindowEvent::Resized(size) => {
                if let Some(inner) = self.inner.as_ref() {
                    inner.surface.resize(size.width, size.height);
                }
                self.listener
                    .dispatch(LifecycleEvent::FramebufferResized(size.width, size.height));
            }

            WindowEvent::DroppedFile(path) => {
                // Batched; delivered once the backlog is drained.
                self.pending_drops.push(path);
            }

            //--- Input → Cache -------------------------------------------
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let key = match key_event.physical_key {
                    PhysicalKey::Code(code) => Key::from(code),
                    _ => Key::Unidentified,
                };
                let state = button_state(key_event.state, key_event.repeat);
                self.feed_input(InputEvent::Key { key, state });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.feed_input(InputEvent::Button {
                    button: MouseButton::from(button),
                    state: button_state(state, false),
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.feed_input(InputEvent::CursorMoved { x: position.x, y: position.y });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = scroll_delta(delta);
                self.feed_input(InputEvent::Scrolled { dx, dy });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.feed_input(InputEvent::ModifiersChanged(Modifiers::from(
                    modifiers.state(),
                )));
            }

            _ => {
                // Moved, ScaleFactorChanged, hover events: not part of
                // this shell's contract.
            }
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        // The pump is about to return control to the frame loop; deliver
        // the drop batch collected during this drain.
        self.flush_pending_drops();
    }
}

//=== Teardown ============================================================

impl Drop for Window {
    fn drop(&mut self) {
        if !self.valid() {
            return;
        }

        // Callback de-registration strictly precedes native release:
        // subscribed listeners hear about the teardown, then both
        // channels are disconnected before `inner` drops.
        self.listener.dispatch(LifecycleEvent::Destroying);
        if let Some(input) = self.input.take() {
            input.clear();
        }
        self.listener.reset();

        info!("Window destroyed");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Null-Object Behavior ---------------------------------------------
    //
    // Real windows need a display; the invalid instance is the testable
    // half of the contract: every operation absorbs.
    //

    #[test]
    fn invalid_window_reports_defaults() {
        let window = Window::invalid();

        assert!(!window.valid());
        assert_eq!(window.size(), (0, 0));
        assert_eq!(window.title(), "");
        assert!(!window.should_close());
        assert!(window.gl().is_none());
    }

    #[test]
    fn invalid_window_absorbs_operations() {
        let mut window = Window::invalid();

        window.close();
        assert!(!window.should_close());

        window.set_title("ignored");
        assert_eq!(window.title(), "");

        window.poll_events();
        window.swap_buffers();
        window.clear_frame();
        window.set_clear_color([0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn input_assignment_skips_invalid_windows() {
        let mut window = Window::invalid();
        let input = InputContext::new();

        input.assign(&mut window);

        assert!(!window.has_input());
    }

    #[test]
    fn reset_on_invalid_window_preserves_cache_state() {
        use crate::core::input::event::{ButtonState, InputEvent, Key};

        let mut window = Window::invalid();
        let input = InputContext::new();
        input.apply(InputEvent::Key { key: Key::KeyA, state: ButtonState::Pressed });

        input.reset(&mut window);

        // No window context: reset is absorbed, the cache is untouched.
        assert!(input.is_key_pressed(Key::KeyA));
    }

    #[test]
    fn drop_of_invalid_window_is_silent() {
        let window = Window::invalid();
        drop(window);
    }
}
