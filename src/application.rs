//=========================================================================
// Application
//
// Main entry point and coordinator of the shell.
//
// Architecture:
// ```text
//     Application::create() ──► Window (+ GL surface)
//         │                      │ listener = AppShared (weak)
//         │                      │ input    = InputContext
//         │
//         ├─ assign_game(game)   (first assignment wins)
//         └─ run()               poll → hotkey → update → draw → swap
// ```
//
// Lifecycle: uninitialized → initialized (no game) → ready (game
// assigned) → running → stopped. At most one live application exists per
// process; the guard is process-wide state set at successful creation
// and cleared at destruction, reachable only through the factory.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

//=== External Crates =====================================================

use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::clock::FrameClock;
use crate::core::defaults;
use crate::core::game::{Game, Notification};
use crate::core::input::event::{Key, Modifiers};
use crate::core::input::InputContext;
use crate::platform::listener::{Listener, Subscriptions};
use crate::platform::window::{Window, WindowConfig};

//=== Exit Codes ==========================================================

pub type ExitCode = i32;

pub const EXIT_SUCCESS: ExitCode = 0;
pub const EXIT_FAILURE: ExitCode = 1;

//=== Instance Guard ======================================================
//
// "At most one live application per process", as explicit lifecycle
// state tied to creation/destruction. Atomic because statics must be
// `Sync`; there is still no concurrency anywhere in this core.
//

static INSTANCE_ALIVE: AtomicBool = AtomicBool::new(false);

/// Claims the process-wide application slot. `false` if already claimed.
fn acquire_instance_slot() -> bool {
    !INSTANCE_ALIVE.swap(true, Ordering::AcqRel)
}

fn release_instance_slot() {
    INSTANCE_ALIVE.store(false, Ordering::Release);
}

//=== AppShared ===========================================================
//
// The application's listener half, shared with the window through a weak
// reference. Owns the game slot so lifecycle callbacks can reach it.
//
struct AppShared {
    game: Option<Rc<RefCell<dyn Game>>>,
}

impl AppShared {
    fn notify(&self, kind: Notification) {
        if let Some(game) = &self.game {
            game.borrow_mut().notification(kind);
        }
    }
}

impl Listener for AppShared {
    fn on_close(&mut self) {
        info!("Window is about to be closed");
        self.notify(Notification::Closing);
    }

    fn on_focus_changed(&mut self, focused: bool) {
        info!("Window {} focus", if focused { "got" } else { "lost" });
        self.notify(if focused {
            Notification::FocusGained
        } else {
            Notification::FocusLost
        });
    }

    fn on_framebuffer_size_changed(&mut self, _width: u32, _height: u32) {
        // The window layer already resized the GL viewport to match.
        self.notify(Notification::FramebufferSizeChanged);
    }

    fn subscriptions(&self) -> Subscriptions {
        Subscriptions::DROP
    }

    fn on_drop(&mut self, paths: &[std::path::PathBuf]) {
        info!("Dropped {} path{}", paths.len(), if paths.len() > 1 { "s" } else { "" });
        for (index, path) in paths.iter().enumerate() {
            info!("   Path #{:<3}: {}", index, path.display());
        }
    }
}

//=== Application =========================================================

/// Owns exactly one window and drives at most one game through the frame
/// loop. Construct through [`Application::create`].
pub struct Application {
    window: Window,
    input: InputContext,
    shared: Rc<RefCell<AppShared>>,
    base_title: String,
    owns_slot: bool,
}

impl Application {
    //--- Factory ----------------------------------------------------------

    /// Singleton-guarded factory. Returns `None` - with the reason logged
    /// - if an instance is already alive or the platform could not
    /// produce a usable window; existing state is never disturbed.
    pub fn create(config: &WindowConfig) -> Option<Self> {
        if !acquire_instance_slot() {
            error!("An application instance is already alive");
            return None;
        }

        let mut window = Window::new(config);
        if !window.valid() {
            error!("Application start-up failed: no usable window");
            release_instance_slot();
            return None;
        }

        let input = InputContext::new();
        input.assign(&mut window);

        let shared = Rc::new(RefCell::new(AppShared { game: None }));
        let shared_dyn: Rc<RefCell<dyn Listener>> = shared.clone();
        let listener: Weak<RefCell<dyn Listener>> = Rc::downgrade(&shared_dyn);
        window.set_listener(listener);

        info!("Application created");
        Some(Self {
            window,
            input,
            shared,
            base_title: config.title.clone(),
            owns_slot: true,
        })
    }

    /// Test-only assembly around an invalid window, bypassing the
    /// process-wide slot so parallel tests stay independent.
    #[cfg(test)]
    fn with_invalid_window() -> Self {
        Self {
            window: Window::invalid(),
            input: InputContext::new(),
            shared: Rc::new(RefCell::new(AppShared { game: None })),
            base_title: defaults::window::TITLE.to_string(),
            owns_slot: false,
        }
    }

    //--- State Queries ----------------------------------------------------

    pub fn initialized(&self) -> bool {
        self.window.valid()
    }

    pub fn ready(&self) -> bool {
        self.initialized() && self.shared.borrow().game.is_some()
    }

    /// Handle to the application's input cache, for game wiring.
    pub fn input(&self) -> InputContext {
        self.input.clone()
    }

    /// Shared GL function table, for games that render through it.
    pub fn gl(&self) -> Option<Rc<glow::Context>> {
        self.window.gl()
    }

    //--- Game Assignment --------------------------------------------------

    /// First assignment wins; any further call is logged and ignored —
    /// an application cannot be re-targeted mid-life.
    pub fn assign_game(&mut self, game: Rc<RefCell<dyn Game>>) {
        let mut shared = self.shared.borrow_mut();
        if shared.game.is_none() {
            shared.game = Some(game);
            info!("Game was assigned");
        } else {
            warn!("A game is already assigned; ignoring the newcomer");
        }
    }

    /// Forwards a notification to the game, iff one is assigned.
    pub fn notify(&self, kind: Notification) {
        self.shared.borrow().notify(kind);
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs the frame loop until the window is asked to close.
    ///
    /// Not ready (no game, or no usable window)? A logged no-op that
    /// returns [`EXIT_SUCCESS`] - nothing to run is not a failure. The
    /// loop itself has no error exit path.
    pub fn run(&mut self) -> ExitCode {
        if !self.ready() {
            warn!("Application is not ready; nothing to run");
            return EXIT_SUCCESS;
        }
        let Some(game) = self.shared.borrow().game.clone() else {
            return EXIT_SUCCESS;
        };

        self.window.set_clear_color(defaults::opengl::CLEAR_COLOR);

        game.borrow_mut().start();

        let mut clock = FrameClock::new();
        while !self.window.should_close() {
            self.window.poll_events();

            if self
                .input
                .is_key_just_released_with(Modifiers::CONTROL, Key::KeyQ)
            {
                self.notify(Notification::Quit);
                self.window.close();
            }

            let delta = clock.delta();
            let fps = if delta > 0.0 { (1.0 / delta) as i32 } else { 0 };
            self.window
                .set_title(&format!("[{:>5} FPS] {}", fps, self.base_title));

            game.borrow_mut().update(delta);

            self.window.clear_frame();
            game.borrow_mut().draw();
            self.window.swap_buffers();
        }

        game.borrow_mut().stop();

        EXIT_SUCCESS
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        // The window (a field) tears down after this, before any
        // process-level cleanup the platform performs on loop drop.
        if self.owns_slot {
            release_instance_slot();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Default)]
    struct RecordingGame {
        started: u32,
        stopped: u32,
        updates: u32,
        draws: u32,
        notifications: Vec<Notification>,
    }

    impl Game for RecordingGame {
        fn start(&mut self) {
            self.started += 1;
        }
        fn update(&mut self, _delta: f64) {
            self.updates += 1;
        }
        fn draw(&mut self) {
            self.draws += 1;
        }
        fn stop(&mut self) {
            self.stopped += 1;
        }
        fn pause(&mut self) {}
        fn resume(&mut self) {}
        fn notification(&mut self, kind: Notification) {
            self.notifications.push(kind);
        }
    }

    fn shared_game() -> Rc<RefCell<RecordingGame>> {
        Rc::new(RefCell::new(RecordingGame::default()))
    }

    //=====================================================================
    // Instance Guard
    //=====================================================================

    #[test]
    fn instance_slot_is_exclusive_until_released() {
        assert!(acquire_instance_slot());
        assert!(!acquire_instance_slot());

        release_instance_slot();
        assert!(acquire_instance_slot());
        release_instance_slot();
    }

    //=====================================================================
    // Game Assignment
    //=====================================================================

    #[test]
    fn first_game_assignment_wins() {
        let mut app = Application::with_invalid_window();
        let first = shared_game();
        let second = shared_game();

        app.assign_game(first.clone());
        app.assign_game(second.clone());

        app.notify(Notification::Quit);

        assert_eq!(first.borrow().notifications, vec![Notification::Quit]);
        assert!(second.borrow().notifications.is_empty());
    }

    #[test]
    fn notify_without_game_is_a_silent_noop() {
        let app = Application::with_invalid_window();
        app.notify(Notification::FocusLost);
    }

    //=====================================================================
    // Readiness & Run
    //=====================================================================

    #[test]
    fn readiness_requires_window_and_game() {
        let mut app = Application::with_invalid_window();

        assert!(!app.initialized());
        assert!(!app.ready());

        app.assign_game(shared_game());
        assert!(!app.ready(), "an invalid window can never become ready");
    }

    #[test]
    fn run_without_game_returns_success_immediately() {
        let mut app = Application::with_invalid_window();
        assert_eq!(app.run(), EXIT_SUCCESS);
    }

    #[test]
    fn run_with_invalid_window_never_starts_the_game() {
        let mut app = Application::with_invalid_window();
        let game = shared_game();
        app.assign_game(game.clone());

        assert_eq!(app.run(), EXIT_SUCCESS);

        let game = game.borrow();
        assert_eq!(game.started, 0);
        assert_eq!(game.updates, 0);
        assert_eq!(game.stopped, 0);
    }

    //=====================================================================
    // Listener Routing
    //=====================================================================

    #[test]
    fn close_callback_notifies_closing_exactly_once() {
        let app = Application::with_invalid_window();
        let game = shared_game();
        app.shared.borrow_mut().game = Some(game.clone());

        app.shared.borrow_mut().on_close();

        assert_eq!(game.borrow().notifications, vec![Notification::Closing]);
    }

    #[test]
    fn close_callback_without_game_does_not_panic() {
        let app = Application::with_invalid_window();
        app.shared.borrow_mut().on_close();
    }

    #[test]
    fn focus_callbacks_map_to_gained_and_lost() {
        let app = Application::with_invalid_window();
        let game = shared_game();
        app.shared.borrow_mut().game = Some(game.clone());

        app.shared.borrow_mut().on_focus_changed(false);
        app.shared.borrow_mut().on_focus_changed(true);

        assert_eq!(
            game.borrow().notifications,
            vec![Notification::FocusLost, Notification::FocusGained]
        );
    }

    #[test]
    fn resize_callback_notifies_framebuffer_change() {
        let app = Application::with_invalid_window();
        let game = shared_game();
        app.shared.borrow_mut().game = Some(game.clone());

        app.shared.borrow_mut().on_framebuffer_size_changed(640, 480);

        assert_eq!(
            game.borrow().notifications,
            vec![Notification::FramebufferSizeChanged]
        );
    }

    #[test]
    fn application_listener_subscribes_to_drop_only() {
        let app = Application::with_invalid_window();
        let subscriptions = app.shared.borrow().subscriptions();

        assert!(subscriptions.contains(Subscriptions::DROP));
        assert!(!subscriptions.contains(Subscriptions::DESTROYING));
    }

    #[test]
    fn drop_callback_is_a_logging_stub() {
        let app = Application::with_invalid_window();
        let game = shared_game();
        app.shared.borrow_mut().game = Some(game.clone());

        app.shared
            .borrow_mut()
            .on_drop(&[std::path::PathBuf::from("assets/scene.gltf")]);

        // Paths are logged, never forwarded to the game.
        assert!(game.borrow().notifications.is_empty());
    }
}
