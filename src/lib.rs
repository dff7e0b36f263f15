//=========================================================================
// Vitric — Library Root
//
// A minimal real-time graphics application shell: one window with an
// OpenGL surface, a polled input cache, a listener-based lifecycle
// protocol, and a fixed-responsibility frame loop driving a pluggable
// `Game`.
//
// Module map:
// - `core`        - platform-independent systems: input cache and data
//                   model, the `Game` contract, frame timing, defaults
// - `platform`    - winit/glutin integration: the window, the listener
//                   protocol, event translation
// - `application` - the facade tying window, input and game together
// - `demo`        - the shipped example game (a rotating quad)
//
// Typical usage:
// ```no_run
// use vitric::prelude::*;
// use std::cell::RefCell;
// use std::rc::Rc;
//
// let config = WindowConfig::default();
// if let Some(mut app) = Application::create(&config) {
//     let gl = app.gl().expect("a valid application has a GL context");
//     let game = Rc::new(RefCell::new(vitric::demo::SpinningQuad::new(gl, app.input())));
//     app.assign_game(game);
//     app.run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod application;
pub mod core;
pub mod demo;
pub mod platform;

//--- Prelude -------------------------------------------------------------

pub mod prelude;

//--- Public Exports ------------------------------------------------------
//
// The facade is re-exported at the root so applications can simply
// `use vitric::Application;`.
//
pub use application::Application;
