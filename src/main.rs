//=========================================================================
// Entry Point
//
// Wires the shell to the demo game and runs it. The only place where a
// panic may surface: anything escaping `run` is caught here, logged as
// an error, and turned into a failure exit status.
//
//=========================================================================

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::process;
use std::rc::Rc;

use log::error;

use vitric::application::{Application, ExitCode, EXIT_FAILURE};
use vitric::demo::SpinningQuad;
use vitric::platform::WindowConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let code = match catch_unwind(AssertUnwindSafe(run)) {
        Ok(code) => code,
        Err(_) => {
            error!("Unhandled panic reached the process boundary");
            EXIT_FAILURE
        }
    };

    process::exit(code);
}

fn run() -> ExitCode {
    let config = WindowConfig::default();

    let Some(mut app) = Application::create(&config) else {
        return EXIT_FAILURE;
    };
    let Some(gl) = app.gl() else {
        return EXIT_FAILURE;
    };

    let game = Rc::new(RefCell::new(SpinningQuad::new(gl, app.input())));
    app.assign_game(game);

    app.run()
}
