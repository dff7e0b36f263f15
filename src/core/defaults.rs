//=========================================================================
// Compiled Defaults
//
// Central place for the constants the shell is built around: window
// geometry, OpenGL version and clear color, input timing windows.
//
//=========================================================================

use std::time::Duration;

//=== Window ==============================================================

pub mod window {
    pub const WIDTH: u32 = 1720;
    pub const HEIGHT: u32 = 1080;
    pub const TITLE: &str = "[vitric]";
    pub const FULL_SCREEN: bool = false;
}

//=== OpenGL ==============================================================

pub mod opengl {
    /// Requested context version (core profile).
    pub const VERSION_MAJOR: u8 = 4;
    pub const VERSION_MINOR: u8 = 4;

    /// Frame clear color, RGBA.
    pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
}

//=== Timeouts ============================================================

pub mod timeout {
    use super::Duration;

    /// Recency window for the `just_*` input queries.
    pub const JUST_ACTION: Duration = Duration::from_millis(10);

    pub const DOUBLE_CLICK: Duration = Duration::from_millis(500);
    pub const LONG_PRESS: Duration = Duration::from_millis(500);
}
