//=========================================================================
// Render Surface
//
// The OpenGL half of the window: context and surface creation through
// glutin, plus the handful of GL operations the shell itself needs
// (viewport, clear, swap). Everything else GL-related belongs to games.
//
// Creation runs inside the window's `resumed()` trampoline, where winit
// hands out the active event loop. The requested context is a fixed
// core-profile version (see `core::defaults::opengl`); depth testing is
// enabled as part of context setup.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::num::NonZeroU32;
use std::rc::Rc;

//=== External Dependencies ===============================================

use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface as _, Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window as WinitWindow};

//=== Internal Dependencies ===============================================

use super::window::WindowConfig;
use crate::core::defaults;

//=== SurfaceError ========================================================

/// Failure while creating the window's drawing surface.
///
/// All of these are absorbed at the window boundary into an invalid
/// window - logged once, never propagated further up.
#[derive(Debug)]
pub(crate) enum SurfaceError {
    /// Combined window + GL display creation failed.
    Display(Box<dyn std::error::Error>),

    /// The display builder produced a configuration but no window.
    MissingWindow,

    /// The native window handle was unavailable.
    Handle(raw_window_handle::HandleError),

    /// GL context creation was rejected.
    Context(glutin::error::Error),

    /// Window surface creation failed.
    Surface(glutin::error::Error),

    /// The fresh context could not be made current.
    MakeCurrent(glutin::error::Error),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => write!(f, "Window/display creation failed: {}", e),
            Self::MissingWindow => write!(f, "Display builder returned no window"),
            Self::Handle(e) => write!(f, "Native window handle unavailable: {}", e),
            Self::Context(e) => write!(f, "GL context creation failed: {}", e),
            Self::Surface(e) => write!(f, "GL surface creation failed: {}", e),
            Self::MakeCurrent(e) => write!(f, "Could not make GL context current: {}", e),
        }
    }
}

impl std::error::Error for SurfaceError {}

//=== RenderSurface =======================================================

/// A current GL context, its window surface, and the loaded function
/// table. Owned by the window; dropped before the native window is.
pub(crate) struct RenderSurface {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Rc<glow::Context>,
}

impl RenderSurface {
    //--- Construction -----------------------------------------------------

    /// Creates the native window together with a current GL context and
    /// surface at the version/profile fixed in `defaults::opengl`.
    pub(crate) fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<(WinitWindow, RenderSurface), SurfaceError> {
        let mut attributes = WinitWindow::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));
        if config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(attributes));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|best, candidate| {
                        if candidate.num_samples() > best.num_samples() {
                            candidate
                        } else {
                            best
                        }
                    })
                    .expect("the platform offered no GL configuration")
            })
            .map_err(SurfaceError::Display)?;
        let window = window.ok_or(SurfaceError::MissingWindow)?;

        let raw_handle = window.window_handle().map_err(SurfaceError::Handle)?.as_raw();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                defaults::opengl::VERSION_MAJOR,
                defaults::opengl::VERSION_MINOR,
            ))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_handle));

        let display = gl_config.display();
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(SurfaceError::Context)?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(SurfaceError::Handle)?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(SurfaceError::Surface)?;

        let context = not_current
            .make_current(&surface)
            .map_err(SurfaceError::MakeCurrent)?;

        let gl = Rc::new(unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        });
        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok((window, RenderSurface { surface, context, gl }))
    }

    //--- Operations -------------------------------------------------------

    /// Resizes the underlying surface and the GL viewport to match the
    /// new framebuffer size. Zero-sized updates (minimization) are ignored.
    pub(crate) fn resize(&self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    pub(crate) fn set_clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            self.gl.clear_color(r, g, b, a);
        }
    }

    /// Clears the color and depth buffers.
    pub(crate) fn clear(&self) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Presents the current framebuffer.
    pub(crate) fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }

    /// Shared handle to the loaded GL function table, for games that
    /// render through it.
    pub(crate) fn gl(&self) -> Rc<glow::Context> {
        Rc::clone(&self.gl)
    }
}
