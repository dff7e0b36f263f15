//=========================================================================
// Spinning Quad
//
// A color-graded quad rotating about the Y axis with a slight vertical
// bob. Escape toggles the spin; losing window focus pauses it.
//
// Rendering is plain GL 4.4 core through the shared `glow` table the
// application exposes: one shader program, one vertex array, indexed
// draw. Shader or link failures log and leave the game inert - `draw`
// becomes a no-op rather than a panic.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::rc::Rc;

//=== External Crates =====================================================

use glam::{Mat4, Vec3};
use glow::HasContext;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::game::{Game, Notification};
use crate::core::input::event::Key;
use crate::core::input::InputContext;

//=== Shader Sources ======================================================

const VERTEX_SHADER: &str = r#"
    #version 440 core

    layout (location = 0) in vec3 position;
    layout (location = 1) in vec3 color;

    out vec3 fragment_color;

    uniform mat4 model;
    uniform mat4 view;
    uniform mat4 projection;

    void main() {
        gl_Position = projection * view * model * vec4(position, 1.0);

        fragment_color = color;
    }
"#;

const FRAGMENT_SHADER: &str = r#"
    #version 440 core

    in vec3 fragment_color;
    out vec4 FragColor;

    void main() {
        FragColor = vec4(fragment_color, 1.0);
    }
"#;

//=== Geometry ============================================================

// x, y, z, r, g, b per vertex; corners colored individually.
const VERTICES: [f32; 24] = [
     0.5,  0.5, 0.0,   1.0, 1.0, 1.0, // top right
     0.5, -0.5, 0.0,   1.0, 1.0, 0.0, // bottom right
    -0.5, -0.5, 0.0,   1.0, 0.0, 0.0, // bottom left
    -0.5,  0.5, 0.0,   1.0, 0.0, 1.0, // top left
];

const INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

//=== SpinningQuad ========================================================

/// The demo game: one quad, rotating 180°/s around Y with a sine bob.
pub struct SpinningQuad {
    gl: Rc<glow::Context>,
    input: InputContext,

    paused: bool,
    timer: f64,

    program: Option<glow::Program>,
    vertex_array: Option<glow::VertexArray>,
    vertex_buffer: Option<glow::Buffer>,
    index_buffer: Option<glow::Buffer>,

    model: Mat4,
    view: Mat4,
    projection: Mat4,
}

impl SpinningQuad {
    pub fn new(gl: Rc<glow::Context>, input: InputContext) -> Self {
        Self {
            gl,
            input,
            paused: false,
            timer: 0.0,
            program: None,
            vertex_array: None,
            vertex_buffer: None,
            index_buffer: None,
            model: Mat4::IDENTITY,
            view: Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)),
            projection: Mat4::IDENTITY,
        }
    }

    //--- GL Helpers -------------------------------------------------------

    fn compile_shader(&self, source: &str, stage: u32) -> Option<glow::Shader> {
        unsafe {
            let shader = match self.gl.create_shader(stage) {
                Ok(shader) => shader,
                Err(e) => {
                    error!("Shader allocation failed: {}", e);
                    return None;
                }
            };
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                error!(
                    "Failed to compile shader (stage {:#x}): {}",
                    stage,
                    self.gl.get_shader_info_log(shader)
                );
                self.gl.delete_shader(shader);
                return None;
            }
            Some(shader)
        }
    }

    fn link_program(&self) -> Option<glow::Program> {
        let vertex = self.compile_shader(VERTEX_SHADER, glow::VERTEX_SHADER)?;
        let fragment = self.compile_shader(FRAGMENT_SHADER, glow::FRAGMENT_SHADER)?;

        unsafe {
            let program = match self.gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    error!("Program allocation failed: {}", e);
                    return None;
                }
            };
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);

            self.gl.delete_shader(vertex);
            self.gl.delete_shader(fragment);

            if !self.gl.get_program_link_status(program) {
                error!("Failed to link program: {}", self.gl.get_program_info_log(program));
                self.gl.delete_program(program);
                return None;
            }
            Some(program)
        }
    }

    fn set_matrix(&self, program: glow::Program, name: &str, value: &Mat4) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl
                .uniform_matrix_4_f32_slice(location.as_ref(), false, &value.to_cols_array());
        }
    }

    /// Rebuilds the projection from the current GL viewport, so a resize
    /// keeps the quad's proportions.
    fn rebuild_projection(&mut self) {
        let mut viewport = [0i32; 4];
        unsafe {
            self.gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
        }
        let (width, height) = (viewport[2], viewport[3]);
        if width <= 0 || height <= 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_rh_gl(45.0_f32.to_radians(), aspect, 0.1, 100.0);
    }
}

//=== Game Contract =======================================================

impl Game for SpinningQuad {
    fn start(&mut self) {
        let Some(program) = self.link_program() else {
            return;
        };

        unsafe {
            let vertex_array = self.gl.create_vertex_array().ok();
            let vertex_buffer = self.gl.create_buffer().ok();
            let index_buffer = self.gl.create_buffer().ok();

            self.gl.bind_vertex_array(vertex_array);

            self.gl.bind_buffer(glow::ARRAY_BUFFER, vertex_buffer);
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    VERTICES.as_ptr().cast(),
                    std::mem::size_of_val(&VERTICES),
                ),
                glow::STATIC_DRAW,
            );

            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, index_buffer);
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    INDICES.as_ptr().cast(),
                    std::mem::size_of_val(&INDICES),
                ),
                glow::STATIC_DRAW,
            );

            let stride = (6 * std::mem::size_of::<f32>()) as i32;
            if let Some(position) = self.gl.get_attrib_location(program, "position") {
                self.gl.vertex_attrib_pointer_f32(position, 3, glow::FLOAT, false, stride, 0);
                self.gl.enable_vertex_attrib_array(position);
            }
            if let Some(color) = self.gl.get_attrib_location(program, "color") {
                self.gl.vertex_attrib_pointer_f32(
                    color,
                    3,
                    glow::FLOAT,
                    false,
                    stride,
                    (3 * std::mem::size_of::<f32>()) as i32,
                );
                self.gl.enable_vertex_attrib_array(color);
            }

            self.vertex_array = vertex_array;
            self.vertex_buffer = vertex_buffer;
            self.index_buffer = index_buffer;
        }

        self.rebuild_projection();

        self.set_matrix(program, "model", &self.model);
        self.set_matrix(program, "view", &self.view);
        self.set_matrix(program, "projection", &self.projection);

        self.program = Some(program);
        info!("Spinning quad ready");
    }

    fn update(&mut self, delta: f64) {
        if self.input.is_key_just_released(Key::Escape) {
            self.paused = !self.paused;
        }

        if self.paused {
            return;
        }

        self.timer += delta;

        let offset = (self.timer * 5.0).sin() * 0.01;
        let rotation = delta * 180.0_f64.to_radians();

        self.model *= Mat4::from_rotation_y(rotation as f32);
        self.model *= Mat4::from_translation(Vec3::new(0.0, offset as f32, 0.0));
    }

    fn draw(&mut self) {
        let Some(program) = self.program else {
            return;
        };

        unsafe {
            self.gl.use_program(Some(program));
        }
        self.set_matrix(program, "model", &self.model);
        self.set_matrix(program, "view", &self.view);
        self.set_matrix(program, "projection", &self.projection);

        unsafe {
            self.gl.bind_vertex_array(self.vertex_array);
            self.gl.draw_elements(glow::TRIANGLES, 6, glow::UNSIGNED_INT, 0);
        }
    }

    fn stop(&mut self) {
        unsafe {
            if let Some(program) = self.program.take() {
                self.gl.delete_program(program);
            }
            if let Some(buffer) = self.index_buffer.take() {
                self.gl.delete_buffer(buffer);
            }
            if let Some(buffer) = self.vertex_buffer.take() {
                self.gl.delete_buffer(buffer);
            }
            if let Some(vertex_array) = self.vertex_array.take() {
                self.gl.delete_vertex_array(vertex_array);
            }
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn notification(&mut self, kind: Notification) {
        match kind {
            Notification::FocusGained => self.resume(),
            Notification::FocusLost => self.pause(),
            Notification::FramebufferSizeChanged => self.rebuild_projection(),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
