//! The subset of WebGL the firefly renderer issues, as a trait.
//!
//! The browser implementation lives in `wasm::webgl`. Keeping the pipeline,
//! buffer and frame loop generic over this trait lets them run against a
//! recording stub on the host.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Vertex attribute layout handed to `vertexAttribPointer`. Components are
/// always 32-bit floats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttribLayout {
    pub size: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

pub trait RenderingContext {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: &Self::Program);
    fn delete_program(&self, program: &Self::Program);

    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    /// Negative when the program has no such attribute.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    /// Binds `buffer` to `ARRAY_BUFFER` and uploads `data` with `STATIC_DRAW`.
    fn upload_static_array(&self, buffer: &Self::Buffer, data: &[f32]);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(&self, index: u32, layout: AttribLayout);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn uniform1f(&self, location: Option<&Self::UniformLocation>, x: f32);
    fn uniform2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    /// `drawArrays(POINTS, 0, count)`.
    fn draw_points(&self, count: i32);
}
