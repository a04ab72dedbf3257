//! Shader compilation and program linking.

use crate::config::LOG_PREFIX;
use crate::error::{FireflyError, Result};
use crate::gl::{RenderingContext, ShaderStage};
use crate::shaders::ShaderSources;

/// Compile one stage. On failure the info log goes to the error log, the
/// shader object is deleted and no handle is returned.
pub fn compile_shader<G: RenderingContext>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader> {
    let shader = gl
        .create_shader(stage)
        .ok_or(FireflyError::ResourceCreation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl.compile_status(&shader) {
        let log = gl.shader_info_log(&shader).unwrap_or_default();
        log::error!("{LOG_PREFIX} An error occurred compiling the {stage} shader: {log}");
        gl.delete_shader(&shader);
        return Err(FireflyError::ShaderCompile { stage, log });
    }

    Ok(shader)
}

/// Compile both stages and link them. The first failing step aborts.
pub fn build_program<G: RenderingContext>(gl: &G, sources: &ShaderSources<'_>) -> Result<G::Program> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, sources.vertex)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, sources.fragment) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(&vertex);
            return Err(err);
        }
    };

    let Some(program) = gl.create_program() else {
        gl.delete_shader(&vertex);
        gl.delete_shader(&fragment);
        return Err(FireflyError::ResourceCreation("program"));
    };
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    if !gl.link_status(&program) {
        let log = gl.program_info_log(&program).unwrap_or_default();
        log::error!("{LOG_PREFIX} Unable to initialize the shader program: {log}");
        gl.delete_program(&program);
        gl.delete_shader(&vertex);
        gl.delete_shader(&fragment);
        return Err(FireflyError::ProgramLink(log));
    }

    Ok(program)
}
