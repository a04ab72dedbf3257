//! Setup of the draw state and the per-frame redraw.

use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;

use crate::config::{Config, LOG_PREFIX};
use crate::error::Result;
use crate::gl::RenderingContext;
use crate::particles::{ParticleBuffer, ParticlePositions};
use crate::pipeline;
use crate::shaders::{ShaderSources, MOUSE_UNIFORM, RESOLUTION_UNIFORM, TIME_UNIFORM};

/// Pointer position in canvas pixels, origin bottom-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

/// Latest pointer position, written by the move listener and read by the loop.
#[derive(Clone, Debug, Default)]
pub struct PointerState(Rc<Cell<PointerPosition>>);

impl PointerState {
    pub fn get(&self) -> PointerPosition {
        self.0.get()
    }

    pub fn set(&self, position: PointerPosition) {
        self.0.set(position);
    }

    /// Record a pointer event given in client coordinates (origin top-left).
    pub fn track(&self, client_x: f32, client_y: f32, canvas_height: f32) {
        self.set(PointerPosition {
            x: client_x,
            y: canvas_height - client_y,
        });
    }
}

/// Run flag shared between the loop and whoever may stop it.
#[derive(Clone, Debug)]
pub struct LoopHandle(Rc<Cell<bool>>);

impl LoopHandle {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }
}

impl Default for LoopHandle {
    fn default() -> Self {
        Self::new()
    }
}

struct Uniforms<L> {
    time: Option<L>,
    mouse: Option<L>,
    resolution: Option<L>,
}

/// Everything the redraw needs, created once by [`FrameLoop::initialize`].
pub struct FrameLoop<G: RenderingContext> {
    gl: G,
    _program: G::Program,
    uniforms: Uniforms<G::UniformLocation>,
    particles: ParticleBuffer<G>,
    pointer: PointerState,
    handle: LoopHandle,
    clear_color: [f32; 4],
}

impl<G: RenderingContext> FrameLoop<G> {
    /// Build the pipeline, upload `config.particle_count` random particles and
    /// set the resolution uniform. Any failure aborts before the loop exists.
    pub fn initialize<R: Rng + ?Sized>(
        gl: G,
        config: &Config,
        sources: &ShaderSources<'_>,
        resolution: (f32, f32),
        pointer: PointerState,
        rng: &mut R,
    ) -> Result<Self> {
        let program = pipeline::build_program(&gl, sources)?;
        gl.use_program(&program);

        let uniforms = Uniforms {
            time: gl.uniform_location(&program, TIME_UNIFORM),
            mouse: gl.uniform_location(&program, MOUSE_UNIFORM),
            resolution: gl.uniform_location(&program, RESOLUTION_UNIFORM),
        };

        let positions = ParticlePositions::random(config.particle_count, rng);
        let particles = ParticleBuffer::upload(&gl, &program, positions)?;
        log::info!("{LOG_PREFIX} uploaded {} particles", particles.count());

        let (width, height) = resolution;
        gl.uniform2f(uniforms.resolution.as_ref(), width, height);

        Ok(Self {
            gl,
            _program: program,
            uniforms,
            particles,
            pointer,
            handle: LoopHandle::new(),
            clear_color: config.clear_color,
        })
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count()
    }

    /// Follow a canvas resize: new viewport and resolution uniform.
    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
        self.gl
            .uniform2f(self.uniforms.resolution.as_ref(), width as f32, height as f32);
    }

    /// Draw one frame at host timestamp `timestamp_ms`. Returns whether the
    /// caller should schedule another tick; once stopped, nothing is drawn.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        if !self.handle.is_running() {
            return false;
        }

        let [r, g, b, a] = self.clear_color;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear_color_buffer();

        let pointer = self.pointer.get();
        self.gl
            .uniform2f(self.uniforms.mouse.as_ref(), pointer.x, pointer.y);
        self.gl
            .uniform1f(self.uniforms.time.as_ref(), (timestamp_ms * 0.001) as f32);

        self.gl.draw_points(self.particles.draw_count());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_y_is_flipped_to_canvas_origin() {
        let pointer = PointerState::default();
        pointer.track(120.0, 30.0, 800.0);
        assert_eq!(pointer.get(), PointerPosition { x: 120.0, y: 770.0 });
    }

    #[test]
    fn pointer_last_write_wins() {
        let pointer = PointerState::default();
        let listener = pointer.clone();
        listener.track(1.0, 1.0, 10.0);
        listener.track(5.0, 2.0, 10.0);
        assert_eq!(pointer.get(), PointerPosition { x: 5.0, y: 8.0 });
    }

    #[test]
    fn stopping_any_clone_stops_all() {
        let handle = LoopHandle::new();
        let other = handle.clone();
        assert!(handle.is_running());
        other.stop();
        assert!(!handle.is_running());
    }
}
