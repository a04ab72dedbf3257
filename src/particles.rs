//! Random particle positions and their one-time GPU upload.

use rand::Rng;

use crate::error::{FireflyError, Result};
use crate::gl::{AttribLayout, RenderingContext};
use crate::shaders::POSITION_ATTRIB;

/// Floats per particle: x, y.
pub const COMPONENTS: usize = 2;

/// Flat `[x0, y0, x1, y1, ...]` in normalized device coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticlePositions(Box<[f32]>);

impl ParticlePositions {
    /// Every coordinate is drawn independently and uniformly from [-1, 1).
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let coords = (0..count * COMPONENTS)
            .map(|_| rng.gen_range(-1.0f32..1.0))
            .collect();
        Self(coords)
    }

    pub fn count(&self) -> usize {
        self.0.len() / COMPONENTS
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        self.0.chunks_exact(COMPONENTS).map(|p| [p[0], p[1]])
    }
}

/// GPU-resident particle positions bound to the program's position input.
pub struct ParticleBuffer<G: RenderingContext> {
    _buffer: G::Buffer,
    count: usize,
    draw_count: i32,
}

/// Vertex count as `drawArrays` takes it.
pub fn draw_count(count: usize) -> Result<i32> {
    i32::try_from(count).map_err(|_| FireflyError::TooManyParticles(count))
}

impl<G: RenderingContext> ParticleBuffer<G> {
    /// Uploads `positions` once as a static buffer and wires `aPosition` to
    /// it: 2 floats per vertex, not normalized, tightly packed.
    pub fn upload(gl: &G, program: &G::Program, positions: ParticlePositions) -> Result<Self> {
        let count = positions.count();
        let draw_count = draw_count(count)?;

        let buffer = gl
            .create_buffer()
            .ok_or(FireflyError::ResourceCreation("buffer"))?;
        gl.upload_static_array(&buffer, positions.as_slice());

        let location = gl.attrib_location(program, POSITION_ATTRIB);
        let index =
            u32::try_from(location).map_err(|_| FireflyError::MissingAttribute(POSITION_ATTRIB))?;
        gl.enable_vertex_attrib_array(index);
        gl.vertex_attrib_pointer(
            index,
            AttribLayout {
                size: COMPONENTS as i32,
                normalized: false,
                stride: 0,
                offset: 0,
            },
        );

        Ok(Self {
            _buffer: buffer,
            count,
            draw_count,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn draw_count(&self) -> i32 {
        self.draw_count
    }
}
