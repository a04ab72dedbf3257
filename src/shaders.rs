//! GLSL ES 1.0 sources for the firefly pipeline.

/// Jitters every particle on a small circle and pulses its size.
pub const VERTEX_SHADER: &str = r#"
    precision mediump float;
    attribute vec3 aPosition;
    uniform float uTime;
    uniform vec2 uResolution;
    uniform vec2 uMouse;
    varying vec3 vPosition;

    void main() {
        float phase = aPosition.x + aPosition.y;
        vec2 position = aPosition.xy + vec2(sin(uTime + phase), cos(uTime + phase)) * 0.02;
        gl_Position = vec4(position, 0, 1.0);
        gl_PointSize = 2.0 + 1.0 * sin(uTime * 3.0 + phase * 3.0);
        vPosition = aPosition;
    }
"#;

/// Warm yellow whose green channel breathes with the point size.
pub const FRAGMENT_SHADER: &str = r#"
    precision mediump float;
    uniform float uTime;
    varying vec3 vPosition;

    void main() {
        float p = vPosition.x + vPosition.y;
        float phase = (sin(uTime * 3.0 + p * 3.0) + 1.0) / 2.0;
        gl_FragColor = vec4(1.0, 0.6 + phase * 0.3, 0.35, 1.0);
    }
"#;

pub const POSITION_ATTRIB: &str = "aPosition";
pub const TIME_UNIFORM: &str = "uTime";
pub const MOUSE_UNIFORM: &str = "uMouse";
pub const RESOLUTION_UNIFORM: &str = "uResolution";

/// Source text for both pipeline stages.
#[derive(Clone, Copy, Debug)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl Default for ShaderSources<'static> {
    fn default() -> Self {
        Self {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_declare_looked_up_names() {
        let sources = ShaderSources::default();
        assert!(sources.vertex.contains(&format!("attribute vec3 {POSITION_ATTRIB};")));
        for name in [TIME_UNIFORM, MOUSE_UNIFORM, RESOLUTION_UNIFORM] {
            assert!(sources.vertex.contains(name), "vertex stage lacks {name}");
        }
        assert!(sources.fragment.contains(TIME_UNIFORM));
    }

    #[test]
    fn stages_share_varying() {
        let sources = ShaderSources::default();
        assert!(sources.vertex.contains("varying vec3 vPosition;"));
        assert!(sources.fragment.contains("varying vec3 vPosition;"));
    }
}
