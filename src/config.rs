//! Compile-time settings for the firefly field.

/// Number of particles uploaded to the GPU.
pub const PARTICLE_COUNT: usize = 100_000;

/// Id of the injected `<style>` element.
pub const STYLE_ID: &str = "ff-style";

/// Id of the full-page `<canvas>` element.
pub const CANVAS_ID: &str = "ff-canvas";

/// Prefix on every console message.
pub const LOG_PREFIX: &str = "[fireflies]";

/// Stylesheet injected once per document.
pub const STYLESHEET: &str = r#"
    html {
      height: 100vh;
    }
    body {
      margin: 0;
      min-height: 100%;
      background-color: #111122;
      position: relative;
    }
    canvas#ff-canvas {
      position: absolute;
      top: 0;
      right: 0;
      left: 0;
      bottom: 0;
    }
"#;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub particle_count: usize,
    pub style_id: &'static str,
    pub canvas_id: &'static str,
    pub stylesheet: &'static str,
    /// RGBA the color buffer is cleared to before every draw.
    pub clear_color: [f32; 4],
    /// Follow window resizes with the canvas size, viewport and resolution
    /// uniform. Off in the start entry point; set it when calling `wasm::run`.
    pub resize_with_window: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            style_id: STYLE_ID,
            canvas_id: CANVAS_ID,
            stylesheet: STYLESHEET,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            resize_with_window: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_targets_canvas_id() {
        let config = Config::default();
        assert!(config
            .stylesheet
            .contains(&format!("canvas#{}", config.canvas_id)));
        assert_eq!(config.particle_count, 100_000);
    }
}
