//! Firefly particle field rendered with WebGL into a full-page canvas.

pub mod config;
pub mod error;
pub mod frame;
pub mod gl;
pub mod particles;
pub mod pipeline;
pub mod shaders;

pub use config::Config;
pub use error::FireflyError;
pub use frame::{FrameLoop, LoopHandle, PointerPosition, PointerState};
pub use gl::{AttribLayout, RenderingContext, ShaderStage};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::{Config, LOG_PREFIX};
    use crate::error::FireflyError;
    use crate::frame::LoopHandle;

    pub mod dom;
    pub mod render;
    mod webgl;

    thread_local! {
        static RUNNING: RefCell<Option<LoopHandle>> = const { RefCell::new(None) };
    }

    impl From<JsValue> for FireflyError {
        fn from(value: JsValue) -> Self {
            FireflyError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
        }
    }

    impl From<FireflyError> for JsValue {
        fn from(err: FireflyError) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        match run(&Config::default()) {
            Ok(_) => {}
            // Already reported by the context acquirer.
            Err(FireflyError::ContextUnavailable) => {}
            Err(err) => log::error!("{LOG_PREFIX} {err}"),
        }
        Ok(())
    }

    /// Provision the canvas, acquire WebGL and start the frame loop.
    ///
    /// The start entry point calls this with `Config::default()`; Rust
    /// embedders call it directly to change the particle count or enable
    /// `resize_with_window`. The new loop becomes the one `stop_fireflies`
    /// acts on, and a loop started earlier is stopped.
    pub fn run(config: &Config) -> Result<LoopHandle, FireflyError> {
        let window = web_sys::window().ok_or(FireflyError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or(FireflyError::Dom("no document".into()))?;

        let canvas = dom::provision(&document, &window, config)?;
        let gl = dom::acquire_context(&canvas)?;
        let handle = render::start(canvas, gl, config)?;

        RUNNING.with(|slot| {
            if let Some(previous) = slot.borrow_mut().replace(handle.clone()) {
                previous.stop();
            }
        });
        Ok(handle)
    }

    /// Stop the running firefly loop, if any. The canvas keeps its last frame.
    #[wasm_bindgen]
    pub fn stop_fireflies() {
        RUNNING.with(|slot| {
            if let Some(handle) = slot.borrow_mut().take() {
                handle.stop();
            }
        });
    }

    #[wasm_bindgen]
    pub fn fireflies_running() -> bool {
        RUNNING.with(|slot| slot.borrow().as_ref().is_some_and(LoopHandle::is_running))
    }
}
