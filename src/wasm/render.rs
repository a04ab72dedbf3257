use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, MouseEvent, WebGlRenderingContext as GL, Window};

use crate::config::{Config, LOG_PREFIX};
use crate::error::FireflyError;
use crate::frame::{FrameLoop, LoopHandle, PointerState};
use crate::shaders::ShaderSources;

/// Window listeners owned by a running loop, detached when it stops.
struct Listeners {
    window: Window,
    registered: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl Listeners {
    fn add(
        &mut self,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<(), JsValue> {
        self.window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.registered.push((event, closure));
        Ok(())
    }

    fn detach(&mut self) {
        for (event, closure) in self.registered.drain(..) {
            self.window
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

/// Set up the draw state on `gl` and run it from `requestAnimationFrame`
/// until the returned handle is stopped.
pub fn start(canvas: HtmlCanvasElement, gl: GL, config: &Config) -> Result<LoopHandle, FireflyError> {
    let window = window().ok_or(FireflyError::Dom("no window".into()))?;
    let pointer = PointerState::default();

    let frame_loop = FrameLoop::initialize(
        gl,
        config,
        &ShaderSources::default(),
        (canvas.width() as f32, canvas.height() as f32),
        pointer.clone(),
        &mut rand::thread_rng(),
    )?;
    let handle = frame_loop.handle();
    let frame_loop = Rc::new(RefCell::new(frame_loop));

    let mut listeners = Listeners {
        window: window.clone(),
        registered: Vec::new(),
    };

    // Track the pointer in canvas coordinates
    {
        let canvas = canvas.clone();
        listeners.add(
            "mousemove",
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    pointer.track(
                        event.client_x() as f32,
                        event.client_y() as f32,
                        canvas.height() as f32,
                    );
                }
            }) as Box<dyn FnMut(web_sys::Event)>),
        )?;
    }

    if config.resize_with_window {
        let canvas = canvas.clone();
        let frame_loop = frame_loop.clone();
        let window = window.clone();
        listeners.add(
            "resize",
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or_default();
                let height = window
                    .document()
                    .and_then(|d| d.body())
                    .map(|b| b.scroll_height().max(0))
                    .unwrap_or_default();
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                frame_loop.borrow().resize(canvas.width(), canvas.height());
            }) as Box<dyn FnMut(web_sys::Event)>),
        )?;
    }

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let raf_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !frame_loop.borrow_mut().tick(timestamp) {
            listeners.detach();
            log::info!("{LOG_PREFIX} frame loop stopped");
            return;
        }

        // schedule next
        let next = f.borrow();
        if let Some(closure) = next.as_ref() {
            if let Err(err) = raf_window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                log::error!("{LOG_PREFIX} requestAnimationFrame failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(closure) = g.borrow().as_ref() {
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    }

    Ok(handle)
}
