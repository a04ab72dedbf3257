#![cfg(target_arch = "wasm32")]

use fireflies_wasm::wasm::dom::{acquire_context, provision};
use fireflies_wasm::wasm::{fireflies_running, run, stop_fireflies};
use fireflies_wasm::{Config, FireflyError, LoopHandle};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn globals() -> (web_sys::Window, web_sys::Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    (window, document)
}

fn cleanup(document: &web_sys::Document, config: &Config) {
    for id in [config.style_id, config.canvas_id] {
        if let Some(el) = document.get_element_by_id(id) {
            el.remove();
        }
    }
}

/// Resolves on the next `requestAnimationFrame` callback.
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Start a small field, or `None` when the browser has no WebGL at all.
fn start_small(config: &Config) -> Option<LoopHandle> {
    match run(config) {
        Ok(handle) => Some(handle),
        Err(FireflyError::ContextUnavailable) => None,
        Err(err) => panic!("setup failed: {err}"),
    }
}

fn small_config() -> Config {
    Config {
        particle_count: 16,
        ..Config::default()
    }
}

#[wasm_bindgen_test]
fn canvas_is_first_child_of_body() {
    let (window, document) = globals();
    let config = Config::default();
    cleanup(&document, &config);

    let canvas = provision(&document, &window, &config).unwrap();

    let body = document.body().unwrap();
    let first: web_sys::Node = body.first_child().unwrap();
    assert!(first.is_same_node(Some(canvas.as_ref())));
    assert_eq!(canvas.id(), config.canvas_id);
    assert_eq!(
        canvas.width(),
        window.inner_width().unwrap().as_f64().unwrap() as u32
    );
    assert!(document.get_element_by_id(config.style_id).is_some());

    cleanup(&document, &config);
}

#[wasm_bindgen_test]
fn provisioning_twice_does_not_duplicate() {
    let (window, document) = globals();
    let config = Config::default();
    cleanup(&document, &config);

    let first = provision(&document, &window, &config).unwrap();
    let second = provision(&document, &window, &config).unwrap();

    assert!(first.is_same_node(Some(second.as_ref())));
    let styles = document
        .query_selector_all(&format!("style#{}", config.style_id))
        .unwrap();
    let canvases = document
        .query_selector_all(&format!("canvas#{}", config.canvas_id))
        .unwrap();
    assert_eq!(styles.length(), 1);
    assert_eq!(canvases.length(), 1);

    cleanup(&document, &config);
}

#[wasm_bindgen_test]
fn existing_canvas_is_adopted() {
    let (window, document) = globals();
    let config = Config::default();
    cleanup(&document, &config);

    let existing = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    existing.set_id(config.canvas_id);
    existing.set_width(17);
    document.body().unwrap().append_child(&existing).unwrap();

    let canvas = provision(&document, &window, &config).unwrap();

    assert!(canvas.is_same_node(Some(existing.as_ref())));
    assert_eq!(canvas.width(), 17);

    cleanup(&document, &config);
}

#[wasm_bindgen_test]
fn missing_webgl_removes_canvas() {
    let (window, document) = globals();
    let config = Config::default();
    cleanup(&document, &config);

    let canvas = provision(&document, &window, &config).unwrap();
    // Binding a 2d context first makes every WebGL request return null.
    canvas.get_context("2d").unwrap().unwrap();

    let err = acquire_context(&canvas).unwrap_err();

    assert_eq!(err, FireflyError::ContextUnavailable);
    assert!(canvas.parent_element().is_none());
    assert!(document.get_element_by_id(config.canvas_id).is_none());

    cleanup(&document, &config);
}

#[wasm_bindgen_test]
async fn stop_ends_loop_and_keeps_canvas() {
    let (_, document) = globals();
    let config = small_config();
    cleanup(&document, &config);

    let Some(handle) = start_small(&config) else {
        return;
    };
    assert!(fireflies_running());
    next_frame().await;
    next_frame().await;
    assert!(handle.is_running());

    stop_fireflies();
    next_frame().await;

    assert!(!handle.is_running());
    assert!(!fireflies_running());
    assert!(document.get_element_by_id(config.canvas_id).is_some());

    cleanup(&document, &config);
}

#[wasm_bindgen_test]
async fn restarting_stops_previous_loop() {
    let (_, document) = globals();
    let config = small_config();
    cleanup(&document, &config);

    let Some(first) = start_small(&config) else {
        return;
    };
    next_frame().await;
    let second = start_small(&config).unwrap();
    next_frame().await;

    assert!(!first.is_running());
    assert!(second.is_running());
    assert!(fireflies_running());
    let canvases = document
        .query_selector_all(&format!("canvas#{}", config.canvas_id))
        .unwrap();
    assert_eq!(canvases.length(), 1);

    stop_fireflies();
    next_frame().await;
    cleanup(&document, &config);
}

#[wasm_bindgen_test]
async fn resize_listener_follows_window_until_stopped() {
    let (window, document) = globals();
    let config = Config {
        resize_with_window: true,
        ..small_config()
    };
    cleanup(&document, &config);

    let Some(_handle) = start_small(&config) else {
        return;
    };
    let canvas = document
        .get_element_by_id(config.canvas_id)
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    let inner_width = window.inner_width().unwrap().as_f64().unwrap() as u32;

    canvas.set_width(1);
    let resize = web_sys::Event::new("resize").unwrap();
    window.dispatch_event(&resize).unwrap();
    assert_eq!(canvas.width(), inner_width);

    // The stopped loop detaches its listeners on its next frame.
    stop_fireflies();
    next_frame().await;
    next_frame().await;
    canvas.set_width(1);
    window.dispatch_event(&resize).unwrap();
    assert_eq!(canvas.width(), 1);

    cleanup(&document, &config);
}
