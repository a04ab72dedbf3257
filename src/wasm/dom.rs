use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, WebGlRenderingContext, Window};

use crate::config::{Config, LOG_PREFIX};
use crate::error::FireflyError;

/// Ensure the stylesheet and the full-page canvas exist, creating them only
/// when absent. Safe to call repeatedly.
pub fn provision(
    document: &Document,
    window: &Window,
    config: &Config,
) -> Result<HtmlCanvasElement, FireflyError> {
    if document.get_element_by_id(config.style_id).is_none() {
        let style = document.create_element("style")?;
        style.set_id(config.style_id);
        style.set_inner_html(config.stylesheet);
        document
            .head()
            .ok_or(FireflyError::Dom("no document head".into()))?
            .append_child(&style)?;
    }

    let canvas: HtmlCanvasElement = match document.get_element_by_id(config.canvas_id) {
        Some(el) => el.dyn_into(),
        None => document.create_element("canvas")?.dyn_into(),
    }
    .map_err(|_| FireflyError::Dom(format!("#{} is not a canvas", config.canvas_id)))?;

    if canvas.parent_element().is_none() {
        let body = document
            .body()
            .ok_or(FireflyError::Dom("no document body".into()))?;
        canvas.set_id(config.canvas_id);
        body.insert_before(&canvas, body.first_child().as_ref())?;

        let width = window.inner_width()?.as_f64().unwrap_or_default();
        canvas.set_width(width as u32);
        canvas.set_height(body.scroll_height().max(0) as u32);
    }

    Ok(canvas)
}

/// Request a WebGL context, falling back to the prefixed name. Without one
/// the canvas is taken out of the document again.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Result<WebGlRenderingContext, FireflyError> {
    for kind in ["webgl", "experimental-webgl"] {
        // A canvas already bound to another context kind returns null here.
        if let Some(ctx) = canvas.get_context(kind).ok().flatten() {
            return ctx
                .dyn_into()
                .map_err(|_| FireflyError::Dom(format!("{kind} context is not WebGL")));
        }
    }

    log::warn!("{LOG_PREFIX} {}", FireflyError::ContextUnavailable);
    canvas.remove();
    Err(FireflyError::ContextUnavailable)
}
