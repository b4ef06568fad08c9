#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the page runner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Object, Reflect};
use pinstrip_runtime::{ChoreoConfig, FrameSnapshot, IntroStyle};
use pinstrip_layout::PinState;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn style_to_js(style: IntroStyle) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "opacity", JsValue::from_f64(style.opacity));
    set_js(&obj, "blurPx", JsValue::from_f64(style.blur_px));
    set_js(&obj, "offsetY", JsValue::from_f64(style.offset_y));
    obj.into()
}

fn frame_to_js(frame: &FrameSnapshot) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "seq", JsValue::from_f64(frame.seq as f64));
    set_js(&obj, "scrollY", JsValue::from_f64(frame.scroll_y));
    set_js(&obj, "progress", JsValue::from_f64(frame.progress));
    set_js(
        &obj,
        "displayedProgress",
        JsValue::from_f64(frame.displayed_progress),
    );
    set_js(&obj, "translateX", JsValue::from_f64(frame.translate_x));
    set_js(&obj, "stripWidth", JsValue::from_f64(frame.strip_width));
    let (pin, offset) = match frame.pin {
        PinState::Before => ("before", 0.0),
        PinState::Pinned { offset } => ("pinned", offset),
        PinState::After => ("after", 0.0),
    };
    set_js(&obj, "pin", JsValue::from_str(pin));
    set_js(&obj, "pinOffset", JsValue::from_f64(offset));
    set_js(&obj, "index", JsValue::from_f64(frame.index as f64));
    set_js(&obj, "selection", JsValue::from_str(&frame.selection));
    set_js(&obj, "overridden", JsValue::from_bool(frame.overridden));
    set_js(&obj, "section", JsValue::from_str(&frame.section));
    set_js(&obj, "navScrolled", JsValue::from_bool(frame.nav_scrolled));
    set_js(&obj, "indicatorX", JsValue::from_f64(frame.indicator_x));

    let hero = Object::new();
    set_js(&hero, "visual", style_to_js(frame.hero.visual));
    set_js(&hero, "title", style_to_js(frame.hero.title));
    set_js(&hero, "subtitle", style_to_js(frame.hero.subtitle));
    set_js(&hero, "scale", JsValue::from_f64(frame.hero.scale));
    set_js(&obj, "hero", hero.into());
    obj.into()
}

/// Scroll choreography runner for the product page.
///
/// Host-driven: JavaScript measures the page, forwards DOM events, calls
/// `tick` from `requestAnimationFrame`, and applies the returned commands.
#[wasm_bindgen]
pub struct PinstripRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl PinstripRunner {
    /// Create a runner. `config_json` is an optional policy document; omit
    /// it for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PinstripRunner, JsValue> {
        install_panic_hook();
        let inner = match config_json {
            Some(json) => {
                RunnerCore::from_config_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => RunnerCore::new(ChoreoConfig::default()),
        };
        Ok(Self { inner })
    }

    /// Replace the measured page geometry (JSON `LayoutReport`).
    #[wasm_bindgen(js_name = reportLayout)]
    pub fn report_layout(&mut self, json: &str) -> Result<(), JsValue> {
        self.inner
            .report_layout(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Forward a document scroll offset.
    pub fn scroll(&mut self, y: f64) {
        self.inner.scroll(y);
    }

    /// Parse a JSON-encoded event and push it.
    /// Returns `true` if accepted, `false` if malformed.
    #[wasm_bindgen(js_name = pushEvent)]
    pub fn push_event(&mut self, json: &str) -> bool {
        self.inner.push_encoded_event(json)
    }

    /// Advance by `dt_ms` milliseconds and process a frame. Returns the frame
    /// object, or `null` when choreography is not mounted.
    pub fn tick(&mut self, dt_ms: f64) -> JsValue {
        match self.inner.advance_time_ms(dt_ms) {
            Some(frame) => frame_to_js(&frame),
            None => JsValue::NULL,
        }
    }

    /// Pending host commands as a JSON array.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> Result<String, JsValue> {
        self.inner
            .take_commands_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Selected panel id.
    pub fn selection(&self) -> String {
        self.inner.selection().to_string()
    }

    /// Accent color of the selected variant.
    #[wasm_bindgen(js_name = variantHex)]
    pub fn variant_hex(&self) -> String {
        self.inner.variant_hex().to_string()
    }

    /// Formatted price in the selected currency.
    #[wasm_bindgen(js_name = priceLabel)]
    pub fn price_label(&self) -> String {
        self.inner.price_label()
    }

    /// Switch the price currency.
    #[wasm_bindgen(js_name = selectCurrency)]
    pub fn select_currency(&mut self, code: &str) -> bool {
        self.inner.select_currency(code)
    }

    /// Lifecycle phase label.
    pub fn phase(&self) -> String {
        self.inner.phase_label().to_string()
    }

    /// Frames produced so far.
    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.inner.frame_count() as f64
    }

    /// Release the session. Idempotent.
    pub fn destroy(&mut self) {
        self.inner.teardown();
    }
}
