use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::{Array, Function, Promise, Reflect};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    window, Document, Element, HtmlElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::config::SiteConfig;
use crate::effects::clipboard::{ClipboardAccess, ClipboardError};
use crate::effects::reveal::VisibilityTracker;
use crate::telemetry::{log_event, LogLevel};

pub use crate::error::DomError;

const CONFIG_SCRIPT_ID: &str = "site-config";

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|error| String::from(error.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

pub fn win() -> Result<Window, DomError> {
    window().ok_or(DomError::MissingElement("window"))
}

pub fn document() -> Result<Document, DomError> {
    win()?.document().ok_or(DomError::MissingElement("document"))
}

pub fn body() -> Result<HtmlElement, DomError> {
    document()?.body().ok_or(DomError::MissingElement("body"))
}

pub fn by_id(id: &'static str) -> Result<Element, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or(DomError::MissingElement(id))
}

fn collect(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, DomError> {
    Ok(collect(document()?.query_selector_all(selector)?))
}

pub fn query_within(root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
    Ok(collect(root.query_selector_all(selector)?))
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let style = element.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn document_height() -> f64 {
    document()
        .ok()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0)
}

/// Reads overrides from `<script id="site-config" type="application/json">`,
/// falling back to defaults when the block is absent or malformed.
pub fn load_site_config() -> SiteConfig {
    let defaults = SiteConfig::default();
    let Some(raw) = document()
        .ok()
        .and_then(|d| d.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|script| script.text_content())
    else {
        return defaults;
    };

    match SiteConfig::from_json(&raw) {
        Ok(config) => {
            log_event(&config, LogLevel::Debug, "config_loaded", json!({ "source": CONFIG_SCRIPT_ID }));
            config
        }
        Err(error) => {
            log_event(
                &defaults,
                LogLevel::Warn,
                "config_rejected",
                json!({ "reason": error.to_string() }),
            );
            defaults
        }
    }
}

/// Runs `tick` once per display frame until it returns `false` or the loop
/// is dropped.
pub struct FrameLoop {
    frame: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameLoop {
    pub fn start(tick: impl FnMut(f64) -> bool + 'static) -> Self {
        let frame = Rc::new(RefCell::new(None));
        let tick: Rc<RefCell<dyn FnMut(f64) -> bool>> = Rc::new(RefCell::new(tick));
        schedule_frame(frame.clone(), tick);
        Self { frame }
    }
}

fn schedule_frame(slot: Rc<RefCell<Option<AnimationFrame>>>, tick: Rc<RefCell<dyn FnMut(f64) -> bool>>) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        let keep_going = (tick.borrow_mut())(timestamp);
        if keep_going {
            schedule_frame(next_slot, tick);
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.frame.borrow_mut().take();
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Intersection observer that reports each target once, on its first
/// sufficiently visible entry, and then stops watching it.
pub struct OneShotObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl OneShotObserver {
    pub fn observe(
        targets: Vec<Element>,
        threshold: f64,
        mut on_visible: impl FnMut(&Element) + 'static,
    ) -> Result<Self, DomError> {
        let mut tracker = VisibilityTracker::new(threshold, targets.len());
        let watched = targets.clone();

        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(index) = watched.iter().position(|candidate| *candidate == target) else {
                        continue;
                    };

                    if tracker.report(index, entry.is_intersecting(), entry.intersection_ratio()) {
                        observer.unobserve(&target);
                        on_visible(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for target in &targets {
            observer.observe(target);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for OneShotObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct WebClipboard;

impl ClipboardAccess for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let navigator = window().ok_or(ClipboardError::Unavailable)?.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|_| ClipboardError::Unavailable)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unavailable);
        }

        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(|_| ClipboardError::Unavailable)?;
        let Some(write_text) = write_text.dyn_ref::<Function>() else {
            return Err(ClipboardError::Unavailable);
        };

        let promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|error| ClipboardError::Rejected(DomError::from(error).to_string()))?;
        let promise: Promise = promise
            .dyn_into()
            .map_err(|_| ClipboardError::Unavailable)?;

        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|error| ClipboardError::Rejected(DomError::from(error).to_string()))
    }

    fn legacy_copy(&self, text: &str) -> Result<(), ClipboardError> {
        let rejected = |error: DomError| ClipboardError::Rejected(error.to_string());
        let document = document().map_err(rejected)?;
        let body = document.body().ok_or(ClipboardError::Unavailable)?;

        let field: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(|error| rejected(error.into()))?
            .dyn_into()
            .map_err(|_| ClipboardError::Unavailable)?;
        field.set_value(text);
        body.append_child(&field)
            .map_err(|error| rejected(error.into()))?;
        field.select();

        let document_js: JsValue = document.into();
        let exec = Reflect::get(&document_js, &JsValue::from_str("execCommand"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok());
        let copied = exec
            .map(|exec| exec.call1(&document_js, &JsValue::from_str("copy")))
            .transpose()
            .map_err(|error| rejected(error.into()));

        field.remove();

        match copied? {
            Some(_) => Ok(()),
            None => Err(ClipboardError::Unavailable),
        }
    }
}
