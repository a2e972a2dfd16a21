//! WASM bridge for the element inspector.
//!
//! Compiled via `wasm-pack build --target web` and loaded into the preview
//! frame. The host page owns an [`Inspector`], calls `enable()` when the
//! inspector is switched on and `disable()` when it is switched off.

mod cssom;
mod dom;
mod logger;
mod overlay;

use dom::DomHost;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use inspector_core::{
    CssPropertiesResult, Inspection, InspectorConfig, Measurable, Point, PropertyFact,
    group_by_kind, inspect_point, resolve,
};
use inspector_render::{CanvasKind, OverlayCanvases};
use overlay::DomOverlayHost;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, MouseEvent};

/// Work deferred to the next animation frame. At most one of each kind is
/// pending; further events only update the stored pointer.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Hover,
    Select,
    Resize,
}

/// What a listener does with its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    Track,
    Hover,
    Select,
    Resize,
    /// Keep the click from reaching the inspected page.
    Swallow,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Window,
    /// The inspectable root container, in the capture phase.
    Root,
}

/// Listeners installed by `enable()`. Selection happens on `mousedown`
/// because the root swallows `click` before it reaches the page.
const LISTENERS: [(Target, &str, Reaction); 5] = [
    (Target::Window, "pointermove", Reaction::Track),
    (Target::Window, "pointerover", Reaction::Hover),
    (Target::Window, "mousedown", Reaction::Select),
    (Target::Window, "resize", Reaction::Resize),
    (Target::Root, "click", Reaction::Swallow),
];

fn listener_options(target: Target) -> EventListenerOptions {
    match target {
        Target::Window => EventListenerOptions::default(),
        Target::Root => EventListenerOptions {
            phase: EventListenerPhase::Capture,
            passive: false,
        },
    }
}

struct Session {
    config: InspectorConfig,
    dom: DomHost,
    overlays: RefCell<OverlayCanvases<DomOverlayHost>>,
    pointer: Cell<Point>,
    on_select: RefCell<Option<js_sys::Function>>,
    listeners: RefCell<Vec<EventListener>>,
    hover_frame: RefCell<Option<AnimationFrame>>,
    select_frame: RefCell<Option<AnimationFrame>>,
    resize_frame: RefCell<Option<AnimationFrame>>,
}

impl Session {
    fn frame(&self, frame: Frame) -> &RefCell<Option<AnimationFrame>> {
        match frame {
            Frame::Hover => &self.hover_frame,
            Frame::Select => &self.select_frame,
            Frame::Resize => &self.resize_frame,
        }
    }

    fn schedule(self: &Rc<Self>, frame: Frame) {
        if self.frame(frame).borrow().is_some() {
            return;
        }
        let session = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            session.frame(frame).borrow_mut().take();
            session.run(frame);
        });
        *self.frame(frame).borrow_mut() = Some(handle);
    }

    fn run(&self, frame: Frame) {
        let point = self.pointer.get();
        match frame {
            Frame::Hover => self.draw_hover_at(point),
            Frame::Select => {
                self.select_at(point);
            }
            Frame::Resize => {
                if let Err(e) = self.overlays.borrow_mut().rescale() {
                    log::error!("rescale on resize: {e}");
                }
            }
        }
    }

    fn draw_hover_at(&self, point: Point) {
        let element = resolve(&self.dom, point, &self.config);
        self.overlays.borrow_mut().draw_hover(element.as_ref());
    }

    /// Inspect, paint the selection, notify the listener. Returns the JSON.
    fn select_at(&self, point: Point) -> String {
        let inspection = inspect_point(&self.dom, point, &self.config);
        if let Some(element) = inspection.element() {
            self.overlays.borrow_mut().draw_selected(element);
        }
        let json = inspection_json(&inspection);
        let callback = self.on_select.borrow().clone();
        if let Some(callback) = callback {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("onSelect callback threw: {}", dom::js_message(&e));
            }
        }
        json
    }

    fn install_listeners(self: &Rc<Self>) {
        let window: EventTarget = self.dom.window().clone().into();
        let root: Option<EventTarget> = self
            .dom
            .document()
            .get_element_by_id(&self.config.root_id)
            .map(Into::into);
        if root.is_none() {
            log::debug!("no #{}; page clicks are not swallowed", self.config.root_id);
        }

        let mut listeners = Vec::with_capacity(LISTENERS.len());
        for (target, name, reaction) in LISTENERS {
            let element = match target {
                Target::Window => &window,
                Target::Root => match &root {
                    Some(root) => root,
                    None => continue,
                },
            };
            let session = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                element,
                name,
                listener_options(target),
                move |event: &Event| session.react(reaction, event),
            ));
        }
        *self.listeners.borrow_mut() = listeners;
    }

    fn react(self: &Rc<Self>, reaction: Reaction, event: &Event) {
        match reaction {
            Reaction::Track => self.track_pointer(event),
            Reaction::Hover => {
                self.track_pointer(event);
                self.schedule(Frame::Hover);
            }
            Reaction::Select => {
                self.track_pointer(event);
                self.schedule(Frame::Select);
            }
            Reaction::Resize => self.schedule(Frame::Resize),
            Reaction::Swallow => {
                event.prevent_default();
                event.stop_propagation();
            }
        }
    }

    fn track_pointer(&self, event: &Event) {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            self.pointer
                .set(Point::new(f64::from(event.client_x()), f64::from(event.client_y())));
        }
    }

    fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        for frame in [Frame::Hover, Frame::Select, Frame::Resize] {
            self.frame(frame).borrow_mut().take();
        }
        self.overlays.borrow_mut().destroy_all();
    }
}

/// The in-page inspector controller.
///
/// Owns the overlay canvases and, while enabled, the window listeners that
/// drive them.
#[wasm_bindgen]
pub struct Inspector {
    session: Rc<Session>,
}

#[wasm_bindgen]
impl Inspector {
    /// Create an inspector. `config_json` is an optional camelCase
    /// `InspectorConfig`; omitted fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Inspector, JsValue> {
        console_error_panic_hook_setup();

        let config = InspectorConfig::from_json(config_json.as_deref().unwrap_or(""))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        logger::init(config.level_filter());

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let dom = DomHost::new(window.clone(), document.clone(), config.max_rule_depth);
        let overlays = OverlayCanvases::new(DomOverlayHost::new(window, document), &config);

        Ok(Self {
            session: Rc::new(Session {
                config,
                dom,
                overlays: RefCell::new(overlays),
                pointer: Cell::new(Point::default()),
                on_select: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
                hover_frame: RefCell::new(None),
                select_frame: RefCell::new(None),
                resize_frame: RefCell::new(None),
            }),
        })
    }

    /// Create the overlay canvases and start following the pointer.
    /// Calling it again while enabled changes nothing.
    pub fn enable(&self) {
        self.session.overlays.borrow_mut().init();
        if self.session.listeners.borrow().is_empty() {
            self.session.install_listeners();
            log::info!("inspector enabled");
        }
    }

    /// Stop listening, cancel pending frames and remove both canvases.
    pub fn disable(&self) {
        self.session.teardown();
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        !self.session.listeners.borrow().is_empty()
    }

    /// Inspect the element under `(x, y)` without drawing.
    /// Returns `{"ok":true,"properties":…,"groups":…,"measurements":…}`
    /// or `{"ok":false}`.
    #[wasm_bindgen(js_name = inspectAt)]
    pub fn inspect_at(&self, x: f64, y: f64) -> String {
        let session = &self.session;
        inspection_json(&inspect_point(&session.dom, Point::new(x, y), &session.config))
    }

    /// Paint the hover overlay for the element under `(x, y)`, or clear it.
    #[wasm_bindgen(js_name = drawHoverAt)]
    pub fn draw_hover_at(&self, x: f64, y: f64) {
        self.session.draw_hover_at(Point::new(x, y));
    }

    /// Select the element under `(x, y)`: paint it, notify `onSelect`,
    /// and return the same JSON as `inspectAt`.
    #[wasm_bindgen(js_name = drawSelectedAt)]
    pub fn draw_selected_at(&self, x: f64, y: f64) -> String {
        self.session.select_at(Point::new(x, y))
    }

    /// Follow a document resize. Throws when the inspector is not enabled.
    pub fn rescale(&self) -> Result<(), JsValue> {
        self.session.overlays.borrow_mut().rescale().map_err(|e| {
            log::error!("rescale: {e}");
            JsValue::from_str(&e.to_string())
        })
    }

    /// Remove one canvas: `"selected"` or `"hover"`.
    pub fn destroy(&self, kind: &str) -> Result<(), JsValue> {
        let kind = CanvasKind::from_name(kind)
            .ok_or_else(|| JsValue::from_str(&format!("unknown canvas kind `{kind}`")))?;
        self.session.overlays.borrow_mut().destroy(kind);
        Ok(())
    }

    #[wasm_bindgen(js_name = destroyAll)]
    pub fn destroy_all(&self) {
        self.session.overlays.borrow_mut().destroy_all();
    }

    /// Register (or clear, with `undefined`) the selection callback. It is
    /// called with the inspection JSON string.
    #[wasm_bindgen(js_name = onSelect)]
    pub fn on_select(&self, callback: Option<js_sys::Function>) {
        *self.session.on_select.borrow_mut() = callback;
    }
}

impl Drop for Inspector {
    fn drop(&mut self) {
        // Listeners and pending frames hold the session; break the cycle.
        self.session.teardown();
    }
}

// ─── JSON ────────────────────────────────────────────────────────────────

fn inspection_json<E: Measurable>(inspection: &Inspection<E>) -> String {
    let Inspection::Found {
        element,
        properties,
    } = inspection
    else {
        return r#"{"ok":false}"#.to_string();
    };
    let measurements = match element.measure() {
        Ok(m) => serde_json::to_value(m).unwrap_or(Value::Null),
        Err(e) => {
            log::debug!("measurements unavailable: {e}");
            Value::Null
        }
    };
    found_json(properties, measurements)
}

fn found_json(properties: &CssPropertiesResult, measurements: Value) -> String {
    serde_json::json!({
        "ok": true,
        "properties": properties,
        "groups": group_by_kind(&properties.result),
        "measurements": measurements,
    })
    .to_string()
}

/// Accept either a whole aggregation result or just its `result` map.
fn parse_property_map(json: &str) -> serde_json::Result<BTreeMap<String, PropertyFact>> {
    let mut value: Value = serde_json::from_str(json)?;
    if let Some(result) = value.get_mut("result") {
        value = result.take();
    }
    serde_json::from_value(value)
}

/// Group an aggregation result by kind.
/// Returns JSON `{"ok":true,"groups":{…}}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen(js_name = groupByKind)]
pub fn group_by_kind_json(json: &str) -> String {
    match parse_property_map(json) {
        Ok(map) => serde_json::json!({ "ok": true, "groups": group_by_kind(&map) }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("inspector WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
