use crate::dom::{DomElement, DomEvent};
use crate::host::{BeaconPayload, BeaconTransport, Host, NavigatorInfo, VisibilityState};
use crate::lifecycle::{Interactor, SubscriptionId};
use crate::logging::init_console_logging;
use chrono::{DateTime, Utc};
use interactor_common::config::InteractorConfig;
use interactor_common::error::TransportError;
use interactor_common::protocol::{ClientSnapshot, PageInfo, Point};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Node, TouchEvent, Window};

impl DomElement for Element {
    fn tag_name(&self) -> String {
        Element::tag_name(self)
    }

    fn id(&self) -> String {
        Element::id(self)
    }

    fn class_name(&self) -> String {
        Element::class_name(self)
    }

    fn inner_text(&self) -> String {
        match self.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => Node::text_content(self).unwrap_or_default(),
        }
    }

    fn parent_element(&self) -> Option<Self> {
        Node::parent_element(self)
    }

    fn previous_element_sibling(&self) -> Option<Self> {
        Element::previous_element_sibling(self)
    }

    fn next_element_sibling(&self) -> Option<Self> {
        Element::next_element_sibling(self)
    }
}

/// `Host` backed by the browser `window`.
pub struct WebHost {
    window: Window,
}

impl WebHost {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn dimension(value: Result<JsValue, JsValue>) -> u32 {
    value.ok().and_then(|v| v.as_f64()).map(|v| v as u32).unwrap_or(0)
}

impl Host for WebHost {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }

    fn navigator(&self) -> NavigatorInfo {
        let navigator = self.window.navigator();
        NavigatorInfo {
            language: navigator.language().unwrap_or_default(),
            platform: navigator.platform().unwrap_or_default(),
        }
    }

    fn client_snapshot(&self) -> ClientSnapshot {
        ClientSnapshot {
            name: self.window.navigator().app_version().unwrap_or_default(),
            inner_width: dimension(self.window.inner_width()),
            inner_height: dimension(self.window.inner_height()),
            outer_width: dimension(self.window.outer_width()),
            outer_height: dimension(self.window.outer_height()),
        }
    }

    fn page(&self) -> PageInfo {
        let location = self.window.location();
        PageInfo {
            location: location.pathname().unwrap_or_default(),
            href: location.href().unwrap_or_default(),
            origin: location.origin().unwrap_or_default(),
            port: location.port().unwrap_or_default(),
            title: self
                .window
                .document()
                .map(|d| d.title())
                .unwrap_or_default(),
        }
    }

    fn session_storage(&self) -> Option<BTreeMap<String, String>> {
        let storage = self.window.session_storage().ok().flatten()?;
        let len = storage.length().ok()?;

        let mut snapshot = BTreeMap::new();
        for i in 0..len {
            let Some(key) = storage.key(i).ok().flatten() else {
                continue;
            };
            if let Some(value) = storage.get_item(&key).ok().flatten() {
                snapshot.insert(key, value);
            }
        }
        Some(snapshot)
    }
}

/// `BeaconTransport` over `navigator.sendBeacon`.
pub struct NavigatorBeacon {
    navigator: web_sys::Navigator,
}

impl NavigatorBeacon {
    pub fn new(navigator: web_sys::Navigator) -> Self {
        Self { navigator }
    }
}

impl BeaconTransport for NavigatorBeacon {
    fn send_beacon(&self, url: &str, payload: BeaconPayload) -> Result<(), TransportError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(&payload.body));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(payload.content_type);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| TransportError::Unavailable(format!("{:?}", e)))?;

        let queued = self
            .navigator
            .send_beacon_with_opt_blob(url, Some(&blob))
            .map_err(|e| TransportError::Unavailable(format!("{:?}", e)))?;

        if queued {
            Ok(())
        } else {
            Err(TransportError::Rejected)
        }
    }
}

fn to_dom_event(event: &Event) -> DomEvent<Element> {
    let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
    let dom_event = DomEvent::new(event.type_(), target);

    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return dom_event.with_position(
            Point::new(mouse.client_x(), mouse.client_y()),
            Point::new(mouse.screen_x(), mouse.screen_y()),
        );
    }

    if let Some(touch) = event
        .dyn_ref::<TouchEvent>()
        .and_then(|t| t.changed_touches().get(0))
    {
        return dom_event.with_position(
            Point::new(touch.client_x(), touch.client_y()),
            Point::new(touch.screen_x(), touch.screen_y()),
        );
    }

    dom_event
}

type WebInteractor = Interactor<WebHost, NavigatorBeacon>;

fn bind_listeners(
    interactor: &Rc<RefCell<WebInteractor>>,
    body: &HtmlElement,
    document: &Document,
) -> Result<(), JsValue> {
    let subscriptions: Vec<(SubscriptionId, String)> = interactor
        .borrow()
        .subscriptions()
        .iter()
        .enumerate()
        .map(|(i, sub)| (SubscriptionId(i), sub.event_name.clone()))
        .collect();

    for (id, event_name) in subscriptions {
        let handle = Rc::clone(interactor);
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.stop_propagation();
            if let Ok(mut inner) = handle.try_borrow_mut() {
                inner.handle_event(id, &to_dom_event(&event));
            }
        });
        body.add_event_listener_with_callback(&event_name, listener.as_ref().unchecked_ref())?;
        // Listeners live for the whole page.
        listener.forget();
    }

    let handle = Rc::clone(interactor);
    let doc = document.clone();
    let on_visibility = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let visibility = match doc.visibility_state() {
            web_sys::VisibilityState::Hidden => VisibilityState::Hidden,
            _ => VisibilityState::Visible,
        };
        if let Ok(mut inner) = handle.try_borrow_mut() {
            inner.handle_visibility_change(visibility);
        }
    });
    document.add_event_listener_with_callback(
        "visibilitychange",
        on_visibility.as_ref().unchecked_ref(),
    )?;
    on_visibility.forget();

    Ok(())
}

#[wasm_bindgen]
pub struct WasmInteractor {
    inner: Rc<RefCell<WebInteractor>>,
}

#[wasm_bindgen]
impl WasmInteractor {
    /// Start recording on the current page.
    ///
    /// `config` is a plain object; unknown or mistyped keys fall back to
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmInteractor, JsValue> {
        console_error_panic_hook::set_once();

        let config: InteractorConfig = if config.is_undefined() || config.is_null() {
            InteractorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).unwrap_or_default()
        };

        if config.debug {
            init_console_logging(tracing::Level::INFO);
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document available"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("Document has no body"))?;

        let transport = NavigatorBeacon::new(window.navigator());
        let interactor = Rc::new(RefCell::new(Interactor::new(
            config,
            WebHost::new(window),
            transport,
        )));

        bind_listeners(&interactor, &body, &document)?;

        Ok(Self { inner: interactor })
    }

    /// Current lifecycle state, e.g. `"active"`.
    pub fn state(&self) -> String {
        self.inner.borrow().state().as_str().to_string()
    }

    #[wasm_bindgen(js_name = recordCount)]
    pub fn record_count(&self) -> usize {
        self.inner.borrow().records().len()
    }

    /// Records captured so far, as JSON
    #[wasm_bindgen(js_name = recordsJson)]
    pub fn records_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.borrow().records())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize records: {}", e)))
    }

    #[wasm_bindgen(js_name = getVersion)]
    pub fn get_version() -> String {
        crate::VERSION.to_string()
    }
}
