//! DOM element bindings and the browser `View`.
//!
//! Every id the controller renders to is resolved once at startup; a page
//! missing one of them fails to start rather than failing per click.

use gloo_timers::callback::Timeout;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};
use xmrt_api_types::{Notification, TransactionRecord};
use xmrt_session::{ElementId, LOADING_LABEL, View};

const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; padding: 15px 20px; \
     border-radius: 5px; color: white; font-weight: 500; z-index: 1000; \
     max-width: 300px; word-wrap: break-word;";

// ── Helpers ──

fn doc() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc()?.get_element_by_id(id)
}

pub fn create_element(tag: &str) -> Option<Element> {
    doc()?.create_element(tag).ok()
}

fn set_display(el: &Element, display: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", display);
    }
}

// ── Elements ──

/// Elements of the dashboard, keyed by their contract id.
#[derive(Clone)]
pub struct Elements {
    by_id: HashMap<ElementId, Element>,
}

impl Elements {
    /// Resolve all DOM references. Call once the document has loaded.
    pub fn bind() -> Result<Elements, JsValue> {
        let mut by_id_map = HashMap::new();
        for id in ElementId::ALL {
            let el = by_id(id.as_str())
                .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id.as_str())))?;
            by_id_map.insert(id, el);
        }
        Ok(Elements { by_id: by_id_map })
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.by_id.get(&id)
    }
}

// ── View ──

pub struct DomView {
    els: Elements,
}

impl DomView {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }

    fn transaction_item(&self, record: &TransactionRecord) -> Option<Element> {
        let item = create_element("div")?;
        item.set_class_name("transaction-item");

        let left = create_element("div")?;
        let kind = create_element("strong")?;
        kind.set_text_content(Some(record.kind.label()));
        let time = create_element("small")?;
        let when = js_sys::Date::new(&JsValue::from_f64(record.timestamp_epoch_ms as f64));
        let when = String::from(when.to_locale_string("default", &JsValue::UNDEFINED));
        time.set_text_content(Some(&when));
        left.append_child(&kind).ok()?;
        let left_br = create_element("br")?;
        left.append_child(&left_br).ok()?;
        left.append_child(&time).ok()?;

        let right = create_element("div")?;
        let amount = create_element("span")?;
        amount.set_text_content(Some(&record.amount));
        let hash = create_element("small")?;
        hash.set_text_content(Some(&record.hash));
        right.append_child(&amount).ok()?;
        let right_br = create_element("br")?;
        right.append_child(&right_br).ok()?;
        right.append_child(&hash).ok()?;

        item.append_child(&left).ok()?;
        item.append_child(&right).ok()?;
        Some(item)
    }
}

impl View for DomView {
    fn set_text(&self, id: ElementId, text: &str) {
        if let Some(el) = self.els.get(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(&self, id: ElementId, visible: bool) {
        let Some(el) = self.els.get(id) else {
            return;
        };
        let display = match (visible, id) {
            (false, _) => "none",
            (true, ElementId::WalletAddress) => "block",
            (true, _) => "inline-block",
        };
        set_display(el, display);
    }

    fn set_disabled(&self, id: ElementId, disabled: bool) {
        if let Some(button) = self.els.get(id).and_then(|el| el.dyn_ref::<HtmlButtonElement>()) {
            button.set_disabled(disabled);
        }
    }

    fn set_label(&self, id: ElementId, label: &str) {
        let Some(el) = self.els.get(id) else {
            return;
        };
        if label == LOADING_LABEL {
            el.set_inner_html(&format!("<span class=\"loading\"></span> {LOADING_LABEL}"));
        } else {
            el.set_text_content(Some(label));
        }
    }

    fn set_class(&self, id: ElementId, class: &str) {
        if let Some(el) = self.els.get(id) {
            el.set_class_name(class);
        }
    }

    fn render_transactions(&self, records: &[TransactionRecord]) {
        let Some(container) = self.els.get(ElementId::TransactionList) else {
            return;
        };
        container.set_inner_html("");
        for record in records {
            match self.transaction_item(record) {
                Some(item) => {
                    let _ = container.append_child(&item);
                }
                None => tracing::warn!("failed to render transaction {}", record.hash),
            }
        }
    }

    fn notify(&self, notification: &Notification) {
        let Some(body) = doc().and_then(|d| d.body()) else {
            gloo_console::log!(notification.message.clone());
            return;
        };
        let Some(toast) = create_element("div") else {
            return;
        };
        if let Some(html) = toast.dyn_ref::<HtmlElement>() {
            html.style().set_css_text(TOAST_STYLE);
            let _ = html
                .style()
                .set_property("background-color", notification.severity.color());
        }
        toast.set_text_content(Some(&notification.message));
        if body.append_child(&toast).is_err() {
            return;
        }

        let ttl = u32::try_from(notification.ttl_ms()).unwrap_or(u32::MAX);
        Timeout::new(ttl, move || toast.remove()).forget();
    }

    fn prompt(&self, message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok().flatten()
    }
}
