//! Event binding.
//!
//! One click listener per command control. Each click spawns the dispatch
//! on the browser's microtask queue; a click on a busy control comes back
//! as `Dispatch::Ignored`.

use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use xmrt_session::{Command, Dispatch, Session, SessionController};

use crate::dom::Elements;

/// Bind all command controls. Call once after init.
pub fn bind_events(
    els: &Elements,
    controller: &Rc<SessionController>,
    session: &Rc<Session>,
) -> Result<(), JsValue> {
    for command in Command::ALL {
        let control = command.control();
        let el = els
            .get(control)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", control.as_str())))?;

        let controller = controller.clone();
        let session = session.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let controller = controller.clone();
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Dispatch::Ignored = controller.dispatch(&session, command).await {
                    tracing::debug!("{} busy, click ignored", control.as_str());
                }
            });
        }) as Box<dyn FnMut(_)>);
        el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}
