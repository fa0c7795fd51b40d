use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent, Node, Window};

use crate::dispatch::{Dispatcher, PageEvent, Response};

fn listen<F>(target: &EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Nearest HTML element at or above the event target. Clicks on SVG
/// icons resolve to the enclosing link or button.
fn html_target(event: &Event) -> Option<HtmlElement> {
    let mut node: Node = event.target()?.dyn_into().ok()?;
    loop {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            return Some(el.clone());
        }
        node = node.parent_node()?;
    }
}

fn client_point(event: &Event) -> (f64, f64) {
    event
        .dyn_ref::<MouseEvent>()
        .map_or((0.0, 0.0), |m| (f64::from(m.client_x()), f64::from(m.client_y())))
}

fn forward(events: &Rc<Dispatcher<HtmlElement>>, event: PageEvent<HtmlElement>) -> impl FnMut(Event) + 'static {
    let events = events.clone();
    move |_| {
        events.emit(&event);
    }
}

/// Feeds `window` and `document` events into the page dispatcher.
pub fn attach(
    window: &Window,
    document: &web_sys::Document,
    events: &Rc<Dispatcher<HtmlElement>>,
) -> Result<(), JsValue> {
    listen(window, "load", forward(events, PageEvent::Load))?;
    listen(window, "scroll", forward(events, PageEvent::Scroll))?;
    listen(window, "resize", forward(events, PageEvent::Resize))?;
    listen(window, "beforeunload", forward(events, PageEvent::BeforeUnload))?;

    let on_click = events.clone();
    listen(document, "click", move |event| {
        let Some(target) = html_target(&event) else { return };
        let (x, y) = client_point(&event);
        if on_click.emit(&PageEvent::Click { target, x, y }) == Response::PreventDefault {
            event.prevent_default();
        }
    })?;

    let on_move = events.clone();
    listen(document, "mousemove", move |event| {
        let Some(target) = html_target(&event) else { return };
        let (x, y) = client_point(&event);
        on_move.emit(&PageEvent::PointerMove { target, x, y });
    })?;

    if let Some(root) = document.document_element() {
        listen(&root, "mouseleave", forward(events, PageEvent::PointerLeave))?;
    }
    Ok(())
}
