#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use sandart_site::browser::{self, BrowserDocument};
use sandart_site::components::count_up::format_thousands;
use sandart_site::components::gallery::GalleryFilter;
use sandart_site::dom::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn div(class: &str, attr: (&str, &str)) -> HtmlElement {
    let el: HtmlElement = document().create_element("div").unwrap().dyn_into().unwrap();
    el.set_class_name(class);
    el.set_attribute(attr.0, attr.1).unwrap();
    document().body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn thousands_match_browser_locale() {
    for n in [0u64, 7, 999, 1000, 25_000, 1_234_567] {
        let expected: String = js_sys::Number::from(n as f64).to_locale_string("en-US").into();
        assert_eq!(format_thousands(n), expected);
    }
}

#[wasm_bindgen_test]
fn gallery_filter_drives_real_elements() {
    let buttons = vec![div("filter-btn active", ("data-filter", "all")), div("filter-btn", ("data-filter", "kids"))];
    let items = vec![
        div("gallery-item", ("data-category", "kids")),
        div("gallery-item", ("data-category", "wedding")),
    ];
    let filter = GalleryFilter::new(buttons.clone(), items.clone());

    filter.select(1);
    assert!(buttons[1].has_class("active"));
    assert!(!buttons[0].has_class("active"));
    assert_eq!(items[0].style().get_property_value("display").unwrap(), "block");
    assert_eq!(items[1].style().get_property_value("display").unwrap(), "none");

    for el in buttons.iter().chain(&items) {
        Element::remove(el);
    }
}

#[wasm_bindgen_test]
fn document_adapter_queries_and_injects() {
    let doc = BrowserDocument(document());
    let marker = div("web-test-marker", ("data-target", "12"));

    let found = doc.query(".web-test-marker[data-target]").expect("marker in DOM");
    assert!(found == marker);
    assert!(doc.body().unwrap().contains(&marker));

    let before = document().query_selector_all("style").unwrap().length();
    doc.inject_style("@keyframes webTest { from { opacity: 0; } }");
    assert_eq!(document().query_selector_all("style").unwrap().length(), before + 1);

    Element::remove(&marker);
    assert!(doc.query(".web-test-marker").is_none());
}

#[wasm_bindgen_test]
fn config_global_overrides_defaults() {
    let window = web_sys::window().unwrap();
    let key = JsValue::from_str(browser::CONFIG_GLOBAL);

    let raw = js_sys::Object::new();
    js_sys::Reflect::set(&raw, &"slideIntervalMs".into(), &JsValue::from_f64(7000.0)).unwrap();
    js_sys::Reflect::set(&window, &key, &raw).unwrap();
    let (config, err) = browser::read_config(&window);
    assert!(err.is_none());
    assert_eq!(config.slide_interval_ms, 7000);

    js_sys::Reflect::set(&window, &key, &JsValue::from_str("not an object")).unwrap();
    let (config, err) = browser::read_config(&window);
    assert!(err.is_some());
    assert_eq!(config.slide_interval_ms, 5000);

    js_sys::Reflect::delete_property(&window, &key).unwrap();
}
