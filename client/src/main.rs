mod app;
mod details;
mod hover;
mod map;
mod markers;
#[cfg(target_arch = "wasm32")]
mod naver;
mod panel;
mod provider;
mod timer;

use std::any::Any;
use std::cell::RefCell;

use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use placemap_shared::Place;

use crate::details::DetailsCache;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

/// Stand-in place list in the external wire format, shown until a fetch
/// layer supplies a real one through the `places` signal.
const DEMO_PLACES: &str = r#"[
    { "name": "Seoul Plaza", "latitude": 37.5662, "longitude": 126.9779 },
    { "name": "Gyeongbokgung Palace", "latitude": 37.5796, "longitude": 126.9770 },
    { "name": "N Seoul Tower", "latitude": 37.5512, "longitude": 126.9882 }
]"#;

fn demo_places() -> Vec<Place> {
    serde_json::from_str(DEMO_PLACES).unwrap_or_default()
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        return;
    };

    APP_MOUNT_HANDLE.with(move |slot| {
        // If main() is re-entered (dev/hot-reload runtime quirks), drop the
        // old mount so stale effects can't keep driving a dead map.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, || {
            let places: RwSignal<Vec<Place>> = RwSignal::new(demo_places());
            let details = DetailsCache::new();
            leptos::view! { <app::App places=places details=details /> }
        });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
