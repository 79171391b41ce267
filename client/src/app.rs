use std::cell::RefCell;

use leptos::html;
use leptos::prelude::*;

use placemap_shared::Place;

use crate::details::DetailsCache;
use crate::map::MapController;

thread_local! {
    static MAP_CONTROLLER: RefCell<Option<MapController>> = RefCell::new(None);
}

fn with_controller(f: impl FnOnce(&mut MapController)) {
    MAP_CONTROLLER.with(|slot| {
        if let Some(controller) = slot.borrow_mut().as_mut() {
            f(controller);
        }
    });
}

const ZOOM_BUTTON_TOP: &str = "width: 40px; height: 40px; display: flex; align-items: center; justify-content: center; background: rgba(255,255,255,0.9); border: none; border-radius: 8px 8px 0 0; color: #374151; font-size: 20px; cursor: pointer; box-shadow: 0 1px 4px rgba(0,0,0,0.15);";
const ZOOM_BUTTON_BOTTOM: &str = "width: 40px; height: 40px; display: flex; align-items: center; justify-content: center; background: rgba(255,255,255,0.9); border: none; border-radius: 0 0 8px 8px; color: #374151; font-size: 20px; cursor: pointer; box-shadow: 0 1px 4px rgba(0,0,0,0.15);";

/// Map section: binds the map to its surface div once, rebuilds markers when
/// the place list changes, and overlays the zoom buttons.
#[component]
pub fn App(places: RwSignal<Vec<Place>>, details: DetailsCache) -> impl IntoView {
    let surface_ref: NodeRef<html::Div> = NodeRef::new();
    let map_ready: RwSignal<bool> = RwSignal::new(false);

    // One-time map acquisition once the surface div is in the DOM.
    Effect::new(move || {
        if map_ready.get_untracked() {
            return;
        }
        let Some(surface) = surface_ref.get() else {
            return;
        };
        init_map(surface.into(), details.clone(), map_ready);
    });

    // Marker reconciliation on every place-list change, deferred until the
    // map exists.
    Effect::new(move || {
        let list = places.get();
        if !map_ready.get() {
            return;
        }
        with_controller(|controller| controller.set_places(&list));
    });

    view! {
        <div style="width: 100%; height: 100%; position: relative;">
            <div node_ref=surface_ref class="map-canvas" style="width: 100%; height: 100%;"></div>
            <div style="position: absolute; bottom: 20px; right: 20px; display: flex; flex-direction: column; gap: 1px; z-index: 10;">
                <button style=ZOOM_BUTTON_TOP on:click=move |_| with_controller(MapController::zoom_in)>
                    "+"
                </button>
                <button style=ZOOM_BUTTON_BOTTOM on:click=move |_| with_controller(MapController::zoom_out)>
                    "-"
                </button>
            </div>
        </div>
    }
}

#[cfg(target_arch = "wasm32")]
fn init_map(surface: web_sys::HtmlElement, details: DetailsCache, map_ready: RwSignal<bool>) {
    use std::rc::Rc;

    use crate::map::MapOptions;
    use crate::naver::NaverProvider;
    use crate::provider::SharedProvider;

    match NaverProvider::new(surface, &MapOptions::default()) {
        Ok(provider) => {
            let provider: SharedProvider = Rc::new(RefCell::new(provider));
            let controller = MapController::new(provider, details);
            MAP_CONTROLLER.with(|slot| {
                // Drop any previous controller first so its markers and
                // listeners detach before the replacement takes over.
                let _old = slot.borrow_mut().take();
                *slot.borrow_mut() = Some(controller);
            });
            map_ready.set(true);
        }
        Err(err) => {
            web_sys::console::warn_1(&format!("Map init failed: {err}").into());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_map(_surface: web_sys::HtmlElement, _details: DetailsCache, _map_ready: RwSignal<bool>) {}
