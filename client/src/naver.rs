//! Naver Maps SDK bindings and the [`MapProvider`] implementation backed by
//! them. Everything here talks to `window.naver.maps`; the SDK script is
//! loaded by the host page before the app mounts.

use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use placemap_shared::{Bounds, Coord, PreviewPayload};

use crate::map::MapOptions;
use crate::panel::render_panel_html;
use crate::provider::{
    ListenerId, MapEvent, MapProvider, MarkerAnimation, MarkerEvent, MarkerId,
};

/// Pan animation applied when fitting the viewport to the marker bounds.
const PAN_DURATION_MS: f64 = 1000.0;
const PAN_MARGIN_PX: f64 = 100.0;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["naver", "maps"], js_name = Map)]
    type NaverMap;
    #[wasm_bindgen(constructor, js_namespace = ["naver", "maps"], js_class = "Map")]
    fn new_map(surface: &HtmlElement, options: &JsValue) -> NaverMap;
    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &NaverMap) -> f64;
    #[wasm_bindgen(method, js_name = setZoom)]
    fn set_zoom(this: &NaverMap, level: f64, use_effect: bool);
    #[wasm_bindgen(method, js_name = panToBounds)]
    fn pan_to_bounds(this: &NaverMap, bounds: &NaverBounds, transition: &JsValue, margin: f64);

    #[wasm_bindgen(js_namespace = ["naver", "maps"], js_name = LatLng)]
    type NaverLatLng;
    #[wasm_bindgen(constructor, js_namespace = ["naver", "maps"], js_class = "LatLng")]
    fn new_lat_lng(lat: f64, lng: f64) -> NaverLatLng;

    #[wasm_bindgen(js_namespace = ["naver", "maps"], js_name = LatLngBounds)]
    type NaverBounds;
    #[wasm_bindgen(constructor, js_namespace = ["naver", "maps"], js_class = "LatLngBounds")]
    fn new_bounds(south_west: &NaverLatLng, north_east: &NaverLatLng) -> NaverBounds;

    #[wasm_bindgen(js_namespace = ["naver", "maps"], js_name = Marker)]
    type NaverMarker;
    #[wasm_bindgen(constructor, js_namespace = ["naver", "maps"], js_class = "Marker")]
    fn new_marker(options: &JsValue) -> NaverMarker;
    #[wasm_bindgen(method, js_name = setMap)]
    fn set_map(this: &NaverMarker, map: &JsValue);
    #[wasm_bindgen(method, js_name = setAnimation)]
    fn set_animation(this: &NaverMarker, animation: &JsValue);

    #[wasm_bindgen(js_namespace = ["naver", "maps"], js_name = InfoWindow)]
    type NaverInfoWindow;
    #[wasm_bindgen(constructor, js_namespace = ["naver", "maps"], js_class = "InfoWindow")]
    fn new_info_window(options: &JsValue) -> NaverInfoWindow;
    #[wasm_bindgen(method, js_name = setContent)]
    fn set_content(this: &NaverInfoWindow, content: &str);
    #[wasm_bindgen(method)]
    fn open(this: &NaverInfoWindow, map: &NaverMap, anchor: &JsValue);
    #[wasm_bindgen(method)]
    fn close(this: &NaverInfoWindow);

    #[wasm_bindgen(js_namespace = ["naver", "maps", "Event"], js_name = addListener)]
    fn add_sdk_listener(target: &JsValue, event_name: &str, listener: &Function) -> JsValue;
    #[wasm_bindgen(js_namespace = ["naver", "maps", "Event"], js_name = removeListener)]
    fn remove_sdk_listener(handle: &JsValue);
}

/// An SDK listener registration: the SDK-side handle plus the closure it
/// points at, removed and dropped together.
struct ListenerBinding {
    handle: JsValue,
    _closure: Closure<dyn Fn()>,
}

pub struct NaverProvider {
    surface: HtmlElement,
    map: NaverMap,
    panel: NaverInfoWindow,
    bounce: JsValue,
    markers: HashMap<u64, NaverMarker>,
    listeners: HashMap<u64, ListenerBinding>,
    next_id: u64,
}

impl NaverProvider {
    /// Bind a map to `surface`. Fails when the SDK script has not loaded;
    /// map construction itself is assumed to succeed after that.
    pub fn new(surface: HtmlElement, options: &MapOptions) -> Result<Self, String> {
        let maps_namespace = sdk_namespace()?;

        let option_bag = serde_wasm_bindgen::to_value(options)
            .map_err(|err| format!("map options: {err}"))?;
        let center = NaverLatLng::new_lat_lng(options.center.lat, options.center.lng);
        let _ = Reflect::set(&option_bag, &JsValue::from_str("center"), center.as_ref());
        let map = NaverMap::new_map(&surface, &option_bag);

        let panel_options = Object::new();
        let _ = Reflect::set(
            &panel_options,
            &JsValue::from_str("removable"),
            &JsValue::TRUE,
        );
        let panel = NaverInfoWindow::new_info_window(&panel_options);

        let bounce = Reflect::get(&maps_namespace, &JsValue::from_str("Animation"))
            .and_then(|animation| Reflect::get(&animation, &JsValue::from_str("BOUNCE")))
            .unwrap_or(JsValue::NULL);

        Ok(Self {
            surface,
            map,
            panel,
            bounce,
            markers: HashMap::new(),
            listeners: HashMap::new(),
            next_id: 0,
        })
    }

    fn mint(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn attach(&mut self, target: &JsValue, event_name: &str, handler: Rc<dyn Fn()>) -> ListenerId {
        let closure = Closure::<dyn Fn()>::new(move || handler());
        let handle = add_sdk_listener(target, event_name, closure.as_ref().unchecked_ref());
        let id = self.mint();
        self.listeners.insert(
            id,
            ListenerBinding {
                handle,
                _closure: closure,
            },
        );
        ListenerId(id)
    }
}

fn sdk_namespace() -> Result<JsValue, String> {
    let Some(window) = web_sys::window() else {
        return Err("no window".into());
    };
    let naver = Reflect::get(window.as_ref(), &JsValue::from_str("naver"))
        .ok()
        .filter(|value| !value.is_undefined())
        .ok_or("Naver Maps SDK not loaded")?;
    Reflect::get(&naver, &JsValue::from_str("maps"))
        .ok()
        .filter(|value| !value.is_undefined())
        .ok_or_else(|| "Naver Maps SDK not loaded".into())
}

fn marker_event_name(event: MarkerEvent) -> &'static str {
    match event {
        MarkerEvent::PointerEnter => "mouseover",
        MarkerEvent::PointerLeave => "mouseout",
    }
}

fn map_event_name(event: MapEvent) -> &'static str {
    match event {
        MapEvent::TilesLoad => "tilesloaded",
    }
}

impl MapProvider for NaverProvider {
    fn create_marker(&mut self, position: Coord, title: &str) -> MarkerId {
        let options = Object::new();
        let lat_lng = NaverLatLng::new_lat_lng(position.lat, position.lng);
        let _ = Reflect::set(&options, &JsValue::from_str("position"), lat_lng.as_ref());
        let _ = Reflect::set(&options, &JsValue::from_str("map"), self.map.as_ref());
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("title"),
            &JsValue::from_str(title),
        );
        let marker = NaverMarker::new_marker(&options);

        let id = self.mint();
        self.markers.insert(id, marker);
        MarkerId(id)
    }

    fn destroy_marker(&mut self, marker: MarkerId) {
        if let Some(marker) = self.markers.remove(&marker.0) {
            marker.set_map(&JsValue::NULL);
        }
    }

    fn set_marker_animation(&mut self, marker: MarkerId, animation: Option<MarkerAnimation>) {
        // Unknown ids are ignored: the SDK object is already detached.
        let Some(marker) = self.markers.get(&marker.0) else {
            return;
        };
        match animation {
            Some(MarkerAnimation::Bounce) => marker.set_animation(&self.bounce),
            None => marker.set_animation(&JsValue::NULL),
        }
    }

    fn add_marker_listener(
        &mut self,
        marker: MarkerId,
        event: MarkerEvent,
        handler: Rc<dyn Fn()>,
    ) -> ListenerId {
        let Some(target) = self.markers.get(&marker.0) else {
            return ListenerId(self.mint());
        };
        let target = target.as_ref().clone();
        self.attach(&target, marker_event_name(event), handler)
    }

    fn add_map_listener(&mut self, event: MapEvent, handler: Rc<dyn Fn()>) -> ListenerId {
        let target = self.map.as_ref().clone();
        self.attach(&target, map_event_name(event), handler)
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        if let Some(binding) = self.listeners.remove(&listener.0) {
            remove_sdk_listener(&binding.handle);
        }
    }

    fn open_panel(&mut self, anchor: MarkerId, payload: &PreviewPayload) {
        let Some(marker) = self.markers.get(&anchor.0) else {
            return;
        };
        self.panel.set_content(&render_panel_html(payload));
        self.panel.open(&self.map, marker.as_ref());
    }

    fn close_panel(&mut self) {
        self.panel.close();
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        let south_west = NaverLatLng::new_lat_lng(bounds.min_lat, bounds.min_lng);
        let north_east = NaverLatLng::new_lat_lng(bounds.max_lat, bounds.max_lng);
        let sdk_bounds = NaverBounds::new_bounds(&south_west, &north_east);

        let transition = Object::new();
        let _ = Reflect::set(
            &transition,
            &JsValue::from_str("duration"),
            &JsValue::from_f64(PAN_DURATION_MS),
        );
        self.map.pan_to_bounds(&sdk_bounds, &transition, PAN_MARGIN_PX);
    }

    fn zoom(&self) -> i32 {
        self.map.get_zoom() as i32
    }

    fn set_zoom(&mut self, level: i32) {
        self.map.set_zoom(f64::from(level), true);
    }

    fn reset_tile_backdrop(&mut self) {
        // The SDK nests its tile canvas in the surface's first child and
        // repaints an opaque background on it after tile refreshes.
        let Some(child) = self.surface.first_element_child() else {
            return;
        };
        let Ok(child) = child.dyn_into::<HtmlElement>() else {
            return;
        };
        let _ = child.style().set_property("background", "transparent");
    }
}
