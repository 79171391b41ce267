#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use placemap_shared::{Coord, Place};

use crate::details::DetailsCache;
use crate::hover::HoverController;
use crate::markers::MarkerSet;
use crate::provider::{ListenerId, MapEvent, SharedProvider};

/// Seoul Plaza. Shown until the first place list pans the viewport away.
pub const DEFAULT_CENTER: Coord = Coord {
    lat: 37.5665,
    lng: 126.9780,
};

/// Initial map construction options. Serialized camelCase into the SDK's
/// option bag; the center is attached separately because it must be an SDK
/// coordinate instance, not a plain object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(skip)]
    pub center: Coord,
    pub zoom: i32,
    pub min_zoom: i32,
    pub zoom_control: bool,
    pub scale_control: bool,
    pub logo_control: bool,
    pub map_data_control: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: 15,
            min_zoom: 6,
            // Chrome zoom/scale controls off; the app renders its own zoom
            // buttons. Logo and data attribution stay on.
            zoom_control: false,
            scale_control: false,
            logo_control: true,
            map_data_control: true,
        }
    }
}

/// Orchestrates the map: owns the marker set and hover controller, keeps the
/// SDK's canvas backdrop transparent across tile refreshes, and exposes the
/// zoom delegations for the overlay buttons.
pub struct MapController {
    provider: SharedProvider,
    markers: MarkerSet,
    tiles_listener: ListenerId,
}

impl MapController {
    pub fn new(provider: SharedProvider, cache: DetailsCache) -> Self {
        let hover = Rc::new(RefCell::new(HoverController::new(provider.clone(), cache)));
        let markers = MarkerSet::new(provider.clone(), hover);

        // The SDK paints an opaque backdrop behind its tiles and repaints it
        // on every tile refresh; re-apply transparency each time.
        provider.borrow_mut().reset_tile_backdrop();
        let tiles_listener = {
            let fixup_provider = provider.clone();
            provider.borrow_mut().add_map_listener(
                MapEvent::TilesLoad,
                Rc::new(move || fixup_provider.borrow_mut().reset_tile_backdrop()),
            )
        };

        Self {
            provider,
            markers,
            tiles_listener,
        }
    }

    /// Replace the marker set to match the new place list.
    pub fn set_places(&mut self, places: &[Place]) {
        self.markers.reconcile(places);
    }

    pub fn zoom_in(&mut self) {
        self.adjust_zoom(1);
    }

    pub fn zoom_out(&mut self) {
        self.adjust_zoom(-1);
    }

    fn adjust_zoom(&mut self, delta: i32) {
        let mut provider = self.provider.borrow_mut();
        let level = provider.zoom();
        provider.set_zoom(level + delta);
    }
}

impl Drop for MapController {
    fn drop(&mut self) {
        self.provider.borrow_mut().remove_listener(self.tiles_listener);
    }
}
