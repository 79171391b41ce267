#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::cell::RefCell;
use std::rc::Rc;

use placemap_shared::{Bounds, Coord, PreviewPayload};

/// Provider-minted marker identity. Never reused within a provider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Handle for a registered event listener, used to detach it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    PointerEnter,
    PointerLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    TilesLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAnimation {
    Bounce,
}

/// Seam over the external map SDK: map, marker, panel and event primitives.
/// The wasm build binds this to the Naver Maps SDK; tests use a recording
/// fake. All calls are synchronous on the UI thread.
pub trait MapProvider {
    fn create_marker(&mut self, position: Coord, title: &str) -> MarkerId;
    fn destroy_marker(&mut self, marker: MarkerId);
    fn set_marker_animation(&mut self, marker: MarkerId, animation: Option<MarkerAnimation>);
    fn add_marker_listener(
        &mut self,
        marker: MarkerId,
        event: MarkerEvent,
        handler: Rc<dyn Fn()>,
    ) -> ListenerId;
    fn add_map_listener(&mut self, event: MapEvent, handler: Rc<dyn Fn()>) -> ListenerId;
    fn remove_listener(&mut self, listener: ListenerId);
    /// Open the single shared panel anchored to `anchor`, replacing whatever
    /// marker it was anchored to before.
    fn open_panel(&mut self, anchor: MarkerId, payload: &PreviewPayload);
    fn close_panel(&mut self);
    /// Pan/zoom the viewport to fit the given region.
    fn fit_bounds(&mut self, bounds: Bounds);
    fn zoom(&self) -> i32;
    fn set_zoom(&mut self, level: i32);
    /// Re-apply the transparent background to the SDK's internal canvas node.
    fn reset_tile_backdrop(&mut self);
}

pub type SharedProvider = Rc<RefCell<dyn MapProvider>>;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Fake provider that records every call for assertions. Event handlers
    /// are fired through the free functions below, which clone them out of
    /// the registry first so a handler can re-borrow the provider.
    #[derive(Default)]
    pub(crate) struct RecordingProvider {
        next_id: u64,
        pub created: Vec<(MarkerId, Coord, String)>,
        pub destroyed: Vec<MarkerId>,
        pub animation_calls: Vec<(MarkerId, Option<MarkerAnimation>)>,
        marker_listeners: HashMap<ListenerId, (MarkerId, MarkerEvent, Rc<dyn Fn()>)>,
        map_listeners: HashMap<ListenerId, (MapEvent, Rc<dyn Fn()>)>,
        pub removed_listeners: Vec<ListenerId>,
        pub open_panel_calls: Vec<(MarkerId, PreviewPayload)>,
        pub panel_anchor: Option<MarkerId>,
        pub close_calls: usize,
        pub fit_bounds_calls: Vec<Bounds>,
        pub zoom_level: i32,
        pub backdrop_resets: usize,
    }

    impl RecordingProvider {
        pub fn shared() -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                zoom_level: 15,
                ..Self::default()
            }))
        }

        pub fn live_marker_count(&self) -> usize {
            self.created.len() - self.destroyed.len()
        }

        pub fn live_listener_count(&self) -> usize {
            self.marker_listeners.len() + self.map_listeners.len()
        }

        fn mint(&mut self) -> u64 {
            self.next_id += 1;
            self.next_id
        }
    }

    impl MapProvider for RecordingProvider {
        fn create_marker(&mut self, position: Coord, title: &str) -> MarkerId {
            let id = MarkerId(self.mint());
            self.created.push((id, position, title.to_string()));
            id
        }

        fn destroy_marker(&mut self, marker: MarkerId) {
            self.destroyed.push(marker);
        }

        fn set_marker_animation(&mut self, marker: MarkerId, animation: Option<MarkerAnimation>) {
            self.animation_calls.push((marker, animation));
        }

        fn add_marker_listener(
            &mut self,
            marker: MarkerId,
            event: MarkerEvent,
            handler: Rc<dyn Fn()>,
        ) -> ListenerId {
            let id = ListenerId(self.mint());
            self.marker_listeners.insert(id, (marker, event, handler));
            id
        }

        fn add_map_listener(&mut self, event: MapEvent, handler: Rc<dyn Fn()>) -> ListenerId {
            let id = ListenerId(self.mint());
            self.map_listeners.insert(id, (event, handler));
            id
        }

        fn remove_listener(&mut self, listener: ListenerId) {
            self.marker_listeners.remove(&listener);
            self.map_listeners.remove(&listener);
            self.removed_listeners.push(listener);
        }

        fn open_panel(&mut self, anchor: MarkerId, payload: &PreviewPayload) {
            self.open_panel_calls.push((anchor, payload.clone()));
            self.panel_anchor = Some(anchor);
        }

        fn close_panel(&mut self) {
            self.close_calls += 1;
            self.panel_anchor = None;
        }

        fn fit_bounds(&mut self, bounds: Bounds) {
            self.fit_bounds_calls.push(bounds);
        }

        fn zoom(&self) -> i32 {
            self.zoom_level
        }

        fn set_zoom(&mut self, level: i32) {
            self.zoom_level = level;
        }

        fn reset_tile_backdrop(&mut self) {
            self.backdrop_resets += 1;
        }
    }

    pub(crate) fn fire_marker_event(
        provider: &Rc<RefCell<RecordingProvider>>,
        marker: MarkerId,
        event: MarkerEvent,
    ) {
        let handlers: Vec<Rc<dyn Fn()>> = provider
            .borrow()
            .marker_listeners
            .values()
            .filter(|(m, e, _)| *m == marker && *e == event)
            .map(|(_, _, h)| h.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }

    pub(crate) fn fire_map_event(provider: &Rc<RefCell<RecordingProvider>>, event: MapEvent) {
        let handlers: Vec<Rc<dyn Fn()>> = provider
            .borrow()
            .map_listeners
            .values()
            .filter(|(e, _)| *e == event)
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }
}
