#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use std::cell::RefCell;
use std::rc::Rc;

use placemap_shared::{Bounds, Place};

use crate::hover::HoverController;
use crate::provider::{ListenerId, MarkerAnimation, MarkerEvent, MarkerId, SharedProvider};
use crate::timer::OneShot;

/// How long the entrance bounce runs before the one-shot timer cancels it.
const BOUNCE_DURATION_MS: u32 = 700;

/// One provider marker together with everything it owns: the place it
/// represents, its pointer listeners, and the pending bounce-cancel timer.
/// Released as a unit so neither a listener nor a timer callback can outlive
/// its marker.
struct MarkerHandle {
    id: MarkerId,
    place: Place,
    listeners: Vec<ListenerId>,
    bounce_timer: Option<OneShot>,
}

/// Owns the markers derived from the place list. Reconciliation is a full
/// replace: every prior marker is released, then one marker per place is
/// created in input order. Callers serialize `reconcile` calls; the place
/// list only changes on discrete external updates.
pub struct MarkerSet {
    provider: SharedProvider,
    hover: Rc<RefCell<HoverController>>,
    markers: Vec<MarkerHandle>,
}

impl MarkerSet {
    pub fn new(provider: SharedProvider, hover: Rc<RefCell<HoverController>>) -> Self {
        Self {
            provider,
            hover,
            markers: Vec::new(),
        }
    }

    /// Rebuild the marker collection for `places` and fit the viewport to
    /// the region covering all of them.
    pub fn reconcile(&mut self, places: &[Place]) {
        self.release_all();

        let mut bounds: Option<Bounds> = None;
        for place in places {
            let position = place.coord();
            let id = self
                .provider
                .borrow_mut()
                .create_marker(position, &place.name);
            self.provider
                .borrow_mut()
                .set_marker_animation(id, Some(MarkerAnimation::Bounce));

            let bounce_timer = {
                let provider = self.provider.clone();
                OneShot::schedule(BOUNCE_DURATION_MS, move || {
                    provider.borrow_mut().set_marker_animation(id, None);
                })
            };

            let enter = {
                let hover = self.hover.clone();
                let name = place.name.clone();
                Rc::new(move || hover.borrow_mut().pointer_enter(id, &name)) as Rc<dyn Fn()>
            };
            let leave = {
                let hover = self.hover.clone();
                Rc::new(move || hover.borrow_mut().pointer_leave()) as Rc<dyn Fn()>
            };
            let listeners = {
                let mut provider = self.provider.borrow_mut();
                vec![
                    provider.add_marker_listener(id, MarkerEvent::PointerEnter, enter),
                    provider.add_marker_listener(id, MarkerEvent::PointerLeave, leave),
                ]
            };

            match &mut bounds {
                None => bounds = Some(Bounds::from_point(position)),
                Some(b) => b.extend(position),
            }

            self.markers.push(MarkerHandle {
                id,
                place: place.clone(),
                listeners,
                bounce_timer: Some(bounce_timer),
            });
        }

        if let Some(bounds) = bounds {
            self.provider.borrow_mut().fit_bounds(bounds);
        }
    }

    /// Places currently represented by markers, in marker order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.markers.iter().map(|handle| &handle.place)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn release_all(&mut self) {
        for mut handle in self.markers.drain(..) {
            // Cancel the pending bounce timer before the marker goes away so
            // a stale callback can never touch a destroyed marker.
            handle.bounce_timer.take();
            let mut provider = self.provider.borrow_mut();
            for listener in handle.listeners.drain(..) {
                provider.remove_listener(listener);
            }
            provider.destroy_marker(handle.id);
        }
    }
}

impl Drop for MarkerSet {
    fn drop(&mut self) {
        self.release_all();
    }
}
