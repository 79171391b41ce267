#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use placemap_shared::{PreviewPayload, build_preview};

use crate::details::DetailsCache;
use crate::provider::{MarkerId, SharedProvider};

/// Hover lifecycle for the shared preview panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    /// Panel open with the loading placeholder for this marker.
    Pending(MarkerId),
    /// Panel open with assembled content for this marker.
    Resolved(MarkerId),
}

/// Drives panel visibility and content per marker. Resolution is a
/// synchronous read of the current cache snapshot, so there is never a
/// pending hover request to cancel: a mid-fetch entry takes the loading
/// branch and the next pointer-enter re-reads the cache.
pub struct HoverController {
    provider: SharedProvider,
    cache: DetailsCache,
    state: HoverState,
}

impl HoverController {
    pub fn new(provider: SharedProvider, cache: DetailsCache) -> Self {
        Self {
            provider,
            cache,
            state: HoverState::Idle,
        }
    }

    /// Pointer entered a marker: open the panel anchored there. Opening for
    /// a new marker implicitly replaces any panel already open elsewhere;
    /// the provider keeps a single panel instance.
    pub fn pointer_enter(&mut self, marker: MarkerId, place_name: &str) {
        let payload = match self.cache.lookup(place_name) {
            Some(entry) if !entry.is_loading => build_preview(entry.detail.as_ref(), &entry.images),
            _ => PreviewPayload::Loading,
        };
        self.state = match payload {
            PreviewPayload::Loading => HoverState::Pending(marker),
            PreviewPayload::Ready(_) => HoverState::Resolved(marker),
        };
        self.provider.borrow_mut().open_panel(marker, &payload);
    }

    /// Pointer left a marker: close unconditionally, whatever the state was.
    pub fn pointer_leave(&mut self) {
        self.provider.borrow_mut().close_panel();
        self.state = HoverState::Idle;
    }

    pub fn state(&self) -> HoverState {
        self.state
    }
}
