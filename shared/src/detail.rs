use serde::{Deserialize, Serialize};

/// One local-search result for a place, as delivered by the search provider.
/// Every field is optional on the wire; absent fields deserialize to empty
/// strings and fall back to placeholder text at preview-build time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailRecord {
    /// May contain inline `<b>` markup around matched query terms.
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "roadAddress")]
    pub road_address: String,
    /// Lot-number address; carried on the record but not rendered.
    #[serde(default, rename = "address")]
    pub jibun_address: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// One image-search result. Dimensions arrive as untrusted strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageCandidate {
    #[serde(default, rename = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(default, rename = "sizewidth")]
    pub width: String,
    #[serde(default, rename = "sizeheight")]
    pub height: String,
}

impl ImageCandidate {
    /// Coerced pixel dimensions: non-numeric or missing values become 0.
    pub fn parsed_dimensions(&self) -> (u32, u32) {
        (coerce_dimension(&self.width), coerce_dimension(&self.height))
    }
}

fn coerce_dimension(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Per-place cache slot combining the detail lookup and the image list.
/// Owned and written by the fetch layer; the map core only reads snapshots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailsCacheEntry {
    pub detail: Option<DetailRecord>,
    #[serde(default)]
    pub images: Vec<ImageCandidate>,
    #[serde(default)]
    pub is_loading: bool,
}
