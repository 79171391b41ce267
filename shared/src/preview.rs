use serde::{Deserialize, Serialize};

use crate::detail::{DetailRecord, ImageCandidate};
use crate::ranking::best_image;

/// Fallback shown for absent scalar fields (address, phone, category).
pub const NO_DATA: &str = "no data";
/// Fallback shown when the detail record has no description.
pub const NO_DESCRIPTION: &str = "no description";
/// Rating shown in the preview. A literal placeholder: no rating source
/// exists yet, so every place shows the same stub value.
pub const RATING_PLACEHOLDER: &str = "4.1";
pub const RATING_REVIEWS_PLACEHOLDER: &str = "(reviews)";

const DESCRIPTION_MAX_CHARS: usize = 80;
const ELLIPSIS: &str = "...";

/// Fully resolved content for the hover preview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PreviewPayload {
    /// The details cache has no resolved entry for the place yet.
    Loading,
    Ready(PreviewContent),
}

/// Structural view model for the panel. Rendering to concrete markup is a
/// separate, swappable step; nothing here needs re-deriving downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewContent {
    pub title: String,
    pub rating: String,
    pub rating_reviews: String,
    pub category: String,
    pub short_address: String,
    pub description: String,
    pub telephone: String,
    pub road_address: String,
    pub image_url: Option<String>,
}

/// Assemble the preview view model for one place from its detail record and
/// image candidates. A missing record produces all-fallback fields; a missing
/// or fully filtered image list omits the image section.
pub fn build_preview(detail: Option<&DetailRecord>, images: &[ImageCandidate]) -> PreviewPayload {
    let empty = DetailRecord::default();
    let detail = detail.unwrap_or(&empty);

    let road_address = fallback(&detail.road_address, NO_DATA);

    PreviewPayload::Ready(PreviewContent {
        title: strip_markup(&detail.title),
        rating: RATING_PLACEHOLDER.to_string(),
        rating_reviews: RATING_REVIEWS_PLACEHOLDER.to_string(),
        category: fallback(&detail.category, NO_DATA),
        short_address: short_address(&road_address),
        description: truncate_description(&fallback(&detail.description, NO_DESCRIPTION)),
        telephone: fallback(&detail.telephone, NO_DATA),
        road_address,
        image_url: best_image(images).map(|img| img.thumbnail_url.clone()),
    })
}

fn fallback(value: &str, placeholder: &'static str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Remove inline tag markup (`<b>..</b>` and the like), leaving plain text.
pub fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// First two whitespace-separated tokens of the full road address.
fn short_address(road_address: &str) -> String {
    road_address
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Descriptions longer than 80 characters are cut to exactly 80 characters
/// with an ellipsis appended; shorter ones pass through unchanged.
fn truncate_description(description: &str) -> String {
    let mut chars = description.char_indices();
    match chars.nth(DESCRIPTION_MAX_CHARS) {
        None => description.to_string(),
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len());
            out.push_str(&description[..byte_idx]);
            out.push_str(ELLIPSIS);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NO_DATA, NO_DESCRIPTION, PreviewPayload, build_preview, strip_markup};
    use crate::detail::{DetailRecord, ImageCandidate};

    fn ready(payload: PreviewPayload) -> super::PreviewContent {
        match payload {
            PreviewPayload::Ready(content) => content,
            PreviewPayload::Loading => panic!("expected ready payload"),
        }
    }

    #[test]
    fn missing_record_yields_all_fallbacks_and_no_image() {
        let content = ready(build_preview(None, &[]));
        assert_eq!(content.title, "");
        assert_eq!(content.category, NO_DATA);
        assert_eq!(content.telephone, NO_DATA);
        assert_eq!(content.road_address, NO_DATA);
        assert_eq!(content.short_address, NO_DATA);
        assert_eq!(content.description, NO_DESCRIPTION);
        assert_eq!(content.image_url, None);
    }

    #[test]
    fn title_markup_is_stripped() {
        let detail = DetailRecord {
            title: "<b>Cafe</b> Seoul".into(),
            ..DetailRecord::default()
        };
        let content = ready(build_preview(Some(&detail), &[]));
        assert_eq!(content.title, "Cafe Seoul");
    }

    #[test]
    fn strip_markup_handles_nested_and_unclosed_tags() {
        assert_eq!(strip_markup("a<b><i>b</i></b>c"), "abc");
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("cut<b off"), "cut");
    }

    #[test]
    fn short_address_takes_first_two_tokens() {
        let detail = DetailRecord {
            road_address: "Seoul Gangnam-gu Teheran-ro 123".into(),
            ..DetailRecord::default()
        };
        let content = ready(build_preview(Some(&detail), &[]));
        assert_eq!(content.short_address, "Seoul Gangnam-gu");
        assert_eq!(content.road_address, "Seoul Gangnam-gu Teheran-ro 123");
    }

    #[test]
    fn description_truncation_boundaries() {
        for (len, expect_truncated) in [(79, false), (80, false), (81, true), (160, true)] {
            let detail = DetailRecord {
                description: "d".repeat(len),
                ..DetailRecord::default()
            };
            let content = ready(build_preview(Some(&detail), &[]));
            if expect_truncated {
                assert_eq!(content.description.len(), 80 + 3, "len {len}");
                assert_eq!(&content.description[..80], "d".repeat(80).as_str());
                assert!(content.description.ends_with("..."));
            } else {
                assert_eq!(content.description, "d".repeat(len), "len {len}");
            }
        }
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let detail = DetailRecord {
            description: "가".repeat(81),
            ..DetailRecord::default()
        };
        let content = ready(build_preview(Some(&detail), &[]));
        assert_eq!(content.description.chars().count(), 80 + 3);
        assert!(content.description.ends_with("..."));
    }

    #[test]
    fn best_image_url_comes_from_ranker() {
        let images = vec![
            ImageCandidate {
                thumbnail_url: "low".into(),
                width: "10".into(),
                height: "10".into(),
            },
            ImageCandidate {
                thumbnail_url: "high".into(),
                width: "500".into(),
                height: "500".into(),
            },
        ];
        let content = ready(build_preview(None, &images));
        assert_eq!(content.image_url.as_deref(), Some("high"));
    }

    #[test]
    fn unusable_images_omit_the_image_section() {
        let images = vec![ImageCandidate {
            thumbnail_url: "broken".into(),
            width: "".into(),
            height: "600".into(),
        }];
        let content = ready(build_preview(None, &images));
        assert_eq!(content.image_url, None);
    }
}
