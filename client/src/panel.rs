//! Presentation step for the preview panel: turns a [`PreviewPayload`] into
//! the HTML string handed to the SDK's info window. Kept separate from
//! content assembly so the view model stays testable and the markup stays
//! swappable.

#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use placemap_shared::{PreviewContent, PreviewPayload};

pub fn render_panel_html(payload: &PreviewPayload) -> String {
    match payload {
        PreviewPayload::Loading => r#"<div style="padding:10px;">Loading…</div>"#.to_string(),
        PreviewPayload::Ready(content) => render_content(content),
    }
}

fn render_content(content: &PreviewContent) -> String {
    let image_html = match &content.image_url {
        Some(url) => format!(
            r#"<div style="width:100%;height:200px;border-radius:12px;overflow:hidden;margin-bottom:12px;"><img src="{src}" alt="{alt}" style="width:100%;height:100%;object-fit:cover;" /></div>"#,
            src = escape_html(url),
            alt = escape_html(&content.title),
        ),
        None => String::new(),
    };

    format!(
        concat!(
            r#"<div class="place-preview" style="max-width:320px;background:white;border-radius:16px;overflow:hidden;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;">"#,
            "{image}",
            r#"<div style="padding:16px;">"#,
            r#"<h3 style="margin:0 0 4px;font-weight:700;font-size:18px;color:#333;">{title}</h3>"#,
            r#"<div style="display:flex;align-items:center;gap:4px;margin-bottom:4px;">"#,
            r#"<span style="color:#ffa500;font-size:14px;">&#9733;</span>"#,
            r#"<span style="font-weight:600;font-size:14px;">{rating}</span>"#,
            r#"<span style="color:#666;font-size:12px;">{reviews}</span>"#,
            "</div>",
            r#"<div style="margin-bottom:8px;color:#666;font-size:13px;">{category} &bull; {short_address}</div>"#,
            r#"<p style="margin:0 0 12px;color:#666;font-size:13px;line-height:1.4;">{description}</p>"#,
            r#"<div style="border-top:1px solid #eee;padding-top:12px;font-size:12px;color:#666;">"#,
            r#"<div style="margin-bottom:4px;"><strong>Tel:</strong> {telephone}</div>"#,
            r#"<div><strong>Address:</strong> {road_address}</div>"#,
            "</div></div></div>",
        ),
        image = image_html,
        title = escape_html(&content.title),
        rating = escape_html(&content.rating),
        reviews = escape_html(&content.rating_reviews),
        category = escape_html(&content.category),
        short_address = escape_html(&content.short_address),
        description = escape_html(&content.description),
        telephone = escape_html(&content.telephone),
        road_address = escape_html(&content.road_address),
    )
}

/// Every rendered field comes from external search data; nothing may reach
/// the panel unescaped.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_panel_html};
    use placemap_shared::{DetailRecord, ImageCandidate, PreviewPayload, build_preview};

    fn ready_payload(detail: DetailRecord, images: &[ImageCandidate]) -> PreviewPayload {
        build_preview(Some(&detail), images)
    }

    #[test]
    fn loading_renders_placeholder() {
        let html = render_panel_html(&PreviewPayload::Loading);
        assert!(html.contains("Loading…"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn ready_without_image_omits_the_image_block() {
        let html = render_panel_html(&ready_payload(DetailRecord::default(), &[]));
        assert!(!html.contains("<img"));
        assert!(html.contains("no data"));
    }

    #[test]
    fn ready_with_image_embeds_the_thumbnail_url() {
        let images = vec![ImageCandidate {
            thumbnail_url: "https://img.example/a.jpg".into(),
            width: "640".into(),
            height: "480".into(),
        }];
        let html = render_panel_html(&ready_payload(DetailRecord::default(), &images));
        assert!(html.contains(r#"src="https://img.example/a.jpg""#));
    }

    #[test]
    fn external_fields_are_escaped() {
        let detail = DetailRecord {
            description: r#"<script>alert("x")</script>"#.into(),
            telephone: "1 < 2 & 3".into(),
            ..DetailRecord::default()
        };
        let html = render_panel_html(&ready_payload(detail, &[]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn escape_html_covers_the_dangerous_set() {
        assert_eq!(escape_html(r#"<a href="x" id='y'>&"#), "&lt;a href=&quot;x&quot; id=&#39;y&#39;&gt;&amp;");
    }
}
