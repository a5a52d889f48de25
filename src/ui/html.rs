//! Standalone HTML page with an interactive Leaflet map.
//!
//! The map payload is embedded as JSON and turned into markers client side,
//! so popup text is inserted with `textContent` and never parsed as markup.

use crossmap_core::{has_filters, FacetDefinition, FilterCriteria, MapPayload};
use serde::Serialize;
use std::fmt::Write;

use super::formatting::format_active_filters;
use crate::state::QueryResponse;

const LEAFLET_VERSION: &str = "1.9.4";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const POPUP_MAX_WIDTH: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    pub title: String,
    pub zoom: u8,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: "踏切マップ".to_string(),
            zoom: 12,
        }
    }
}

/// Settings handed to the page script alongside the payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapConfig<'a> {
    zoom: u8,
    tile_url: &'a str,
    attribution: &'a str,
    popup_max_width: u32,
    payload: &'a MapPayload,
}

/// Render a complete page for one query
pub fn render_html_page(
    criteria: &FilterCriteria,
    response: &QueryResponse<'_>,
    options: &HtmlOptions,
) -> serde_json::Result<String> {
    let mut body = String::new();

    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&options.title));

    if has_filters(criteria) {
        body.push_str("<ul class=\"filters\">\n");
        for filter in &format_active_filters(criteria) {
            let _ = writeln!(body, "  <li>{}</li>", escape_html(filter));
        }
        body.push_str("</ul>\n");
    }

    let _ = writeln!(
        body,
        "<p class=\"count\">該当件数: <strong>{}</strong>件</p>",
        response.count()
    );

    let script = match &response.map {
        Some(payload) => {
            body.push_str("<div id=\"map\"></div>\n");
            let config = MapConfig {
                zoom: options.zoom,
                tile_url: TILE_URL,
                attribution: TILE_ATTRIBUTION,
                popup_max_width: POPUP_MAX_WIDTH,
                payload,
            };
            format!(
                "<script type=\"application/json\" id=\"map-config\">{}</script>\n\
                 <script src=\"https://unpkg.com/leaflet@{}/dist/leaflet.js\"></script>\n\
                 <script>{}</script>\n",
                embed_json(&config)?,
                LEAFLET_VERSION,
                MAP_SCRIPT
            )
        }
        None => {
            body.push_str("<p class=\"no-map\">地図に表示できる踏切がありません。</p>\n");
            String::new()
        }
    };

    body.push_str(&render_facet_lists(response.facets));

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"ja\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@{version}/dist/leaflet.css\">\n\
         <style>{style}</style>\n\
         </head>\n\
         <body>\n\
         {body}\
         {script}\
         </body>\n\
         </html>\n",
        title = escape_html(&options.title),
        version = LEAFLET_VERSION,
        style = PAGE_STYLE,
        body = body,
        script = script,
    ))
}

fn render_facet_lists(facets: &[FacetDefinition]) -> String {
    let mut out = String::from("<section class=\"facets\">\n");

    for facet in facets {
        let _ = writeln!(
            out,
            "<details><summary>{} ({}件)</summary><ul>",
            escape_html(facet.label),
            facet.options.len()
        );
        for option in &facet.options {
            let _ = writeln!(out, "  <li>{}</li>", escape_html(option));
        }
        out.push_str("</ul></details>\n");
    }

    out.push_str("</section>\n");
    out
}

/// Serialize for a `<script type="application/json">` block. `<` only occurs
/// inside JSON strings, so escaping it keeps `</script>` out of the output.
fn embed_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 1rem; }
#map { height: 70vh; margin: 1rem 0; }
.filters { color: #444; }
.facets details { margin: 0.25rem 0; }";

const MAP_SCRIPT: &str = r#"
(function () {
  var config = JSON.parse(document.getElementById("map-config").textContent);
  var payload = config.payload;
  var map = L.map("map").setView([payload.center.lat, payload.center.lon], config.zoom);
  L.tileLayer(config.tileUrl, { attribution: config.attribution }).addTo(map);

  function row(parent, label, value) {
    var b = document.createElement("b");
    b.textContent = label + ": ";
    parent.appendChild(b);
    parent.appendChild(document.createTextNode(value));
    parent.appendChild(document.createElement("br"));
  }

  payload.markers.forEach(function (m) {
    var popup = document.createElement("div");
    row(popup, "踏切名", m.popup.name);
    row(popup, "線名", m.popup.lineName);
    row(popup, "キロ程", m.popup.formattedKilopost);
    var link = document.createElement("a");
    link.href = m.popup.mapLink;
    link.target = "_blank";
    link.rel = "noopener noreferrer";
    link.textContent = "Google Mapで開く";
    popup.appendChild(link);

    var marker = L.marker([m.lat, m.lon]).bindPopup(popup, { maxWidth: config.popupMaxWidth });
    if (m.tooltip) {
      marker.bindTooltip(m.tooltip);
    }
    marker.addTo(map);
  });
})();
"#;
