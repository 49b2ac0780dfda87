// SPDX-License-Identifier: MIT

//!
//! The Leaflet map container
//!

use crate::helpers::escape_html_attr;
use crate::{CssLink, Element, ElementName, JavascriptLink, RenderContext, RenderError};
use serde::{Deserialize, Serialize};
use serde_json::json;

const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Where the map starts, and how far it's zoomed in
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// `[latitude, longitude]`
    pub location: [f64; 2],

    pub zoom_start: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            location: [0.0, 0.0],
            zoom_start: 1,
        }
    }
}

/// A Leaflet map.  Tile layers and controls are attached to it as children.
#[derive(Clone, Debug)]
pub struct Map {
    name: ElementName,
    view: MapView,
}

impl Map {
    pub fn new(view: MapView) -> Self {
        Self {
            name: ElementName::generate("map"),
            view,
        }
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    /// The script that creates the map
    fn script(&self) -> String {
        let options = json!({
            "center": self.view.location,
            "zoom": self.view.zoom_start,
        });
        format!(
            "var {name} = L.map({id}, {options});",
            name = self.name,
            id = crate::js_string(self.name.as_str()),
        )
    }
}

impl Element for Map {
    fn name(&self) -> &ElementName {
        &self.name
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let page = ctx.page(&self.name)?;

        page.header
            .add_child(JavascriptLink::new(LEAFLET_JS).into(), "leaflet");
        page.header
            .add_child(CssLink::new(LEAFLET_CSS).into(), "leaflet_css");

        page.html.add_child(
            format!(
                r#"<div class="timemap-map" id="{}" style="width: 100%; height: 100vh;"></div>"#,
                escape_html_attr(self.name.as_str())
            ),
            self.name.as_str(),
        );
        page.script.add_child(self.script(), self.name.as_str());
        Ok(())
    }
}
