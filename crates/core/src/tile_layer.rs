// SPDX-License-Identifier: MIT

//!
//! Tile layers: plain XYZ tiles and WMS tiles
//!

use crate::{
    Element, ElementName, RenderContext, RenderError, TileLayerLike, WmsVersion, js_string,
};
use log::debug;
use serde_json::{Map as JsonMap, Value};
use std::collections::BTreeMap;

/// An XYZ tile layer (`L.tileLayer`)
#[derive(Clone, Debug)]
pub struct TileLayer {
    name: ElementName,
    url: String,
    attribution: Option<String>,
    max_zoom: Option<u8>,
}

impl TileLayer {
    /// Create a new tile layer from a `{z}/{x}/{y}` URL template
    pub fn new<S: ToString>(url: S) -> Self {
        Self {
            name: ElementName::generate("tile_layer"),
            url: url.to_string(),
            attribution: None,
            max_zoom: None,
        }
    }

    pub fn with_attribution<S: ToString>(mut self, attribution: S) -> Self {
        self.attribution = Some(attribution.to_string());
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn options(&self) -> Value {
        let mut options = JsonMap::new();
        if let Some(attribution) = &self.attribution {
            options.insert("attribution".into(), attribution.clone().into());
        }
        if let Some(max_zoom) = self.max_zoom {
            options.insert("maxZoom".into(), max_zoom.into());
        }
        Value::Object(options)
    }
}

impl TileLayerLike for TileLayer {
    fn name(&self) -> &ElementName {
        &self.name
    }

    fn wms_version(&self) -> Option<WmsVersion> {
        None
    }
}

impl Element for TileLayer {
    fn name(&self) -> &ElementName {
        &self.name
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let parent = ctx.parent_name(&self.name)?.clone();
        let script = format!(
            "var {name} = L.tileLayer({url}, {options}).addTo({parent});",
            name = self.name,
            url = js_string(&self.url),
            options = self.options(),
        );
        ctx.page(&self.name)?
            .script
            .add_child(script, self.name.as_str());
        Ok(())
    }

    fn as_tile_layer(&self) -> Option<&dyn TileLayerLike> {
        Some(self)
    }
}

/// A WMS tile layer (`L.tileLayer.wms`)
///
/// Should be created and added to the map before being handed to plugins that
/// refer to it (e.g. time controls).
#[derive(Clone, Debug)]
pub struct WmsTileLayer {
    name: ElementName,
    url: String,
    layers: String,
    styles: String,
    format: String,
    transparent: bool,
    version: WmsVersion,
    attribution: Option<String>,

    /// Extra (vendor specific) request parameters, e.g. `COLORSCALERANGE`
    params: BTreeMap<String, String>,
}

impl WmsTileLayer {
    /// Create a new WMS layer for the comma separated `layers` served at `url`
    pub fn new<U: ToString, L: ToString>(url: U, layers: L) -> Self {
        Self {
            name: ElementName::generate("wms_tile_layer"),
            url: url.to_string(),
            layers: layers.to_string(),
            styles: String::new(),
            format: String::from("image/jpeg"),
            transparent: false,
            version: WmsVersion::default(),
            attribution: None,
            params: BTreeMap::new(),
        }
    }

    pub fn with_styles<S: ToString>(mut self, styles: S) -> Self {
        self.styles = styles.to_string();
        self
    }

    pub fn with_format<S: ToString>(mut self, format: S) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_version(mut self, version: WmsVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_attribution<S: ToString>(mut self, attribution: S) -> Self {
        self.attribution = Some(attribution.to_string());
        self
    }

    /// Add an extra request parameter
    pub fn with_param<K: ToString, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn layers(&self) -> &str {
        &self.layers
    }

    pub fn version(&self) -> WmsVersion {
        self.version
    }

    fn options(&self) -> Value {
        let mut options = JsonMap::new();
        for (key, value) in &self.params {
            options.insert(key.clone(), value.clone().into());
        }
        options.insert("layers".into(), self.layers.clone().into());
        options.insert("styles".into(), self.styles.clone().into());
        options.insert("format".into(), self.format.clone().into());
        options.insert("transparent".into(), self.transparent.into());
        options.insert("version".into(), self.version.as_str().into());
        if let Some(attribution) = &self.attribution {
            options.insert("attribution".into(), attribution.clone().into());
        }
        Value::Object(options)
    }
}

impl TileLayerLike for WmsTileLayer {
    fn name(&self) -> &ElementName {
        &self.name
    }

    fn wms_version(&self) -> Option<WmsVersion> {
        Some(self.version)
    }
}

impl Element for WmsTileLayer {
    fn name(&self) -> &ElementName {
        &self.name
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let parent = ctx.parent_name(&self.name)?.clone();
        debug!("Rendering WMS layer `{}` ({})", self.layers, self.url);
        let script = format!(
            "var {name} = L.tileLayer.wms({url}, {options}).addTo({parent});",
            name = self.name,
            url = js_string(&self.url),
            options = self.options(),
        );
        ctx.page(&self.name)?
            .script
            .add_child(script, self.name.as_str());
        Ok(())
    }

    fn as_tile_layer(&self) -> Option<&dyn TileLayerLike> {
        Some(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Figure, Map, MapView};
    use timemap_macros::wms_version;

    #[test]
    fn wms_defaults() {
        let layer = WmsTileLayer::new("http://this.wms.server/ncWMS/wms", "test_data");
        assert_eq!(layer.version(), WmsVersion::V1_1_1);
        assert_eq!(layer.wms_version(), Some(WmsVersion::V1_1_1));
        assert_eq!(layer.layers(), "test_data");
        assert_eq!(layer.url(), "http://this.wms.server/ncWMS/wms");
        assert!(layer.as_tile_layer().is_some());
        assert!(TileLayerLike::name(&layer).as_str().starts_with("wms_tile_layer_"));
    }

    #[test]
    fn xyz_has_no_wms_version() {
        let layer = TileLayer::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png");
        assert_eq!(layer.wms_version(), None);
        assert_eq!(layer.url(), "https://tile.openstreetmap.org/{z}/{x}/{y}.png");
    }

    #[test]
    fn wms_render() {
        let layer = WmsTileLayer::new("http://this.wms.server/ncWMS/wms", "test_data")
            .with_format("image/png")
            .with_transparent(true)
            .with_version(wms_version!("1.3.0"))
            .with_param("COLORSCALERANGE", "0,10");
        let name = Element::name(&layer).clone();

        let mut figure = Figure::new();
        let map = Map::new(MapView::default());
        let map_name = map.name().clone();
        let map_id = figure.add_child(map);
        figure.add_child_to(map_id, layer).unwrap();
        figure.render_elements().unwrap();

        let script = figure.script().get(name.as_str()).unwrap();
        assert_eq!(
            script,
            &format!(
                concat!(
                    r#"var {name} = L.tileLayer.wms("http://this.wms.server/ncWMS/wms", "#,
                    r#"{{"COLORSCALERANGE":"0,10","format":"image/png","layers":"test_data","#,
                    r#""styles":"","transparent":true,"version":"1.3.0"}}).addTo({map});"#,
                ),
                name = name,
                map = map_name,
            )
        );
    }

    #[test]
    fn xyz_render() {
        let layer = TileLayer::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png")
            .with_attribution("OSM")
            .with_max_zoom(19);
        let name = Element::name(&layer).clone();

        let mut figure = Figure::new();
        figure.add_child(layer);
        figure.render_elements().unwrap();

        let script = figure.script().get(name.as_str()).unwrap();
        assert!(script.contains(r#"L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {"attribution":"OSM","maxZoom":19})"#));
        assert!(script.ends_with(&format!(".addTo({});", figure.name())));
    }
}
