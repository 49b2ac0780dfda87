// SPDX-License-Identifier: MIT

//!
//! Time controlled WMS tile layers, based on Leaflet.TimeDimension
//! (<https://github.com/socib/Leaflet.TimeDimension>)
//!
//! The WMS layers must be created and added to the map before being handed to
//! [`TimestampedWmsTileLayers`], which only refers to them by name:
//!
//! ```
//! use timemap_core::{Figure, Map, MapView, WmsTileLayer};
//! use timemap_plugins::{LayerRef, TimeControlOptions, TimestampedWmsTileLayers};
//!
//! let mut figure = Figure::new();
//! let map = figure.add_child(Map::new(MapView::default()));
//!
//! let w1 = WmsTileLayer::new("http://this.wms.server/ncWMS/wms", "test_data")
//!     .with_format("image/png")
//!     .with_transparent(true);
//! let w2 = WmsTileLayer::new("http://this.wms.server/ncWMS/wms", "test_data_2");
//! let layers = vec![LayerRef::from(&w1), LayerRef::from(&w2)];
//! figure.add_child_to(map, w1).unwrap();
//! figure.add_child_to(map, w2).unwrap();
//!
//! let time = TimestampedWmsTileLayers::new(layers, TimeControlOptions::default());
//! figure.add_child_to(map, time).unwrap();
//!
//! let html = figure.render().unwrap();
//! assert!(html.contains("L.control.timeDimension"));
//! ```
//!

use crate::TimeControlOptions;
use log::debug;
use std::fmt::Write;
use timemap_core::{
    CssLink, Element, ElementName, JavascriptLink, Link, RenderContext, RenderError,
    TileLayerLike, WmsTileLayer, WmsVersion, js_string,
};

/// Logical name of the layer group (as shown to the parent composition)
pub const TIMESTAMPED_WMS_LAYER_NAME: &str = "timestampedwms";

/// The scripts and stylesheets the time control needs, keyed so that several
/// time controls on the same page only include them once
const HEADER_LINKS: [(&str, ResourceKind, &str); 6] = [
    (
        "jquery2.0.0",
        ResourceKind::Javascript,
        "https://cdnjs.cloudflare.com/ajax/libs/jquery/2.0.0/jquery.min.js",
    ),
    (
        "jqueryui1.10.2",
        ResourceKind::Javascript,
        "https://cdnjs.cloudflare.com/ajax/libs/jqueryui/1.10.2/jquery-ui.min.js",
    ),
    (
        "iso8601",
        ResourceKind::Javascript,
        "https://rawgit.com/nezasa/iso8601-js-period/master/iso8601.min.js",
    ),
    (
        "leaflet.timedimension",
        ResourceKind::Javascript,
        "https://rawgit.com/socib/Leaflet.TimeDimension/master/dist/leaflet.timedimension.min.js",
    ),
    (
        "highlight.js_css",
        ResourceKind::Css,
        "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/8.4/styles/default.min.css",
    ),
    (
        "leaflet.timedimension_css",
        ResourceKind::Css,
        "http://apps.socib.es/Leaflet.TimeDimension/dist/leaflet.timedimension.control.min.css",
    ),
];

#[derive(Clone, Copy, Debug)]
enum ResourceKind {
    Javascript,
    Css,
}

/// A (non-owning) reference to a tile layer that's owned by the page tree
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerRef {
    name: ElementName,
    wms_version: Option<WmsVersion>,
}

impl LayerRef {
    /// Refer to any tile-layer-like object
    pub fn of(layer: &dyn TileLayerLike) -> Self {
        Self {
            name: layer.name().clone(),
            wms_version: layer.wms_version(),
        }
    }

    pub fn name(&self) -> &ElementName {
        &self.name
    }

    pub fn wms_version(&self) -> Option<WmsVersion> {
        self.wms_version
    }
}

impl<T: TileLayerLike> From<&T> for LayerRef {
    fn from(value: &T) -> Self {
        LayerRef::of(value)
    }
}

/// The layers handed to [`TimestampedWmsTileLayers`]: a single WMS layer, or
/// a sequence of tile-layer-like references
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerSelection {
    Single(LayerRef),
    Many(Vec<LayerRef>),
}

impl LayerSelection {
    fn into_layers(self) -> Vec<LayerRef> {
        match self {
            LayerSelection::Single(layer) => vec![layer],
            LayerSelection::Many(layers) => layers,
        }
    }
}

impl From<&WmsTileLayer> for LayerSelection {
    fn from(value: &WmsTileLayer) -> Self {
        LayerSelection::Single(LayerRef::from(value))
    }
}

impl From<LayerRef> for LayerSelection {
    fn from(value: LayerRef) -> Self {
        LayerSelection::Many(vec![value])
    }
}

impl From<Vec<LayerRef>> for LayerSelection {
    fn from(value: Vec<LayerRef>) -> Self {
        LayerSelection::Many(value)
    }
}

impl<const N: usize> From<[LayerRef; N]> for LayerSelection {
    fn from(value: [LayerRef; N]) -> Self {
        LayerSelection::Many(value.to_vec())
    }
}

impl FromIterator<LayerRef> for LayerSelection {
    fn from_iter<I: IntoIterator<Item = LayerRef>>(iter: I) -> Self {
        LayerSelection::Many(iter.into_iter().collect())
    }
}

/// Adds a time control (Leaflet.TimeDimension) to one or more WMS tile layers.
/// Must be attached to the map the layers were added to.
#[derive(Clone, Debug)]
pub struct TimestampedWmsTileLayers {
    name: ElementName,
    options: TimeControlOptions,
    layers: Vec<LayerRef>,
}

impl TimestampedWmsTileLayers {
    /// Create the time control for the given layer(s)
    pub fn new<L: Into<LayerSelection>>(data: L, options: TimeControlOptions) -> Self {
        Self {
            name: ElementName::generate("timestamped_wms_tile_layers"),
            options,
            layers: data.into().into_layers(),
        }
    }

    /// The fixed logical name of the layer group
    pub fn layer_name(&self) -> &'static str {
        TIMESTAMPED_WMS_LAYER_NAME
    }

    pub fn options(&self) -> &TimeControlOptions {
        &self.options
    }

    pub fn layers(&self) -> &[LayerRef] {
        &self.layers
    }

    /// Generate the script, addressed to the `parent` map
    pub fn script(&self, parent: &ElementName) -> Result<String, RenderError> {
        let options = &self.options;
        let mut script = String::new();

        // `write!` to a `String` can't fail
        let _ = writeln!(script, "{parent}.timeDimension = L.timeDimension({{");
        let _ = writeln!(script, "    period: {},", js_string(&options.period));
        if let Some(time_interval) = options.effective_time_interval() {
            let _ = writeln!(script, "    timeInterval: {},", js_string(time_interval));
        }
        let _ = writeln!(script, "}});");

        let _ = writeln!(
            script,
            "{parent}.timeDimensionControl = L.control.timeDimension({{"
        );
        let _ = writeln!(script, "    position: 'bottomleft',");
        let _ = writeln!(script, "    autoPlay: {},", options.auto_play);
        let _ = writeln!(script, "    playerOptions: {{");
        let _ = writeln!(
            script,
            "        transitionTime: {},",
            options.transition_time
        );
        let _ = writeln!(script, "        loop: {}", options.loop_playback);
        let _ = writeln!(script, "    }}");
        let _ = writeln!(script, "}});");
        let _ = writeln!(
            script,
            "{parent}.addControl({parent}.timeDimensionControl);"
        );

        for layer in &self.layers {
            let version = layer
                .wms_version
                .ok_or_else(|| RenderError::MissingAttribute {
                    element: layer.name.clone(),
                    attribute: "version",
                })?;
            let name = &layer.name;
            let _ = writeln!(script);
            let _ = writeln!(script, "var {name} = L.timeDimension.layer.wms({name}, {{");
            let _ = writeln!(script, "    updateTimeDimension: false,");
            let _ = writeln!(script, "    wmsVersion: '{version}',");
            let _ = writeln!(script, "}}).addTo({parent});");
        }

        Ok(script)
    }
}

impl Element for TimestampedWmsTileLayers {
    fn name(&self) -> &ElementName {
        &self.name
    }

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        if !ctx.is_attached() {
            return Err(RenderError::Detached(self.name.clone()));
        }
        let parent = ctx.parent_name(&self.name)?.clone();
        let script = self.script(&parent)?;
        debug!(
            "Rendering time control `{}` for {} layer(s)",
            self.name,
            self.layers.len()
        );

        let page = ctx.page(&self.name)?;
        page.script.add_child(script, self.name.as_str());
        for (key, kind, url) in HEADER_LINKS {
            let link: Link = match kind {
                ResourceKind::Javascript => JavascriptLink::new(url).into(),
                ResourceKind::Css => CssLink::new(url).into(),
            };
            page.header.add_child(link, key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TransitionTime;
    use timemap_core::{Figure, Map, MapView, NodeId, TileLayer};
    use timemap_macros::wms_version;

    fn wms_layer(version: WmsVersion) -> WmsTileLayer {
        WmsTileLayer::new("http://this.wms.server/ncWMS/wms", "test_data")
            .with_format("image/png")
            .with_transparent(true)
            .with_version(version)
    }

    fn figure_with_map() -> (Figure, NodeId, ElementName) {
        let mut figure = Figure::new();
        let map = Map::new(MapView::default());
        let map_name = map.name().clone();
        let map_id = figure.add_child(map);
        (figure, map_id, map_name)
    }

    /// Count the layer adapters in a script
    fn adapter_count(script: &str) -> usize {
        script.matches("L.timeDimension.layer.wms(").count()
    }

    #[test]
    fn single_layer_defaults() {
        let name = ElementName::from("L1").unwrap();
        let layer = LayerRef {
            name: name.clone(),
            wms_version: Some(wms_version!("1.3.0")),
        };
        let time = TimestampedWmsTileLayers::new(layer, TimeControlOptions::default());
        let parent = ElementName::from("map_1").unwrap();
        let script = time.script(&parent).unwrap();

        assert_eq!(adapter_count(&script), 1);
        assert!(script.contains("var L1 = L.timeDimension.layer.wms(L1, {"));
        assert!(script.contains("updateTimeDimension: false,"));
        assert!(script.contains("wmsVersion: '1.3.0',"));
        assert!(script.contains("}).addTo(map_1);"));
    }

    #[test]
    fn full_script() {
        let layer = LayerRef {
            name: ElementName::from("L1").unwrap(),
            wms_version: Some(WmsVersion::V1_1_1),
        };
        let time = TimestampedWmsTileLayers::new(layer, TimeControlOptions::default());
        let script = time.script(&ElementName::from("m").unwrap()).unwrap();
        let expected = r#"m.timeDimension = L.timeDimension({
    period: "P1D",
});
m.timeDimensionControl = L.control.timeDimension({
    position: 'bottomleft',
    autoPlay: false,
    playerOptions: {
        transitionTime: 200,
        loop: false
    }
});
m.addControl(m.timeDimensionControl);

var L1 = L.timeDimension.layer.wms(L1, {
    updateTimeDimension: false,
    wmsVersion: '1.1.1',
}).addTo(m);
"#;
        assert_eq!(script, expected);
    }

    #[test]
    fn single_wms_layer_is_wrapped() {
        let layer = wms_layer(WmsVersion::V1_3_0);
        let time = TimestampedWmsTileLayers::new(&layer, TimeControlOptions::default());
        assert_eq!(time.layers(), &[LayerRef::from(&layer)]);
        assert_eq!(time.layer_name(), "timestampedwms");
    }

    #[test]
    fn playback_options() {
        let options = TimeControlOptions {
            transition_time: TransitionTime::from_millis(500),
            loop_playback: true,
            auto_play: true,
            ..Default::default()
        };
        let time = TimestampedWmsTileLayers::new(Vec::<LayerRef>::new(), options.clone());
        assert_eq!(time.options(), &options);
        let script = time.script(&ElementName::from("m").unwrap()).unwrap();
        assert!(script.contains("autoPlay: true,"));
        assert!(script.contains("transitionTime: 500,"));
        assert!(script.contains("loop: true"));

        let time = TimestampedWmsTileLayers::new(
            Vec::<LayerRef>::new(),
            TimeControlOptions::default(),
        );
        let script = time.script(&ElementName::from("m").unwrap()).unwrap();
        assert!(script.contains("autoPlay: false,"));
        assert!(script.contains("transitionTime: 200,"));
        assert!(script.contains("loop: false"));
    }

    #[test]
    fn time_interval() {
        let parent = ElementName::from("m").unwrap();

        let time = TimestampedWmsTileLayers::new(
            Vec::<LayerRef>::new(),
            TimeControlOptions::default(),
        );
        assert!(!time.script(&parent).unwrap().contains("timeInterval"));

        let options = TimeControlOptions {
            time_interval: Some(String::from("2016-01-01/2016-01-08")),
            ..Default::default()
        };
        let time = TimestampedWmsTileLayers::new(Vec::<LayerRef>::new(), options);
        assert!(
            time.script(&parent)
                .unwrap()
                .contains(r#"timeInterval: "2016-01-01/2016-01-08","#)
        );
    }

    #[test]
    fn many_layers_in_order() {
        let layers: Vec<WmsTileLayer> = vec![
            wms_layer(WmsVersion::V1_3_0),
            wms_layer(WmsVersion::V1_1_1),
            wms_layer(WmsVersion::V1_3_0),
        ];
        let time = TimestampedWmsTileLayers::new(
            layers.iter().map(LayerRef::from).collect::<LayerSelection>(),
            TimeControlOptions::default(),
        );
        let script = time.script(&ElementName::from("m").unwrap()).unwrap();
        assert_eq!(adapter_count(&script), 3);

        let mut last = 0;
        for layer in &layers {
            let declaration = format!(
                "var {name} = L.timeDimension.layer.wms({name}, {{\n    updateTimeDimension: false,\n    wmsVersion: '{version}',",
                name = TileLayerLike::name(layer),
                version = layer.version(),
            );
            let position = script.find(&declaration).unwrap();
            assert!(position >= last);
            last = position;
        }
    }

    #[test]
    fn empty_and_duplicate_layers() {
        let parent = ElementName::from("m").unwrap();

        let time = TimestampedWmsTileLayers::new(
            Vec::<LayerRef>::new(),
            TimeControlOptions::default(),
        );
        assert_eq!(adapter_count(&time.script(&parent).unwrap()), 0);

        let layer = LayerRef::from(&wms_layer(WmsVersion::V1_3_0));
        let time =
            TimestampedWmsTileLayers::new([layer.clone(), layer], TimeControlOptions::default());
        assert_eq!(adapter_count(&time.script(&parent).unwrap()), 2);
    }

    #[test]
    fn render_in_figure() {
        let (mut figure, map_id, map_name) = figure_with_map();
        let layer = wms_layer(WmsVersion::V1_3_0);
        let time = TimestampedWmsTileLayers::new(&layer, TimeControlOptions::default());
        let time_name = time.name().clone();
        figure.add_child_to(map_id, layer).unwrap();
        figure.add_child_to(map_id, time).unwrap();

        let html = figure.render().unwrap();
        let script = figure.script().get(time_name.as_str()).unwrap();
        assert!(script.starts_with(&format!("{map_name}.timeDimension = L.timeDimension({{")));
        assert!(script.contains(&format!("}}).addTo({map_name});")));
        assert!(html.contains(script.as_str()));

        // The time dimension script comes after the layer it wraps
        let layer_position = html.find("L.tileLayer.wms(").unwrap();
        let time_position = html.find("L.timeDimension.layer.wms(").unwrap();
        assert!(layer_position < time_position);
    }

    #[test]
    fn header_links_registered_once() {
        let (mut figure, map_id, _) = figure_with_map();
        for _ in 0..2 {
            let layer = wms_layer(WmsVersion::V1_3_0);
            let time = TimestampedWmsTileLayers::new(&layer, TimeControlOptions::default());
            figure.add_child_to(map_id, layer).unwrap();
            figure.add_child_to(map_id, time).unwrap();
        }
        let html = figure.render().unwrap();

        for (key, _, url) in HEADER_LINKS {
            assert!(figure.header().contains_key(key));
            assert_eq!(html.matches(url).count(), 1, "{url}");
        }

        // Leaflet's own JS and CSS plus the 6 time dimension links
        assert_eq!(figure.header().len(), 8);
        let scripts = figure.header().iter().filter(|(_, l)| l.is_javascript());
        let sheets = figure.header().iter().filter(|(_, l)| l.is_css());
        assert_eq!(scripts.count(), 5);
        assert_eq!(sheets.count(), 3);

        // Script includes keep their order
        let keys: Vec<&str> = figure.header().keys().collect();
        let position = |key: &str| keys.iter().position(|k| *k == key).unwrap();
        assert!(position("jquery2.0.0") < position("jqueryui1.10.2"));
        assert!(position("jqueryui1.10.2") < position("iso8601"));
        assert!(position("iso8601") < position("leaflet.timedimension"));
        assert!(position("highlight.js_css") < position("leaflet.timedimension_css"));
    }

    #[test]
    fn detached_render_fails() {
        let layer = wms_layer(WmsVersion::V1_3_0);
        let time = TimestampedWmsTileLayers::new(&layer, TimeControlOptions::default());
        let parent = ElementName::from("m").unwrap();

        let mut ctx = RenderContext::detached(Some(&parent));
        let error = time.render(&mut ctx).unwrap_err();
        assert_eq!(error, RenderError::Detached(time.name().clone()));
        assert!(error.to_string().contains("not in a Figure"));

        let mut ctx = RenderContext::detached(None);
        assert!(time.render(&mut ctx).is_err());
    }

    #[test]
    fn layer_without_version_fails_at_render() {
        let (mut figure, map_id, _) = figure_with_map();
        let tiles = TileLayer::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png");
        let tiles_name = TileLayerLike::name(&tiles).clone();

        // No error at construction
        let time = TimestampedWmsTileLayers::new(
            LayerRef::from(&tiles),
            TimeControlOptions::default(),
        );
        let time_name = time.name().clone();
        figure.add_child_to(map_id, tiles).unwrap();
        figure.add_child_to(map_id, time).unwrap();

        assert_eq!(
            figure.render(),
            Err(RenderError::MissingAttribute {
                element: tiles_name,
                attribute: "version",
            })
        );
        assert!(!figure.script().contains_key(time_name.as_str()));
        assert!(!figure.header().contains_key("leaflet.timedimension"));
    }
}
