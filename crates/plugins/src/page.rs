// SPDX-License-Identifier: MIT

//!
//! JSON page descriptions: a map, the WMS layers on it and (optionally) a time
//! control for those layers
//!

use crate::{LayerRef, TimeControlOptions, TimestampedWmsTileLayers};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use timemap_core::{Figure, Map, MapView, RenderError, TreeError, WmsTileLayer, WmsVersion};

/// Errors that can arise when loading or building a page
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Could not read the page description: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// One WMS layer on the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WmsLayerDescription {
    pub url: String,

    /// Comma separated list of the server's layers
    pub layers: String,

    #[serde(default)]
    pub styles: String,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default)]
    pub transparent: bool,

    #[serde(default)]
    pub version: WmsVersion,

    #[serde(default)]
    pub attribution: Option<String>,

    /// Extra request parameters (e.g. `COLORSCALERANGE`)
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

fn default_format() -> String {
    String::from("image/jpeg")
}

impl WmsLayerDescription {
    fn to_layer(&self) -> WmsTileLayer {
        let mut layer = WmsTileLayer::new(&self.url, &self.layers)
            .with_styles(&self.styles)
            .with_format(&self.format)
            .with_transparent(self.transparent)
            .with_version(self.version);
        if let Some(attribution) = &self.attribution {
            layer = layer.with_attribution(attribution);
        }
        for (key, value) in &self.params {
            layer = layer.with_param(key, value);
        }
        layer
    }
}

/// A whole page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageDescription {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub map: MapView,

    #[serde(default)]
    pub wms_layers: Vec<WmsLayerDescription>,

    /// Add a time control for all the WMS layers
    #[serde(default)]
    pub time_control: Option<TimeControlOptions>,
}

impl PageDescription {
    /// Load a page description from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PageError> {
        let path = path.as_ref();
        info!("Loading page description from {}", path.display());
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let page: PageDescription = serde_json::from_str(json)?;
        debug!("Page description loaded = {page:?}");
        Ok(page)
    }

    /// Build the figure the page describes
    pub fn build(&self) -> Result<Figure, PageError> {
        let mut figure = Figure::new();
        if let Some(title) = &self.title {
            figure = figure.with_title(title);
        }
        let map = figure.add_child(Map::new(self.map));

        let mut layers = Vec::with_capacity(self.wms_layers.len());
        for description in &self.wms_layers {
            let id = figure.add_child_to(map, description.to_layer())?;
            if let Some(layer) = figure.tile_layer(id) {
                layers.push(LayerRef::of(layer));
            }
        }

        if let Some(options) = &self.time_control {
            if layers.is_empty() {
                warn!("The time control has no WMS layers to animate");
            }
            let time = TimestampedWmsTileLayers::new(layers, options.clone());
            figure.add_child_to(map, time)?;
        }

        Ok(figure)
    }

    /// Build and render the page to an HTML document
    pub fn render(&self) -> Result<String, PageError> {
        Ok(self.build()?.render()?)
    }
}
