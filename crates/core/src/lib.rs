// SPDX-License-Identifier: MIT

//!
//! *Part of the wider timemap project*
//!
//! This crate defines the page composition types used across the timemap
//! project: the [`Figure`] page root, the [`Element`] capability every node in
//! the page tree implements, the shared header/html/script [`Section`]s, and
//! the basic Leaflet elements ([`Map`], [`TileLayer`], [`WmsTileLayer`]).
//!
//! Plugins (e.g. the time controlled WMS layers in `timemap-plugins`) build on
//! top of these types.
//!

mod element;
mod figure;
mod helpers;
mod link;
mod map;
mod name;
mod section;
mod tile_layer;
mod wms_version;

pub use element::*;
pub use figure::*;
pub use link::*;
pub use map::*;
pub use name::*;
pub use section::*;
pub use tile_layer::*;
pub use wms_version::*;

pub use helpers::js_string;

/// Mark that a type is a tile layer (or behaves like one) so that other
/// elements can refer to it by name in the generated script
pub trait TileLayerLike {
    /// Get the layer's generated name (a script-safe identifier)
    fn name(&self) -> &ElementName;

    /// Get the WMS protocol version, if the layer is a WMS layer
    fn wms_version(&self) -> Option<WmsVersion>;
}
