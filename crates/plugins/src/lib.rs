// SPDX-License-Identifier: MIT

//!
//! *Part of the wider timemap project*
//!
//! This crate holds the plugins that build on the `timemap-core` page tree:
//!
//! - [`TimestampedWmsTileLayers`], which adds a time control (play/pause and a
//! time slider, from Leaflet.TimeDimension) to WMS tile layers already on a map
//! - [`PageDescription`], a JSON description of a page (map, WMS layers and
//! time control) that can be turned into a [`timemap_core::Figure`]
//!

mod page;
mod time_control;
mod timestamped_wms;

pub use page::*;
pub use time_control::*;
pub use timestamped_wms::*;
