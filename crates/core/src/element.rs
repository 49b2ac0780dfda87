// SPDX-License-Identifier: MIT

//!
//! The [`Element`] capability implemented by every node in the page tree, and
//! the context passed to an element when it's rendered
//!

use crate::{ElementName, Link, Section, TileLayerLike};
use std::fmt::Debug;
use thiserror::Error;

/// Errors that can arise while rendering an element
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The element isn't (directly or transitively) attached to a `Figure`
    #[error("You cannot render `{0}` if it's not in a Figure")]
    Detached(ElementName),

    /// A referenced element is missing an attribute the generated script
    /// needs
    #[error("`{element}` has no `{attribute}` attribute")]
    MissingAttribute {
        element: ElementName,
        attribute: &'static str,
    },
}

/// The shared sections of the page that elements render into
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    /// Scripts and stylesheets included in `<head>`
    pub header: Section<Link>,

    /// Fragments placed in `<body>`
    pub html: Section<String>,

    /// Script blocks placed in the page's `<script>`
    pub script: Section<String>,
}

/// Everything an element can see of the tree while it's rendered: the name of
/// its parent and, when attached to a `Figure`, the page sections
#[derive(Debug)]
pub struct RenderContext<'a> {
    parent: Option<&'a ElementName>,
    page: Option<&'a mut Page>,
}

impl<'a> RenderContext<'a> {
    /// Context for an element attached (directly or transitively) to a
    /// `Figure`
    pub fn attached(parent: &'a ElementName, page: &'a mut Page) -> Self {
        Self {
            parent: Some(parent),
            page: Some(page),
        }
    }

    /// Context for an element that isn't part of a `Figure`
    pub fn detached(parent: Option<&'a ElementName>) -> Self {
        Self { parent, page: None }
    }

    pub fn is_attached(&self) -> bool {
        self.page.is_some()
    }

    /// The parent's name, which is the variable generated scripts address
    pub fn parent_name(&self, element: &ElementName) -> Result<&ElementName, RenderError> {
        self.parent
            .ok_or_else(|| RenderError::Detached(element.clone()))
    }

    /// The page sections of the `Figure` the element is attached to
    pub fn page(&mut self, element: &ElementName) -> Result<&mut Page, RenderError> {
        self.page
            .as_deref_mut()
            .ok_or_else(|| RenderError::Detached(element.clone()))
    }
}

/// A node in the page tree
pub trait Element: Debug {
    /// The element's generated name (a script-safe identifier)
    fn name(&self) -> &ElementName;

    /// Render the element into the page sections of the context
    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError>;

    /// The element as a tile layer, if it is one
    fn as_tile_layer(&self) -> Option<&dyn TileLayerLike> {
        None
    }
}
