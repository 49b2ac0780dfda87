// SPDX-License-Identifier: MIT

//!
//! The [`Figure`] page root.  It owns the page tree and the shared page
//! sections, and renders everything to a standalone HTML document.
//!

use crate::helpers::escape_html_text;
use crate::{
    Element, ElementName, Link, Page, RenderContext, RenderError, Section, TileLayerLike,
};
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can arise when building the page tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("No element with id `{0}` in the figure")]
    UnknownParent(NodeId),
}

/// Identifies an element that's been added to a [`Figure`].  Only valid for
/// the figure that handed it out.
#[derive(derive_more::Display, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{index}")]
pub struct NodeId {
    figure: Uuid,
    index: usize,
}

/// An element plus its position in the tree
#[derive(Debug)]
struct Node {
    element: Box<dyn Element>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The root of the page tree
#[derive(Debug)]
pub struct Figure {
    id: Uuid,
    name: ElementName,
    title: Option<String>,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    page: Page,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Create a new, empty figure
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: ElementName::generate("figure"),
            title: None,
            nodes: Vec::new(),
            roots: Vec::new(),
            page: Page::default(),
        }
    }

    /// Set the document's `<title>`
    pub fn with_title<S: ToString>(mut self, title: S) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn name(&self) -> &ElementName {
        &self.name
    }

    /// Attach an element directly to the figure
    pub fn add_child<E: Element + 'static>(&mut self, element: E) -> NodeId {
        let id = self.push(Box::new(element), None);
        self.roots.push(id);
        id
    }

    /// Attach an element under an element already in the figure
    pub fn add_child_to<E: Element + 'static>(
        &mut self,
        parent: NodeId,
        element: E,
    ) -> Result<NodeId, TreeError> {
        if self.node(parent).is_none() {
            return Err(TreeError::UnknownParent(parent));
        }
        let id = self.push(Box::new(element), Some(parent));
        self.nodes[parent.index].children.push(id);
        Ok(id)
    }

    fn push(&mut self, element: Box<dyn Element>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId {
            figure: self.id,
            index: self.nodes.len(),
        };
        debug!("Attaching `{}` as {id}", element.name());
        self.nodes.push(Node {
            element,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// The node for an id handed out by this figure
    fn node(&self, id: NodeId) -> Option<&Node> {
        if id.figure == self.id {
            self.nodes.get(id.index)
        } else {
            None
        }
    }

    /// Get an element in the figure
    pub fn get(&self, id: NodeId) -> Option<&dyn Element> {
        self.node(id).map(|node| node.element.as_ref())
    }

    /// Get an element in the figure if it's a tile layer
    pub fn tile_layer(&self, id: NodeId) -> Option<&dyn TileLayerLike> {
        self.get(id).and_then(|element| element.as_tile_layer())
    }

    /// Get the parent of an element (`None` if it's attached to the figure
    /// itself, or isn't in the figure)
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Get the children of an element, in the order they were added
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Number of elements in the figure
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn header(&self) -> &Section<Link> {
        &self.page.header
    }

    pub fn html(&self) -> &Section<String> {
        &self.page.html
    }

    pub fn script(&self) -> &Section<String> {
        &self.page.script
    }

    /// Render every element (depth first, parents before children) into the
    /// page sections, without producing the document
    pub fn render_elements(&mut self) -> Result<(), RenderError> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index];
            let parent_name = match node.parent {
                Some(parent) => self.nodes[parent.index].element.name(),
                None => &self.name,
            };
            let mut ctx = RenderContext::attached(parent_name, &mut self.page);
            node.element.render(&mut ctx)?;
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(())
    }

    /// Render the whole figure to a standalone HTML document
    pub fn render(&mut self) -> Result<String, RenderError> {
        info!("Rendering figure with {} element(s)", self.nodes.len());
        self.render_elements()?;

        let mut head = vec![String::from(
            r#"<meta http-equiv="content-type" content="text/html; charset=UTF-8" />"#,
        )];
        if let Some(title) = &self.title {
            head.push(format!("<title>{}</title>", escape_html_text(title)));
        }
        head.extend(self.page.header.iter().map(|(_, link)| link.to_html()));

        let body: Vec<&str> = self.page.html.iter().map(|(_, html)| html.as_str()).collect();
        let script: Vec<&str> = self
            .page
            .script
            .iter()
            .map(|(_, script)| script.as_str())
            .collect();

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n    {}\n</head>\n<body>\n    {}\n</body>\n<script>\n{}\n</script>\n</html>\n",
            head.join("\n    "),
            body.join("\n    "),
            script.join("\n"),
        ))
    }
}
