// SPDX-License-Identifier: MIT

//!
//! External resources (scripts and stylesheets) registered on the page header
//!

use crate::helpers::escape_html_attr;

/// A `<script src="...">` include
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JavascriptLink {
    url: String,
}

/// A `<link rel="stylesheet" href="...">` include
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CssLink {
    url: String,
}

/// Any resource link that can be added to the header
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    Javascript(JavascriptLink),
    Css(CssLink),
}

impl JavascriptLink {
    pub fn new<S: ToString>(url: S) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Render the include tag
    pub fn to_html(&self) -> String {
        format!(r#"<script src="{}"></script>"#, escape_html_attr(&self.url))
    }
}

impl CssLink {
    pub fn new<S: ToString>(url: S) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Render the include tag
    pub fn to_html(&self) -> String {
        format!(
            r#"<link rel="stylesheet" href="{}"/>"#,
            escape_html_attr(&self.url)
        )
    }
}

impl Link {
    pub fn url(&self) -> &str {
        match self {
            Link::Javascript(link) => link.url(),
            Link::Css(link) => link.url(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Link::Javascript(link) => link.to_html(),
            Link::Css(link) => link.to_html(),
        }
    }

    pub fn is_javascript(&self) -> bool {
        matches!(self, Link::Javascript(_))
    }

    pub fn is_css(&self) -> bool {
        matches!(self, Link::Css(_))
    }
}

impl From<JavascriptLink> for Link {
    fn from(value: JavascriptLink) -> Self {
        Link::Javascript(value)
    }
}

impl From<CssLink> for Link {
    fn from(value: CssLink) -> Self {
        Link::Css(value)
    }
}
