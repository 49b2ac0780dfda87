// SPDX-License-Identifier: MIT

//!
//! Generated element names, used as variable names in the rendered script
//!

use thiserror::Error;
use uuid::Uuid;

/// Words that can't be used as JavaScript variable names
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
    "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
    "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

/// Errors that can arise in relation to an [`ElementName`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementNameError {
    #[error("Element name cannot be empty")]
    Empty,

    /// The name can't be used as a JavaScript identifier
    #[error("`{0}` is not a valid script identifier")]
    NotAnIdentifier(String),

    #[error("`{0}` is a reserved word")]
    Reserved(String),
}

/// The name of an element in the page tree.  The value is always a valid
/// JavaScript identifier, so it can be interpolated into the script as a
/// variable name.
#[rustfmt::skip]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(derive_more::Display)]
pub struct ElementName(String);

impl ElementName {
    /// Generate a new unique name of the form `<kind>_<uuid>`
    pub fn generate(kind: &str) -> Self {
        Self(format!("{}_{}", kind, Uuid::new_v4().simple()))
    }

    /// Create a name from a string if the string is a valid identifier
    pub fn from<S: ToString>(name: S) -> Result<Self, ElementNameError> {
        let name = name.to_string();
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return Err(ElementNameError::Empty);
        };
        let starts_ok = first.is_ascii_alphabetic() || first == '_' || first == '$';
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !(starts_ok && rest_ok) {
            Err(ElementNameError::NotAnIdentifier(name))
        } else if RESERVED_WORDS.contains(&name.as_str()) {
            Err(ElementNameError::Reserved(name))
        } else {
            Ok(Self(name))
        }
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
