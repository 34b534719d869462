//! Non-fatal conditions recorded during generation.

use crate::element::ElementId;
use serde::{Deserialize, Serialize};

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Element kind missing from the tag table; the fallback tag was used.
    UnknownKind,
    /// Non-scalar prop widened to the dynamic type.
    DynamicProp,
    /// Text or children authored on a void tag were dropped.
    VoidContent,
    /// Prop key is not a usable attribute name and was skipped.
    InvalidAttribute,
    /// Prop key collides with a structural part of the component and was skipped.
    ReservedProp,
}

/// A non-fatal condition, returned alongside a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub element_id: Option<ElementId>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, element_id: Option<&ElementId>, message: impl Into<String>) -> Self {
        Self {
            kind,
            element_id: element_id.cloned(),
            message: message.into(),
        }
    }

    pub fn unknown_kind(element_id: &ElementId, kind: &str, fallback: &str) -> Self {
        Self::new(
            DiagnosticKind::UnknownKind,
            Some(element_id),
            format!("unknown kind '{}', using fallback tag '{}'", kind, fallback),
        )
    }

    pub fn dynamic_prop(element_id: &ElementId, prop: &str) -> Self {
        Self::new(
            DiagnosticKind::DynamicProp,
            Some(element_id),
            format!("prop '{}' is not a scalar, typed as dynamic", prop),
        )
    }

    pub fn void_content(element_id: &ElementId, tag: &str) -> Self {
        Self::new(
            DiagnosticKind::VoidContent,
            Some(element_id),
            format!("<{}> cannot contain content, text and children dropped", tag),
        )
    }

    pub fn invalid_attribute(element_id: &ElementId, name: &str) -> Self {
        Self::new(
            DiagnosticKind::InvalidAttribute,
            Some(element_id),
            format!("prop '{}' is not a valid attribute name, skipped", name),
        )
    }

    pub fn reserved_prop(element_id: &ElementId, name: &str) -> Self {
        Self::new(
            DiagnosticKind::ReservedProp,
            Some(element_id),
            format!("prop '{}' is reserved, skipped", name),
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.element_id {
            Some(id) => write!(f, "[{}] {}", id, self.message),
            None => f.write_str(&self.message),
        }
    }
}
