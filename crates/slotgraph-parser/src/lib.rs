//! Lexical extraction of entity-component declarations.
//!
//! This crate turns raw declaration source text into the typed registries of
//! [`slotgraph_core::model`] without building a syntax tree:
//!
//! - [`extract_components`] scans component definitions of the shape
//!   `export const Name = factory(...);` into a [`ComponentRegistry`](slotgraph_core::model::ComponentRegistry).
//! - [`extract_entities`] scans `class Name { ... }` declarations and
//!   collects the components each body accesses through the slot prefix
//!   (`c.Name` by default) into an [`EntityRegistry`](slotgraph_core::model::EntityRegistry).
//!
//! Extraction never fails. Declarations the scanners cannot delimit are
//! skipped and reported as warning [`Diagnostic`](error::Diagnostic)s on the
//! returned [`Extraction`].

pub mod error;

mod components;
mod entities;
mod scan;
mod span;

pub use components::extract_components;
pub use entities::extract_entities;
pub use span::Span;

use slotgraph_core::model::StorageKinds;

use error::{Diagnostic, ExtractError};

/// Text signatures that identify storage kinds and entity references in a
/// component declaration body.
///
/// Each signature is matched by plain substring containment; an empty
/// signature never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signatures {
    pub marker: String,
    pub text: String,
    pub map: String,
    pub list: String,
    pub movable_list: String,
    pub entity_ref: String,
}

impl Default for Signatures {
    fn default() -> Self {
        Self {
            marker: "Marker".to_string(),
            text: "LoroText".to_string(),
            map: "LoroMap".to_string(),
            list: "LoroList".to_string(),
            movable_list: "LoroMovableList".to_string(),
            entity_ref: "EntityId".to_string(),
        }
    }
}

impl Signatures {
    /// Detects the storage kinds whose signature occurs in `body`.
    pub fn storage_kinds(&self, body: &str) -> StorageKinds {
        StorageKinds {
            is_marker: contains_signature(body, &self.marker),
            is_text: contains_signature(body, &self.text),
            is_map: contains_signature(body, &self.map),
            is_list: contains_signature(body, &self.list),
            is_movable_list: contains_signature(body, &self.movable_list),
        }
    }

    /// Returns true if `body` contains the entity-reference token.
    pub fn references_entity(&self, body: &str) -> bool {
        contains_signature(body, &self.entity_ref)
    }
}

fn contains_signature(body: &str, signature: &str) -> bool {
    !signature.is_empty() && body.contains(signature)
}

/// Which slot accesses become entity components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotScope {
    /// Every slot access is kept, declared or not.
    #[default]
    All,
    /// Only accesses to names present in the component registry are kept.
    Registered,
}

/// Configuration for both extractors.
///
/// # Examples
///
/// ```
/// use slotgraph_parser::{ExtractConfig, SlotScope};
///
/// let config = ExtractConfig::default()
///     .with_slot_prefix("components.")
///     .with_slot_scope(SlotScope::Registered);
/// assert_eq!(config.slot_prefix(), "components.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    signatures: Signatures,
    slot_prefix: String,
    slot_scope: SlotScope,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            signatures: Signatures::default(),
            slot_prefix: "c.".to_string(),
            slot_scope: SlotScope::All,
        }
    }
}

impl ExtractConfig {
    /// Replaces the storage and entity-reference signatures.
    pub fn with_signatures(mut self, signatures: Signatures) -> Self {
        self.signatures = signatures;
        self
    }

    /// Replaces the slot-access prefix token.
    pub fn with_slot_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.slot_prefix = prefix.into();
        self
    }

    /// Replaces the slot scope.
    pub fn with_slot_scope(mut self, scope: SlotScope) -> Self {
        self.slot_scope = scope;
        self
    }

    pub fn signatures(&self) -> &Signatures {
        &self.signatures
    }

    pub fn slot_prefix(&self) -> &str {
        &self.slot_prefix
    }

    pub fn slot_scope(&self) -> SlotScope {
        self.slot_scope
    }
}

/// The result of an extraction pass: the extracted value plus any warnings.
#[derive(Debug)]
pub struct Extraction<T> {
    value: T,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Extraction<T> {
    pub(crate) fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// Returns the extracted value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the warnings emitted while extracting.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits the extraction into its value and warnings.
    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }

    /// Returns the value, or an [`ExtractError`] if any warning was emitted.
    ///
    /// # Errors
    ///
    /// Fails when the pass produced at least one diagnostic.
    pub fn into_strict(self) -> Result<T, ExtractError> {
        if self.diagnostics.is_empty() {
            Ok(self.value)
        } else {
            Err(ExtractError::new(self.diagnostics))
        }
    }
}

#[cfg(test)]
mod tests {
    use slotgraph_core::model::{ComponentRegistry, EntityRegistry};

    use super::*;

    #[test]
    fn test_signatures_detect_independent_flags() {
        let signatures = Signatures::default();
        let kinds = signatures.storage_kinds("defineComponent(new LoroMap(), LoroText)");

        assert!(kinds.is_map);
        assert!(kinds.is_text);
        assert!(!kinds.is_list);
        assert!(!kinds.is_movable_list);
        assert!(!kinds.is_marker);
    }

    #[test]
    fn test_list_signature_does_not_match_movable_list() {
        let kinds = Signatures::default().storage_kinds("defineComponent(LoroMovableList)");

        assert!(kinds.is_movable_list);
        assert!(!kinds.is_list);
    }

    #[test]
    fn test_empty_signature_never_matches() {
        let signatures = Signatures {
            entity_ref: String::new(),
            ..Signatures::default()
        };

        assert!(!signatures.references_entity("anything at all"));
    }

    #[test]
    fn test_into_strict() {
        let clean = Extraction::new(ComponentRegistry::new(), Vec::new());
        assert!(clean.into_strict().is_ok());

        let noisy = Extraction::new(EntityRegistry::new(), vec![Diagnostic::warning("skipped")]);
        let err = noisy.into_strict().unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
    }
}
