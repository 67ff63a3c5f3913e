//! Data model shared by every pipeline stage.
//!
//! The model follows the pipeline from left to right:
//!
//! - [`ComponentDefinition`] and [`EntityType`] are produced by extraction and
//!   collected into insertion-ordered [`Registry`] maps.
//! - [`Graph`] joins both registries into [`GraphNode`]s with ordered [`Slot`]s.
//! - [`PositionedDiagram`] carries the laid-out [`PositionedEntity`] sequence
//!   with resolved link targets per slot.
//!
//! [`Graph`] and [`PositionedDiagram`] serialize with camelCase keys; the graph
//! JSON is a stable interface for tools that bypass layout and rendering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Types that are stored in a [`Registry`] under their own name.
pub trait Named {
    fn name(&self) -> &str;
}

/// An insertion-ordered mapping from name to definition.
///
/// Re-inserting an existing name replaces the stored value (last wins) while
/// the entry keeps the position of its first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Named> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, returning the one it replaced, if any.
    pub fn insert(&mut self, value: T) -> Option<T> {
        self.entries.insert(value.name().to_string(), value)
    }

    /// Returns the definition registered under `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates definitions in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterates registered names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<T: Named> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Self::new();
        for value in iter {
            registry.insert(value);
        }
        registry
    }
}

/// Registry of extracted component declarations.
pub type ComponentRegistry = Registry<ComponentDefinition>;

/// Registry of extracted entity classes.
pub type EntityRegistry = Registry<EntityType>;

/// Storage kinds recognized in a component declaration body.
///
/// The flags are independent: a body matching several signatures sets
/// several flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageKinds {
    pub is_marker: bool,
    pub is_text: bool,
    pub is_map: bool,
    pub is_list: bool,
    pub is_movable_list: bool,
}

/// A declared component: a named storage capability an entity may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    name: String,
    #[serde(flatten)]
    storage: StorageKinds,
    references_entity: bool,
}

impl ComponentDefinition {
    pub fn new(name: impl Into<String>, storage: StorageKinds, references_entity: bool) -> Self {
        Self {
            name: name.into(),
            storage,
            references_entity,
        }
    }

    /// Returns the recognized storage kinds.
    pub fn storage(&self) -> StorageKinds {
        self.storage
    }

    /// Returns true if the component holds an entity identifier.
    pub fn references_entity(&self) -> bool {
        self.references_entity
    }
}

impl Named for ComponentDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A declared entity class and the components its body accesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    name: String,
    component_names: Vec<String>,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component_names: Vec::new(),
        }
    }

    /// Records a component access. Returns false if the name was already
    /// recorded; the first-seen position is kept.
    pub fn push_component(&mut self, component_name: &str) -> bool {
        if self.component_names.iter().any(|name| name == component_name) {
            return false;
        }
        self.component_names.push(component_name.to_string());
        true
    }

    /// Returns the accessed component names in first-seen order.
    pub fn component_names(&self) -> &[String] {
        &self.component_names
    }
}

impl Named for EntityType {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One entity type's use of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    component_name: String,
    references_entity: bool,
}

impl Slot {
    pub fn new(component_name: impl Into<String>, references_entity: bool) -> Self {
        Self {
            component_name: component_name.into(),
            references_entity,
        }
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn references_entity(&self) -> bool {
        self.references_entity
    }
}

/// An entity type in the reference graph.
///
/// Deserializing rebuilds `links` from the slots; a serialized `links` list
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "GraphNodeFields")]
pub struct GraphNode {
    name: String,
    slots: Vec<Slot>,
    links: Vec<String>,
}

#[derive(Deserialize)]
struct GraphNodeFields {
    name: String,
    slots: Vec<Slot>,
}

impl From<GraphNodeFields> for GraphNode {
    fn from(fields: GraphNodeFields) -> Self {
        Self::new(fields.name, fields.slots)
    }
}

impl GraphNode {
    /// Creates a node, deriving `links` from the reference-bearing slots.
    pub fn new(name: impl Into<String>, slots: Vec<Slot>) -> Self {
        let links = slots
            .iter()
            .filter(|slot| slot.references_entity())
            .map(|slot| slot.component_name().to_string())
            .collect();

        Self {
            name: name.into(),
            slots,
            links,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Component names of slots that reference another entity, in slot order.
    pub fn links(&self) -> &[String] {
        &self.links
    }
}

/// The entity reference graph: nodes in entity registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns the node named `name`.
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A slot with its resolved link targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedSlot {
    component_name: String,
    references_entity: bool,
    links_to: Vec<String>,
}

impl PositionedSlot {
    pub fn new(slot: &Slot, links_to: Vec<String>) -> Self {
        Self {
            component_name: slot.component_name().to_string(),
            references_entity: slot.references_entity(),
            links_to,
        }
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn references_entity(&self) -> bool {
        self.references_entity
    }

    /// Target entity names, never including the owning entity.
    pub fn links_to(&self) -> &[String] {
        &self.links_to
    }
}

/// A graph node placed on the diagram.
///
/// `x` and `y` are the top-left corner of the entity box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEntity {
    name: String,
    level: u32,
    x: f32,
    y: f32,
    slots: Vec<PositionedSlot>,
    links: Vec<String>,
}

impl PositionedEntity {
    pub fn new(node: &GraphNode, level: u32, x: f32, y: f32, slots: Vec<PositionedSlot>) -> Self {
        Self {
            name: node.name().to_string(),
            level,
            x,
            y,
            slots,
            links: node.links().to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn slots(&self) -> &[PositionedSlot] {
        &self.slots
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }
}

/// The laid-out diagram: positioned entities in graph order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionedDiagram {
    entities: Vec<PositionedEntity>,
}

impl PositionedDiagram {
    pub fn new(entities: Vec<PositionedEntity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[PositionedEntity] {
        &self.entities
    }

    /// Returns the entity named `name`.
    pub fn entity(&self, name: &str) -> Option<&PositionedEntity> {
        self.entities.iter().find(|entity| entity.name() == name)
    }
}
