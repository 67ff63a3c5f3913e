//! Link target resolution.
//!
//! A reference slot only says that its component holds *some* entity id. The
//! [`TargetTable`] supplies which entity types that id may point to, and the
//! [`LinkResolver`] narrows those targets to entities actually present in the
//! graph.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::trace;
use serde::Deserialize;

use slotgraph_core::model::{Graph, GraphNode, PositionedSlot, Slot};

/// Maps a component name to the entity types it may reference.
///
/// # Examples
///
/// ```
/// use slotgraph::links::TargetTable;
///
/// let table: TargetTable = [("ReplyTo", vec!["Message"])].into_iter().collect();
/// assert_eq!(table.targets("ReplyTo"), ["Message"]);
/// assert!(table.targets("Body").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TargetTable {
    targets: IndexMap<String, Vec<String>>,
}

impl TargetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the targets of `component`, replacing any earlier entry.
    pub fn insert(&mut self, component: impl Into<String>, targets: Vec<String>) {
        self.targets.insert(component.into(), targets);
    }

    /// Returns the configured targets of `component` in table order.
    pub fn targets(&self, component: &str) -> &[String] {
        self.targets
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<C, T> FromIterator<(C, Vec<T>)> for TargetTable
where
    C: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, Vec<T>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (component, targets) in iter {
            table.insert(component, targets.into_iter().map(Into::into).collect());
        }
        table
    }
}

/// Resolves slot link targets against the entities of one graph.
#[derive(Debug)]
pub struct LinkResolver<'a> {
    table: &'a TargetTable,
    entity_names: HashSet<&'a str>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(table: &'a TargetTable, graph: &'a Graph) -> Self {
        Self {
            table,
            entity_names: graph.nodes().iter().map(GraphNode::name).collect(),
        }
    }

    /// Returns the entities `slot` of entity `owner` links to.
    ///
    /// Only reference slots have targets. Targets keep table order; unknown
    /// entities, the owner itself and repeats are dropped.
    pub fn resolve_slot(&self, owner: &str, slot: &Slot) -> Vec<String> {
        if !slot.references_entity() {
            return Vec::new();
        }

        let mut links_to: Vec<String> = Vec::new();
        for target in self.table.targets(slot.component_name()) {
            if target == owner || !self.entity_names.contains(target.as_str()) {
                trace!(
                    owner = owner,
                    component = slot.component_name(),
                    target = target.as_str();
                    "Dropped link target"
                );
                continue;
            }
            if !links_to.contains(target) {
                links_to.push(target.clone());
            }
        }
        links_to
    }

    /// Resolves every slot of `node`, preserving slot order.
    pub fn resolve_node(&self, node: &GraphNode) -> Vec<PositionedSlot> {
        node.slots()
            .iter()
            .map(|slot| PositionedSlot::new(slot, self.resolve_slot(node.name(), slot)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[(&str, &[(&str, bool)])]) -> Graph {
        Graph::new(
            nodes
                .iter()
                .map(|(name, slots)| {
                    GraphNode::new(
                        *name,
                        slots
                            .iter()
                            .map(|(component, references)| Slot::new(*component, *references))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_self_link_is_excluded() {
        let graph = graph(&[("Message", &[("ReplyTo", true)])]);
        let table: TargetTable = [("ReplyTo", vec!["Message"])].into_iter().collect();
        let resolver = LinkResolver::new(&table, &graph);

        let slots = resolver.resolve_node(&graph.nodes()[0]);
        assert!(slots[0].links_to().is_empty());
    }

    #[test]
    fn test_targets_keep_table_order_and_collapse_repeats() {
        let graph = graph(&[
            ("Message", &[("Author", true)]),
            ("User", &[]),
            ("Bot", &[]),
        ]);
        let table: TargetTable = [("Author", vec!["Bot", "Ghost", "User", "Bot"])]
            .into_iter()
            .collect();
        let resolver = LinkResolver::new(&table, &graph);

        let links = resolver.resolve_slot("Message", &Slot::new("Author", true));
        assert_eq!(links, ["Bot", "User"]);
    }

    #[test]
    fn test_non_reference_slot_has_no_targets() {
        let graph = graph(&[("Message", &[("Body", false)]), ("User", &[])]);
        let table: TargetTable = [("Body", vec!["User"])].into_iter().collect();
        let resolver = LinkResolver::new(&table, &graph);

        assert!(resolver.resolve_slot("Message", &Slot::new("Body", false)).is_empty());
    }

    #[test]
    fn test_component_missing_from_table() {
        let graph = graph(&[("Message", &[("Author", true)]), ("User", &[])]);
        let table = TargetTable::new();
        let resolver = LinkResolver::new(&table, &graph);

        assert!(resolver.resolve_slot("Message", &Slot::new("Author", true)).is_empty());
    }

    #[test]
    fn test_target_table_from_toml() {
        let table: TargetTable = toml::from_str(
            r#"
ReplyTo = ["Message"]
Author = ["User", "Bot"]
"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.targets("Author"), ["User", "Bot"]);
    }
}
