//! Reference graph assembly.
//!
//! Joins the component and entity registries into one [`GraphNode`] per
//! entity type. Each node lists a [`Slot`] per accessed component, and the
//! node's links are the slots whose component holds an entity id.

use log::{debug, info, trace};

use slotgraph_core::model::{ComponentRegistry, EntityRegistry, Graph, GraphNode, Named as _, Slot};

/// Builds the entity reference graph.
///
/// Nodes follow entity registry order and slots follow each entity's
/// component order. A component name missing from `components` still yields
/// a slot, one that does not reference an entity.
pub fn build_graph(components: &ComponentRegistry, entities: &EntityRegistry) -> Graph {
    info!(
        components_count = components.len(),
        entities_count = entities.len();
        "Building reference graph"
    );

    let nodes: Vec<GraphNode> = entities
        .iter()
        .map(|entity| {
            let slots = entity
                .component_names()
                .iter()
                .map(|name| {
                    let references_entity = match components.get(name) {
                        Some(component) => component.references_entity(),
                        None => {
                            debug!(
                                entity = entity.name(),
                                component = name.as_str();
                                "Slot refers to an undeclared component"
                            );
                            false
                        }
                    };
                    Slot::new(name.as_str(), references_entity)
                })
                .collect();
            GraphNode::new(entity.name(), slots)
        })
        .collect();

    let graph = Graph::new(nodes);
    info!(nodes_count = graph.nodes().len(); "Reference graph built");
    trace!(graph:?; "Reference graph");

    graph
}

#[cfg(test)]
mod tests {
    use slotgraph_core::model::{ComponentDefinition, EntityType, Named as _, StorageKinds};

    use super::*;

    fn components(defs: &[(&str, bool)]) -> ComponentRegistry {
        defs.iter()
            .map(|(name, references_entity)| {
                ComponentDefinition::new(*name, StorageKinds::default(), *references_entity)
            })
            .collect()
    }

    fn entity(name: &str, component_names: &[&str]) -> EntityType {
        let mut entity = EntityType::new(name);
        for component_name in component_names {
            entity.push_component(component_name);
        }
        entity
    }

    #[test]
    fn test_unknown_component_does_not_reference() {
        let components = components(&[("Bar", true)]);
        let entities: EntityRegistry = [entity("Thing", &["Foo", "Bar"])].into_iter().collect();

        let graph = build_graph(&components, &entities);
        let node = graph.node("Thing").unwrap();

        assert_eq!(
            node.slots(),
            [Slot::new("Foo", false), Slot::new("Bar", true)]
        );
        assert_eq!(node.links(), ["Bar"]);
    }

    #[test]
    fn test_nodes_follow_entity_order() {
        let entities: EntityRegistry = [entity("Zeta", &[]), entity("Alpha", &["A"])]
            .into_iter()
            .collect();

        let graph = build_graph(&ComponentRegistry::new(), &entities);
        let names: Vec<_> = graph.nodes().iter().map(|node| node.name()).collect();

        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[test]
    fn test_slot_count_matches_component_names() {
        let components = components(&[("A", false), ("B", true), ("C", false)]);
        let message = entity("Message", &["C", "A", "B"]);
        let entities: EntityRegistry = [message.clone()].into_iter().collect();

        let graph = build_graph(&components, &entities);
        let node = graph.node(message.name()).unwrap();

        let slot_names: Vec<_> = node.slots().iter().map(|slot| slot.component_name()).collect();
        assert_eq!(slot_names, message.component_names());
    }

    #[test]
    fn test_empty_registries_give_empty_graph() {
        let graph = build_graph(&ComponentRegistry::new(), &EntityRegistry::new());
        assert!(graph.is_empty());
    }
}
