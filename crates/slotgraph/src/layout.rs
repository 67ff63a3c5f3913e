//! Level-based layout.
//!
//! Entities are placed on a grid: the row is the entity's level and the
//! column is its position among the entities sharing that level.
//!
//! ```text
//!          column 0      column 1
//! level 0  ┌──────┐      ┌──────┐
//!          │ Room │      │ User │
//!          └──────┘      └──────┘
//! level 1  ┌─────────┐
//!          │ Message │
//!          └─────────┘
//! ```
//!
//! Entities missing from the [`LevelTable`] share one overflow level below
//! every configured level.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use slotgraph_core::{
    geometry::Point,
    model::{Graph, PositionedDiagram, PositionedEntity},
};

use crate::links::LinkResolver;

/// Maps an entity name to its layout level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: IndexMap<String, u32>,
}

impl LevelTable {
    /// Deepest level a table may configure; the overflow level sits one below it.
    pub const MAX_LEVEL: u32 = u32::MAX - 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: impl Into<String>, level: u32) {
        self.levels.insert(entity.into(), level);
    }

    /// Returns the configured level of `entity`.
    pub fn get(&self, entity: &str) -> Option<u32> {
        self.levels.get(entity).copied()
    }

    /// Level assigned to entities missing from the table.
    ///
    /// One past the deepest configured level, or `0` for an empty table.
    /// The result is only strictly below every listed level for tables that
    /// pass [`LevelTable::validate`]; otherwise it saturates at `u32::MAX`.
    pub fn overflow_level(&self) -> u32 {
        self.levels
            .values()
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Returns the level of `entity`, falling back to the overflow level.
    pub fn level_of(&self, entity: &str) -> u32 {
        self.get(entity).unwrap_or_else(|| self.overflow_level())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Checks that every level leaves room for the overflow level.
    ///
    /// # Errors
    ///
    /// Names the first entity whose level exceeds [`LevelTable::MAX_LEVEL`].
    pub fn validate(&self) -> Result<(), String> {
        match self
            .levels
            .iter()
            .find(|(_, level)| **level > Self::MAX_LEVEL)
        {
            Some((entity, level)) => Err(format!(
                "level of `{entity}` must be at most {}, got {level}",
                Self::MAX_LEVEL
            )),
            None => Ok(()),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for LevelTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (entity, level) in iter {
            table.insert(entity, level);
        }
        table
    }
}

/// Grid spacing for the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    left_margin: f32,
    top_margin: f32,
    column_spacing: f32,
    row_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            left_margin: 40.0,
            top_margin: 40.0,
            column_spacing: 240.0,
            row_height: 220.0,
        }
    }
}

impl LayoutSettings {
    pub fn with_left_margin(mut self, left_margin: f32) -> Self {
        self.left_margin = left_margin;
        self
    }

    pub fn with_top_margin(mut self, top_margin: f32) -> Self {
        self.top_margin = top_margin;
        self
    }

    pub fn with_column_spacing(mut self, column_spacing: f32) -> Self {
        self.column_spacing = column_spacing;
        self
    }

    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn left_margin(&self) -> f32 {
        self.left_margin
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Checks that every setting is finite and that spacings are positive.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let margins = [
            ("left_margin", self.left_margin),
            ("top_margin", self.top_margin),
        ];
        let spacings = [
            ("column_spacing", self.column_spacing),
            ("row_height", self.row_height),
        ];

        for (name, value) in margins.iter().chain(&spacings) {
            if !value.is_finite() {
                return Err(format!("`{name}` must be a finite number, got {value}"));
            }
        }
        for (name, value) in spacings {
            if value <= 0.0 {
                return Err(format!("`{name}` must be positive, got {value}"));
            }
        }
        Ok(())
    }
}

/// Places graph nodes on the level grid.
#[derive(Debug)]
pub struct LayoutEngine<'a> {
    levels: &'a LevelTable,
    settings: LayoutSettings,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(levels: &'a LevelTable, settings: LayoutSettings) -> Self {
        Self { levels, settings }
    }

    /// Returns the top-left corner of the cell at `level` and `index`.
    pub fn position(&self, level: u32, index: usize) -> Point {
        Point::new(
            self.settings.left_margin + index as f32 * self.settings.column_spacing,
            self.settings.top_margin + level as f32 * self.settings.row_height,
        )
    }

    /// Positions every node of `graph` and resolves its slot links.
    ///
    /// Column indices count nodes per level in graph order, so the output
    /// depends only on the input order and the tables.
    pub fn layout(&self, graph: &Graph, links: &LinkResolver<'_>) -> PositionedDiagram {
        info!(
            nodes_count = graph.nodes().len(),
            levels_count = self.levels.len();
            "Calculating layout"
        );

        let mut next_index: HashMap<u32, usize> = HashMap::new();
        let entities = graph
            .nodes()
            .iter()
            .map(|node| {
                let level = self.levels.level_of(node.name());
                let index = next_index.entry(level).or_insert(0);
                let position = self.position(level, *index);
                *index += 1;

                debug!(
                    entity = node.name(),
                    level = level,
                    x = position.x(),
                    y = position.y();
                    "Positioned entity"
                );
                PositionedEntity::new(
                    node,
                    level,
                    position.x(),
                    position.y(),
                    links.resolve_node(node),
                )
            })
            .collect();

        let diagram = PositionedDiagram::new(entities);
        info!(rows_count = next_index.len(); "Layout calculated");
        diagram
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use slotgraph_core::model::GraphNode;

    use super::*;
    use crate::links::TargetTable;

    fn graph(names: &[&str]) -> Graph {
        Graph::new(
            names
                .iter()
                .map(|name| GraphNode::new(*name, Vec::new()))
                .collect(),
        )
    }

    fn lay_out(graph: &Graph, levels: &LevelTable) -> PositionedDiagram {
        let targets = TargetTable::new();
        let resolver = LinkResolver::new(&targets, graph);
        LayoutEngine::new(levels, LayoutSettings::default()).layout(graph, &resolver)
    }

    #[test]
    fn test_overflow_level() {
        assert_eq!(LevelTable::new().overflow_level(), 0);

        let table: LevelTable = [("Room", 0), ("Message", 3)].into_iter().collect();
        assert_eq!(table.overflow_level(), 4);
        assert_eq!(table.level_of("Message"), 3);
        assert_eq!(table.level_of("Unknown"), 4);
    }

    #[test]
    fn test_deepest_allowed_level_keeps_overflow_below() {
        let table: LevelTable = [("Room", LevelTable::MAX_LEVEL)].into_iter().collect();
        assert_eq!(table.validate(), Ok(()));
        assert!(table.level_of("Unknown") > table.level_of("Room"));
    }

    #[test]
    fn test_level_without_room_for_overflow_is_rejected() {
        let table: LevelTable = [("Room", 1), ("Top", u32::MAX)].into_iter().collect();
        let err = table.validate().unwrap_err();
        assert!(err.contains("Top"), "{err}");
    }

    #[test]
    fn test_same_level_spreads_horizontally() {
        let table: LevelTable = [("User", 1), ("Bot", 1)].into_iter().collect();
        let diagram = lay_out(&graph(&["User", "Bot"]), &table);

        let user = diagram.entity("User").unwrap();
        let bot = diagram.entity("Bot").unwrap();
        assert_approx_eq!(f32, user.y(), bot.y());
        assert_approx_eq!(f32, user.x(), 40.0);
        assert_approx_eq!(f32, bot.x(), 280.0);
        assert_approx_eq!(f32, user.y(), 260.0);
    }

    #[test]
    fn test_unmapped_entities_share_overflow_row() {
        let table: LevelTable = [("Room", 0)].into_iter().collect();
        let diagram = lay_out(&graph(&["Ghost", "Room", "Phantom"]), &table);

        let ghost = diagram.entity("Ghost").unwrap();
        let phantom = diagram.entity("Phantom").unwrap();
        assert_eq!(ghost.level(), 1);
        assert_eq!(phantom.level(), 1);
        assert_approx_eq!(f32, ghost.x(), 40.0);
        assert_approx_eq!(f32, phantom.x(), 280.0);
        assert_approx_eq!(f32, diagram.entity("Room").unwrap().x(), 40.0);
    }

    #[test]
    fn test_empty_table_places_everything_on_level_zero() {
        let diagram = lay_out(&graph(&["A", "B"]), &LevelTable::new());

        assert!(diagram.entities().iter().all(|entity| entity.level() == 0));
        assert_approx_eq!(f32, diagram.entities()[0].y(), 40.0);
    }

    #[test]
    fn test_custom_settings() {
        let table = LevelTable::new();
        let settings = LayoutSettings::default()
            .with_left_margin(0.0)
            .with_top_margin(10.0)
            .with_column_spacing(100.0)
            .with_row_height(50.0);
        let engine = LayoutEngine::new(&table, settings);

        let position = engine.position(2, 3);
        assert_approx_eq!(f32, position.x(), 300.0);
        assert_approx_eq!(f32, position.y(), 110.0);
    }

    #[test]
    fn test_validate_settings() {
        assert!(LayoutSettings::default().validate().is_ok());
        assert!(
            LayoutSettings::default()
                .with_row_height(0.0)
                .validate()
                .is_err()
        );
        assert!(
            LayoutSettings::default()
                .with_left_margin(f32::NAN)
                .validate()
                .is_err()
        );
    }

    proptest! {
        #[test]
        fn levels_are_monotonic(levels in prop::collection::vec(0u32..6, 1..12)) {
            let names: Vec<String> = (0..levels.len()).map(|i| format!("E{i}")).collect();
            let table: LevelTable = names.iter().cloned().zip(levels.iter().copied()).collect();
            let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let diagram = lay_out(&graph(&name_refs), &table);

            for (i, a) in diagram.entities().iter().enumerate() {
                for b in &diagram.entities()[i + 1..] {
                    if a.level() == b.level() {
                        prop_assert!(a.y() == b.y());
                        prop_assert!(a.x() < b.x());
                    } else {
                        prop_assert!(a.y() != b.y());
                        prop_assert_eq!(a.level() < b.level(), a.y() < b.y());
                    }
                }
            }
        }
    }
}
