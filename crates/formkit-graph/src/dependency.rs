//! Dependency graph over a schema's fields.

use crate::error::GraphError;
use formkit_schema::{FieldDefinition, FieldId};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::HashMap;

/// Directed dependency graph with one node per field and an edge from each
/// parent to every derived field that reads it.
///
/// Nodes are indices into the field list the graph was built from, which
/// keeps the node type `Copy` for the graph map.
#[derive(Debug)]
pub struct DependencyGraph {
    inner: DiGraphMap<usize, ()>,
    ids: Vec<FieldId>,
    derived: Vec<bool>,
}

impl DependencyGraph {
    /// Build the graph for a field list.
    ///
    /// Fails when a derived field references a parent id that is not in the
    /// list, or reads itself. Longer cycles survive the build and are
    /// reported by [`DependencyGraph::evaluation_order`] /
    /// [`DependencyGraph::validate`].
    pub fn build(fields: &[FieldDefinition]) -> Result<Self, GraphError> {
        let mut inner = DiGraphMap::new();
        let mut index_of: HashMap<&FieldId, usize> = HashMap::new();

        for (index, field) in fields.iter().enumerate() {
            inner.add_node(index);
            index_of.insert(&field.id, index);
        }

        for (index, field) in fields.iter().enumerate() {
            if !field.is_derived {
                continue;
            }
            for parent in &field.parent_field_ids {
                let parent_index =
                    *index_of.get(parent).ok_or_else(|| GraphError::UnknownParent {
                        field: field.id.clone(),
                        parent: parent.clone(),
                    })?;
                // A field reading itself is the smallest cycle; the graph map
                // cannot represent it, so reject it here.
                if parent_index == index {
                    return Err(GraphError::CycleDetected(field.id.clone()));
                }
                inner.add_edge(parent_index, index, ());
            }
        }

        Ok(Self {
            inner,
            ids: fields.iter().map(|f| f.id.clone()).collect(),
            derived: fields.iter().map(|f| f.is_derived).collect(),
        })
    }

    /// Number of fields in the graph
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of parent -> derived edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Reject the graph if it contains a dependency cycle
    pub fn validate(&self) -> Result<(), GraphError> {
        self.evaluation_order().map(|_| ())
    }

    /// Derived fields in the order they must be recomputed.
    ///
    /// A topological sort of the whole graph, filtered to derived fields.
    pub fn evaluation_order(&self) -> Result<Vec<FieldId>, GraphError> {
        match toposort(&self.inner, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter(|&index| self.derived[index])
                .map(|index| self.ids[index].clone())
                .collect()),
            Err(cycle) => Err(GraphError::CycleDetected(
                self.ids[cycle.node_id()].clone(),
            )),
        }
    }

    /// Fields that (directly) read the given field.
    ///
    /// Unknown ids yield an empty list.
    #[must_use]
    pub fn dependents_of(&self, id: &FieldId) -> Vec<FieldId> {
        let Some(index) = self.ids.iter().position(|i| i == id) else {
            return Vec::new();
        };
        self.inner
            .neighbors_directed(index, Direction::Outgoing)
            .map(|n| self.ids[n].clone())
            .collect()
    }
}
