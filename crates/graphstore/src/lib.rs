//! The graph-store adapter.
//!
//! A property graph with one node per Station and one directed `TRIP`
//! edge per materialised trip-leg, with path search bounded to a handful
//! of hops, built on `petgraph` in the style of a journey graph. A
//! `Session` is the unit of access, so callers in `traits` don't need to
//! know the graph lives in memory rather than behind a socket.

use std::{collections::HashMap, error, fmt};

use chrono::NaiveDateTime;
use model::TripId;
use petgraph::{stable_graph::NodeIndex, stable_graph::StableDiGraph, Direction};
use utility::key::TraitsKey;

mod search;
#[cfg(test)]
mod tests;

pub use search::{CandidatePath, TripEdge};

#[derive(Debug)]
pub enum GraphError {
    StationAlreadyExists(TraitsKey),
    StationNotFound(TraitsKey),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StationAlreadyExists(name) => {
                write!(f, "station node already exists: {name}")
            }
            Self::StationNotFound(name) => write!(f, "station node not found: {name}"),
        }
    }
}

impl error::Error for GraphError {}

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone)]
struct StationNode {
    name: TraitsKey,
}

/// The property graph: `Station` nodes connected by `TRIP` edges.
#[derive(Debug, Default)]
pub struct GraphStore {
    graph: StableDiGraph<StationNode, TripEdge>,
    index_by_name: HashMap<TraitsKey, NodeIndex>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Session<'_> {
        Session { store: self }
    }

    pub fn session_mut(&mut self) -> SessionMut<'_> {
        SessionMut { store: self }
    }

    fn node_of(&self, name: &TraitsKey) -> Option<NodeIndex> {
        self.index_by_name.get(name).copied()
    }
}

/// Read-only access, used by the Connection Search Engine.
pub struct Session<'a> {
    store: &'a GraphStore,
}

impl Session<'_> {
    pub fn has_station(&self, name: &TraitsKey) -> bool {
        self.store.node_of(name).is_some()
    }

    /// Enumerates simple directed paths `start -> end`, each no longer than
    /// `max_hops` edges, bounding a search space that would otherwise grow
    /// unbounded on a dense graph. Every edge on a returned path satisfies
    /// the departure/arrival time constraint against `anchor`, and every
    /// edge shares the same calendar date as the first edge's departure
    /// (no overnight connections).
    pub fn find_paths(
        &self,
        start: &TraitsKey,
        end: &TraitsKey,
        anchor: NaiveDateTime,
        is_departure_time: bool,
        max_hops: usize,
    ) -> Result<Vec<CandidatePath>> {
        let start_node = self
            .store
            .node_of(start)
            .ok_or_else(|| GraphError::StationNotFound(start.clone()))?;
        let end_node = self
            .store
            .node_of(end)
            .ok_or_else(|| GraphError::StationNotFound(end.clone()))?;

        Ok(search::enumerate_paths(
            &self.store.graph,
            start_node,
            end_node,
            anchor,
            is_departure_time,
            max_hops,
        ))
    }
}

/// Write access, used by the Schedule Materialiser.
pub struct SessionMut<'a> {
    store: &'a mut GraphStore,
}

impl SessionMut<'_> {
    pub fn create_station(&mut self, name: TraitsKey) -> Result<()> {
        if self.store.index_by_name.contains_key(&name) {
            return Err(GraphError::StationAlreadyExists(name));
        }
        let index = self
            .store
            .graph
            .add_node(StationNode { name: name.clone() });
        self.store.index_by_name.insert(name, index);
        Ok(())
    }

    /// Equivalent to `CREATE (a)-[:TRIP {...}]->(b)` in Cypher.
    pub fn create_trip_edge(
        &mut self,
        from: &TraitsKey,
        to: &TraitsKey,
        edge: TripEdge,
    ) -> Result<()> {
        let from_index = self
            .store
            .node_of(from)
            .ok_or_else(|| GraphError::StationNotFound(from.clone()))?;
        let to_index = self
            .store
            .node_of(to)
            .ok_or_else(|| GraphError::StationNotFound(to.clone()))?;
        self.store.graph.add_edge(from_index, to_index, edge);
        Ok(())
    }
}

/// Number of edges incident on `name`, exposed mainly for tests that want
/// to assert materialisation actually wrote the edges it claims to.
pub fn edge_count_for(store: &GraphStore, name: &TraitsKey) -> usize {
    match store.node_of(name) {
        Some(index) => store
            .graph
            .edges_directed(index, Direction::Outgoing)
            .count(),
        None => 0,
    }
}
