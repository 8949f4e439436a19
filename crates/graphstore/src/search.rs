use chrono::NaiveDateTime;
use model::TripId;
use petgraph::{stable_graph::NodeIndex, stable_graph::StableDiGraph, visit::EdgeRef};
use utility::key::TraitsKey;

/// Properties carried by one `TRIP` edge.
#[derive(Debug, Clone)]
pub struct TripEdge {
    pub trip_id: TripId,
    pub train_name: TraitsKey,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub travel_time_minutes: u32,
}

/// One path of trip edges from a search, before ranking and hydration.
#[derive(Debug, Clone)]
pub struct CandidatePath {
    pub edges: Vec<TripEdge>,
}

pub(crate) fn enumerate_paths(
    graph: &StableDiGraph<super::StationNode, TripEdge>,
    start: NodeIndex,
    end: NodeIndex,
    anchor: NaiveDateTime,
    is_departure_time: bool,
    max_hops: usize,
) -> Vec<CandidatePath> {
    let mut results = Vec::new();
    let mut visited = vec![start];
    let mut path = Vec::new();
    dfs(
        graph,
        start,
        end,
        anchor,
        is_departure_time,
        max_hops,
        &mut visited,
        &mut path,
        &mut results,
    );
    results
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    graph: &StableDiGraph<super::StationNode, TripEdge>,
    current: NodeIndex,
    end: NodeIndex,
    anchor: NaiveDateTime,
    is_departure_time: bool,
    max_hops: usize,
    visited: &mut Vec<NodeIndex>,
    path: &mut Vec<TripEdge>,
    results: &mut Vec<CandidatePath>,
) {
    if current == end && !path.is_empty() {
        results.push(CandidatePath { edges: path.clone() });
        return;
    }
    if path.len() >= max_hops {
        return;
    }

    for edge_ref in graph.edges(current) {
        let edge = edge_ref.weight();

        let satisfies_time = if is_departure_time {
            edge.departure_time >= anchor
        } else {
            edge.arrival_time <= anchor
        };
        if !satisfies_time {
            continue;
        }

        // every edge on the path must fall on the same calendar date as
        // the first edge's departure: no overnight connections.
        let first_departure_date = path
            .first()
            .map(|first| first.departure_time.date())
            .unwrap_or_else(|| edge.departure_time.date());
        if edge.departure_time.date() != first_departure_date {
            continue;
        }

        let next = edge_ref.target();
        if visited.contains(&next) {
            continue;
        }

        visited.push(next);
        path.push(edge.clone());

        dfs(
            graph,
            next,
            end,
            anchor,
            is_departure_time,
            max_hops,
            visited,
            path,
            results,
        );

        path.pop();
        visited.pop();
    }
}
