//! The Connection Search Engine: enumerates candidate paths through the
//! graph store, scores each on four metrics, sorts, and hydrates the
//! survivors against the relational Trips table.

use chrono::NaiveDateTime;
use graphstore::{CandidatePath, GraphStore};
use model::{SortingCriteria, TripId, TripLeg};
use store::TripRepo;
use utility::key::TraitsKey;

use crate::error::{Result, TraitsError};

const DEFAULT_MAX_HOPS: usize = 4;
const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct ScoredPath {
    pub overall_travel_time: i64,
    pub number_of_trains: usize,
    pub initial_waiting_time: i64,
    pub int_waiting_time: i64,
    pub total_waiting_time: i64,
    pub price: i64,
}

impl ScoredPath {
    fn score(path: &CandidatePath, anchor: NaiveDateTime) -> Self {
        let overall_travel_time: i64 = path
            .edges
            .iter()
            .map(|edge| i64::from(edge.travel_time_minutes))
            .sum();
        let number_of_trains = path.edges.len();

        let first = &path.edges[0];
        let initial_waiting_time = (first.departure_time - anchor).num_minutes();

        let int_waiting_time: i64 = path
            .edges
            .windows(2)
            .map(|pair| (pair[1].departure_time - pair[0].arrival_time).num_minutes())
            .sum();

        let total_waiting_time = initial_waiting_time + int_waiting_time;
        let price = (overall_travel_time - int_waiting_time).div_euclid(2)
            + 2 * number_of_trains as i64;

        Self {
            overall_travel_time,
            number_of_trains,
            initial_waiting_time,
            int_waiting_time,
            total_waiting_time,
            price,
        }
    }

    fn metric(&self, sort_by: SortingCriteria) -> i64 {
        match sort_by {
            SortingCriteria::OverallTravelTime => self.overall_travel_time,
            SortingCriteria::NumberOfTrainChanges => self.number_of_trains as i64,
            SortingCriteria::OverallWaitingTime => self.total_waiting_time,
            SortingCriteria::EstimatedPrice => self.price,
        }
    }
}

/// `trip_ids[i]` is the id `buy_ticket` needs to book `legs[i]`; kept as
/// a parallel vector rather than folded into `TripLeg` itself, the same
/// way the materialiser hands back ids and legs side by side.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub score: ScoredPath,
    pub legs: Vec<TripLeg>,
    pub trip_ids: Vec<TripId>,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub is_departure_time: bool,
    pub sort_by: SortingCriteria,
    pub is_ascending: bool,
    pub limit: usize,
    pub max_hops: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            is_departure_time: true,
            sort_by: SortingCriteria::OverallTravelTime,
            is_ascending: true,
            limit: DEFAULT_LIMIT,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

pub async fn search_connections<D>(
    ops: &mut D,
    graph: &GraphStore,
    start: &TraitsKey,
    end: &TraitsKey,
    anchor: NaiveDateTime,
    options: SearchOptions,
) -> Result<Vec<SearchResult>>
where
    D: TripRepo,
{
    if start == end {
        return Err(TraitsError::invalid("start and end station must differ"));
    }

    let session = graph.session();
    if !session.has_station(start) {
        return Err(TraitsError::invalid(format!("station {start} does not exist")));
    }
    if !session.has_station(end) {
        return Err(TraitsError::invalid(format!("station {end} does not exist")));
    }

    let candidates = session
        .find_paths(
            start,
            end,
            anchor,
            options.is_departure_time,
            options.max_hops,
        )
        .map_err(|why| TraitsError::invalid(why.to_string()))?;

    let mut scored: Vec<(ScoredPath, &CandidatePath)> = candidates
        .iter()
        .map(|path| (ScoredPath::score(path, anchor), path))
        .collect();

    scored.sort_by_key(|(score, _)| score.metric(options.sort_by));
    if !options.is_ascending {
        scored.reverse();
    }
    scored.truncate(options.limit);

    let mut results = Vec::with_capacity(scored.len());
    for (score, path) in scored {
        let trip_ids = path.edges.iter().map(|edge| edge.trip_id).collect::<Vec<_>>();
        let legs = TripRepo::get_many(ops, &trip_ids).await?;
        results.push(SearchResult {
            score,
            legs,
            trip_ids,
        });
    }

    Ok(results)
}
