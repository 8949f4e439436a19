//! The `Traits` facade: the surface operations a caller (a CLI, an RPC
//! handler, a test) actually calls. Everything below wires the
//! Invariant Checker, the Schedule Materialiser, the Connection Search
//! Engine and the Booking & Reservation Engine to a `store::Database`
//! and an in-memory `graphstore::GraphStore`.

pub mod booking;
pub mod error;
pub mod invariant;
pub mod materialiser;
pub mod search;
pub mod session;
#[cfg(test)]
mod tests;
pub mod test_support;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use graphstore::GraphStore;
use model::{
    PurchaseRecord, ScheduleStop, Segment, Station, Train, TrainStatus, TripId, User,
};
use store::{Database, StationRepo, TicketRepo, TrainRepo, UserRepo};
use tokio::sync::RwLock;
use utility::key::TraitsKey;

pub use error::{Result, TraitsError};
pub use session::Session;

/// Owns the relational handle and the graph store, and exposes every
/// surface operation. Cheap to clone: `DB` is expected to be cheap to
/// clone (a connection pool) and the graph store is behind an `Arc`.
#[derive(Clone)]
pub struct Traits<DB: Database> {
    db: DB,
    graph: Arc<RwLock<GraphStore>>,
}

impl<DB: Database> Traits<DB> {
    pub fn new(db: DB) -> Self {
        Self {
            db,
            graph: Arc::new(RwLock::new(GraphStore::new())),
        }
    }

    pub fn with_graph(db: DB, graph: Arc<RwLock<GraphStore>>) -> Self {
        Self { db, graph }
    }

    pub async fn add_train_station(
        &self,
        session: Session,
        name: TraitsKey,
        details: Option<String>,
    ) -> Result<()> {
        session.require_admin()?;
        let name_for_graph = name.clone();
        self.db
            .perform_transaction(|ops| {
                Box::pin(async move {
                    StationRepo::insert(ops, Station::new(name, details)).await?;
                    Ok(())
                })
            })
            .await?;
        let mut graph = self.graph.write().await;
        graph
            .session_mut()
            .create_station(name_for_graph)
            .map_err(|why| TraitsError::invalid(why.to_string()))?;
        Ok(())
    }

    pub async fn connect_train_stations(
        &self,
        session: Session,
        from: TraitsKey,
        to: TraitsKey,
        travel_time_minutes: u32,
    ) -> Result<()> {
        session.require_admin()?;
        invariant::TraitsUtility::check_segment_bounds(travel_time_minutes)?;
        self.db
            .perform_transaction(move |ops| {
                Box::pin(async move {
                    invariant::TraitsUtility::check_station_pair(ops, &from, &to).await?;
                    store::SegmentRepo::insert(
                        ops,
                        Segment::new(from.clone(), to.clone(), travel_time_minutes),
                    )
                    .await?;
                    store::SegmentRepo::insert(
                        ops,
                        Segment::new(to, from, travel_time_minutes),
                    )
                    .await?;
                    Ok(())
                })
            })
            .await
    }

    pub async fn add_train(
        &self,
        session: Session,
        name: TraitsKey,
        capacity: u32,
        status: TrainStatus,
    ) -> Result<()> {
        session.require_admin()?;
        self.db
            .perform_transaction(move |ops| {
                Box::pin(async move {
                    TrainRepo::insert(ops, Train::new(name, capacity, status)).await?;
                    Ok(())
                })
            })
            .await
    }

    pub async fn update_train_details(
        &self,
        session: Session,
        name: &TraitsKey,
        capacity: Option<u32>,
        status: Option<TrainStatus>,
    ) -> Result<()> {
        session.require_admin()?;
        self.db
            .perform_transaction(|ops| {
                Box::pin(async move {
                    if !TrainRepo::exists(ops, name).await? {
                        return Err(TraitsError::invalid(format!(
                            "train {name} does not exist"
                        )));
                    }
                    if let Some(capacity) = capacity {
                        TrainRepo::update_capacity(ops, name, capacity).await?;
                    }
                    if let Some(status) = status {
                        TrainRepo::update_status(ops, name, status).await?;
                    }
                    Ok(())
                })
            })
            .await
    }

    pub async fn delete_train(&self, session: Session, name: &TraitsKey) -> Result<()> {
        session.require_admin()?;
        self.db
            .perform_transaction(|ops| Box::pin(async move { Ok(TrainRepo::delete(ops, name).await?) }))
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_schedule(
        &self,
        session: Session,
        train: TraitsKey,
        start_hour: u8,
        start_minute: u8,
        stops: Vec<ScheduleStop>,
        valid_from: NaiveDate,
        valid_until: NaiveDate,
    ) -> Result<()> {
        session.require_admin()?;

        let starting_station = stops
            .first()
            .map(|stop| stop.station.clone())
            .ok_or_else(|| TraitsError::invalid("a schedule needs at least two stops"))?;
        let ending_station = stops
            .last()
            .map(|stop| stop.station.clone())
            .ok_or_else(|| TraitsError::invalid("a schedule needs at least two stops"))?;

        let (trip_ids, legs) = self
            .db
            .perform_transaction(move |ops| {
                Box::pin(async move {
                    let admissible = invariant::TraitsUtility::check_schedule_admissible(
                        ops,
                        &train,
                        start_hour,
                        start_minute,
                        &stops,
                        valid_from,
                        valid_until,
                    )
                    .await?;
                    materialiser::materialise(
                        ops,
                        &train,
                        &starting_station,
                        &ending_station,
                        &admissible,
                    )
                    .await
                })
            })
            .await?;

        if let Some(first_leg) = legs.first() {
            let mut graph = self.graph.write().await;
            materialiser::write_graph_edges(&mut graph, &first_leg.train, &legs, &trip_ids);
        }

        Ok(())
    }

    pub async fn add_user(&self, _session: Session, user: User) -> Result<()> {
        if !looks_like_email(&user.email) {
            return Err(TraitsError::invalid("malformed email"));
        }
        self.db
            .perform_transaction(move |ops| {
                Box::pin(async move { Ok(UserRepo::insert(ops, user).await?) })
            })
            .await
    }

    pub async fn delete_user(&self, _session: Session, email: &str) -> Result<()> {
        self.db
            .perform_transaction(|ops| {
                Box::pin(async move {
                    if !UserRepo::exists(ops, email).await? {
                        return Err(TraitsError::invalid(format!(
                            "user {email} does not exist"
                        )));
                    }
                    Ok(UserRepo::delete(ops, email).await?)
                })
            })
            .await
    }

    pub async fn search_connections(
        &self,
        _session: Session,
        start: &TraitsKey,
        end: &TraitsKey,
        anchor: NaiveDateTime,
        options: search::SearchOptions,
    ) -> Result<Vec<search::SearchResult>> {
        let graph = self.graph.read().await;
        let mut autocommit = self.db.auto();
        search::search_connections(&mut autocommit, &graph, start, end, anchor, options).await
    }

    pub async fn buy_ticket(
        &self,
        _session: Session,
        user_email: &str,
        trip_id: TripId,
        booking_time: NaiveDateTime,
        also_reserve_seats: bool,
    ) -> Result<model::TicketId> {
        let user_email = user_email.to_string();
        self.db
            .perform_transaction(move |ops| {
                Box::pin(async move {
                    booking::buy_ticket(ops, &user_email, trip_id, booking_time, also_reserve_seats)
                        .await
                })
            })
            .await
    }

    pub async fn get_train_current_status(
        &self,
        _session: Session,
        name: &TraitsKey,
    ) -> Result<Option<TrainStatus>> {
        let mut autocommit = self.db.auto();
        match TrainRepo::get(&mut autocommit, name).await {
            Ok(Some(train)) => Ok(Some(train.status)),
            Ok(None) => Ok(None),
            Err(store::DatabaseError::NotFound) => Ok(None),
            Err(why) => Err(why.into()),
        }
    }

    pub async fn get_purchase_history(
        &self,
        _session: Session,
        email: &str,
    ) -> Result<Vec<PurchaseRecord>> {
        let mut autocommit = self.db.auto();
        booking::purchase_history(&mut autocommit, email).await
    }
}

/// Mirrors `model::EMAIL_PATTERN` character-for-character without
/// pulling in a regex engine for one call site: the local part is
/// `[a-zA-Z0-9_.+-]+`, the domain is `[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+`, so
/// the domain needs a literal `.` after its first label and every byte
/// on both sides has to come from the pattern's character classes.
fn looks_like_email(email: &str) -> bool {
    let is_local_char = |c: char| c.is_ascii_alphanumeric() || "_.+-".contains(c);
    let is_domain_char = |c: char| c.is_ascii_alphanumeric() || c == '-';

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }

    let Some((first_label, rest)) = domain.split_once('.') else {
        return false;
    };
    !first_label.is_empty()
        && first_label.chars().all(is_domain_char)
        && !rest.is_empty()
        && rest.chars().all(|c| is_domain_char(c) || c == '.')
}
