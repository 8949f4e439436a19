//! An in-memory `Database` used by this crate's own tests so they don't
//! need a live Postgres instance. Mirrors the shape of `database`'s
//! `PgDatabase`/`PgDatabaseTransaction`/`PgDatabaseAutocommit` trio, but
//! backs every repo with a `std::sync::Mutex`-guarded struct instead of
//! `sqlx`.
//!
//! There is no rollback: `commit` is a no-op because every repo method
//! already wrote straight into the shared state. Good enough for
//! exercising the invariant checker, materialiser, search engine and
//! booking engine, which only ever observe committed state through the
//! same handle; not a substitute for testing actual transaction
//! isolation against Postgres.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use model::{
    PurchaseRecord, Reservation, ReservationId, ScheduleWindow, Segment, Station,
    Ticket, TicketId, Train, TrainStatus, TripId, TripLeg, User,
};
use store::db::{
    Database, DatabaseAutocommit, DatabaseError, DatabaseOperations, DatabaseTransaction,
    ReservationRepo, ScheduleRepo, SegmentRepo, StationRepo, TicketRepo, TrainRepo,
    TripRepo, UserRepo,
};
use utility::key::TraitsKey;

#[derive(Default)]
struct State {
    stations: HashMap<TraitsKey, Station>,
    segments: HashMap<(TraitsKey, TraitsKey), u32>,
    trains: HashMap<TraitsKey, Train>,
    schedules: HashMap<TraitsKey, Vec<ScheduleWindow>>,
    trips: HashMap<i64, TripLeg>,
    next_trip_id: i64,
    users: HashMap<String, User>,
    tickets: HashMap<i64, Ticket>,
    next_ticket_id: i64,
    reservations: HashMap<i64, Reservation>,
    next_reservation_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<State>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct InMemoryHandle {
    state: Arc<Mutex<State>>,
}

impl DatabaseAutocommit for InMemoryHandle {}
impl DatabaseOperations for InMemoryHandle {}

#[async_trait]
impl DatabaseTransaction for InMemoryHandle {
    async fn commit(self) -> store::db::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    type Transaction = InMemoryHandle;
    type Autocommit = InMemoryHandle;

    fn auto(&self) -> Self::Autocommit {
        InMemoryHandle {
            state: self.state.clone(),
        }
    }

    async fn transaction(&self) -> store::db::Result<Self::Transaction> {
        Ok(InMemoryHandle {
            state: self.state.clone(),
        })
    }

    async fn perform_transaction<T, E, F, Fut>(&self, action: F) -> Result<T, E>
    where
        T: Send,
        E: From<DatabaseError> + Send,
        F: Send + FnOnce(&mut Self::Transaction) -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
    {
        let mut handle = InMemoryHandle {
            state: self.state.clone(),
        };
        action(&mut handle).await
    }
}

#[async_trait]
impl StationRepo for InMemoryHandle {
    async fn exists(&mut self, name: &TraitsKey) -> store::db::Result<bool> {
        Ok(self.state.lock().unwrap().stations.contains_key(name))
    }

    async fn get(&mut self, name: &TraitsKey) -> store::db::Result<Option<Station>> {
        Ok(self.state.lock().unwrap().stations.get(name).cloned())
    }

    async fn insert(&mut self, station: Station) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.stations.contains_key(&station.name) {
            return Err(DatabaseError::AlreadyExists);
        }
        state.stations.insert(station.name.clone(), station);
        Ok(())
    }
}

#[async_trait]
impl SegmentRepo for InMemoryHandle {
    async fn travel_time(
        &mut self,
        from: &TraitsKey,
        to: &TraitsKey,
    ) -> store::db::Result<Option<u32>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .segments
            .get(&(from.clone(), to.clone()))
            .copied())
    }

    async fn insert(&mut self, segment: Segment) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        let key = (segment.from.clone(), segment.to.clone());
        if state.segments.contains_key(&key) {
            return Err(DatabaseError::AlreadyExists);
        }
        state.segments.insert(key, segment.travel_time_minutes);
        Ok(())
    }
}

#[async_trait]
impl TrainRepo for InMemoryHandle {
    async fn exists(&mut self, name: &TraitsKey) -> store::db::Result<bool> {
        Ok(self.state.lock().unwrap().trains.contains_key(name))
    }

    async fn get(&mut self, name: &TraitsKey) -> store::db::Result<Option<Train>> {
        Ok(self.state.lock().unwrap().trains.get(name).cloned())
    }

    async fn insert(&mut self, train: Train) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.trains.contains_key(&train.name) {
            return Err(DatabaseError::AlreadyExists);
        }
        state.trains.insert(train.name.clone(), train);
        Ok(())
    }

    async fn update_capacity(&mut self, name: &TraitsKey, capacity: u32) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        let train = state.trains.get_mut(name).ok_or(DatabaseError::NotFound)?;
        train.capacity = capacity;
        Ok(())
    }

    async fn update_status(
        &mut self,
        name: &TraitsKey,
        status: TrainStatus,
    ) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        let train = state.trains.get_mut(name).ok_or(DatabaseError::NotFound)?;
        train.status = status;
        Ok(())
    }

    async fn delete(&mut self, name: &TraitsKey) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.trains.remove(name).ok_or(DatabaseError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepo for InMemoryHandle {
    async fn insert(
        &mut self,
        train: &TraitsKey,
        _starting_station: &TraitsKey,
        _ending_station: &TraitsKey,
        window: ScheduleWindow,
    ) -> store::db::Result<()> {
        self.state
            .lock()
            .unwrap()
            .schedules
            .entry(train.clone())
            .or_default()
            .push(window);
        Ok(())
    }

    async fn schedules_for_train(
        &mut self,
        train: &TraitsKey,
    ) -> store::db::Result<Vec<ScheduleWindow>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .schedules
            .get(train)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl TripRepo for InMemoryHandle {
    async fn insert_many(&mut self, legs: &[TripLeg]) -> store::db::Result<Vec<TripId>> {
        let mut state = self.state.lock().unwrap();
        let mut ids = Vec::with_capacity(legs.len());
        for leg in legs {
            let id = state.next_trip_id;
            state.next_trip_id += 1;
            state.trips.insert(id, leg.clone());
            ids.push(TripId::new(id));
        }
        Ok(ids)
    }

    async fn get(&mut self, trip_id: TripId) -> store::db::Result<TripLeg> {
        self.state
            .lock()
            .unwrap()
            .trips
            .get(&trip_id.raw())
            .cloned()
            .ok_or(DatabaseError::NotFound)
    }

    async fn get_many(&mut self, trip_ids: &[TripId]) -> store::db::Result<Vec<TripLeg>> {
        let state = self.state.lock().unwrap();
        trip_ids
            .iter()
            .map(|id| state.trips.get(&id.raw()).cloned().ok_or(DatabaseError::NotFound))
            .collect()
    }
}

#[async_trait]
impl UserRepo for InMemoryHandle {
    async fn exists(&mut self, email: &str) -> store::db::Result<bool> {
        Ok(self.state.lock().unwrap().users.contains_key(email))
    }

    async fn get(&mut self, email: &str) -> store::db::Result<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(email).cloned())
    }

    async fn insert(&mut self, user: User) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.users.contains_key(&user.email) {
            return Err(DatabaseError::AlreadyExists);
        }
        state.users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn delete(&mut self, email: &str) -> store::db::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.users.remove(email).ok_or(DatabaseError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl TicketRepo for InMemoryHandle {
    async fn insert(&mut self, ticket: Ticket) -> store::db::Result<TicketId> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_ticket_id;
        state.next_ticket_id += 1;
        state.tickets.insert(id, ticket);
        Ok(TicketId::new(id))
    }

    async fn purchase_history(&mut self, email: &str) -> store::db::Result<Vec<PurchaseRecord>> {
        let state = self.state.lock().unwrap();
        let mut history: Vec<PurchaseRecord> = state
            .tickets
            .iter()
            .filter(|(_, ticket)| ticket.user_email == email)
            .filter_map(|(ticket_id, ticket)| {
                let leg = state.trips.get(&ticket.trip_id.raw())?;
                Some(PurchaseRecord {
                    purchase_time: ticket.booking_time,
                    ticket_id: *ticket_id,
                    user_email: ticket.user_email.clone(),
                    starting_station_name: leg.from_station.as_str().to_string(),
                    ending_station_name: leg.to_station.as_str().to_string(),
                    start_time: leg.start_time,
                    end_time: leg.end_time,
                    connection_price: ticket.price,
                    reserved_seat: ticket.reserved_seat,
                })
            })
            .collect();
        history.sort_by(|a, b| b.purchase_time.cmp(&a.purchase_time));
        Ok(history)
    }

    async fn train_capacity_for_trip(
        &mut self,
        trip_id: TripId,
    ) -> store::db::Result<Option<(TraitsKey, u32)>> {
        let state = self.state.lock().unwrap();
        let Some(leg) = state.trips.get(&trip_id.raw()) else {
            return Ok(None);
        };
        Ok(state
            .trains
            .get(&leg.train)
            .map(|train| (train.name.clone(), train.capacity)))
    }
}

#[async_trait]
impl ReservationRepo for InMemoryHandle {
    async fn count_for_update(&mut self, trip_id: TripId) -> store::db::Result<u32> {
        let state = self.state.lock().unwrap();
        let count = state
            .reservations
            .values()
            .filter(|reservation| {
                state
                    .tickets
                    .get(&reservation.ticket_id.raw())
                    .map(|ticket| ticket.trip_id == trip_id)
                    .unwrap_or(false)
            })
            .count();
        Ok(count as u32)
    }

    async fn insert(&mut self, reservation: Reservation) -> store::db::Result<ReservationId> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_reservation_id;
        state.next_reservation_id += 1;
        state.reservations.insert(id, reservation);
        Ok(ReservationId::new(id))
    }
}
