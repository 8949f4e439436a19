use std::{env, error::Error, future::Future};

use async_trait::async_trait;
use model::{
    PurchaseRecord, Reservation, ReservationId, ScheduleWindow, Segment, Station,
    Ticket, TicketId, Train, TrainStatus, TripId, TripLeg, User,
};
use queries::convert_error;
use sqlx::Transaction;
use store::db::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction,
    ReservationRepo, ScheduleRepo, SegmentRepo, StationRepo, TicketRepo, TrainRepo,
    TripRepo, UserRepo,
};
use utility::key::TraitsKey;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    pool: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(info: &DatabaseConnectionInfo) -> Result<Self, Box<dyn Error>> {
        let pool = sqlx::postgres::PgPool::connect(&info.postgres_url()).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("connected to {}:{}", info.hostname, info.port);
        Ok(Self { pool })
    }
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> store::db::Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

impl DatabaseAutocommit for PgDatabaseAutocommit {}
impl DatabaseOperations for PgDatabaseAutocommit {}
impl<'a> DatabaseOperations for PgDatabaseTransaction<'a> {}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.pool.clone(),
        }
    }

    async fn transaction(&self) -> store::db::Result<Self::Transaction> {
        let tx = self.pool.begin().await.map_err(convert_error)?;
        Ok(PgDatabaseTransaction { tx })
    }

    async fn perform_transaction<T, E, F, Fut>(&self, action: F) -> Result<T, E>
    where
        T: Send,
        E: From<store::db::DatabaseError> + Send,
        F: Send + FnOnce(&mut Self::Transaction) -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
    {
        let tx = self.pool.begin().await.map_err(convert_error)?;
        let mut tx = PgDatabaseTransaction { tx };
        let result = action(&mut tx).await;
        match result {
            Ok(value) => {
                tx.commit().await.map_err(E::from)?;
                Ok(value)
            }
            Err(why) => {
                // `tx` drops here and rolls back before the error reaches
                // the caller.
                Err(why)
            }
        }
    }
}

#[async_trait]
impl StationRepo for PgDatabaseAutocommit {
    async fn exists(&mut self, name: &TraitsKey) -> store::db::Result<bool> {
        queries::station::exists(&self.pool, name).await
    }
    async fn get(&mut self, name: &TraitsKey) -> store::db::Result<Option<Station>> {
        queries::station::get(&self.pool, name).await
    }
    async fn insert(&mut self, station: Station) -> store::db::Result<()> {
        queries::station::insert(&self.pool, station).await
    }
}

#[async_trait]
impl<'a> StationRepo for PgDatabaseTransaction<'a> {
    async fn exists(&mut self, name: &TraitsKey) -> store::db::Result<bool> {
        queries::station::exists(&mut *self.tx, name).await
    }
    async fn get(&mut self, name: &TraitsKey) -> store::db::Result<Option<Station>> {
        queries::station::get(&mut *self.tx, name).await
    }
    async fn insert(&mut self, station: Station) -> store::db::Result<()> {
        queries::station::insert(&mut *self.tx, station).await
    }
}

#[async_trait]
impl SegmentRepo for PgDatabaseAutocommit {
    async fn travel_time(
        &mut self,
        from: &TraitsKey,
        to: &TraitsKey,
    ) -> store::db::Result<Option<u32>> {
        queries::segment::travel_time(&self.pool, from, to).await
    }
    async fn insert(&mut self, segment: Segment) -> store::db::Result<()> {
        queries::segment::insert(&self.pool, segment).await
    }
}

#[async_trait]
impl<'a> SegmentRepo for PgDatabaseTransaction<'a> {
    async fn travel_time(
        &mut self,
        from: &TraitsKey,
        to: &TraitsKey,
    ) -> store::db::Result<Option<u32>> {
        queries::segment::travel_time(&mut *self.tx, from, to).await
    }
    async fn insert(&mut self, segment: Segment) -> store::db::Result<()> {
        queries::segment::insert(&mut *self.tx, segment).await
    }
}

#[async_trait]
impl TrainRepo for PgDatabaseAutocommit {
    async fn exists(&mut self, name: &TraitsKey) -> store::db::Result<bool> {
        queries::train::exists(&self.pool, name).await
    }
    async fn get(&mut self, name: &TraitsKey) -> store::db::Result<Option<Train>> {
        queries::train::get(&self.pool, name).await
    }
    async fn insert(&mut self, train: Train) -> store::db::Result<()> {
        queries::train::insert(&self.pool, train).await
    }
    async fn update_capacity(
        &mut self,
        name: &TraitsKey,
        capacity: u32,
    ) -> store::db::Result<()> {
        queries::train::update_capacity(&self.pool, name, capacity).await
    }
    async fn update_status(
        &mut self,
        name: &TraitsKey,
        status: TrainStatus,
    ) -> store::db::Result<()> {
        queries::train::update_status(&self.pool, name, status).await
    }
    async fn delete(&mut self, name: &TraitsKey) -> store::db::Result<()> {
        queries::train::delete(&self.pool, name).await
    }
}

#[async_trait]
impl<'a> TrainRepo for PgDatabaseTransaction<'a> {
    async fn exists(&mut self, name: &TraitsKey) -> store::db::Result<bool> {
        queries::train::exists(&mut *self.tx, name).await
    }
    async fn get(&mut self, name: &TraitsKey) -> store::db::Result<Option<Train>> {
        queries::train::get(&mut *self.tx, name).await
    }
    async fn insert(&mut self, train: Train) -> store::db::Result<()> {
        queries::train::insert(&mut *self.tx, train).await
    }
    async fn update_capacity(
        &mut self,
        name: &TraitsKey,
        capacity: u32,
    ) -> store::db::Result<()> {
        queries::train::update_capacity(&mut *self.tx, name, capacity).await
    }
    async fn update_status(
        &mut self,
        name: &TraitsKey,
        status: TrainStatus,
    ) -> store::db::Result<()> {
        queries::train::update_status(&mut *self.tx, name, status).await
    }
    async fn delete(&mut self, name: &TraitsKey) -> store::db::Result<()> {
        queries::train::delete(&mut *self.tx, name).await
    }
}

#[async_trait]
impl ScheduleRepo for PgDatabaseAutocommit {
    async fn insert(
        &mut self,
        train: &TraitsKey,
        starting_station: &TraitsKey,
        ending_station: &TraitsKey,
        window: ScheduleWindow,
    ) -> store::db::Result<()> {
        queries::schedule::insert(
            &self.pool,
            train,
            starting_station,
            ending_station,
            window,
        )
        .await
    }
    async fn schedules_for_train(
        &mut self,
        train: &TraitsKey,
    ) -> store::db::Result<Vec<ScheduleWindow>> {
        queries::schedule::schedules_for_train(&self.pool, train).await
    }
}

#[async_trait]
impl<'a> ScheduleRepo for PgDatabaseTransaction<'a> {
    async fn insert(
        &mut self,
        train: &TraitsKey,
        starting_station: &TraitsKey,
        ending_station: &TraitsKey,
        window: ScheduleWindow,
    ) -> store::db::Result<()> {
        queries::schedule::insert(
            &mut *self.tx,
            train,
            starting_station,
            ending_station,
            window,
        )
        .await
    }
    async fn schedules_for_train(
        &mut self,
        train: &TraitsKey,
    ) -> store::db::Result<Vec<ScheduleWindow>> {
        queries::schedule::schedules_for_train(&mut *self.tx, train).await
    }
}

#[async_trait]
impl TripRepo for PgDatabaseAutocommit {
    async fn insert_many(&mut self, legs: &[TripLeg]) -> store::db::Result<Vec<TripId>> {
        queries::trip::insert_many(&self.pool, legs).await
    }
    async fn get(&mut self, trip_id: TripId) -> store::db::Result<TripLeg> {
        queries::trip::get(&self.pool, trip_id).await
    }
    async fn get_many(&mut self, trip_ids: &[TripId]) -> store::db::Result<Vec<TripLeg>> {
        queries::trip::get_many(&self.pool, trip_ids).await
    }
}

#[async_trait]
impl<'a> TripRepo for PgDatabaseTransaction<'a> {
    async fn insert_many(&mut self, legs: &[TripLeg]) -> store::db::Result<Vec<TripId>> {
        queries::trip::insert_many(&mut *self.tx, legs).await
    }
    async fn get(&mut self, trip_id: TripId) -> store::db::Result<TripLeg> {
        queries::trip::get(&mut *self.tx, trip_id).await
    }
    async fn get_many(&mut self, trip_ids: &[TripId]) -> store::db::Result<Vec<TripLeg>> {
        queries::trip::get_many(&mut *self.tx, trip_ids).await
    }
}

#[async_trait]
impl UserRepo for PgDatabaseAutocommit {
    async fn exists(&mut self, email: &str) -> store::db::Result<bool> {
        queries::user::exists(&self.pool, email).await
    }
    async fn get(&mut self, email: &str) -> store::db::Result<Option<User>> {
        queries::user::get(&self.pool, email).await
    }
    async fn insert(&mut self, user: User) -> store::db::Result<()> {
        queries::user::insert(&self.pool, user).await
    }
    async fn delete(&mut self, email: &str) -> store::db::Result<()> {
        queries::user::delete(&self.pool, email).await
    }
}

#[async_trait]
impl<'a> UserRepo for PgDatabaseTransaction<'a> {
    async fn exists(&mut self, email: &str) -> store::db::Result<bool> {
        queries::user::exists(&mut *self.tx, email).await
    }
    async fn get(&mut self, email: &str) -> store::db::Result<Option<User>> {
        queries::user::get(&mut *self.tx, email).await
    }
    async fn insert(&mut self, user: User) -> store::db::Result<()> {
        queries::user::insert(&mut *self.tx, user).await
    }
    async fn delete(&mut self, email: &str) -> store::db::Result<()> {
        queries::user::delete(&mut *self.tx, email).await
    }
}

#[async_trait]
impl TicketRepo for PgDatabaseAutocommit {
    async fn insert(&mut self, ticket: Ticket) -> store::db::Result<TicketId> {
        queries::ticket::insert(&self.pool, ticket).await
    }
    async fn purchase_history(
        &mut self,
        email: &str,
    ) -> store::db::Result<Vec<PurchaseRecord>> {
        queries::ticket::purchase_history(&self.pool, email).await
    }
    async fn train_capacity_for_trip(
        &mut self,
        trip_id: TripId,
    ) -> store::db::Result<Option<(TraitsKey, u32)>> {
        queries::ticket::train_capacity_for_trip(&self.pool, trip_id).await
    }
}

#[async_trait]
impl<'a> TicketRepo for PgDatabaseTransaction<'a> {
    async fn insert(&mut self, ticket: Ticket) -> store::db::Result<TicketId> {
        queries::ticket::insert(&mut *self.tx, ticket).await
    }
    async fn purchase_history(
        &mut self,
        email: &str,
    ) -> store::db::Result<Vec<PurchaseRecord>> {
        queries::ticket::purchase_history(&mut *self.tx, email).await
    }
    async fn train_capacity_for_trip(
        &mut self,
        trip_id: TripId,
    ) -> store::db::Result<Option<(TraitsKey, u32)>> {
        queries::ticket::train_capacity_for_trip(&mut *self.tx, trip_id).await
    }
}

#[async_trait]
impl ReservationRepo for PgDatabaseAutocommit {
    async fn count_for_update(&mut self, trip_id: TripId) -> store::db::Result<u32> {
        queries::reservation::count_for_update(&self.pool, trip_id).await
    }
    async fn insert(
        &mut self,
        reservation: Reservation,
    ) -> store::db::Result<ReservationId> {
        queries::reservation::insert(&self.pool, reservation).await
    }
}

#[async_trait]
impl<'a> ReservationRepo for PgDatabaseTransaction<'a> {
    async fn count_for_update(&mut self, trip_id: TripId) -> store::db::Result<u32> {
        queries::reservation::count_for_update(&mut *self.tx, trip_id).await
    }
    async fn insert(
        &mut self,
        reservation: Reservation,
    ) -> store::db::Result<ReservationId> {
        queries::reservation::insert(&mut *self.tx, reservation).await
    }
}
