use chrono::{NaiveDate, NaiveDateTime};
use model::{ScheduleStop, SortingCriteria, TrainStatus, User};
use utility::key::TraitsKey;

use crate::{
    search::SearchOptions,
    test_support::InMemoryDatabase,
    Session, Traits, TraitsError,
};

fn key(value: &str) -> TraitsKey {
    TraitsKey::new(value)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

async fn traits_with_two_connected_stations() -> Traits<InMemoryDatabase> {
    let t = Traits::new(InMemoryDatabase::new());
    t.add_train_station(Session::Admin, key("A"), None)
        .await
        .unwrap();
    t.add_train_station(Session::Admin, key("B"), None)
        .await
        .unwrap();
    t.add_train_station(Session::Admin, key("C"), None)
        .await
        .unwrap();
    t.connect_train_stations(Session::Admin, key("A"), key("B"), 30)
        .await
        .unwrap();
    t.connect_train_stations(Session::Admin, key("B"), key("C"), 20)
        .await
        .unwrap();
    t
}

#[tokio::test]
async fn admin_required_for_mutations() {
    let t = Traits::new(InMemoryDatabase::new());
    let err = t
        .add_train_station(Session::Base, key("A"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn connect_train_stations_rejects_out_of_bounds_travel_time() {
    let t = Traits::new(InMemoryDatabase::new());
    t.add_train_station(Session::Admin, key("A"), None)
        .await
        .unwrap();
    t.add_train_station(Session::Admin, key("B"), None)
        .await
        .unwrap();
    let err = t
        .connect_train_stations(Session::Admin, key("A"), key("B"), 61)
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn connect_train_stations_rejects_unknown_station() {
    let t = Traits::new(InMemoryDatabase::new());
    t.add_train_station(Session::Admin, key("A"), None)
        .await
        .unwrap();
    let err = t
        .connect_train_stations(Session::Admin, key("A"), key("ghost"), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::NotFound));
}

#[tokio::test]
async fn add_schedule_rejects_unknown_train() {
    let t = traits_with_two_connected_stations().await;
    let stops = vec![
        ScheduleStop::new(key("A"), 0),
        ScheduleStop::new(key("B"), 10),
    ];
    let err = t
        .add_schedule(
            Session::Admin,
            key("ghost"),
            8,
            0,
            stops,
            date(2026, 1, 1),
            date(2026, 1, 31),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn add_schedule_rejects_non_adjacent_stations() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 100, TrainStatus::Operational)
        .await
        .unwrap();
    // A -> C is never connected directly, only via B.
    let stops = vec![
        ScheduleStop::new(key("A"), 0),
        ScheduleStop::new(key("C"), 10),
    ];
    let err = t
        .add_schedule(
            Session::Admin,
            key("ICE1"),
            8,
            0,
            stops,
            date(2026, 1, 1),
            date(2026, 1, 31),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn add_schedule_rejects_terminus_below_waiting_floor() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 100, TrainStatus::Operational)
        .await
        .unwrap();
    let stops = vec![
        ScheduleStop::new(key("A"), 0),
        ScheduleStop::new(key("B"), 9),
    ];
    let err = t
        .add_schedule(
            Session::Admin,
            key("ICE1"),
            8,
            0,
            stops,
            date(2026, 1, 1),
            date(2026, 1, 31),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn add_schedule_rejects_overlap_for_same_train() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 100, TrainStatus::Operational)
        .await
        .unwrap();
    let stops = || {
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
        ]
    };
    t.add_schedule(
        Session::Admin,
        key("ICE1"),
        8,
        0,
        stops(),
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    // Same train, same time of day, overlapping validity window.
    let err = t
        .add_schedule(
            Session::Admin,
            key("ICE1"),
            8,
            0,
            stops(),
            date(2026, 1, 15),
            date(2026, 2, 15),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn add_schedule_rejects_cross_day_gap_violation() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 100, TrainStatus::Operational)
        .await
        .unwrap();
    // Runs 23:00 -> 23:30 every day through the end of January.
    t.add_schedule(
        Session::Admin,
        key("ICE1"),
        23,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    // A second, non-overlapping validity window starting the very next
    // day at 00:00 leaves only a 30-minute gap since the January
    // schedule's last 23:30 finish, short of the 6-hour floor.
    let err = t
        .add_schedule(
            Session::Admin,
            key("ICE1"),
            0,
            0,
            vec![
                ScheduleStop::new(key("B"), 0),
                ScheduleStop::new(key("A"), 10),
            ],
            date(2026, 2, 1),
            date(2026, 2, 28),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn add_schedule_materialises_trips_and_search_finds_them() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 2, TrainStatus::Operational)
        .await
        .unwrap();
    t.add_schedule(
        Session::Admin,
        key("ICE1"),
        8,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
            ScheduleStop::new(key("C"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    let results = t
        .search_connections(
            Session::Base,
            &key("A"),
            &key("C"),
            at(2026, 1, 5, 7, 0),
            SearchOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.legs.len(), 2);
    assert_eq!(result.score.number_of_trains, 2);
    // A->B 30 minutes, 10 minute dwell, B->C 20 minutes.
    assert_eq!(result.score.overall_travel_time, 50);
    assert_eq!(result.score.int_waiting_time, 10);
}

#[tokio::test]
async fn search_connections_rejects_equal_endpoints() {
    let t = traits_with_two_connected_stations().await;
    let err = t
        .search_connections(
            Session::Base,
            &key("A"),
            &key("A"),
            at(2026, 1, 5, 7, 0),
            SearchOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn search_connections_sorts_by_requested_criteria() {
    let t = traits_with_two_connected_stations().await;
    // A direct A->B run (30 minutes, no interchange) and a slower A->D->B
    // detour through a fourth station give the same pair of endpoints two
    // genuinely different routes to sort between.
    t.add_train_station(Session::Admin, key("D"), None)
        .await
        .unwrap();
    t.connect_train_stations(Session::Admin, key("A"), key("D"), 20)
        .await
        .unwrap();
    t.connect_train_stations(Session::Admin, key("D"), key("B"), 20)
        .await
        .unwrap();

    t.add_train(Session::Admin, key("direct"), 10, TrainStatus::Operational)
        .await
        .unwrap();
    t.add_schedule(
        Session::Admin,
        key("direct"),
        8,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    t.add_train(Session::Admin, key("detour"), 10, TrainStatus::Operational)
        .await
        .unwrap();
    t.add_schedule(
        Session::Admin,
        key("detour"),
        8,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("D"), 10),
            ScheduleStop::new(key("B"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    let ascending = t
        .search_connections(
            Session::Base,
            &key("A"),
            &key("B"),
            at(2026, 1, 5, 7, 0),
            SearchOptions {
                sort_by: SortingCriteria::OverallTravelTime,
                is_ascending: true,
                ..SearchOptions::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(ascending.len(), 2);
    // direct (30 minutes) must sort ahead of the detour (20 + 20 = 40
    // minutes of travel through D).
    assert_eq!(ascending[0].score.number_of_trains, 1);
    assert_eq!(ascending[1].score.number_of_trains, 2);
    assert!(ascending[0].score.overall_travel_time < ascending[1].score.overall_travel_time);

    let descending = t
        .search_connections(
            Session::Base,
            &key("A"),
            &key("B"),
            at(2026, 1, 5, 7, 0),
            SearchOptions {
                sort_by: SortingCriteria::OverallTravelTime,
                is_ascending: false,
                ..SearchOptions::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(descending.len(), 2);
    assert_eq!(descending[0].score.number_of_trains, ascending[1].score.number_of_trains);
    assert_eq!(descending[1].score.number_of_trains, ascending[0].score.number_of_trains);
}

#[tokio::test]
async fn buy_ticket_happy_path_reserves_seat_and_computes_price() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 1, TrainStatus::Operational)
        .await
        .unwrap();
    t.add_user(Session::Base, User::new("rider@example.com", None))
        .await
        .unwrap();
    t.add_schedule(
        Session::Admin,
        key("ICE1"),
        8,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    let results = t
        .search_connections(
            Session::Base,
            &key("A"),
            &key("B"),
            at(2026, 1, 5, 7, 0),
            SearchOptions::default(),
        )
        .await
        .unwrap();
    let trip_id = results[0].trip_ids[0];

    let ticket_id = t
        .buy_ticket(
            Session::Base,
            "rider@example.com",
            trip_id,
            at(2026, 1, 5, 7, 0),
            true,
        )
        .await
        .unwrap();

    let history = t
        .get_purchase_history(Session::Base, "rider@example.com")
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].ticket_id, ticket_id.raw());
    // A->B is a 30 minute leg, so price = floor(30/2) + 2 = 17.
    assert_eq!(history[0].connection_price, 17);
    assert!(history[0].reserved_seat);
}

#[tokio::test]
async fn buy_ticket_rejects_unknown_user() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 1, TrainStatus::Operational)
        .await
        .unwrap();
    t.add_schedule(
        Session::Admin,
        key("ICE1"),
        8,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    let trip_id = search_trip_id(&t, "A", "B").await;
    let err = t
        .buy_ticket(
            Session::Base,
            "ghost@example.com",
            trip_id,
            at(2026, 1, 5, 7, 0),
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::NotFound));
}

#[tokio::test]
async fn buy_ticket_rejects_capacity_exhausted() {
    let t = traits_with_two_connected_stations().await;
    t.add_train(Session::Admin, key("ICE1"), 1, TrainStatus::Operational)
        .await
        .unwrap();
    t.add_user(Session::Base, User::new("a@example.com", None))
        .await
        .unwrap();
    t.add_user(Session::Base, User::new("b@example.com", None))
        .await
        .unwrap();
    t.add_schedule(
        Session::Admin,
        key("ICE1"),
        8,
        0,
        vec![
            ScheduleStop::new(key("A"), 0),
            ScheduleStop::new(key("B"), 10),
        ],
        date(2026, 1, 1),
        date(2026, 1, 31),
    )
    .await
    .unwrap();

    let trip_id = search_trip_id(&t, "A", "B").await;
    let first = t
        .buy_ticket(Session::Base, "a@example.com", trip_id, at(2026, 1, 5, 7, 0), true)
        .await;
    assert!(first.is_ok());

    let second = t
        .buy_ticket(Session::Base, "b@example.com", trip_id, at(2026, 1, 5, 7, 0), true)
        .await;
    assert!(matches!(second, Err(TraitsError::InvalidArgument(_))));
}

#[tokio::test]
async fn get_train_current_status_returns_none_for_unknown_train() {
    let t = Traits::new(InMemoryDatabase::new());
    let status = t
        .get_train_current_status(Session::Base, &key("ghost"))
        .await
        .unwrap();
    assert_eq!(status, None);
}

#[tokio::test]
async fn update_train_details_changes_status_and_capacity() {
    let t = Traits::new(InMemoryDatabase::new());
    t.add_train(Session::Admin, key("ICE1"), 10, TrainStatus::Operational)
        .await
        .unwrap();
    t.update_train_details(
        Session::Admin,
        &key("ICE1"),
        Some(20),
        Some(TrainStatus::Delayed),
    )
    .await
    .unwrap();

    let status = t
        .get_train_current_status(Session::Base, &key("ICE1"))
        .await
        .unwrap();
    assert_eq!(status, Some(TrainStatus::Delayed));
}

#[tokio::test]
async fn delete_train_removes_it() {
    let t = Traits::new(InMemoryDatabase::new());
    t.add_train(Session::Admin, key("ICE1"), 10, TrainStatus::Operational)
        .await
        .unwrap();
    t.delete_train(Session::Admin, &key("ICE1")).await.unwrap();
    let status = t
        .get_train_current_status(Session::Base, &key("ICE1"))
        .await
        .unwrap();
    assert_eq!(status, None);
}

#[tokio::test]
async fn add_user_rejects_malformed_email() {
    let t = Traits::new(InMemoryDatabase::new());
    let err = t
        .add_user(Session::Base, User::new("not-an-email", None))
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

#[tokio::test]
async fn delete_user_rejects_unknown_email() {
    let t = Traits::new(InMemoryDatabase::new());
    let err = t
        .delete_user(Session::Base, "ghost@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, TraitsError::InvalidArgument(_)));
}

async fn search_trip_id(t: &Traits<InMemoryDatabase>, from: &str, to: &str) -> model::TripId {
    let results = t
        .search_connections(
            Session::Base,
            &key(from),
            &key(to),
            at(2026, 1, 5, 7, 0),
            SearchOptions::default(),
        )
        .await
        .unwrap();
    results[0].trip_ids[0]
}
