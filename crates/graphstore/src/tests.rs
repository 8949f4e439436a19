use chrono::NaiveDate;
use model::TripId;
use utility::key::TraitsKey;

use crate::{GraphStore, TripEdge};

fn key(s: &str) -> TraitsKey {
    TraitsKey::new(s)
}

fn dt(hour: u32, minute: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn finds_direct_and_two_leg_paths_between_stations() {
    let mut store = GraphStore::new();
    {
        let mut session = store.session_mut();
        session.create_station(key("A")).unwrap();
        session.create_station(key("B")).unwrap();
        session.create_station(key("C")).unwrap();

        session
            .create_trip_edge(
                &key("A"),
                &key("B"),
                TripEdge {
                    trip_id: TripId::new(1),
                    train_name: key("t1"),
                    departure_time: dt(8, 0),
                    arrival_time: dt(8, 20),
                    travel_time_minutes: 20,
                },
            )
            .unwrap();
        session
            .create_trip_edge(
                &key("B"),
                &key("C"),
                TripEdge {
                    trip_id: TripId::new(2),
                    train_name: key("t1"),
                    departure_time: dt(8, 20),
                    arrival_time: dt(8, 40),
                    travel_time_minutes: 20,
                },
            )
            .unwrap();
        session
            .create_trip_edge(
                &key("A"),
                &key("C"),
                TripEdge {
                    trip_id: TripId::new(3),
                    train_name: key("t2"),
                    departure_time: dt(8, 0),
                    arrival_time: dt(9, 0),
                    travel_time_minutes: 60,
                },
            )
            .unwrap();
    }

    let session = store.session();
    let paths = session
        .find_paths(&key("A"), &key("C"), dt(7, 0), true, 4)
        .unwrap();

    assert_eq!(paths.len(), 2);
    assert!(paths.iter().any(|p| p.edges.len() == 1));
    assert!(paths.iter().any(|p| p.edges.len() == 2));
}

#[test]
fn excludes_edges_departing_before_anchor_in_departure_mode() {
    let mut store = GraphStore::new();
    {
        let mut session = store.session_mut();
        session.create_station(key("A")).unwrap();
        session.create_station(key("B")).unwrap();
        session
            .create_trip_edge(
                &key("A"),
                &key("B"),
                TripEdge {
                    trip_id: TripId::new(1),
                    train_name: key("t1"),
                    departure_time: dt(6, 0),
                    arrival_time: dt(6, 20),
                    travel_time_minutes: 20,
                },
            )
            .unwrap();
    }

    let session = store.session();
    let paths = session
        .find_paths(&key("A"), &key("B"), dt(7, 0), true, 4)
        .unwrap();
    assert!(paths.is_empty());
}

#[test]
fn excludes_paths_crossing_into_a_different_calendar_date() {
    let mut store = GraphStore::new();
    {
        let mut session = store.session_mut();
        session.create_station(key("A")).unwrap();
        session.create_station(key("B")).unwrap();
        session.create_station(key("C")).unwrap();
        session
            .create_trip_edge(
                &key("A"),
                &key("B"),
                TripEdge {
                    trip_id: TripId::new(1),
                    train_name: key("t1"),
                    departure_time: dt(23, 0),
                    arrival_time: dt(23, 50),
                    travel_time_minutes: 50,
                },
            )
            .unwrap();
        session
            .create_trip_edge(
                &key("B"),
                &key("C"),
                TripEdge {
                    trip_id: TripId::new(2),
                    train_name: key("t1"),
                    departure_time: NaiveDate::from_ymd_opt(2024, 1, 2)
                        .unwrap()
                        .and_hms_opt(0, 10, 0)
                        .unwrap(),
                    arrival_time: NaiveDate::from_ymd_opt(2024, 1, 2)
                        .unwrap()
                        .and_hms_opt(0, 40, 0)
                        .unwrap(),
                    travel_time_minutes: 30,
                },
            )
            .unwrap();
    }

    let session = store.session();
    let paths = session
        .find_paths(&key("A"), &key("C"), dt(22, 0), true, 4)
        .unwrap();
    assert!(paths.is_empty());
}

#[test]
fn respects_max_hops() {
    let mut store = GraphStore::new();
    {
        let mut session = store.session_mut();
        for name in ["A", "B", "C", "D", "E", "F"] {
            session.create_station(key(name)).unwrap();
        }
        let stops = ["A", "B", "C", "D", "E", "F"];
        for (index, pair) in stops.windows(2).enumerate() {
            session
                .create_trip_edge(
                    &key(pair[0]),
                    &key(pair[1]),
                    TripEdge {
                        trip_id: TripId::new(index as i64 + 1),
                        train_name: key("t1"),
                        departure_time: dt(8, index as u32 * 10),
                        arrival_time: dt(8, (index as u32 + 1) * 10),
                        travel_time_minutes: 10,
                    },
                )
                .unwrap();
        }
    }

    let session = store.session();
    let paths = session
        .find_paths(&key("A"), &key("F"), dt(7, 0), true, 4)
        .unwrap();
    assert!(paths.is_empty(), "5-edge path exceeds the 4-hop bound");
}
