/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use std::{sync::Arc, time::Duration};

use scooter_rental_service::{
    common::types::*,
    store::LocationStore,
    tools::error::AppError,
    tracking::{coordinator::RentalCoordinator, report::TickFailure, TrackingConfig},
};
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::flaky_store::FlakyStore;

const TICK: u64 = 3;

fn coordinator(store: Arc<FlakyStore>) -> RentalCoordinator {
    RentalCoordinator::new(
        store,
        TrackingConfig {
            tick_interval: TICK,
            degrees_per_second: 0.000278,
            direction_policy: DirectionPolicy::Rotate,
        },
        Handle::current(),
    )
}

fn montreal_scooter(scooter_id: Uuid) -> RentalScooter {
    RentalScooter {
        scooter_id: scooter_id.to_string(),
        location: Point {
            lat: Latitude(30.5234),
            lon: Longitude(65.5637),
        },
        city: CityName("Montreal".to_string()),
    }
}

/// Lets `ticks` tracking ticks happen, plus a margin so the last one has completed.
async fn ride_for(ticks: u64) {
    tokio::time::sleep(Duration::from_secs(TICK * ticks) + Duration::from_millis(500)).await;
}

#[tokio::test(start_paused = true)]
async fn two_of_five_failed_ticks_are_reported_once_each() {
    let store = FlakyStore::failing_persist_on(&[(1, "disk full"), (3, "connection reset")]);
    let coordinator = coordinator(store.clone());

    let scooter_id = coordinator
        .rent(montreal_scooter(Uuid::new_v4()))
        .await
        .expect("rent");

    ride_for(5).await;

    let result = coordinator.free(scooter_id).await;

    assert_eq!(store.persist_calls(), 5);
    match result {
        Err(AppError::TrackingFailed(report)) => {
            assert_eq!(report.scooter_id, scooter_id);
            assert_eq!(
                report.failures,
                vec![
                    TickFailure {
                        message: "Location Update Failed : connection reset".to_string(),
                        count: 1,
                    },
                    TickFailure {
                        message: "Location Update Failed : disk full".to_string(),
                        count: 1,
                    },
                ]
            );
        }
        other => panic!("expected a tracking failure, got {other:?}"),
    }
    assert!(store.get_availability(&scooter_id).await.expect("availability"));
}

#[tokio::test(start_paused = true)]
async fn clean_ride_frees_without_error() {
    let store = FlakyStore::new();
    let coordinator = coordinator(store.clone());
    let city = CityName("Montreal".to_string());

    let scooter_id = coordinator
        .rent(montreal_scooter(Uuid::new_v4()))
        .await
        .expect("rent");

    ride_for(4).await;

    coordinator.free(scooter_id).await.expect("free");

    assert_eq!(store.persist_calls(), 4);
    // North, east, south, west: back where it started.
    let parked = store
        .get_location(&scooter_id, &city)
        .await
        .expect("lookup")
        .expect("position persisted");
    assert!((parked.lat.0 - 30.5234).abs() < 1e-9);
    assert!((parked.lon.0 - 65.5637).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn concurrent_rentals_of_distinct_scooters_are_independent() {
    let store = FlakyStore::new();
    let coordinator = coordinator(store.clone());

    let (first, second) = tokio::join!(
        coordinator.rent(montreal_scooter(Uuid::new_v4())),
        coordinator.rent(montreal_scooter(Uuid::new_v4())),
    );
    let (first, second) = (first.expect("first rent"), second.expect("second rent"));

    assert_ne!(first, second);
    assert_eq!(coordinator.registry().active_rentals().await, 2);

    ride_for(2).await;
    coordinator.free(first).await.expect("free first");

    assert!(!coordinator.registry().is_tracking(&first).await);
    assert!(coordinator.registry().is_tracking(&second).await);

    ride_for(1).await;
    coordinator.free(second).await.expect("free second");

    // Two ticks for the first scooter, three for the second.
    assert_eq!(store.persist_calls(), 5);
    assert_eq!(coordinator.registry().active_rentals().await, 0);

    let city = CityName("Montreal".to_string());
    let step = TICK as f64 * 0.000278;
    let first_parked = store
        .get_location(&first, &city)
        .await
        .expect("lookup")
        .expect("first position");
    let second_parked = store
        .get_location(&second, &city)
        .await
        .expect("lookup")
        .expect("second position");

    // North then east.
    assert!((first_parked.lat.0 - (30.5234 + step)).abs() < 1e-9);
    assert!((first_parked.lon.0 - (65.5637 + step)).abs() < 1e-9);
    // North, east, then south.
    assert!((second_parked.lat.0 - 30.5234).abs() < 1e-9);
    assert!((second_parked.lon.0 - (65.5637 + step)).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn rent_conflict_then_free_reports_the_failed_tick() {
    let store = FlakyStore::failing_persist_on(&[(0, "redis down")]);
    let coordinator = coordinator(store.clone());
    let scooter = Uuid::new_v4();

    let scooter_id = coordinator
        .rent(montreal_scooter(scooter))
        .await
        .expect("first rent");

    let again = coordinator.rent(montreal_scooter(scooter)).await;
    assert!(matches!(again, Err(AppError::ScooterAlreadyRented(_))));

    ride_for(2).await;

    match coordinator.free(scooter_id).await {
        Err(AppError::TrackingFailed(report)) => {
            assert_eq!(
                report.failures,
                vec![TickFailure {
                    message: "Location Update Failed : redis down".to_string(),
                    count: 1,
                }]
            );
        }
        other => panic!("expected a tracking failure, got {other:?}"),
    }
    assert_eq!(store.persist_calls(), 2);
    assert!(store
        .get_location(&scooter_id, &CityName("Montreal".to_string()))
        .await
        .expect("lookup")
        .is_some());
    assert!(store.get_availability(&scooter_id).await.expect("availability"));

    let second_free = coordinator.free(scooter_id).await;
    assert!(matches!(second_free, Err(AppError::ScooterNotRented(_))));
}

#[tokio::test(start_paused = true)]
async fn failed_availability_update_does_not_start_tracking() {
    let store = FlakyStore::new();
    store.fail_availability_updates(true);
    let coordinator = coordinator(store.clone());
    let scooter = Uuid::new_v4();

    let result = coordinator.rent(montreal_scooter(scooter)).await;

    assert!(matches!(result, Err(AppError::AvailabilityUpdateFailed(_))));
    assert!(
        !coordinator
            .registry()
            .is_tracking(&ScooterId(scooter))
            .await
    );

    ride_for(2).await;
    assert_eq!(store.persist_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_availability_on_free_still_stops_tracking() {
    let store = FlakyStore::failing_persist_on(&[(0, "timeout")]);
    let coordinator = coordinator(store.clone());

    let scooter_id = coordinator
        .rent(montreal_scooter(Uuid::new_v4()))
        .await
        .expect("rent");

    ride_for(1).await;
    store.fail_availability_updates(true);

    let result = coordinator.free(scooter_id).await;

    assert!(matches!(result, Err(AppError::AvailabilityUpdateFailed(_))));
    assert!(!coordinator.registry().is_tracking(&scooter_id).await);

    ride_for(2).await;
    assert_eq!(store.persist_calls(), 1);
}

#[tokio::test]
async fn rental_with_malformed_id_is_rejected() {
    let store = FlakyStore::new();
    let coordinator = coordinator(store.clone());

    let mut scooter = montreal_scooter(Uuid::new_v4());
    scooter.scooter_id = "scooter-42".to_string();

    let result = coordinator.rent(scooter).await;

    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    assert_eq!(coordinator.registry().active_rentals().await, 0);
}

#[tokio::test(start_paused = true)]
async fn free_abandoned_by_its_caller_still_releases_the_scooter() {
    let store = FlakyStore::slow_persist(Duration::from_secs(10));
    let coordinator = coordinator(store.clone());

    let scooter_id = coordinator
        .rent(montreal_scooter(Uuid::new_v4()))
        .await
        .expect("rent");

    // The first tick is now stuck in a slow persist.
    tokio::time::sleep(Duration::from_secs(4)).await;

    let gave_up = tokio::time::timeout(Duration::from_secs(1), coordinator.free(scooter_id)).await;
    assert!(gave_up.is_err());

    tokio::time::sleep(Duration::from_secs(60)).await;

    assert!(!coordinator.registry().is_tracking(&scooter_id).await);
    assert!(store.get_availability(&scooter_id).await.expect("availability"));
    assert!(matches!(
        coordinator.free(scooter_id).await,
        Err(AppError::ScooterNotRented(_))
    ));
    assert_eq!(
        coordinator
            .rent(montreal_scooter(scooter_id.0))
            .await
            .expect("rent again"),
        scooter_id
    );
}
