/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use std::sync::Arc;

use actix_web::{
    http::StatusCode,
    test,
    web::{self, Data},
    App,
};
use scooter_rental_service::{
    domain::{action::scooter::seed_scooters, api},
    environment::{AppState, SeedScooter},
    store::{memory::InMemoryStore, LocationStore},
    tracking::TrackingConfig,
};
use serde_json::{json, Value};
use tokio::runtime::Handle;
use uuid::Uuid;

const NEAR_OTTAWA: &str = "0dae4f8c-dbbf-4bac-90f2-b80f07255ba5";
const FAR_OTTAWA: &str = "4117b009-5e61-4b3a-aac5-c9d6a75483cb";

async fn app_state() -> Data<AppState> {
    let store: Arc<dyn LocationStore> = Arc::new(InMemoryStore::new());

    let fleet = [
        (NEAR_OTTAWA, "Ottawa", 45.5017, 73.5673),
        (FAR_OTTAWA, "Ottawa", 45.4724, 73.5637),
        ("bad9f260-e3f5-4375-a4b3-3f6e258eb21f", "Montreal", 30.5234, 65.5637),
    ]
    .into_iter()
    .map(|(id, city, lat, lon)| SeedScooter {
        id: id.to_string(),
        city: city.to_string(),
        lat,
        lon,
    })
    .collect::<Vec<_>>();

    seed_scooters(store.as_ref(), &fleet)
        .await
        .expect("seed fleet");

    Data::new(AppState::with_store(
        store,
        TrackingConfig::default(),
        1000,
        Handle::current(),
    ))
}

#[actix_web::test]
async fn listing_requires_a_client_uuid() {
    let app = test::init_service(
        App::new()
            .app_data(app_state().await)
            .configure(api::handler),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/v1/scooters?longitude=73.5673&latitude=45.5017&radius=50000&city=Ottawa")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorCode"], "INVALID_REQUEST");
}

#[actix_web::test]
async fn listing_returns_nearest_scooters_of_the_city() {
    let app = test::init_service(
        App::new()
            .app_data(app_state().await)
            .configure(api::handler),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/v1/scooters?longitude=73.5673&latitude=45.5017&radius=50000&city=Ottawa")
        .insert_header(("clientUUID", Uuid::new_v4().to_string()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let scooters = body.as_array().expect("list of scooters");
    assert_eq!(scooters.len(), 2);
    assert_eq!(scooters[0]["UUID"], NEAR_OTTAWA);
    assert_eq!(scooters[1]["UUID"], FAR_OTTAWA);
    assert!(scooters.iter().all(|scooter| scooter["availability"] == true));
}

#[actix_web::test]
async fn rent_and_free_through_the_api() {
    let app = test::init_service(
        App::new()
            .app_data(app_state().await)
            .app_data(web::JsonConfig::default())
            .configure(api::handler),
    )
    .await;
    let client_id = Uuid::new_v4().to_string();
    let rent_body = json!({
        "UUID": NEAR_OTTAWA,
        "longitude": 73.5673,
        "latitude": 45.5017,
        "availability": true,
        "city": "Ottawa"
    });

    let rent = || {
        test::TestRequest::post()
            .uri("/v1/rent")
            .insert_header(("clientUUID", client_id.clone()))
            .set_json(&rent_body)
            .to_request()
    };
    let free = || {
        test::TestRequest::post()
            .uri("/v1/free")
            .insert_header(("clientUUID", client_id.clone()))
            .set_json(NEAR_OTTAWA)
            .to_request()
    };

    let resp = test::call_service(&app, rent()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "result": "Success" }));

    let resp = test::call_service(&app, rent()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorCode"], "SCOOTER_ALREADY_RENTED");

    let listing = test::TestRequest::get()
        .uri("/v1/scooters?longitude=73.5673&latitude=45.5017&radius=100&city=Ottawa")
        .insert_header(("clientUUID", client_id.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, listing).await;
    assert_eq!(body[0]["availability"], false);

    let resp = test::call_service(&app, free()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, free()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errorCode"], "SCOOTER_NOT_RENTED");
}

#[actix_web::test]
async fn health_check_reports_service_up() {
    let app = test::init_service(
        App::new()
            .app_data(app_state().await)
            .configure(api::handler),
    )
    .await;

    let req = test::TestRequest::get().uri("/healthcheck").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["result"], "Service Is Up");
}
