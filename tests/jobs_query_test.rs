mod common;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::BTreeSet;

use common::TestApp;

/// Seeds three jobs with pinned, strictly increasing createdAt timestamps.
/// Returns the app; job ids are 1 (Boeing), 2 (Airbus), 3 (Embraer).
async fn fixture() -> TestApp {
    let app = TestApp::new().await;

    let jobs = [
        json!({
            "equipment": "Boeing 737",
            "company": "Aerolineas Argentinas",
            "plane": "LV-FUA",
            "technicianIds": [],
            "status": "Pendiente",
            "notes": "Revision general previa a vuelo",
            "anomaly": false
        }),
        json!({
            "equipment": "Airbus A320",
            "company": "LATAM",
            "plane": "CC-BFQ",
            "technicianIds": [],
            "status": "EnProceso",
            "notes": "Cambio de filtro hidraulico",
            "anomaly": true
        }),
        json!({
            "equipment": "Embraer 190",
            "company": "Flybondi",
            "plane": "LV-HKA",
            "technicianIds": [],
            "status": "Completado",
            "notes": "Inspeccion de cabina completa",
            "anomaly": false
        }),
    ];

    for (index, payload) in jobs.into_iter().enumerate() {
        let job = app.create_job(payload).await;
        let id = job["id"].as_i64().unwrap() as i32;
        let at = Utc
            .with_ymd_and_hms(2024, 1, 1 + index as u32, 12, 0, 0)
            .unwrap();
        app.set_job_timestamps(id, at).await;
    }

    app
}

fn item_ids(body: &Value) -> Vec<i64> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn sorts_by_created_at_in_both_directions() {
    let app = fixture().await;

    let (status, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?sortBy=createdAt&sortDir=asc",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_ids(&body), [1, 2, 3]);

    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?sortBy=createdAt&sortDir=desc",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [3, 2, 1]);
}

#[tokio::test]
async fn sorts_by_text_fields() {
    let app = fixture().await;

    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?sortBy=equipment&sortDir=asc",
            None,
        )
        .await;
    // Airbus A320, Boeing 737, Embraer 190
    assert_eq!(item_ids(&body), [2, 1, 3]);

    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?sortBy=company&sortDir=desc",
            None,
        )
        .await;
    // LATAM, Flybondi, Aerolineas Argentinas
    assert_eq!(item_ids(&body), [2, 3, 1]);
}

#[tokio::test]
async fn default_listing_is_newest_first() {
    let app = fixture().await;

    let (_, body) = app.request_json(Method::GET, "/maintenancejobs", None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 20);
    assert_eq!(item_ids(&body), [3, 2, 1]);
}

#[tokio::test]
async fn page_windows_partition_the_result_set() {
    let app = fixture().await;

    let mut seen = Vec::new();
    for page in 1..=2 {
        let (status, body) = app
            .request_json(
                Method::GET,
                &format!("/maintenancejobs?page={page}&pageSize=2&sortBy=id&sortDir=asc"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        let ids = item_ids(&body);
        assert!(ids.len() <= 2);
        seen.extend(ids);
    }

    assert_eq!(seen.len(), 3);
    assert_eq!(seen.iter().collect::<BTreeSet<_>>().len(), 3);

    // a window past the end is empty, not an error
    let (status, body) = app
        .request_json(Method::GET, "/maintenancejobs?page=5&pageSize=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn rejects_invalid_pagination_and_sort_parameters() {
    let app = TestApp::new().await;

    for uri in [
        "/maintenancejobs?page=0",
        "/maintenancejobs?pageSize=0",
        "/maintenancejobs?pageSize=101",
    ] {
        let (status, body) = app.request_json(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}: {body}");
        assert_eq!(body["details"]["pageSize"], "1-100");
    }

    let (status, body) = app
        .request_json(Method::GET, "/maintenancejobs?sortDir=sideways", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["allowed"], json!(["asc", "desc"]));

    let (status, body) = app
        .request_json(Method::GET, "/maintenancejobs?sortBy=foo", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["allowed"],
        json!(["id", "equipment", "company", "plane", "status", "createdAt", "updatedAt"])
    );
}

#[tokio::test]
async fn filters_compose_with_and_semantics() {
    let app = fixture().await;

    let (_, body) = app
        .request_json(Method::GET, "/maintenancejobs?status=EnProceso", None)
        .await;
    assert_eq!(item_ids(&body), [2]);

    let (_, body) = app
        .request_json(Method::GET, "/maintenancejobs?anomaly=true", None)
        .await;
    assert_eq!(item_ids(&body), [2]);

    // substring filters are case-insensitive
    let (_, body) = app
        .request_json(Method::GET, "/maintenancejobs?company=latam", None)
        .await;
    assert_eq!(item_ids(&body), [2]);

    let (_, body) = app
        .request_json(Method::GET, "/maintenancejobs?equipment=airbus", None)
        .await;
    assert_eq!(item_ids(&body), [2]);

    // plane filter plus status filter must both hold
    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?plane=LV&status=Pendiente",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [1]);

    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?plane=LV&status=EnProceso",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), Vec::<i64>::new());

    let (status, body) = app
        .request_json(Method::GET, "/maintenancejobs?status=Cerrado", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["allowed"],
        json!(["Pendiente", "EnProceso", "Completado"])
    );
}

#[tokio::test]
async fn search_spans_text_fields_and_notes() {
    let app = fixture().await;

    // notes of job 2 only
    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?search=filtro&sortBy=id&sortDir=asc",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [2]);

    // plane registrations of jobs 1 and 3
    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?search=lv-&sortBy=id&sortDir=asc",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [1, 3]);

    // company match, case-insensitive
    let (_, body) = app
        .request_json(Method::GET, "/maintenancejobs?search=FLYBONDI", None)
        .await;
    assert_eq!(item_ids(&body), [3]);

    // search composes with field filters
    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?search=lv-&status=Completado",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [3]);
}

#[tokio::test]
async fn blank_filter_parameters_are_ignored() {
    let app = fixture().await;

    let (status, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?company=%20%20&search=%20",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn equal_sort_keys_fall_back_to_id_order() {
    let app = TestApp::new().await;

    for plane in ["LV-AAA", "LV-BBB", "LV-CCC"] {
        app.create_job(json!({
            "equipment": "Boeing 737",
            "company": "Aerolineas Argentinas",
            "plane": plane,
            "technicianIds": [],
            "status": "Pendiente",
            "anomaly": false
        }))
        .await;
    }
    // identical equipment on every row: ties resolve by ascending id
    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?sortBy=equipment&sortDir=asc",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [1, 2, 3]);

    let (_, body) = app
        .request_json(
            Method::GET,
            "/maintenancejobs?sortBy=equipment&sortDir=desc",
            None,
        )
        .await;
    assert_eq!(item_ids(&body), [1, 2, 3]);
}

#[tokio::test]
async fn items_expand_their_technician_sets() {
    let app = TestApp::new().await;
    let first = app.create_technician("Juan Perez").await;
    let second = app.create_technician("Carlos Gomez").await;

    app.create_job(json!({
        "equipment": "Boeing 737",
        "company": "Aerolineas Argentinas",
        "plane": "LV-FUA",
        "technicianIds": [second, first],
        "status": "Pendiente",
        "anomaly": false
    }))
    .await;

    let (_, body) = app.request_json(Method::GET, "/maintenancejobs", None).await;
    let technicians = &body["items"][0]["technicians"];
    assert_eq!(
        *technicians,
        json!([
            { "id": first, "name": "Juan Perez" },
            { "id": second, "name": "Carlos Gomez" }
        ])
    );
}
