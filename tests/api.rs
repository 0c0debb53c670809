//! HTTP tests for the REST API using actix's test server.

use actix_web::{http::StatusCode, test, App};
use club_draw_web::api;
use club_draw_web::{Bracket, Draw, DrawState};
use serde_json::{json, Value};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(api::new_state())
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn schedule_endpoint_clamps_negative_n() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/schedule?n=-3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["participants"], 0);
    assert_eq!(body["fixtures"].as_array().map(Vec::len), Some(0));

    let req = test::TestRequest::get().uri("/api/schedule?n=6").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fixtures"].as_array().map(Vec::len), Some(15));
    assert_eq!(body["rounds"].as_array().map(Vec::len), Some(5));
}

#[actix_web::test]
async fn draw_flow_over_http() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/draws")
        .set_json(json!({ "title": "Season raffle" }))
        .to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    let base = format!("/api/draws/{}", draw.id);

    // running without prizes is rejected with the setup warning
    let req = test::TestRequest::post().uri(&format!("{base}/run")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Add at least one prize");

    let req = test::TestRequest::post()
        .uri(&format!("{base}/prizes"))
        .set_json(json!({ "name": "Signed ball", "winner_count": 2 }))
        .to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draw.prizes.len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/candidates/import"))
        .insert_header(("content-type", "text/csv"))
        .set_payload("name,group,weight\nAnn,U12,1\nBo,U12,3\nCy,U14,0\n")
        .to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draw.candidates.len(), 3);

    let cy = draw.candidates[2].id;
    let req = test::TestRequest::post()
        .uri(&format!("{base}/candidates/{cy}/adjust"))
        .set_json(json!({ "delta": -1 }))
        .to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draw.candidates[2].weight, 0);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/candidates"))
        .set_json(json!({ "name": "ann" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post().uri(&format!("{base}/run")).to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draw.state, DrawState::Drawn);
    let mut names: Vec<_> = draw.results[0]
        .winners
        .iter()
        .map(|w| w.name.clone())
        .collect();
    names.sort();
    assert_eq!(names, ["Ann", "Bo"]);

    let req = test::TestRequest::post().uri(&format!("{base}/reset")).to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draw.state, DrawState::Setup);
    assert!(draw.results.is_empty());
}

#[actix_web::test]
async fn unknown_draw_is_not_found() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri(&format!("/api/draws/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn bracket_flow_over_http() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/brackets")
        .set_json(json!({ "name": "Cup", "entrants": ["Lions", "Tigers", "Bears"] }))
        .to_request();
    let bracket: Bracket = test::call_and_read_body_json(&app, req).await;
    let base = format!("/api/brackets/{}", bracket.id);
    let (lions, bears) = (bracket.entrants[0].id, bracket.entrants[2].id);

    let req = test::TestRequest::get().uri(&format!("{base}/schedule")).to_request();
    let schedule: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(schedule.as_array().map(Vec::len), Some(3));
    assert_eq!(schedule[0]["match_number"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("{base}/scores"))
        .set_json(json!({ "home": lions, "away": bears, "home_score": 4, "away_score": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("{base}/entrants/order"))
        .set_json(json!({ "from": 2, "to": 0 }))
        .to_request();
    let bracket: Bracket = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bracket.entrants[0].name, "Bears");

    let req = test::TestRequest::get().uri(&format!("{base}/table")).to_request();
    let table: Value = test::call_and_read_body_json(&app, req).await;
    // Bears row, Lions column: score seen from Bears
    assert_eq!(table["rows"][0]["cells"][0]["kind"], "self_match");
    assert_eq!(table["rows"][0]["cells"][1]["score"]["home"], 2);
    assert_eq!(table["rows"][0]["cells"][1]["score"]["away"], 4);

    let req = test::TestRequest::get().uri(&format!("{base}/standings")).to_request();
    let standings: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(standings[0]["name"], "Lions");
    assert_eq!(standings[0]["points"], 3);

    let req = test::TestRequest::put()
        .uri(&format!("{base}/entrants/order"))
        .set_json(json!({ "from": 0, "to": 9 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn schedule_endpoint_rejects_oversized_n() {
    let app = app!();
    let max = api::MAX_SCHEDULE_PARTICIPANTS;

    let req = test::TestRequest::get()
        .uri(&format!("/api/schedule?n={}", max + 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/schedule?n=100000").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/schedule?n={max}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let n = max as usize;
    assert_eq!(body["fixtures"].as_array().map(Vec::len), Some(n * (n - 1) / 2));
}

#[actix_web::test]
async fn maximum_scores_do_not_break_standings_or_the_store() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/brackets")
        .set_json(json!({ "name": "Big scores", "entrants": ["A", "B", "C"] }))
        .to_request();
    let bracket: Bracket = test::call_and_read_body_json(&app, req).await;
    let base = format!("/api/brackets/{}", bracket.id);
    let ids: Vec<_> = bracket.entrants.iter().map(|e| e.id).collect();

    for away in [ids[1], ids[2]] {
        let req = test::TestRequest::put()
            .uri(&format!("{base}/scores"))
            .set_json(json!({ "home": ids[0], "away": away, "home_score": u32::MAX, "away_score": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri(&format!("{base}/standings")).to_request();
    let standings: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(standings[0]["name"], "A");
    assert_eq!(standings[0]["scored"], 2 * u64::from(u32::MAX));
    assert_eq!(standings[0]["points"], 6);

    // the shared store is still usable afterwards
    let req = test::TestRequest::post()
        .uri("/api/draws")
        .set_json(json!({ "title": "After" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn failed_import_leaves_draw_unchanged() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/draws")
        .set_json(json!({ "title": "Import" }))
        .to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    let base = format!("/api/draws/{}", draw.id);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/candidates"))
        .set_json(json!({ "name": "Kim" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/candidates/import"))
        .insert_header(("content-type", "text/csv"))
        .set_payload("name\nLee\nKIM\n")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri(&base).to_request();
    let draw: Draw = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draw.candidates.len(), 1);
    assert_eq!(draw.candidates[0].name, "Kim");
}
