//! Authorization boundaries at the HTTP layer: only the restaurant owner
//! advances orders, only the assigned rider advances deliveries, and the
//! tracking endpoint hides other customers' orders.

mod common;

use axum::body::Body;
use common::{fixture, setup};
use foodhub_server::core::build_app;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let ctx = setup().await;
    let app = build_app(&ctx.server_state());

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_only_owner_can_advance_order() {
    let ctx = setup().await;
    let fx = fixture(&ctx).await;
    let app = build_app(&ctx.server_state());
    let uri = format!("/api/orders/{}/advance", fx.order.order.id);

    // a non-owner is rejected before the lifecycle is ever consulted
    let response = app
        .clone()
        .oneshot(post_json(
            &uri,
            &json!({"next_status": "PAID", "actor_id": fx.other.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // the owner goes through
    let response = app
        .oneshot(post_json(
            &uri,
            &json!({"next_status": "PAID", "actor_id": fx.owner.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "PAID");
}

#[tokio::test]
async fn test_invalid_transition_maps_to_conflict() {
    let ctx = setup().await;
    let fx = fixture(&ctx).await;
    let app = build_app(&ctx.server_state());
    let uri = format!("/api/orders/{}/advance", fx.order.order.id);

    // CREATED -> CREATED is not forward
    let response = app
        .oneshot(post_json(
            &uri,
            &json!({"next_status": "CREATED", "actor_id": fx.owner.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], 4102);
}

#[tokio::test]
async fn test_only_assigned_rider_can_advance_delivery() {
    let ctx = setup().await;
    let fx = fixture(&ctx).await;

    let assigned = ctx
        .deliveries
        .assign(fx.order.order.id, fx.rider.id, &fx.operator)
        .await
        .unwrap();

    let app = build_app(&ctx.server_state());
    let uri = format!("/api/deliveries/{}/advance", assigned.id);

    // someone who is not the assigned rider
    let response = app
        .clone()
        .oneshot(post_json(
            &uri,
            &json!({"next_status": "PICKED_UP", "actor_id": fx.other.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // the assigned rider
    let response = app
        .oneshot(post_json(
            &uri,
            &json!({"next_status": "PICKED_UP", "actor_id": fx.rider.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "PICKED_UP");
}

#[tokio::test]
async fn test_assignment_requires_staff() {
    let ctx = setup().await;
    let fx = fixture(&ctx).await;
    let app = build_app(&ctx.server_state());
    let uri = format!("/api/orders/{}/delivery/assign", fx.order.order.id);

    let response = app
        .clone()
        .oneshot(post_json(
            &uri,
            &json!({"rider_id": fx.rider.id, "actor_id": fx.other.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(post_json(
            &uri,
            &json!({"rider_id": fx.rider.id, "actor_id": fx.operator.id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ASSIGNED");
    assert_eq!(body["rider_id"], fx.rider.id);
}

#[tokio::test]
async fn test_tracking_endpoint_scoped_to_customer() {
    let ctx = setup().await;
    let fx = fixture(&ctx).await;

    let assigned = ctx
        .deliveries
        .assign(fx.order.order.id, fx.rider.id, &fx.operator)
        .await
        .unwrap();
    // keep the two event timestamps distinct for a deterministic timeline
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    ctx.deliveries
        .advance(assigned.id, shared::models::DeliveryStatus::PickedUp, &fx.rider)
        .await
        .unwrap();

    let app = build_app(&ctx.server_state());
    let order_id = fx.order.order.id;

    // another customer sees a 404, not a 403 — existence stays hidden
    let response = app
        .clone()
        .oneshot(get(&format!(
            "/api/orders/{order_id}/status?customer_id={}",
            fx.other.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // the owning customer gets the full summary with the newest event first
    let response = app
        .oneshot(get(&format!(
            "/api/orders/{order_id}/status?customer_id={}",
            fx.customer.id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["order_id"], order_id);
    assert_eq!(body["order_status"], "CREATED");
    assert_eq!(body["delivery_status"], "PICKED_UP");
    assert_eq!(body["rider_id"], fx.rider.id);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event_type"], "STATUS_CHANGE");
    assert_eq!(events[1]["event_type"], "ASSIGNED");
}
