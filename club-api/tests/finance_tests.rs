mod common;

use axum::http::{Method, StatusCode};
use chrono::{Datelike, Utc};
use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

// ===== Combined payments =====

#[tokio::test]
async fn test_combined_payment_settles_dues_and_fines() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    let cause = create_cause(&app, &token, "Red card", 5000).await;
    let fine = issue_fine(&app, &token, "10001", &cause).await;

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/payments/combined",
        Some(&token),
        Some(json!({
            "player_id": "10001",
            "months": [{"month": 1, "year": 2024}, {"month": 2, "year": 2024}],
            "fine_ids": [fine],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{receipt}");
    assert_eq!(receipt["dues"].as_array().unwrap().len(), 2);
    assert_eq!(receipt["fines"][0]["paid"], true);
    assert_eq!(receipt["total"], "65000");
    assert_eq!(receipt["account_in_good_standing"], true);

    let (_, body) = send(&app, Method::GET, "/fines?paid=false", Some(&token), None).await;
    assert_eq!(body["page_info"]["total_count"], 0);
    let (_, body) = send(&app, Method::GET, "/finance/balance", Some(&token), None).await;
    assert_eq!(body["balance"], "65000");
}

#[tokio::test]
async fn test_combined_payment_rejects_settled_items() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    let cause = create_cause(&app, &token, "Red card", 5000).await;
    let fine = issue_fine(&app, &token, "10001", &cause).await;

    let first = json!({"player_id": "10001", "months": [{"month": 3, "year": 2024}], "fine_ids": [fine]});
    let (status, _) = send(&app, Method::POST, "/payments/combined", Some(&token), Some(first)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/payments/combined",
        Some(&token),
        Some(json!({"player_id": "10001", "fine_ids": [fine]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A paid month anywhere in the request means nothing is written.
    let (status, _) = send(
        &app,
        Method::POST,
        "/payments/combined",
        Some(&token),
        Some(json!({"player_id": "10001", "months": [{"month": 4, "year": 2024}, {"month": 3, "year": 2024}]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (_, body) = send(&app, Method::GET, "/payments?kind=monthly_due", Some(&token), None).await;
    assert_eq!(body["page_info"]["total_count"], 1);
}

#[rstest]
#[case(json!({"player_id": "10001"}), StatusCode::BAD_REQUEST)]
#[case(json!({"player_id": "99999", "months": [{"month": 1, "year": 2024}]}), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(json!({"player_id": "10001", "months": [{"month": 1, "year": 2024}, {"month": 1, "year": 2024}]}), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(json!({"player_id": "10001", "months": [{"month": 13, "year": 2024}]}), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(json!({"player_id": "10001", "fine_ids": ["00000000-0000-0000-0000-000000000000"]}), StatusCode::UNPROCESSABLE_ENTITY)]
#[tokio::test]
async fn test_combined_payment_invalid_requests(
    #[case] body: serde_json::Value,
    #[case] expected: StatusCode,
) {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;

    let (status, response) = send(&app, Method::POST, "/payments/combined", Some(&token), Some(body)).await;
    assert_eq!(status, expected, "{response}");

    let (_, dashboard) = send(&app, Method::GET, "/dashboard/summary", Some(&token), None).await;
    assert_eq!(dashboard["total_income"], "0");
}

#[tokio::test]
async fn test_combined_payment_only_settles_own_fines() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    create_player(&app, &token, "10002", "Bo", 2).await;
    let cause = create_cause(&app, &token, "Red card", 5000).await;
    let fine = issue_fine(&app, &token, "10002", &cause).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/payments/combined",
        Some(&token),
        Some(json!({"player_id": "10001", "fine_ids": [fine]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["fine_ids"].is_string());
}

// ===== Statements =====

#[tokio::test]
async fn test_statement_by_date_range() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    let category = create_category(&app, &token, "Equipment").await;

    send(
        &app,
        Method::POST,
        "/payments",
        Some(&token),
        Some(json!({"kind": "monthly_due", "player_id": "10001", "month": 1, "year": 2024})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/expenses",
        Some(&token),
        Some(json!({"category_id": category, "concept": "Balls", "amount": 12000, "date": "2001-06-15T10:00:00Z"})),
    )
    .await;

    let (status, all) = send(&app, Method::GET, "/finance/statement", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["dues_income"], "30000");
    assert_eq!(all["total_expenses"], "12000");
    assert_eq!(all["balance"], "18000");
    assert_eq!(all["expenses_by_category"][0]["category_name"], "Equipment");

    let (_, old) = send(
        &app,
        Method::GET,
        "/finance/statement?from=2001-06-15&to=2001-06-15",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(old["total_income"], "0");
    assert_eq!(old["total_expenses"], "12000");

    let (status, _) = send(
        &app,
        Method::GET,
        "/finance/statement?from=2001-06-16&to=2001-06-15",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, year) = send(&app, Method::GET, "/finance/statement/period?year=2001&month=6", Some(&token), None).await;
    assert_eq!(year["total_expenses"], "12000");
    let (_, other) = send(&app, Method::GET, "/finance/statement/period?year=2001&month=7", Some(&token), None).await;
    assert_eq!(other["total_expenses"], "0");
}

#[rstest]
#[case("/finance/statement/period?year=1999")]
#[case("/finance/statement/period?year=2024&month=13")]
#[case("/finance/monthly-summary?year=2101&month=1")]
#[case("/finance/monthly-summary?year=2024&month=0")]
#[case("/dashboard/payment-status?year=1999")]
#[tokio::test]
async fn test_report_periods_out_of_range(#[case] uri: &str) {
    let app = create_app().await;
    let token = admin_token(&app).await;

    let (status, _) = send(&app, Method::GET, uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_monthly_summary() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    let category = create_category(&app, &token, "Equipment").await;
    send(
        &app,
        Method::POST,
        "/payments",
        Some(&token),
        Some(json!({"kind": "contribution", "player_id": "10001", "concept": "Trip", "amount": 20000})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/expenses",
        Some(&token),
        Some(json!({"category_id": category, "concept": "Old nets", "amount": 8000, "date": "2010-03-01T00:00:00Z"})),
    )
    .await;

    let (status, current) = send(&app, Method::GET, "/finance/monthly-summary", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{current}");
    let now = Utc::now();
    assert_eq!(current["year"], now.year());
    assert_eq!(current["month"], now.month());
    assert_eq!(current["month_income"], "20000");
    assert_eq!(current["month_expenses"], "0");
    assert_eq!(current["current_balance"], "12000");

    let (_, march) = send(
        &app,
        Method::GET,
        "/finance/monthly-summary?year=2010&month=3",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(march["month_income"], "0");
    assert_eq!(march["month_expenses"], "8000");
    assert_eq!(march["month_difference"], "-8000");
    assert_eq!(march["current_balance"], "12000");
}

// ===== Dashboard grid =====

#[tokio::test]
async fn test_payment_status_grid() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    create_player(&app, &token, "10002", "Bo", 2).await;
    let cause = create_cause(&app, &token, "Late", 2000).await;
    issue_fine(&app, &token, "10002", &cause).await;
    send(
        &app,
        Method::POST,
        "/payments",
        Some(&token),
        Some(json!({"kind": "monthly_due", "player_id": "10001", "month": 2, "year": 2024})),
    )
    .await;

    let (status, grid) = send(&app, Method::GET, "/dashboard/payment-status?year=2024", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = grid.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["player_id"], "10001");
    assert_eq!(rows[0]["months"]["2"]["paid"], true);
    assert_eq!(rows[0]["months"]["2"]["amount"], "30000");
    assert_eq!(rows[0]["months"]["3"]["paid"], false);
    assert_eq!(rows[1]["pending_fines_amount"], "2000");
    assert_eq!(rows[1]["account_in_good_standing"], false);

    let (_, grid) = send(&app, Method::GET, "/dashboard/payment-status?year=2023", Some(&token), None).await;
    assert_eq!(grid[0]["months"]["2"]["paid"], false);
}

// ===== Catalog maintenance =====

#[tokio::test]
async fn test_expense_category_maintenance() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    let equipment = create_category(&app, &token, "Equipment").await;
    let travel = create_category(&app, &token, "Travel").await;
    let uri = format!("/expenses/categories/{}", travel);

    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Travel");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"name": "Transport", "description": "Bus to away games"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], "Transport");

    let (status, _) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({"name": "Equipment"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(
        &app,
        Method::POST,
        "/expenses",
        Some(&token),
        Some(json!({"category_id": equipment, "concept": "Balls", "amount": 100})),
    )
    .await;
    let in_use = format!("/expenses/categories/{}", equipment);
    let (status, _) = send(&app, Method::DELETE, &in_use, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fine_cause_update() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    let cause = create_cause(&app, &token, "Late", 2000).await;
    issue_fine(&app, &token, "10001", &cause).await;
    let uri = format!("/fines/causes/{}", cause);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"description": "Late to training", "amount": 3000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["amount"], "3000");

    let (_, fines) = send(&app, Method::GET, "/fines", Some(&token), None).await;
    assert_eq!(fines["data"][0]["cause_description"], "Late to training");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"description": "Late", "amount": "-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["amount"], "Must be greater than or equal to 0");

    let missing = "/fines/causes/00000000-0000-0000-0000-000000000000";
    let (status, _) = send(
        &app,
        Method::PUT,
        missing,
        Some(&token),
        Some(json!({"description": "Late", "amount": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_contribution_detail() {
    let app = create_app().await;
    let token = admin_token(&app).await;
    create_player(&app, &token, "10001", "Ace", 1).await;
    create_player(&app, &token, "10002", "Bo", 2).await;
    let cause = create_cause(&app, &token, "Field rental", 10000).await;

    let (status, group) = send(
        &app,
        Method::POST,
        "/fines/group",
        Some(&token),
        Some(json!({"cause_id": cause, "concept": "Field March"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{group}");

    let uri = format!("/fines/group/{}", group["group_id"].as_str().unwrap());
    let (status, detail) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let fines = detail.as_array().unwrap();
    assert_eq!(fines.len(), 2);
    assert!(fines.iter().all(|f| f["group_concept"] == "Field March"));

    let (status, _) = send(
        &app,
        Method::GET,
        "/fines/group/00000000-0000-0000-0000-000000000000",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
