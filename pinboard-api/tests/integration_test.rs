/// Integration tests for the Pinboard API
///
/// These tests verify the full system works end-to-end:
/// - Authentication flow (register, login, refresh)
/// - Board access rules (creator / member / non-member)
/// - Column and card ordering (append, reorder, move)
/// - Likes, labels, and comments
///
/// They need a running Postgres reachable via `DATABASE_URL` and are marked
/// `#[ignore]`; run them with `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

/// Register, then login with the same credentials
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_register_and_login() {
    let ctx = TestContext::new().await.unwrap();

    let email = format!("reg-{}@example.com", uuid::Uuid::new_v4());

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/auth/register",
            None,
            Some(json!({
                "email": email,
                "password": "SecurePass123",
                "name": "New User"
            })),
        )
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    assert_eq!(body["success"], true);
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": "SecurePass123" })),
        )
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], email.to_lowercase());

    // Wrong password is a 401 with the generic message
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": "WrongPass123" })),
        )
        .await
        .unwrap();

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "unauthorized");

    ctx.cleanup().await.unwrap();
}

/// Creator, member, and non-member see a private board differently
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_board_access_rules() {
    let ctx = TestContext::new().await.unwrap();

    let member = common::create_test_user(&ctx.db, "Member").await.unwrap();
    let stranger = common::create_test_user(&ctx.db, "Stranger").await.unwrap();
    let member_auth = ctx.auth_header_for(member.id).unwrap();
    let stranger_auth = ctx.auth_header_for(stranger.id).unwrap();

    // Creator makes a private board
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/boards",
            Some(&ctx.auth_header()),
            Some(json!({ "title": "Private Board" })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK, "create board failed: {}", body);
    let board_id = body["data"]["id"].as_str().unwrap().to_string();
    let board_uri = format!("/v1/boards/{}", board_id);

    // Creator adds the member
    let (status, _) = ctx
        .request(
            "POST",
            &format!("{}/members", board_uri),
            Some(&ctx.auth_header()),
            Some(json!({ "user_id": member.id })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // Member can view
    let (status, _) = ctx
        .request("GET", &board_uri, Some(&member_auth), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // Stranger cannot
    let (status, body) = ctx
        .request("GET", &board_uri, Some(&stranger_auth), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    // Member (role member) cannot manage membership
    let (status, _) = ctx
        .request(
            "DELETE",
            &format!("{}/members/{}", board_uri, member.id),
            Some(&member_auth),
            None,
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The creator can never be removed, even by the creator
    let (status, body) = ctx
        .request(
            "DELETE",
            &format!("{}/members/{}", board_uri, ctx.user.id),
            Some(&ctx.auth_header()),
            None,
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    // Only the creator can delete the board
    let (status, _) = ctx
        .request("DELETE", &board_uri, Some(&member_auth), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .request("DELETE", &board_uri, Some(&ctx.auth_header()), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// Columns append at max+1 and reorder rewrites positions to indices
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_column_positions_and_reorder() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let (_, body) = ctx
        .request(
            "POST",
            "/v1/boards",
            Some(&auth),
            Some(json!({ "title": "Ordering" })),
        )
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();
    let columns_uri = format!("/v1/columns/board/{}", board_id);

    let mut column_ids = Vec::new();
    for title in ["Todo", "Doing", "Done"] {
        let (status, body) = ctx
            .request("POST", &columns_uri, Some(&auth), Some(json!({ "title": title })))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
        column_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // First column lands at 0, the rest at max+1
    let (_, body) = ctx.request("GET", &columns_uri, Some(&auth), None).await.unwrap();
    let positions: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);

    // Reorder [c2, c1, c3] -> positions c2:0, c1:1, c3:2
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("{}/reorder", columns_uri),
            Some(&auth),
            Some(json!({ "column_ids": [column_ids[1], column_ids[0], column_ids[2]] })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    let order: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        order,
        vec![
            column_ids[1].as_str(),
            column_ids[0].as_str(),
            column_ids[2].as_str()
        ]
    );

    // A list missing a column would leave gapped positions; rejected up front
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("{}/reorder", columns_uri),
            Some(&auth),
            Some(json!({ "column_ids": [column_ids[0], column_ids[1]] })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    // So would a duplicated id
    let (status, _) = ctx
        .request(
            "PUT",
            &format!("{}/reorder", columns_uri),
            Some(&auth),
            Some(json!({
                "column_ids": [column_ids[0], column_ids[0], column_ids[2]]
            })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

/// Moving a card across columns updates column_id and keeps positions dense
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_card_move_repacks_positions() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "Moves" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    let mut column_ids = Vec::new();
    for title in ["A", "B"] {
        let (_, body) = ctx
            .request(
                "POST",
                &format!("/v1/columns/board/{}", board_id),
                Some(&auth),
                Some(json!({ "title": title })),
            )
            .await
            .unwrap();
        column_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let mut card_ids = Vec::new();
    for i in 0..3 {
        let (_, body) = ctx
            .request(
                "POST",
                &format!("/v1/cards/column/{}", column_ids[0]),
                Some(&auth),
                Some(json!({ "title": format!("Card {}", i) })),
            )
            .await
            .unwrap();
        card_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // Move the first card to the head of column B
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/cards/{}/move", card_ids[0]),
            Some(&auth),
            Some(json!({ "column_id": column_ids[1], "position": 0 })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["column_id"], column_ids[1].as_str());
    assert_eq!(body["data"]["position"], 0);

    // Source column closed the gap: remaining cards at 0, 1
    let (_, body) = ctx
        .request(
            "GET",
            &format!("/v1/cards/column/{}", column_ids[0]),
            Some(&auth),
            None,
        )
        .await
        .unwrap();
    let positions: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1]);

    ctx.cleanup().await.unwrap();
}

/// An out-of-range move position appends to the target column instead of
/// leaving a gap
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_card_move_position_clamped_to_column_end() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "Clamping" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    let mut column_ids = Vec::new();
    for title in ["A", "B"] {
        let (_, body) = ctx
            .request(
                "POST",
                &format!("/v1/columns/board/{}", board_id),
                Some(&auth),
                Some(json!({ "title": title })),
            )
            .await
            .unwrap();
        column_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let mut card_ids = Vec::new();
    for (column, count) in [(0, 1), (1, 2)] {
        for i in 0..count {
            let (_, body) = ctx
                .request(
                    "POST",
                    &format!("/v1/cards/column/{}", column_ids[column]),
                    Some(&auth),
                    Some(json!({ "title": format!("Card {}-{}", column, i) })),
                )
                .await
                .unwrap();
            card_ids.push(body["data"]["id"].as_str().unwrap().to_string());
        }
    }

    // Column B holds 2 cards; position 99 lands at the end slot, 2
    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/cards/{}/move", card_ids[0]),
            Some(&auth),
            Some(json!({ "column_id": column_ids[1], "position": 99 })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["position"], 2);

    let (_, body) = ctx
        .request(
            "GET",
            &format!("/v1/cards/column/{}", column_ids[1]),
            Some(&auth),
            None,
        )
        .await
        .unwrap();
    let positions: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);

    ctx.cleanup().await.unwrap();
}

/// Moving a card onto its current column and position issues no write
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_card_move_in_place_is_noop() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "NoOp" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/columns/board/{}", board_id),
            Some(&auth),
            Some(json!({ "title": "Col" })),
        )
        .await
        .unwrap();
    let column_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/cards/column/{}", column_id),
            Some(&auth),
            Some(json!({ "title": "Anchored" })),
        )
        .await
        .unwrap();
    let card_id = body["data"]["id"].as_str().unwrap().to_string();
    let updated_at = body["data"]["updated_at"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .request(
            "PUT",
            &format!("/v1/cards/{}/move", card_id),
            Some(&auth),
            Some(json!({ "column_id": column_id, "position": 0 })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["position"], 0);
    assert_eq!(body["data"]["updated_at"], updated_at.as_str());

    ctx.cleanup().await.unwrap();
}

/// A member may create cards but not delete the column holding them
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_member_creates_cards_but_cannot_delete_column() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let member = common::create_test_user(&ctx.db, "Editor").await.unwrap();
    let member_auth = ctx.auth_header_for(member.id).unwrap();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "Roles" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    ctx.request(
        "POST",
        &format!("/v1/boards/{}/members", board_id),
        Some(&auth),
        Some(json!({ "user_id": member.id })),
    )
    .await
    .unwrap();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/columns/board/{}", board_id),
            Some(&auth),
            Some(json!({ "title": "Col" })),
        )
        .await
        .unwrap();
    let column_id = body["data"]["id"].as_str().unwrap().to_string();

    // Member role covers card creation...
    let (status, _) = ctx
        .request(
            "POST",
            &format!("/v1/cards/column/{}", column_id),
            Some(&member_auth),
            Some(json!({ "title": "By member" })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // ...but not column deletion
    let (status, body) = ctx
        .request(
            "DELETE",
            &format!("/v1/columns/{}", column_id),
            Some(&member_auth),
            None,
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (status, _) = ctx
        .request(
            "DELETE",
            &format!("/v1/columns/{}", column_id),
            Some(&auth),
            None,
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// Toggling a like twice returns to the original state
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_like_double_toggle() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "Likes" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/columns/board/{}", board_id),
            Some(&auth),
            Some(json!({ "title": "Col" })),
        )
        .await
        .unwrap();
    let column_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/cards/column/{}", column_id),
            Some(&auth),
            Some(json!({ "title": "Likeable" })),
        )
        .await
        .unwrap();
    let card_id = body["data"]["id"].as_str().unwrap().to_string();
    let like_uri = format!("/v1/cards/{}/like", card_id);

    let (_, body) = ctx.request("POST", &like_uri, Some(&auth), None).await.unwrap();
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["likes"], 1);

    let (_, body) = ctx.request("POST", &like_uri, Some(&auth), None).await.unwrap();
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["likes"], 0);

    ctx.cleanup().await.unwrap();
}

/// Attaching the same (name, color) label twice converges on one label
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_label_upsert() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "Labels" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/columns/board/{}", board_id),
            Some(&auth),
            Some(json!({ "title": "Col" })),
        )
        .await
        .unwrap();
    let column_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/cards/column/{}", column_id),
            Some(&auth),
            Some(json!({ "title": "Tagged" })),
        )
        .await
        .unwrap();
    let card_id = body["data"]["id"].as_str().unwrap().to_string();
    let labels_uri = format!("/v1/cards/{}/labels", card_id);

    let label = json!({ "name": "urgent", "color": "#ff0000" });
    let (_, first) = ctx
        .request("POST", &labels_uri, Some(&auth), Some(label.clone()))
        .await
        .unwrap();
    let (_, second) = ctx
        .request("POST", &labels_uri, Some(&auth), Some(label))
        .await
        .unwrap();

    assert_eq!(first["data"]["id"], second["data"]["id"]);

    // The card still carries exactly one label
    let (_, body) = ctx
        .request("GET", &format!("/v1/cards/{}", card_id), Some(&auth), None)
        .await
        .unwrap();
    assert_eq!(body["data"]["labels"].as_array().unwrap().len(), 1);

    ctx.cleanup().await.unwrap();
}

/// Comments: author-only edit, author/creator/admin delete
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_comment_permissions() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    let member = common::create_test_user(&ctx.db, "Commenter").await.unwrap();
    let member_auth = ctx.auth_header_for(member.id).unwrap();

    let (_, body) = ctx
        .request("POST", "/v1/boards", Some(&auth), Some(json!({ "title": "Comments" })))
        .await
        .unwrap();
    let board_id = body["data"]["id"].as_str().unwrap().to_string();

    ctx.request(
        "POST",
        &format!("/v1/boards/{}/members", board_id),
        Some(&auth),
        Some(json!({ "user_id": member.id })),
    )
    .await
    .unwrap();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/columns/board/{}", board_id),
            Some(&auth),
            Some(json!({ "title": "Col" })),
        )
        .await
        .unwrap();
    let column_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = ctx
        .request(
            "POST",
            &format!("/v1/cards/column/{}", column_id),
            Some(&auth),
            Some(json!({ "title": "Discussed" })),
        )
        .await
        .unwrap();
    let card_id = body["data"]["id"].as_str().unwrap().to_string();

    // Member comments
    let (status, body) = ctx
        .request(
            "POST",
            &format!("/v1/comments/card/{}", card_id),
            Some(&member_auth),
            Some(json!({ "content": "Looks good" })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();
    let comment_uri = format!("/v1/comments/{}", comment_id);

    // The board creator cannot edit someone else's comment
    let (status, _) = ctx
        .request(
            "PUT",
            &comment_uri,
            Some(&auth),
            Some(json!({ "content": "Edited by creator" })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The author can
    let (status, _) = ctx
        .request(
            "PUT",
            &comment_uri,
            Some(&member_auth),
            Some(json!({ "content": "Edited by author" })),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // The board creator can delete it
    let (status, _) = ctx
        .request("DELETE", &comment_uri, Some(&auth), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// Requests without a token are rejected before reaching handlers
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_missing_token_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.request("GET", "/v1/boards", None, None).await.unwrap();

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "unauthorized");

    ctx.cleanup().await.unwrap();
}
