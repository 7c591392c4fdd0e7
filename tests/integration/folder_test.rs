//! Integration tests for folder operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_folders() {
    let app = helpers::TestApp::new();
    let (user_id, token) = app.user_token();

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Projects" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.str_at("/message"), "Folder created successfully");
    assert_eq!(response.id_at("/folder/owner_id"), user_id);
    assert!(response.body["folder"]["parent_id"].is_null());

    let listed = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.len_at("/folders"), 1);
}

#[tokio::test]
async fn test_duplicate_sibling_is_conflict() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let work = app.create_folder(&token, "Work", None).await;
    app.create_folder(&token, "Reports", Some(work)).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Reports", "parentId": work })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.str_at("/error"),
        "Folder with this name already exists"
    );

    app.create_folder(&token, "Reports", None).await;
}

#[tokio::test]
async fn test_blank_name_is_bad_request() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "   " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_at("/error"), "Folder name is required");
}

#[tokio::test]
async fn test_non_empty_folder_delete() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let folder = app.create_folder(&token, "Photos", None).await;
    let child = app.create_folder(&token, "2024", Some(folder)).await;

    let path = format!("/api/folders/{folder}");
    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.str_at("/error").contains("is not empty"));

    let response = app
        .request("DELETE", &format!("/api/folders/{child}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/message"), "Folder deleted successfully");

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let a = app.create_folder(&token, "A", None).await;
    app.create_folder(&token, "B", None).await;

    let path = format!("/api/folders/{a}/rename");
    let response = app
        .request("PUT", &path, Some(json!({ "name": "B" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request("PUT", &path, Some(json!({ "name": "Archive" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/message"), "Folder renamed successfully");
    assert_eq!(response.str_at("/folder/name"), "Archive");
}

#[tokio::test]
async fn test_breadcrumbs() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(a)).await;
    let c = app.create_folder(&token, "C", Some(b)).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{c}/breadcrumbs"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["breadcrumbs"],
        json!([
            { "id": null, "name": "My Drive" },
            { "id": a, "name": "A" },
            { "id": b, "name": "B" },
            { "id": c, "name": "C" },
        ])
    );
}

#[tokio::test]
async fn test_move_folder() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(a)).await;
    let c = app.create_folder(&token, "C", None).await;

    let response = app
        .request(
            "POST",
            "/api/items/move",
            Some(json!({ "ids": [a], "type": "folder", "targetFolderId": b })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/items/move",
            Some(json!({ "ids": [c], "type": "folder", "targetFolderId": b })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], json!(1));

    let inside = app
        .request(
            "GET",
            &format!("/api/folders?parentId={b}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(inside.len_at("/folders"), 1);
    assert_eq!(inside.id_at("/folders/0/id"), c);
}

#[tokio::test]
async fn test_blank_parent_filter_lists_root() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let a = app.create_folder(&token, "A", None).await;
    app.create_folder(&token, "B", Some(a)).await;

    let listed = app
        .request("GET", "/api/folders?parentId=", None, Some(&token))
        .await;

    assert_eq!(listed.status, StatusCode::OK, "{:?}", listed.body);
    assert_eq!(listed.len_at("/folders"), 1);
    assert_eq!(listed.id_at("/folders/0/id"), a);
}

#[tokio::test]
async fn test_malformed_folder_id_is_bad_request() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    let response = app
        .request("DELETE", "/api/folders/123", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.str_at("/error").starts_with("Invalid path parameter"));

    let response = app
        .request(
            "PUT",
            "/api/folders/nope/rename",
            Some(json!({ "name": "X" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_folders_are_owner_scoped() {
    let app = helpers::TestApp::new();
    let (_, owner) = app.user_token();
    let (_, other) = app.user_token();
    let folder = app.create_folder(&owner, "Private", None).await;

    let listed = app.request("GET", "/api/folders", None, Some(&other)).await;
    assert_eq!(listed.len_at("/folders"), 0);

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{folder}/rename"),
            Some(json!({ "name": "Mine" })),
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
