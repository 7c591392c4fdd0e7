//! Integration tests for file operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_upload_and_list_files() {
    let app = helpers::TestApp::new();
    let (user_id, token) = app.user_token();

    let response = app.upload(&token, "notes.txt", b"hello drive", None).await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.str_at("/message"), "File uploaded successfully");
    assert_eq!(response.str_at("/file/name"), "notes.txt");
    assert_eq!(response.str_at("/file/mime_type"), "text/plain");
    assert_eq!(response.body["file"]["size_bytes"], json!(11));
    assert_eq!(response.id_at("/file/owner_id"), user_id);
    assert_eq!(app.blobs.len(), 1);

    let listed = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.len_at("/files"), 1);
}

#[tokio::test]
async fn test_upload_into_folder() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let folder_id = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(&token, "a.pdf", b"%PDF", Some(folder_id))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.id_at("/file/folder_id"), folder_id);

    let root = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(root.len_at("/files"), 0);

    let inside = app
        .request(
            "GET",
            &format!("/api/files?folderId={folder_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(inside.len_at("/files"), 1);
}

#[tokio::test]
async fn test_blank_folder_filter_lists_root() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let folder_id = app.create_folder(&token, "Docs", None).await;
    app.upload(&token, "root.txt", b"r", None).await;
    app.upload(&token, "inner.txt", b"i", Some(folder_id)).await;

    let listed = app
        .request("GET", "/api/files?folderId=", None, Some(&token))
        .await;

    assert_eq!(listed.status, StatusCode::OK, "{:?}", listed.body);
    assert_eq!(listed.len_at("/files"), 1);
    assert_eq!(listed.str_at("/files/0/name"), "root.txt");
}

#[tokio::test]
async fn test_malformed_folder_filter_is_bad_request() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    let response = app
        .request("GET", "/api/files?folderId=abc", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.str_at("/error").starts_with("Invalid query string"));
}

#[tokio::test]
async fn test_malformed_file_id_is_bad_request() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    for (method, path) in [
        ("DELETE", "/api/files/not-a-uuid"),
        ("GET", "/api/files/not-a-uuid/download"),
    ] {
        let response = app.request(method, path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {path}");
        assert!(response.str_at("/error").starts_with("Invalid path parameter"));
    }
}

#[tokio::test]
async fn test_upload_requires_file_part() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    let response = app
        .request("POST", "/api/files/upload", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.get("error").is_some());
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let app = helpers::TestApp::with_max_upload(8);
    let (_, token) = app.user_token();

    let response = app
        .upload(&token, "big.bin", b"0123456789", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.blobs.is_empty());
    assert_eq!(app.store.file_count().await, 0);
}

#[tokio::test]
async fn test_upload_into_unknown_folder_is_not_found() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    let response = app
        .upload(&token, "a.txt", b"a", Some(uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.str_at("/error"), "Target folder not found");
}

#[tokio::test]
async fn test_download_link_serves_content() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let uploaded = app.upload(&token, "hello.txt", b"hello", None).await;
    let file_id = uploaded.id_at("/file/id");

    let response = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/fileName"), "hello.txt");

    let url = response.str_at("/downloadUrl").to_string();
    let (status, bytes) = app.fetch_url(&url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"hello");

    let tampered = format!("{url}x");
    let (status, _) = app.fetch_url(&tampered).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_download_of_foreign_file_is_not_found() {
    let app = helpers::TestApp::new();
    let (_, owner) = app.user_token();
    let (_, other) = app.user_token();
    let file_id = app
        .upload(&owner, "secret.txt", b"s", None)
        .await
        .id_at("/file/id");

    let response = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_file() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let file_id = app
        .upload(&token, "draft.txt", b"d", None)
        .await
        .id_at("/file/id");

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}/rename"),
            Some(json!({ "name": "final.txt" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/file/name"), "final.txt");

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}/rename"),
            Some(json!({ "name": "  " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_file() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let file_id = app
        .upload(&token, "a.txt", b"a", None)
        .await
        .id_at("/file/id");

    let path = format!("/api/files/{file_id}");
    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/message"), "File deleted successfully");
    assert!(app.blobs.is_empty());

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trash_restore_and_views() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let file_id = app
        .upload(&token, "a.txt", b"a", None)
        .await
        .id_at("/file/id");

    let response = app
        .request(
            "POST",
            "/api/items/trash",
            Some(json!({ "ids": [file_id], "type": "file" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], json!(1));

    let listed = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(listed.len_at("/files"), 0);
    let trash = app.request("GET", "/api/trash", None, Some(&token)).await;
    assert_eq!(trash.len_at("/files"), 1);
    assert_eq!(trash.len_at("/folders"), 0);

    let response = app
        .request(
            "POST",
            "/api/items/restore",
            Some(json!({ "ids": [file_id], "type": "file" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let listed = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(listed.len_at("/files"), 1);
    let recent = app.request("GET", "/api/recent", None, Some(&token)).await;
    assert_eq!(recent.len_at("/files"), 1);
}

#[tokio::test]
async fn test_star_toggle() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();
    let file_id = app
        .upload(&token, "a.txt", b"a", None)
        .await
        .id_at("/file/id");

    let response = app
        .request(
            "POST",
            "/api/items/star",
            Some(json!({ "id": file_id, "type": "file" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/item/type"), "file");
    assert_eq!(response.body["item"]["is_starred"], json!(true));

    let starred = app.request("GET", "/api/starred", None, Some(&token)).await;
    assert_eq!(starred.len_at("/files"), 1);
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let app = helpers::TestApp::new();
    let (_, token) = app.user_token();

    let response = app
        .request(
            "POST",
            "/api/items/trash",
            Some(json!({ "ids": [], "type": "file" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_at("/error"), "No items selected");
}
