use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the app (same router as prod), but bind to an ephemeral port.
        let app = taskhub_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_todo(
    client: &reqwest::Client,
    base_url: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/todos/", base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_always_up() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn todo_lifecycle_create_list_retrieve_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_todo(
        &client,
        &srv.base_url,
        json!({"title": "Water the plants", "description": "Both balconies"}),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "Water the plants");
    assert_eq!(created["completed"], false);

    // List shows the record as a bare array.
    let res = client
        .get(format!("{}/api/todos/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_str().unwrap(), id);

    // Retrieve by id.
    let res = client
        .get(format!("{}/api/todos/{}/", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["description"], "Both balconies");

    // PATCH flips a single field and leaves the rest alone.
    let res = client
        .patch(format!("{}/api/todos/{}/", srv.base_url, id))
        .json(&json!({"completed": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let patched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(patched["completed"], true);
    assert_eq!(patched["title"], "Water the plants");

    // PUT replaces: unsupplied fields fall back to defaults.
    let res = client
        .put(format!("{}/api/todos/{}/", srv.base_url, id))
        .json(&json!({"title": "Water the plants again"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let replaced: serde_json::Value = res.json().await.unwrap();
    assert_eq!(replaced["title"], "Water the plants again");
    assert_eq!(replaced["description"], "");
    assert_eq!(replaced["completed"], false);

    // Delete, then the record is gone.
    let res = client
        .delete(format!("{}/api/todos/{}/", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/todos/{}/", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trailing_slash_is_optional() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/todos", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_collection_returns_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/unknown/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/todos/{}/", srv.base_url, uuid::Uuid::now_v7()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/api/todos/not-a-uuid/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn unsupported_methods_return_method_not_allowed() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/api/todos/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let created = create_todo(&client, &srv.base_url, json!({"title": "x"})).await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/api/todos/{}/", srv.base_url, id))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn deeper_paths_are_not_part_of_the_resource() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/todos/5/comments/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_validates_payload() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Missing title.
    let res = client
        .post(format!("{}/api/todos/", srv.base_url))
        .json(&json!({"description": "no title"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Blank title.
    let res = client
        .post(format!("{}/api/todos/", srv.base_url))
        .json(&json!({"title": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // Malformed JSON.
    let res = client
        .post(format!("{}/api/todos/", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_surface_is_forwarded_not_routed() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_todo(&client, &srv.base_url, json!({"title": "visible to admin"})).await;
    let id = created["id"].as_str().unwrap();

    // Overview reports the registration table and record count.
    let res = client
        .get(format!("{}/admin/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let overview: serde_json::Value = res.json().await.unwrap();
    assert_eq!(overview["service"], "taskhub");
    assert_eq!(overview["todo_count"], 1);
    assert_eq!(overview["resources"][0]["name"], "todos");

    // Records are visible through the admin listing.
    let res = client
        .get(format!("{}/admin/todos", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listing: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listing["items"][0]["id"].as_str().unwrap(), id);

    // Unknown admin paths are answered by the admin mount itself, never by
    // resource routing.
    let res = client
        .get(format!("{}/admin/nope", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "unknown admin path");
}
