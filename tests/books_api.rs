//! HTTP integration tests.
//!
//! Starts the server on an ephemeral port and exercises it with reqwest.

use book_api::{
    book::{repository::BookRepository, seed},
    error::ErrorVerbosity,
    server,
    state::ApiState,
};
use serde_json::{json, Value};

/// Bind to port 0 and return the base url of the API.
async fn start_server(books: BookRepository) -> String {
    let state = ApiState::new(ErrorVerbosity::Full, books);
    let app = server::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn json_body(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}

fn fantastic_mr_fox() -> Value {
    json!({ "bookId": -1, "title": "Fantastic Mr. Fox", "author": "Roald Dahl", "description": "" })
}

#[tokio::test]
async fn health_check() {
    let base = start_server(BookRepository::new()).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.text().await.unwrap(),
        "👍 Okay! The server is responding! 🙌"
    );
}

#[tokio::test]
async fn list_books_on_empty_store() {
    let base = start_server(BookRepository::new()).await;

    let resp = reqwest::get(format!("{base}/api/v1/books")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"],
        "application/json"
    );
    assert_eq!(json_body(resp).await, json!([]));
}

#[tokio::test]
async fn list_books_returns_seeded_books() {
    let base = start_server(seed::demo_repository()).await;

    let resp = reqwest::get(format!("{base}/api/v1/books")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body, serde_json::to_value(seed::demo_books()).unwrap());
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_book_found() {
    let base = start_server(seed::demo_repository()).await;

    let resp = reqwest::get(format!("{base}/api/v1/books/2")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["bookId"], 2);
    assert_eq!(body["title"], "The Shop Before Life");
    assert_eq!(body["author"], "Neil Hughes");
}

#[tokio::test]
async fn get_book_not_found_lists_available_books() {
    let base = start_server(seed::demo_repository()).await;

    let resp = reqwest::get(format!("{base}/api/v1/books/77")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Error: book not found (Book ID: 77)");
    assert_eq!(
        body["availableBooks"],
        "1 The Hobbit\n2 The Shop Before Life"
    );
}

#[tokio::test]
async fn get_book_with_non_numeric_id_is_not_found() {
    let base = start_server(seed::demo_repository()).await;

    let resp = reqwest::get(format!("{base}/api/v1/books/abc")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Error: book not found (Book ID: abc)");
    assert_eq!(
        body["availableBooks"],
        "1 The Hobbit\n2 The Shop Before Life"
    );
}

#[tokio::test]
async fn create_book_assigns_id_and_rejects_duplicate_title() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/books"))
        .json(&fantastic_mr_fox())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let created = json_body(resp).await;
    assert_ne!(created["bookId"], -1);
    assert_eq!(created["title"], "Fantastic Mr. Fox");
    assert_eq!(created["description"], "");

    let resp = client
        .post(format!("{base}/api/v1/books"))
        .json(&fantastic_mr_fox())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body = json_body(resp).await;
    assert_eq!(
        body["message"],
        "Error: a book with that title already exists 'Fantastic Mr. Fox'"
    );

    // The rejected duplicate must not be stored
    let resp = reqwest::get(format!("{base}/api/v1/books")).await.unwrap();
    assert_eq!(json_body(resp).await, json!([created]));
}

#[tokio::test]
async fn create_book_with_missing_fields() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/books"))
        .json(&json!({ "title": "Fantastic Mr. Fox", "author": "Roald Dahl" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body = json_body(resp).await;
    assert_eq!(
        body["message"],
        "New book is missing field(s): bookId\ndescription"
    );

    let resp = reqwest::get(format!("{base}/api/v1/books")).await.unwrap();
    assert_eq!(json_body(resp).await, json!([]));
}

#[tokio::test]
async fn create_book_with_wrong_field_type() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/books"))
        .json(&json!({ "bookId": -1, "title": 42, "author": "Roald Dahl", "description": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Failed to parse request body");
    assert!(body["expectedSchema"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn create_book_with_malformed_json() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/books"))
        .header("content-type", "application/json")
        .body("{ \"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Failed to parse request body");
}

#[tokio::test]
async fn update_book() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let created = json_body(
        client
            .post(format!("{base}/api/v1/books"))
            .json(&fantastic_mr_fox())
            .send()
            .await
            .unwrap(),
    )
    .await;
    let book_id = created["bookId"].as_i64().unwrap();

    let update = json!({
        "bookId": book_id,
        "title": "Fantastic Mr. Fox",
        "author": "Roald Dahl",
        "description": "Some text added",
    });
    let resp = client
        .put(format!("{base}/api/v1/books"))
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    let message = body["message"].as_str().unwrap().to_lowercase();
    assert!(message.contains("book updated"));
    assert!(body.get("bookId").is_none());

    let resp = reqwest::get(format!("{base}/api/v1/books/{book_id}"))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await, update);
}

#[tokio::test]
async fn update_book_with_numeric_string_id() {
    let base = start_server(seed::demo_repository()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/v1/books"))
        .json(&json!({
            "bookId": "1",
            "title": "The Hobbit",
            "author": "J. R. R. Tolkien",
            "description": "There and back again.",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        json_body(resp).await["message"],
        "Book updated successfully (Book ID: 1)"
    );

    let resp = reqwest::get(format!("{base}/api/v1/books/1")).await.unwrap();
    assert_eq!(json_body(resp).await["description"], "There and back again.");
}

#[tokio::test]
async fn update_book_with_missing_fields() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/v1/books"))
        .json(&json!({ "title": "Javascript for Fun", "author": "Fred" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body = json_body(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("missing field"));
    assert!(message.contains("bookId"));
    assert!(message.contains("description"));
}

#[tokio::test]
async fn update_unknown_book() {
    let base = start_server(seed::demo_repository()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/v1/books"))
        .json(&json!({
            "bookId": 99,
            "title": "Javascript for Fun",
            "author": "Fred",
            "description": "some text added",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body = json_body(resp).await;
    let message = body["message"].as_str().unwrap().to_lowercase();
    assert!(message.contains("book not found"));
    assert!(body.get("availableBooks").is_none());
}

#[tokio::test]
async fn delete_book() {
    let base = start_server(seed::demo_repository()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/v1/books/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Book delete successfully (Book ID: 1)");

    let resp = reqwest::get(format!("{base}/api/v1/books/1")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_unknown_book_leaves_store_untouched() {
    let base = start_server(seed::demo_repository()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/v1/books/77"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Error: book not found (Book ID: 77)");

    let resp = reqwest::get(format!("{base}/api/v1/books")).await.unwrap();
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_book_with_non_numeric_id_is_not_found() {
    let base = start_server(seed::demo_repository()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/api/v1/books/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Error: book not found (Book ID: abc)");

    let resp = reqwest::get(format!("{base}/api/v1/books")).await.unwrap();
    assert_eq!(json_body(resp).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_route_and_method() {
    let base = start_server(BookRepository::new()).await;
    let client = reqwest::Client::new();

    let resp = reqwest::get(format!("{base}/api/v2/books")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        json_body(resp).await["message"],
        "The requested resource was not found"
    );

    let resp = client
        .patch(format!("{base}/api/v1/books"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    assert_eq!(json_body(resp).await["message"], "Method not allowed");
}
