use crate::api::routes;
use crate::db::test_support::temp_database;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    _dir: TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let (dir, database) = temp_database();
        let app = routes::app(database);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn author_and_book_end_to_end() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, author) = post_json(
        &client,
        server.url("/authors/"),
        json!({ "name": "Jane", "bio": "..." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author, json!({ "id": 1, "name": "Jane", "bio": "..." }));

    let (status, book) = post_json(
        &client,
        server.url("/books/"),
        json!({ "author_id": 1, "title": "Persuasion" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["id"], 1);
    assert_eq!(book["author_id"], 1);
    assert_eq!(book["title"], "Persuasion");
    assert_eq!(book["description"], Value::Null);

    let (status, books) = get_json(&client, server.url("/books/by_author/?author_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([book]));

    let (status, found) = get_json(&client, server.url("/authors/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, author);

    let (status, missing) = get_json(&client, server.url("/authors/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "Author not found");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_endpoints_apply_offset_and_limit() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for n in 0..15 {
        let (status, _) = post_json(
            &client,
            server.url("/authors/"),
            json!({ "name": format!("author-{n}") }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, default_page) = get_json(&client, server.url("/authors/")).await;
    assert_eq!(default_page.as_array().unwrap().len(), 10);

    let (_, page) = get_json(&client, server.url("/authors/?offset=3&limit=2")).await;
    let names: Vec<_> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["author-3", "author-4"]);

    let (_, legacy) = get_json(&client, server.url("/authors/?skip=3&limit=2")).await;
    assert_eq!(legacy, page);

    let (status, beyond) = get_json(&client, server.url("/authors/?offset=50")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(beyond, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn books_by_author_without_filter_is_empty() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    post_json(
        &client,
        server.url("/books/"),
        json!({ "author_id": 7, "title": "Dangling" }),
    )
    .await;

    let (status, books) = get_json(&client, server.url("/books/by_author/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([]));

    let (status, books) = get_json(&client, server.url("/books/by_author/?author_id=8")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([]));

    let (_, all) = get_json(&client, server.url("/books/")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn book_with_unknown_author_is_accepted() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, book) = post_json(
        &client,
        server.url("/books/"),
        json!({ "author_id": 404, "title": "Nobody's", "description": "orphan" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["author_id"], 404);
    assert_eq!(book["description"], "orphan");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_input_is_rejected_before_the_store() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/authors/"))
        .json(&json!({ "bio": "no name" }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());

    let res = client
        .get(server.url("/authors/not-a-number"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(server.url("/books/?limit=-1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (_, authors) = get_json(&client, server.url("/authors/")).await;
    assert_eq!(authors, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_all_succeed_with_distinct_ids() {
    const WRITERS: usize = 64;

    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let requests: Vec<_> = (0..WRITERS)
        .map(|n| {
            let client = client.clone();
            let url = server.url("/authors/");
            tokio::spawn(async move {
                post_json(&client, url, json!({ "name": format!("writer-{n}") })).await
            })
        })
        .collect();

    for request in requests {
        let (status, body) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK, "create failed: {body}");
    }

    let (status, authors) = get_json(&client, server.url("/authors/?limit=100")).await;
    assert_eq!(status, StatusCode::OK);

    let mut ids: Vec<i64> = authors
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), WRITERS);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), WRITERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn collection_routes_answer_without_trailing_slash() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, author) =
        post_json(&client, server.url("/authors"), json!({ "name": "Jane" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, book) = post_json(
        &client,
        server.url("/books"),
        json!({ "author_id": author["id"], "title": "Emma" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, authors) = get_json(&client, server.url("/authors")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(authors, json!([author]));

    let (status, books) = get_json(&client, server.url("/books")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([book.clone()]));

    let (status, by_author) = get_json(&client, server.url("/books/by_author?author_id=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_author, json!([book]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn offset_and_skip_together_prefer_offset() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for n in 0..5 {
        post_json(
            &client,
            server.url("/books/"),
            json!({ "author_id": 1, "title": format!("volume-{n}") }),
        )
        .await;
    }

    let (status, page) = get_json(
        &client,
        server.url("/books/by_author/?author_id=1&offset=1&skip=3&limit=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page[0]["title"], "volume-1");

    let (status, page) = get_json(&client, server.url("/books/?skip=3&offset=2&limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page[0]["title"], "volume-2");
}
