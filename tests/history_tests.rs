// tests/history_tests.rs

use std::sync::Arc;

use async_trait::async_trait;
use notes_quiz::{
    QuizConfig,
    config::Config,
    models::{question::Question, quiz_history::QuizHistory},
    routes,
    state::AppState,
    utils::ocr::{OcrEngine, OcrError},
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

struct NoOcr;

#[async_trait]
impl OcrEngine for NoOcr {
    async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
        Ok(String::new())
    }
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

async fn spawn_app(pool: SqlitePool, history_limit: i64) -> String {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        ocr_command: "tesseract".to_string(),
        ocr_lang: "eng".to_string(),
        max_upload_bytes: 1024 * 1024,
        history_limit,
        quiz: QuizConfig::default(),
    };

    let app = routes::create_router(AppState::new(pool, config, Arc::new(NoOcr)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn sample_quiz(label: &str) -> Vec<Question> {
    vec![Question::ShortAnswer {
        question_text: format!("Write a short explanation:\n{label}"),
        answer: label.to_string(),
    }]
}

async fn get_json(client: &reqwest::Client, url: String) -> serde_json::Value {
    client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse json")
}

#[tokio::test]
async fn store_round_trips_questions() {
    let pool = test_pool().await;

    let id = QuizHistory::create(&pool, "Biology", &sample_quiz("cells"))
        .await
        .unwrap();
    let rows = QuizHistory::list(&pool, Some("Biology"), 10).await.unwrap();

    assert_eq!(rows.len(), 1);
    let entry = rows.into_iter().next().unwrap().into_entry().unwrap();
    assert_eq!(entry.id, id);
    assert_eq!(entry.topic, "Biology");
    assert_eq!(entry.quiz, sample_quiz("cells"));
}

#[tokio::test]
async fn history_is_newest_first_and_filterable() {
    // Arrange
    let pool = test_pool().await;
    let biology = uuid::Uuid::new_v4().to_string();
    let first = QuizHistory::create(&pool, &biology, &sample_quiz("one")).await.unwrap();
    let other = QuizHistory::create(&pool, "Physics", &sample_quiz("two")).await.unwrap();
    let last = QuizHistory::create(&pool, &biology, &sample_quiz("three")).await.unwrap();

    let address = spawn_app(pool, 50).await;
    let client = reqwest::Client::new();

    // Act
    let all = get_json(&client, format!("{}/history", address)).await;
    let filtered = get_json(&client, format!("{}/history?topic={}", address, biology)).await;
    let unfiltered = get_json(&client, format!("{}/history?topic=", address)).await;

    // Assert
    let ids: Vec<i64> = all["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![last, other, first]);

    let filtered = filtered["history"].as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0]["id"], last);
    assert_eq!(filtered[0]["quiz"][0]["answer"], "three");
    assert_eq!(filtered[1]["topic"], biology.as_str());
    assert!(filtered[1]["created_at"].as_str().is_some());

    assert_eq!(unfiltered["history"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn history_respects_limit() {
    let pool = test_pool().await;
    for i in 0..4 {
        QuizHistory::create(&pool, "Chemistry", &sample_quiz(&format!("q{i}")))
            .await
            .unwrap();
    }

    let address = spawn_app(pool, 3).await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/history", address)).await;

    assert_eq!(body["history"].as_array().unwrap().len(), 3);
    assert_eq!(body["history"][0]["quiz"][0]["answer"], "q3");
}

#[tokio::test]
async fn delete_is_idempotent() {
    // Arrange
    let pool = test_pool().await;
    let id = QuizHistory::create(&pool, "History", &sample_quiz("rome")).await.unwrap();
    let address = spawn_app(pool, 50).await;
    let client = reqwest::Client::new();

    // Act
    let first: serde_json::Value = client
        .delete(&format!("{}/history/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second = client
        .delete(&format!("{}/history/{}", address, id))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(first["message"], "Deleted successfully");
    assert_eq!(second.status().as_u16(), 200);
    let second: serde_json::Value = second.json().await.unwrap();
    assert_eq!(second["message"], "Not found");

    let remaining = get_json(&client, format!("{}/history", address)).await;
    assert_eq!(remaining["history"].as_array().unwrap().len(), 0);
}
