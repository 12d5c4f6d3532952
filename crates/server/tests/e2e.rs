use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::{MemoryStorage, SeaOrmStorage};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup;
use server::state::ServerState;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

async fn start_server(state: ServerState) -> anyhow::Result<TestApp> {
    let app = startup::build_app(state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = startup::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn start_memory_server() -> anyhow::Result<TestApp> {
    start_server(ServerState::new(Arc::new(MemoryStorage::new()))).await
}

/// Concatenated JSON objects, as returned by the list routes.
fn split_objects(body: &str) -> Vec<Value> {
    serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("concatenated json")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_memory_server().await?;
    let res = reqwest::get(app.url("/health")).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_client_create_list_update_delete() -> anyhow::Result<()> {
    let app = start_memory_server().await?;
    let http = reqwest::Client::new();

    let smith = json!({
        "last_name": "Smith",
        "first_name": "John",
        "patronymic": "A",
        "age": 30,
        "registration_date": "2024-01-01"
    });
    let res = http.post(app.url("/client/create")).json(&smith).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created: Value = res.json().await?;
    let id = created["id"].as_str().expect("id").to_string();

    let res = http.post(app.url("/client/list")).json(&json!({"last_name": "Smith"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.headers().get(reqwest::header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let listed = split_objects(&res.text().await?);
    let mut expected = smith.clone();
    expected["id"] = json!(id);
    assert_eq!(listed, vec![expected]);

    let mut changed = smith.clone();
    changed["id"] = json!(id);
    changed["first_name"] = json!("Jane");
    let res = http.post(app.url("/client/update")).json(&changed).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "success"}));

    let res = http.post(app.url("/client/list")).json(&json!({"last_name": "Smith"})).send().await?;
    assert_eq!(split_objects(&res.text().await?), vec![changed]);

    let res = http.post(app.url("/client/delete")).json(&json!({"id": id})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = http.post(app.url("/client/delete")).json(&json!({"id": id})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "not found");
    Ok(())
}

#[tokio::test]
async fn e2e_market_list_concatenates_rows() -> anyhow::Result<()> {
    let app = start_memory_server().await?;
    let http = reqwest::Client::new();

    for (address, owner) in [("Main St", None), ("2nd Ave", Some("Bob"))] {
        let mut m = json!({"name": "Corner", "address": address, "active": true});
        if let Some(owner) = owner { m["owner"] = json!(owner); }
        let res = http.post(app.url("/market/create")).json(&m).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
    }

    let res = http.post(app.url("/market/list")).json(&json!({"name": "Corner"})).send().await?;
    let body = res.text().await?;
    assert!(!body.starts_with('['));
    let rows = split_objects(&body);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].get("owner").is_none());
    assert_eq!(rows[1]["owner"], "Bob");

    let res = http.post(app.url("/market/list")).json(&json!({"name": "Nowhere"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_rejections() -> anyhow::Result<()> {
    let app = start_memory_server().await?;
    let http = reqwest::Client::new();

    let res = http
        .post(app.url("/market/create"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "wrong json");

    let too_long = "x".repeat(21);
    let res = http
        .post(app.url("/market/create"))
        .json(&json!({"name": too_long, "address": "Main St", "active": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "validation fail");
    assert!(body["detail"].as_str().unwrap_or_default().contains("name"));

    let res = http.post(app.url("/market/update")).json(&json!({"id": "ghost", "name": "Corner", "address": "Main St", "active": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = http.post(app.url("/warehouse/list")).json(&json!({})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_count_requests() -> anyhow::Result<()> {
    let app = start_memory_server().await?;
    let http = reqwest::Client::new();
    http.post(app.url("/client/list")).json(&json!({"last_name": "Nobody"})).send().await?;

    let text = reqwest::get(app.url("/metrics")).await?.text().await?;
    assert!(text.contains("market_registry_requests_total"));
    assert!(text.contains(r#"entity="client""#));
    Ok(())
}

// Against a real PostgreSQL; skip if unavailable
#[tokio::test]
async fn e2e_postgres_roundtrip() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let mut cfg = configs::AppConfig::default();
    if cfg.normalize_and_validate().is_err() || cfg.database.url.trim().is_empty() {
        eprintln!("DATABASE_URL missing; skip e2e postgres test.");
        return Ok(());
    }
    let db = match models::db::connect_with_config(&cfg.database).await {
        Ok(db) => db,
        Err(e) => { eprintln!("database unavailable, skipping: {e}"); return Ok(()); }
    };
    models::db::ensure_tables(&db).await?;
    let app = start_server(ServerState::new(Arc::new(SeaOrmStorage::new(db)))).await?;
    let http = reqwest::Client::new();

    let name = format!("e2e{}", &Uuid::new_v4().simple().to_string()[..12]);
    let res = http.post(app.url("/market/create")).json(&json!({"name": name, "address": "Main St", "active": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let id = res.json::<Value>().await?["id"].as_str().unwrap_or_default().to_string();
    let body = http.post(app.url("/market/list")).json(&json!({"name": name})).send().await?.text().await?;
    assert_eq!(split_objects(&body).len(), 1);
    let res = http.post(app.url("/market/delete")).json(&json!({"id": id})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}
