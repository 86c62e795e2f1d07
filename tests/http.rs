use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    id: String,
    label: String,
    quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Report {
    id: String,
    date: String,
    shift: String,
    attendance: u32,
    blue: u32,
    green: u32,
    yellow: u32,
    red: u32,
    wait_minutes: f64,
    admissions: u32,
    length_of_stay_days: f64,
    adverse_events: u32,
    evaluations: Vec<Entry>,
    exams: Vec<Entry>,
    death_causes: Vec<Entry>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("shift_dashboard_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/data")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_shift_dashboard"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

fn sample(date: &str, shift: &str, attendance: u32, wait: f64) -> Value {
    json!({
        "date": date,
        "shift": shift,
        "attendance": attendance,
        "blue": 10,
        "green": 20,
        "yellow": 5,
        "red": 1,
        "wait_minutes": wait,
        "admissions": 2,
        "length_of_stay_days": 2.5,
        "adverse_events": 1,
        "evaluations": [{ "id": "ev-1", "label": "Cardiology", "quantity": 3 }],
        "exams": [{ "id": "ex-1", "label": "X-ray", "quantity": 10 }],
        "death_causes": [],
    })
}

async fn list(client: &Client, base_url: &str) -> Vec<Report> {
    client
        .get(format!("{base_url}/api/data"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn filtered(client: &Client, base_url: &str, query: &str) -> Vec<Report> {
    client
        .get(format!("{base_url}/api/data?{query}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn create(client: &Client, base_url: &str, body: &Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/data"))
        .json(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_create_then_list_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = sample("2031-01-01", "morning", 50, 25.5);
    let response = create(&client, &server.base_url, &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Report = response.json().await.unwrap();
    assert!(!created.id.is_empty());

    let mut with_id = body.clone();
    with_id["id"] = json!(created.id);
    let expected: Report = serde_json::from_value(with_id).unwrap();

    let stored = list(&client, &server.base_url)
        .await
        .into_iter()
        .find(|report| report.id == created.id)
        .expect("created report missing from list");
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn http_duplicate_date_and_shift_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first = create(&client, &server.base_url, &sample("2031-02-01", "night", 40, 40.0)).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let before = list(&client, &server.base_url).await.len();

    let second = create(&client, &server.base_url, &sample("2031-02-01", "night", 10, 5.0)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let error: Value = second.json().await.unwrap();
    assert!(error["error"].as_str().unwrap().contains("already exists"));

    assert_eq!(list(&client, &server.base_url).await.len(), before);
}

#[tokio::test]
async fn http_update_replaces_record() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let created: Report = create(&client, &server.base_url, &sample("2031-03-01", "afternoon", 65, 30.0))
        .await
        .json()
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.attendance = 70;
    changed.exams.clear();
    let response = client
        .put(format!("{}/api/data", server.base_url))
        .json(&changed)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Report = response.json().await.unwrap();
    assert_eq!(updated, changed);

    let stored = list(&client, &server.base_url)
        .await
        .into_iter()
        .find(|report| report.id == created.id)
        .unwrap();
    assert_eq!(stored, changed);

    // Unknown id wins over the taken (date, shift) slot.
    let mut unknown = changed.clone();
    unknown.id = "does-not-exist".into();
    let response = client
        .put(format!("{}/api/data", server.base_url))
        .json(&unknown)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body.is_null());

    unknown.date = "2031-03-02".into();
    let response = client
        .put(format!("{}/api/data", server.base_url))
        .json(&unknown)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn http_malformed_body_is_json_bad_request() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let before = list(&client, &server.base_url).await.len();

    let response = create(
        &client,
        &server.base_url,
        &json!({ "date": "2031-05-01", "shift": "morning", "attendance": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert!(error["error"].is_string());

    let response = client
        .put(format!("{}/api/data", server.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert!(error["error"].is_string());

    assert_eq!(list(&client, &server.base_url).await.len(), before);
}

#[tokio::test]
async fn http_list_applies_date_and_shift_filters() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for body in [
        sample("2031-06-01", "morning", 10, 10.0),
        sample("2031-06-01", "night", 20, 10.0),
        sample("2031-06-02", "night", 30, 10.0),
    ] {
        assert_eq!(
            create(&client, &server.base_url, &body).await.status(),
            StatusCode::CREATED
        );
    }

    let by_date = filtered(&client, &server.base_url, "date=2031-06-01&shift=all").await;
    assert_eq!(by_date.len(), 2);
    assert!(by_date.iter().all(|report| report.date == "2031-06-01"));

    let both = filtered(&client, &server.base_url, "date=2031-06-01&shift=night").await;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].attendance, 20);

    let none = filtered(&client, &server.base_url, "date=2031-06-03&shift=all").await;
    assert!(none.is_empty());

    assert_eq!(
        filtered(&client, &server.base_url, "date=all&shift=").await.len(),
        list(&client, &server.base_url).await.len()
    );

    let response = client
        .get(format!("{}/api/data?date=not-a-date", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_delete_removes_only_that_record() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let keep: Report = create(&client, &server.base_url, &sample("2031-04-01", "morning", 10, 10.0))
        .await
        .json()
        .await
        .unwrap();
    let gone: Report = create(&client, &server.base_url, &sample("2031-04-01", "night", 10, 10.0))
        .await
        .json()
        .await
        .unwrap();
    let before = list(&client, &server.base_url).await.len();

    let response = client
        .delete(format!("{}/api/data?id={}", server.base_url, gone.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after = list(&client, &server.base_url).await;
    assert_eq!(after.len(), before - 1);
    assert!(after.iter().all(|report| report.id != gone.id));
    assert!(after.iter().any(|report| report.id == keep.id));
}

#[tokio::test]
async fn http_delete_without_id_is_client_error() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/api/data", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_dashboard_aggregates_filtered_records() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for body in [
        sample("2032-05-01", "morning", 50, 25.0),
        sample("2032-05-01", "afternoon", 65, 30.0),
    ] {
        assert_eq!(
            create(&client, &server.base_url, &body).await.status(),
            StatusCode::CREATED
        );
    }

    let view: Value = client
        .get(format!("{}/api/dashboard?date=2032-05-01&shift=all", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["record_count"], 2);
    assert_eq!(view["kpis"]["total_attendance"], 115);
    assert_eq!(view["kpis"]["average_wait_minutes"], 28);
    assert!(view["available_dates"]
        .as_array()
        .unwrap()
        .contains(&json!("2032-05-01")));

    let view: Value = client
        .get(format!("{}/api/dashboard?date=2032-05-01&shift=afternoon", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["record_count"], 1);
    assert_eq!(view["kpis"]["total_attendance"], 65);

    let response = client
        .get(format!("{}/api/dashboard?shift=evening", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
