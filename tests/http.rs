use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TaskView {
    day: u32,
    text: String,
    saved: bool,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct PlannerResponse {
    date: String,
    day: u32,
    days_in_month: u32,
    tasks: Vec<TaskView>,
    progress: u32,
    streak: u32,
    congrats: bool,
}

impl PlannerResponse {
    fn task(&self, day: u32) -> Option<&TaskView> {
        self.tasks.iter().find(|task| task.day == day)
    }
}

#[derive(Debug, Deserialize)]
struct TimerResponse {
    remaining_seconds: u64,
    running: bool,
    expired: bool,
    display: String,
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

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!("study_planner_http_{}_{}", std::process::id(), nanos));
    dir.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/planner")).send().await {
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
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_study_planner"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", data_dir)
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

async fn get_planner(client: &Client, base_url: &str) -> PlannerResponse {
    client
        .get(format!("{base_url}/api/planner"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_planner(
    client: &Client,
    base_url: &str,
    path: &str,
    body: serde_json::Value,
) -> PlannerResponse {
    let response = client
        .post(format!("{base_url}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "{path} failed");
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_planner_reports_current_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let planner = get_planner(&client, &server.base_url).await;
    assert!(!planner.date.is_empty());
    assert!(planner.day >= 1 && planner.day <= planner.days_in_month);
    assert!((28..=31).contains(&planner.days_in_month));
}

#[tokio::test]
async fn http_saving_locks_task_text() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let planner = get_planner(&client, &server.base_url).await;
    // Pick a day other than today so completion tests are unaffected.
    let day = if planner.day == 1 { 2 } else { 1 };

    let drafted = post_planner(
        &client,
        &server.base_url,
        "/api/task/text",
        serde_json::json!({ "day": day, "text": "chapter review" }),
    )
    .await;
    assert_eq!(drafted.task(day).unwrap().text, "chapter review");
    assert!(!drafted.task(day).unwrap().saved);

    let saved = post_planner(
        &client,
        &server.base_url,
        "/api/task/save",
        serde_json::json!({ "day": day }),
    )
    .await;
    assert!(saved.task(day).unwrap().saved);

    let after_edit = post_planner(
        &client,
        &server.base_url,
        "/api/task/text",
        serde_json::json!({ "day": day, "text": "something else" }),
    )
    .await;
    assert_eq!(after_edit.task(day).unwrap().text, "chapter review");
    assert!(after_edit.task(day).unwrap().saved);
}

#[tokio::test]
async fn http_completing_today_updates_analytics() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let planner = get_planner(&client, &server.base_url).await;
    let today = planner.day;

    post_planner(
        &client,
        &server.base_url,
        "/api/task/text",
        serde_json::json!({ "day": today, "text": "mock exam" }),
    )
    .await;
    post_planner(
        &client,
        &server.base_url,
        "/api/task/save",
        serde_json::json!({ "day": today }),
    )
    .await;

    let completed = post_planner(
        &client,
        &server.base_url,
        "/api/task/complete",
        serde_json::json!({ "day": today }),
    )
    .await;
    assert!(completed.task(today).unwrap().done);
    assert!(completed.streak >= 1);
    assert!(completed.progress >= 1);
    assert!(completed.congrats);

    let dismissed = post_planner(
        &client,
        &server.base_url,
        "/api/congrats/dismiss",
        serde_json::json!({}),
    )
    .await;
    assert!(!dismissed.congrats);
    assert!(dismissed.task(today).unwrap().done);
}

#[tokio::test]
async fn http_completing_another_day_is_a_no_op() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let planner = get_planner(&client, &server.base_url).await;
    let other = if planner.day == planner.days_in_month {
        planner.day - 1
    } else {
        planner.day + 1
    };

    post_planner(
        &client,
        &server.base_url,
        "/api/task/text",
        serde_json::json!({ "day": other, "text": "future plans" }),
    )
    .await;
    post_planner(
        &client,
        &server.base_url,
        "/api/task/save",
        serde_json::json!({ "day": other }),
    )
    .await;

    let after = post_planner(
        &client,
        &server.base_url,
        "/api/task/complete",
        serde_json::json!({ "day": other }),
    )
    .await;
    assert!(!after.task(other).unwrap().done);
}

#[tokio::test]
async fn http_rejects_out_of_range_days() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for day in [0u32, 99] {
        let response = client
            .post(format!("{}/api/task/text", server.base_url))
            .json(&serde_json::json!({ "day": day, "text": "x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn http_timer_duration_start_pause() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let set: TimerResponse = client
        .post(format!("{}/api/timer/duration", server.base_url))
        .json(&serde_json::json!({ "minutes": 45 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(set.remaining_seconds, 45 * 60);
    assert_eq!(set.display, "45:00");
    assert!(!set.running);
    assert!(!set.expired);

    let started: TimerResponse = client
        .post(format!("{}/api/timer/start", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(started.running);

    let paused: TimerResponse = client
        .post(format!("{}/api/timer/pause", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!paused.running);
    assert!(paused.remaining_seconds <= 45 * 60);
    assert!(paused.remaining_seconds >= 45 * 60 - 2);

    let rejected = client
        .post(format!("{}/api/timer/duration", server.base_url))
        .json(&serde_json::json!({ "minutes": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
}
