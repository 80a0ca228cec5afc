use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DropdownOption {
    label: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    last_fetched: String,
}

#[derive(Debug, Deserialize)]
struct ChartPoint {
    date: String,
    count: u64,
    cumulative: u64,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    title: String,
    points: Vec<ChartPoint>,
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

const SEED_SNAPSHOT: &str = "\
date_report,province,health_region,cases
2020-03-01,Ontario,Toronto,1
2020-03-01,Ontario,Ottawa,1
2020-03-02,Ontario,Toronto,1
2020-03-03,Quebec,Montreal,1
";

/// Seed a fresh data directory with one snapshot so the server skips its
/// eager startup fetch and never touches the network.
fn seed_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut dir = std::env::temp_dir();
    dir.push(format!("c19_http_{}_{}", std::process::id(), nanos));
    std::fs::create_dir_all(&dir).expect("create data dir");
    std::fs::write(dir.join("c19 2020-03-03 00-00-00.csv"), SEED_SNAPSHOT)
        .expect("write seed snapshot");
    dir
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/status")).send().await {
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
    let data_dir = seed_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_c19_dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_DATA_DIR", &data_dir)
        .env("DASHBOARD_SOURCE_URL", "http://127.0.0.1:9/unreachable")
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

#[tokio::test]
async fn http_index_serves_the_dashboard_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(&server.base_url)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("C19 Canada"));
    assert!(body.contains("reload-button"));
    assert!(body.contains("province-dropdown"));
    assert!(body.contains("region-dropdown"));
    assert!(body.contains("last-fetched"));
    assert!(body.contains("Data source"));
}

#[tokio::test]
async fn http_status_reports_last_fetched_time() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let status: StatusResponse = client
        .get(format!("{}/api/status", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(status.last_fetched.starts_with("(last fetched "));
    assert!(status.last_fetched.ends_with(" PST)"));
}

#[tokio::test]
async fn http_provinces_are_distinct_and_sorted() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let options: Vec<DropdownOption> = client
        .get(format!("{}/api/provinces", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Ontario", "Quebec"]);
    assert!(options.iter().all(|o| o.label == o.value));
}

#[tokio::test]
async fn http_regions_follow_the_selected_province() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let options: Vec<DropdownOption> = client
        .get(format!("{}/api/regions?province=Ontario", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Ottawa", "Toronto"]);
}

#[tokio::test]
async fn http_chart_is_cumulative_over_the_filtered_dataset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let chart: ChartResponse = client
        .get(format!("{}/api/chart?province=Ontario", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(chart.title, "Cumulative Cases");
    let dates: Vec<&str> = chart.points.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2020-03-01", "2020-03-02"]);
    let counts: Vec<u64> = chart.points.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![2, 1]);
    let cumulative: Vec<u64> = chart.points.iter().map(|p| p.cumulative).collect();
    assert_eq!(cumulative, vec![2, 3]);
}

#[tokio::test]
async fn http_chart_with_an_unknown_province_is_empty() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let chart: ChartResponse = client
        .get(format!("{}/api/chart?province=Atlantis", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(chart.points.is_empty());
}
