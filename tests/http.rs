use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SelectionResponse {
    view: Option<u32>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    signed_in: bool,
}

#[derive(Debug, Deserialize)]
struct SurfaceSnapshot {
    login_visible: bool,
    shell_visible: bool,
    user_name: String,
    visible_views: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct ViewStatus {
    id: u32,
    enabled: bool,
    badge: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignInRecord {
    display_name: String,
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

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        PIDS.lock().unwrap().push(pid as i32);
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().copied().filter(|pid| *pid > 0) {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
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

fn unique_data_path(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "tracker_shell_http_{tag}_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/session")).send().await {
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

async fn spawn_server(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_tracker_shell"))
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

async fn sign_in(client: &Client, server: &TestServer, name: &str) -> SessionResponse {
    client
        .post(format!("{}/api/session", server.base_url))
        .json(&serde_json::json!({ "display_name": name, "email": "aiko@example.com" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn select(client: &Client, server: &TestServer, view: u32) -> SelectionResponse {
    client
        .post(format!("{}/api/selection", server.base_url))
        .json(&serde_json::json!({ "view": view }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn surface(client: &Client, server: &TestServer) -> SurfaceSnapshot {
    client
        .get(format!("{}/api/surface", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn views(client: &Client, server: &TestServer) -> Vec<ViewStatus> {
    client
        .get(format!("{}/api/views", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_sign_in_restores_default_then_last_view() {
    let data_path = unique_data_path("restore");
    let server = spawn_server(&data_path).await;
    let client = Client::new();

    let before = surface(&client, &server).await;
    assert!(before.login_visible);
    assert!(!before.shell_visible);
    assert!(before.visible_views.is_empty());

    let session = sign_in(&client, &server, "Aiko").await;
    assert!(session.signed_in);
    let after = surface(&client, &server).await;
    assert!(after.shell_visible);
    assert_eq!(after.user_name, "Aiko");
    assert_eq!(after.visible_views, vec![1]);

    let selection = select(&client, &server, 4).await;
    assert_eq!(selection.view, Some(4));
    assert_eq!(selection.title.as_deref(), Some("🤸 Stretch"));

    let response = client
        .delete(format!("{}/api/session", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let signed_out = surface(&client, &server).await;
    assert!(signed_out.login_visible);
    assert!(!signed_out.shell_visible);
    let current: SelectionResponse = client
        .get(format!("{}/api/selection", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.view, Some(4));

    drop(server);
    let restarted = spawn_server(&data_path).await;
    sign_in(&client, &restarted, "Aiko").await;
    assert_eq!(surface(&client, &restarted).await.visible_views, vec![4]);

    let history: Vec<SignInRecord> = client
        .get(format!("{}/api/session/history", restarted.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].display_name, "Aiko");

    drop(restarted);
    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_out_of_range_view_is_accepted_and_hides_every_view() {
    let data_path = unique_data_path("range");
    let server = spawn_server(&data_path).await;
    let client = Client::new();

    sign_in(&client, &server, "Aiko").await;
    select(&client, &server, 2).await;

    let selection = select(&client, &server, 999).await;
    assert_eq!(selection.view, Some(999));
    assert_eq!(selection.title, None);
    assert!(surface(&client, &server).await.visible_views.is_empty());

    drop(server);
    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_badges_and_availability() {
    let data_path = unique_data_path("badges");
    let server = spawn_server(&data_path).await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/views/3/badge", server.base_url))
        .json(&serde_json::json!({ "label": "3" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let badged = views(&client, &server).await;
    assert_eq!(badged.iter().find(|view| view.id == 3).unwrap().badge.as_deref(), Some("3"));

    client
        .put(format!("{}/api/views/3/badge", server.base_url))
        .json(&serde_json::json!({ "label": null }))
        .send()
        .await
        .unwrap();
    client
        .put(format!("{}/api/views/5/enabled", server.base_url))
        .json(&serde_json::json!({ "enabled": false }))
        .send()
        .await
        .unwrap();

    let statuses = views(&client, &server).await;
    assert!(statuses.iter().all(|view| view.badge.is_none()));
    assert!(!statuses.iter().find(|view| view.id == 5).unwrap().enabled);

    let html = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!html.contains("class=\"tab-badge\""));

    drop(server);
    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_sign_in_without_name_is_rejected() {
    let data_path = unique_data_path("reject");
    let server = spawn_server(&data_path).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/session", server.base_url))
        .json(&serde_json::json!({ "display_name": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(surface(&client, &server).await.login_visible);

    drop(server);
    let _ = std::fs::remove_file(&data_path);
}
