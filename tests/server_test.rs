// Integration tests for the static file server
// Each test binds a real listener on 127.0.0.1 with an ephemeral port

use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use dash_serve::config::ServerConfig;
use dash_serve::core::{AddressProbe, StaticServer};

struct NoNetwork;

#[async_trait]
impl AddressProbe for NoNetwork {
    async fn local_ip(&self) -> Option<IpAddr> {
        None
    }
}

// Running server handle for test cleanup
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    async fn start(root: &Path) -> Self {
        let config = ServerConfig::new("127.0.0.1", 0, root);
        let (tx, rx) = oneshot::channel::<()>();

        let server = StaticServer::with_probe(config, NoNetwork)
            .bind(async move {
                let _ = rx.await;
            })
            .await
            .expect("Failed to bind test server");

        let addr = server.local_addr();
        let handle = tokio::spawn(server.serve());

        Self {
            addr,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.expect("Server task panicked");
        }
    }

    // Send a request verbatim, bypassing client-side path normalization
    async fn raw_request(&self, request: &str) -> String {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }
}

fn dashboard() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Global Market Dashboard</h1>").unwrap();
    std::fs::write(dir.path().join("styles.css"), "body { margin: 0; }").unwrap();
    std::fs::create_dir(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("data").join("fx rates.json"), "{\"EUR\":1.08}").unwrap();
    std::fs::write(dir.path().join("data").join("Indices.json"), "[]").unwrap();
    dir
}

#[tokio::test]
async fn test_get_root_serves_index() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(response.text().await.unwrap(), "<h1>Global Market Dashboard</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_get_root_lists_directory_without_index() {
    let site = tempfile::tempdir().unwrap();
    std::fs::write(site.path().join("report.csv"), "a,b").unwrap();
    std::fs::create_dir(site.path().join("charts")).unwrap();
    let server = TestServer::start(site.path()).await;

    let body = reqwest::get(server.url("/")).await.unwrap().text().await.unwrap();
    assert!(body.contains("Directory listing for /"));
    assert!(body.contains("<a href=\"charts/\">charts/</a>"));
    assert!(body.contains("<a href=\"report.csv\">report.csv</a>"));

    server.stop().await;
}

#[tokio::test]
async fn test_nested_listing_and_encoded_file() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;

    // Client follows the redirect from /data to /data/
    let response = reqwest::get(server.url("/data")).await.unwrap();
    assert_eq!(response.url().path(), "/data/");
    let body = response.text().await.unwrap();
    let fx = body.find("fx%20rates.json").unwrap();
    let indices = body.find("Indices.json").unwrap();
    assert!(fx < indices);

    let json = reqwest::get(server.url("/data/fx%20rates.json"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(json, "{\"EUR\":1.08}");

    server.stop().await;
}

#[tokio::test]
async fn test_redirect_is_permanent() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let response = client.get(server.url("/data")).send().await.unwrap();
    assert_eq!(response.status(), 301);
    assert_eq!(response.headers()["location"], "/data/");

    server.stop().await;
}

#[tokio::test]
async fn test_head_returns_headers_only() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;

    let client = reqwest::Client::new();
    let response = client.head(server.url("/styles.css")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-length"], "19");
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/css"));
    assert!(response.bytes().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_missing_path_is_404() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;

    let response = reqwest::get(server.url("/missing.js")).await.unwrap();
    assert_eq!(response.status(), 404);

    server.stop().await;
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let outer = tempfile::tempdir().unwrap();
    std::fs::write(outer.path().join("credentials.txt"), "api-key=hunter2").unwrap();
    let root = outer.path().join("site");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("index.html"), "ok").unwrap();
    let server = TestServer::start(&root).await;

    let requests = [
        "GET /../credentials.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        "GET /%2e%2e/credentials.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        "GET /../../../../etc/passwd HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    ];
    for request in requests {
        let response = server.raw_request(request).await;
        assert!(
            !response.starts_with("HTTP/1.1 200"),
            "traversal succeeded for {:?}",
            request
        );
        assert!(!response.contains("hunter2"));
        assert!(!response.contains("root:"));
    }

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;

    let mut requests = Vec::new();
    for _ in 0..16 {
        let url = server.url("/index.html");
        requests.push(tokio::spawn(async move {
            reqwest::get(url).await.unwrap().status().as_u16()
        }));
    }
    for request in requests {
        assert_eq!(request.await.unwrap(), 200);
    }

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_releases_port() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;
    let addr = server.addr;

    assert_eq!(reqwest::get(server.url("/")).await.unwrap().status(), 200);
    server.stop().await;

    let rebound = std::net::TcpListener::bind(addr);
    assert!(rebound.is_ok(), "port {} still held: {:?}", addr.port(), rebound.err());
}

#[tokio::test]
async fn test_shutdown_with_idle_connection_open() {
    let site = dashboard();
    let server = TestServer::start(site.path()).await;
    let addr = server.addr;

    // Connected but never sends a request, like a browser preconnect
    let idle = TcpStream::connect(addr).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    tokio::time::timeout(std::time::Duration::from_secs(10), server.stop())
        .await
        .expect("server kept running while an idle connection was open");
    drop(idle);

    let rebound = std::net::TcpListener::bind(addr);
    assert!(rebound.is_ok(), "port {} still held: {:?}", addr.port(), rebound.err());
}
