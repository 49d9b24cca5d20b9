#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_filmhub"));
        cmd.arg("serve")
            .env("SERVER_HOST", "127.0.0.1")
            .env("SERVER_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherits DATABASE_URL and friends from the test environment
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Starts the shared server, or returns `None` when no database is configured.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(Some(server))
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Registers a fresh account and returns a bearer token for it. With `admin`
/// the account is promoted directly in the database before signing in.
pub async fn token_for_new_user(server: &TestServer, admin: bool) -> Result<String> {
    let client = reqwest::Client::new();
    let username = unique("user");
    let creds = json!({ "username": username, "password": "kek" });

    let res = client
        .post(format!("{}/auth/sign-up", server.base_url))
        .json(&creds)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "sign-up failed: {}", res.status());

    if admin {
        let url = std::env::var("DATABASE_URL")?;
        let pool = sqlx::PgPool::connect(&url).await?;
        sqlx::query("UPDATE users SET role = 'admin' WHERE username = $1")
            .bind(&username)
            .execute(&pool)
            .await?;
        pool.close().await;
    }

    let body: Value = client
        .post(format!("{}/auth/sign-in", server.base_url))
        .json(&creds)
        .send()
        .await?
        .json()
        .await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("sign-in response carried no token")
}
