//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and driving WebSocket clients.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use lobby_common::AppConfig;
use lobby_gateway::{create_app, create_gateway_state, GatewayState};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

use crate::fixtures::SessionResponse;

/// How long a client waits for an expected frame
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: GatewayState,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::for_tests()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_gateway_state(config);
        let app = create_app(state.clone());

        // Bind to an ephemeral loopback port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(RECV_TIMEOUT).build()?;

        Ok(Self {
            addr,
            client,
            state,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a WebSocket connection and read its session identity
    pub async fn connect(&self) -> Result<(TestClient, SessionResponse)> {
        let mut client = TestClient::connect(&self.ws_url()).await?;
        let session = client.recv_json().await?;
        Ok((client, session))
    }
}

/// WebSocket test client
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect without consuming any frames
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send a raw text frame
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Send a raw binary frame
    pub async fn send_binary(&mut self, data: &[u8]) -> Result<()> {
        self.stream.send(Message::Binary(data.to_vec())).await?;
        Ok(())
    }

    /// Send a request envelope
    pub async fn send_envelope(&mut self, type_name: i64, payload: Value) -> Result<()> {
        let envelope = json!({ "TypeName": type_name, "Payload": payload });
        self.send_text(&envelope.to_string()).await
    }

    /// Receive the next text frame, skipping control frames
    pub async fn recv_text(&mut self) -> Result<String> {
        loop {
            match self.next_message(RECV_TIMEOUT).await? {
                Message::Text(text) => return Ok(text),
                Message::Ping(_) | Message::Pong(_) => {}
                Message::Close(frame) => anyhow::bail!("Connection closed: {frame:?}"),
                other => anyhow::bail!("Unexpected frame: {other:?}"),
            }
        }
    }

    /// Receive the next text frame as JSON
    pub async fn recv_json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let text = self.recv_text().await?;
        serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse frame {text:?}: {e}"))
    }

    /// Receive the next ping, skipping anything else
    pub async fn recv_ping(&mut self, timeout: Duration) -> Result<Vec<u8>> {
        loop {
            if let Message::Ping(body) = self.next_message(timeout).await? {
                return Ok(body);
            }
        }
    }

    /// Check that no text frame arrives within `window`
    pub async fn expect_silence(&mut self, window: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + window;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match tokio::time::timeout(remaining, self.stream.next()).await {
                Err(_) => return Ok(()),
                Ok(Some(Ok(Message::Text(text)))) => anyhow::bail!("Unexpected frame: {text}"),
                Ok(Some(Ok(_))) => {}
                Ok(Some(Err(e))) => return Err(e.into()),
                Ok(None) => anyhow::bail!("Connection ended"),
            }
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }

    async fn next_message(&mut self, timeout: Duration) -> Result<Message> {
        match tokio::time::timeout(timeout, self.stream.next()).await {
            Err(_) => anyhow::bail!("Timed out waiting for frame"),
            Ok(None) => anyhow::bail!("Connection ended"),
            Ok(Some(message)) => Ok(message?),
        }
    }
}

/// Wait until `check` holds, polling briefly
pub async fn wait_until<F>(mut check: F) -> Result<()>
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while !check() {
        if tokio::time::Instant::now() >= deadline {
            anyhow::bail!("Condition not reached in time");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    Ok(())
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}
