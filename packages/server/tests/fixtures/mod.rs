//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use linkup_server::{
    AppState, build_router,
    infrastructure::repository::{Database, InMemoryUserDirectory},
};
use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// Server running in-process on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    /// Directory behind the in-memory state; unused by `start_sqlite`
    pub users: Arc<InMemoryUserDirectory>,
    /// Database behind `start_sqlite`
    pub db: Option<Arc<Database>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// In-memory repositories
    pub async fn start() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let state = AppState::in_memory(users.clone());
        Self::launch(state, users, None).await
    }

    /// SQLite repositories over a private in-memory database
    pub async fn start_sqlite() -> Self {
        let db = Arc::new(Database::open_in_memory().expect("Failed to open database"));
        let state = AppState::sqlite(db.clone());
        Self::launch(state, Arc::new(InMemoryUserDirectory::new()), Some(db)).await
    }

    async fn launch(
        state: AppState,
        users: Arc<InMemoryUserDirectory>,
        db: Option<Arc<Database>>,
    ) -> Self {
        let state = Arc::new(state);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let app = build_router(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            state,
            users,
            db,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A WebSocket client speaking `{"event", "data"}` frames
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        Self { stream }
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn emit(&mut self, event: &str, data: serde_json::Value) {
        let frame = serde_json::json!({"event": event, "data": data});
        self.send_raw(&frame.to_string()).await;
    }

    /// Next event frame, failing the test after 2 seconds
    pub async fn next_event(&mut self) -> serde_json::Value {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(2), self.stream.next())
                .await
                .expect("Timed out waiting for event")
                .expect("Stream closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).expect("Event is not JSON");
            }
        }
    }

    /// Join `user_id`'s room and wait until the server has applied it.
    ///
    /// Frames of one connection are handled in order, so a read receipt
    /// addressed to our own room comes back only after the join.
    pub async fn join(&mut self, user_id: i64) {
        self.emit("join", serde_json::json!({"userId": user_id})).await;
        self.emit(
            "readMessages",
            serde_json::json!({"senderId": user_id, "receiverId": user_id}),
        )
        .await;
        let event = self.next_event().await;
        assert_eq!(event["event"], "messagesRead");
    }

    /// Send an invalid frame and wait for its error; everything queued for
    /// this connection before that point is returned.
    pub async fn drain(&mut self) -> Vec<serde_json::Value> {
        self.send_raw("not json").await;
        let mut events = Vec::new();
        loop {
            let event = self.next_event().await;
            let is_marker = event["event"] == "error"
                && event["data"]["message"]
                    .as_str()
                    .is_some_and(|m| m.starts_with("Malformed event"));
            if is_marker {
                return events;
            }
            events.push(event);
        }
    }
}
