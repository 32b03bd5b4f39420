use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use pulse_gate::{pulse_gate, PulseGate};
use tokio::{net::TcpListener, time};

const PULSE_INTERVAL_MILLIS: u64 = 1000;

struct AppState {
    gates: Mutex<HashMap<String, PulseGate>>,
}

#[tokio::main]
async fn main() {
    let mut heartbeat = pulse_gate(
        |tick: u64| println!("tick {tick} passed the gate"),
        PULSE_INTERVAL_MILLIS,
    )
    .unwrap();
    tokio::spawn(async move {
        // called every 300ms, logs once per second
        let mut ticker = time::interval(Duration::from_millis(300));
        let mut tick = 0u64;
        loop {
            ticker.tick().await;
            tick += 1;
            let _ = heartbeat(tick);
        }
    });

    let shared_state = Arc::new(AppState {
        gates: Mutex::new(HashMap::new()),
    });

    let app = Router::new()
        .route("/gated", get(gated))
        .route("/ungated", get(ungated))
        .with_state(shared_state);

    let listener = TcpListener::bind("0.0.0.0:8080").await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn gated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    let key = params.get("id").unwrap();
    let mut gates = state.gates.lock().unwrap();
    let gate = gates
        .entry(key.to_string())
        .or_insert_with(|| PulseGate::new(PULSE_INTERVAL_MILLIS).unwrap());

    if gate.try_pass() {
        (StatusCode::OK, "Gated, on the pulse!")
    } else {
        (StatusCode::TOO_MANY_REQUESTS, "dropped until next pulse")
    }
}

async fn ungated() -> &'static str {
    "Ungated! Let's Go!"
}
