//! Dispatcher – fire-and-forget delivery of position payloads.
//!
//! `send` serialises on the caller's thread, spawns the POST onto a tokio
//! runtime and returns. Whatever happens on the wire afterwards (refused
//! connection, TLS failure, 5xx, timeout) is dropped without a trace: a
//! voice-chat outage must never show up in the game server.

use crate::error::{AgentError, Result};
use crate::protocol::{position_url, Payload, ACCESS_TOKEN_HEADER, JSON_CONTENT_TYPE};
use crate::settings::Configuration;
use bytes::Bytes;
use log::error;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// End-to-end deadline of a single POST, including the response body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);
/// Connect deadline of the shared client.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Hands a payload off for delivery. Must return before any network I/O.
pub trait Dispatcher: Send + Sync {
    fn send(&self, payload: Payload);
}

impl<T: Dispatcher + ?Sized> Dispatcher for Arc<T> {
    fn send(&self, payload: Payload) {
        (**self).send(payload)
    }
}

// ---------------------------------------------------------------------------
// HTTP dispatcher
// ---------------------------------------------------------------------------

pub struct HttpDispatcher {
    client: reqwest::Client,
    url: String,
    access_token: HeaderValue,
    runtime: Handle,
    in_flight: Arc<AtomicUsize>,
}

impl HttpDispatcher {
    /// Build the shared client. Requests are spawned onto `runtime`, which
    /// lets host threads outside tokio call [`Dispatcher::send`].
    pub fn new(config: &Configuration, runtime: Handle) -> Result<Self> {
        // Direct connection only; proxy env vars are ignored.
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .no_proxy()
            .build()
            .map_err(|e| AgentError::Http(e.to_string()))?;

        let access_token = HeaderValue::from_str(&config.access_token).map_err(|e| {
            AgentError::InvalidConfiguration(format!(
                "access-token is not a valid header value: {}",
                e
            ))
        })?;

        Ok(Self {
            client,
            url: position_url(&config.bvc_server),
            access_token,
            runtime,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Requests spawned and not yet finished or expired.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}

impl Dispatcher for HttpDispatcher {
    fn send(&self, payload: Payload) {
        let body = match payload.to_json_bytes() {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                error!("Dropping position payload: {}", e);
                return;
            }
        };

        let request = self
            .client
            .post(&self.url)
            .timeout(REQUEST_TIMEOUT)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(ACCESS_TOKEN_HEADER, self.access_token.clone())
            .body(body);

        let guard = InFlight::enter(&self.in_flight);

        self.runtime.spawn(async move {
            let _guard = guard;
            // Status and body are not interpreted; draining keeps the
            // connection reusable.
            if let Ok(response) = request.send().await {
                let _ = response.bytes().await;
            }
        });
    }
}

/// Counts one spawned request; released on completion, abort or runtime
/// shutdown alike.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}
