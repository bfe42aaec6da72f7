//! In-memory broker client for pipeline and sink tests.

use crate::client::BrokerClient;
use crate::error::KafkaPipelineError;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub topic: String,
    pub key: Vec<u8>,
    pub payload: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub sent: Vec<SentMessage>,
    /// Value of `pending` observed at each flush call.
    pub flushes: Vec<usize>,
    pub reject_sends: bool,
    /// When set, flushes time out with this many messages still in flight.
    pub stuck_in_flight: Option<usize>,
    /// Each flush blocks the calling thread this long before returning.
    pub flush_delay: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct MockClient {
    pub state: Arc<Mutex<MockState>>,
    pending: Arc<Mutex<usize>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        let client = Self::default();
        client.state.lock().unwrap().reject_sends = true;
        client
    }

    pub fn stuck(in_flight: usize) -> Self {
        let client = Self::default();
        client.state.lock().unwrap().stuck_in_flight = Some(in_flight);
        client
    }

    pub fn slow_flush(delay: Duration) -> Self {
        let client = Self::default();
        client.state.lock().unwrap().flush_delay = Some(delay);
        client
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn flushes(&self) -> Vec<usize> {
        self.state.lock().unwrap().flushes.clone()
    }
}

impl BrokerClient for MockClient {
    fn send(&self, topic: &str, key: &[u8], payload: &[u8]) -> Result<(), KafkaPipelineError> {
        let mut state = self.state.lock().unwrap();
        if state.reject_sends {
            return Err(KafkaPipelineError::Submit("Local: Queue full".to_string()));
        }
        state.sent.push(SentMessage {
            topic: topic.to_string(),
            key: key.to_vec(),
            payload: payload.to_vec(),
        });
        *self.pending.lock().unwrap() += 1;
        Ok(())
    }

    fn flush(&self, _timeout: Duration) -> Result<(), KafkaPipelineError> {
        let delay = self.state.lock().unwrap().flush_delay;
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        let mut state = self.state.lock().unwrap();
        let mut pending = self.pending.lock().unwrap();
        state.flushes.push(*pending);
        match state.stuck_in_flight {
            Some(_) => Err(KafkaPipelineError::Submit("Local: Timed out".to_string())),
            None => {
                *pending = 0;
                Ok(())
            }
        }
    }

    fn in_flight_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state
            .stuck_in_flight
            .unwrap_or_else(|| *self.pending.lock().unwrap())
    }
}
