#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dataflow_client::{ClientError, RecordTransport};
use dataflow_core::record::{CreateRecord, CreatedRecord};
use tokio::sync::Notify;

/// Scripted answer for [`FakeTransport`].
pub enum Reply {
    Created,
    BusinessRule(&'static str),
    Server,
}

/// Transport that answers from a script and counts calls. When `gate` is
/// set, each call waits for `gate.notify_one()` before answering.
pub struct FakeTransport {
    reply: Reply,
    pub calls: AtomicUsize,
    pub sent: Mutex<Vec<String>>,
    pub gate: Option<std::sync::Arc<Notify>>,
}

impl FakeTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(reply: Reply, gate: std::sync::Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(reply)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordTransport for FakeTransport {
    async fn create_record(&self, input: &CreateRecord) -> Result<CreatedRecord, ClientError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(input.title.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.reply {
            Reply::Created => Ok(CreatedRecord {
                id_record: n as i64,
                title: input.title.trim().to_string(),
                date_created: chrono::Utc::now(),
            }),
            Reply::BusinessRule(message) => Err(ClientError::BusinessRule(message.to_string())),
            Reply::Server => Err(ClientError::Server {
                status: 500,
                message: "An internal error occurred".to_string(),
            }),
        }
    }
}
