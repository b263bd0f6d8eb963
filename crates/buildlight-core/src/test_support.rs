//! Mock transport and sink for testing
//!
//! Available to dependents through the `test-support` feature.

use crate::error::TransportError;
use crate::logging::ErrorSink;
use crate::transport::{HttpMethod, HttpTransport, RawResponse, RequestOptions};
use std::sync::{Arc, Mutex};

/// Record of one dispatched request, for test assertions
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: HttpMethod,
    pub url: String,
    pub options: RequestOptions,
}

#[derive(Debug)]
enum Outcome {
    Response { status: u16, body: String },
    Error(TransportError),
}

#[derive(Debug)]
struct Inner {
    outcome: Outcome,
    requests: Vec<SentRequest>,
}

/// Mock HTTP transport returning a canned outcome
///
/// Clones share state, so a test can hand one copy to a client and keep
/// another for assertions.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    /// Mock that answers every send with the given status and body
    pub fn with_response(status: u16, body: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                outcome: Outcome::Response {
                    status,
                    body: body.into(),
                },
                requests: Vec::new(),
            })),
        }
    }

    /// Mock that fails every send with the given transport error
    pub fn with_error(error: TransportError) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                outcome: Outcome::Error(error),
                requests: Vec::new(),
            })),
        }
    }

    /// Swap the canned outcome for subsequent sends
    pub fn set_response(&self, status: u16, body: impl Into<String>) {
        self.inner.lock().unwrap().outcome = Outcome::Response {
            status,
            body: body.into(),
        };
    }

    /// Swap the canned outcome for a transport error
    pub fn set_error(&self, error: TransportError) {
        self.inner.lock().unwrap().outcome = Outcome::Error(error);
    }

    /// Copy of the request log for assertions
    pub fn requests(&self) -> Vec<SentRequest> {
        self.inner.lock().unwrap().requests.clone()
    }
}

impl HttpTransport for MockTransport {
    fn send(
        &self,
        method: HttpMethod,
        url: &str,
        options: &RequestOptions,
    ) -> Result<RawResponse, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(SentRequest {
            method,
            url: url.to_string(),
            options: options.clone(),
        });

        match &inner.outcome {
            Outcome::Response { status, body } => Ok(RawResponse {
                status: *status,
                body: body.clone(),
            }),
            Outcome::Error(error) => Err(clone_error(error)),
        }
    }
}

fn clone_error(error: &TransportError) -> TransportError {
    match error {
        TransportError::ConnectionFailed { message } => TransportError::ConnectionFailed {
            message: message.clone(),
        },
        TransportError::Timeout { message } => TransportError::Timeout {
            message: message.clone(),
        },
        TransportError::InvalidProxy { message } => TransportError::InvalidProxy {
            message: message.clone(),
        },
        TransportError::MalformedResponse { message } => TransportError::MalformedResponse {
            message: message.clone(),
        },
        TransportError::RequestFailed { message } => TransportError::RequestFailed {
            message: message.clone(),
        },
    }
}

/// Error sink that collects messages for assertions
#[derive(Debug, Default)]
pub struct CapturedSink {
    messages: Mutex<Vec<String>>,
}

impl CapturedSink {
    /// Copy of the collected messages
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ErrorSink for CapturedSink {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
