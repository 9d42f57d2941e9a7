//! Scripted backend for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use vidhi_core::error::{Result, VidhiError};
use vidhi_interaction::{BackendReply, BackendRequest, GenerativeBackend};

/// A [`GenerativeBackend`] that pops pre-scripted replies and records
/// every request it receives.
#[derive(Default)]
pub(crate) struct MockBackend {
    replies: Mutex<VecDeque<Result<BackendReply>>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_ok(&self, reply: BackendReply) {
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    pub(crate) fn push_err(&self, err: VidhiError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(&self, request: BackendRequest) -> Result<BackendReply> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockBackend received an unscripted call"))
    }
}
