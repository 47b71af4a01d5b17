// ABOUTME: Scripted LlmClient for unit tests.
// ABOUTME: Replays canned replies and records every request it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ContentBlock, LlmClient, Request, Response, StopReason, Usage};
use crate::error::LlmError;

pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, (u16, String)>>>,
    seen: Mutex<Vec<Request>>,
}

impl ScriptedClient {
    pub(crate) fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// First call fails with a 503, later calls replay `replies`.
    pub(crate) fn failing_then<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new(replies);
        client
            .replies
            .lock()
            .unwrap()
            .push_front(Err((503, "service unavailable".to_string())));
        client
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .flat_map(|req| req.messages.iter())
            .flat_map(|msg| msg.content.iter())
            .map(|block| block.as_text().to_string())
            .collect()
    }

    pub(crate) fn models(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|req| req.model.clone())
            .collect()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        self.seen.lock().unwrap().push(req.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err((500, "script exhausted".to_string())));

        match reply {
            Ok(text) => Ok(Response {
                id: "scripted".to_string(),
                content: vec![ContentBlock::text(text)],
                stop_reason: StopReason::EndTurn,
                model: req.model.clone(),
                usage: Usage::default(),
            }),
            Err((status, message)) => Err(LlmError::Api { status, message }),
        }
    }
}
