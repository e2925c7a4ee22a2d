mod otp_controller;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use uuid::Uuid;

use crate::SessionContext;
use crm_client::{ActorHandle, OtpService, ProfileChannel, Result as ClientResult, VerifyOutcome};
use crm_core::{EmailAddress, ProfileDraft, SessionIdentity};

/// Profile channel that replays scripted replies and records every call.
pub(crate) struct ScriptedChannel {
    replies: Mutex<VecDeque<ClientResult<()>>>,
    delay: Mutex<Duration>,
    calls: AtomicU32,
    call_times: Mutex<Vec<Instant>>,
    last_draft: Mutex<Option<ProfileDraft>>,
}

impl ScriptedChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            delay: Mutex::new(Duration::ZERO),
            calls: AtomicU32::new(0),
            call_times: Mutex::new(Vec::new()),
            last_draft: Mutex::new(None),
        })
    }

    /// Queue the reply for the next unanswered call; the default reply
    /// once the queue runs dry is success.
    pub(crate) fn push_reply(&self, reply: ClientResult<()>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Make every call take `delay` before replying
    pub(crate) fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }

    pub(crate) fn last_draft(&self) -> Option<ProfileDraft> {
        self.last_draft.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileChannel for ScriptedChannel {
    async fn save_profile(&self, draft: &ProfileDraft) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().unwrap().push(Instant::now());
        *self.last_draft.lock().unwrap() = Some(draft.clone());

        let delay = *self.delay.lock().unwrap();
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }

        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// OTP service that returns a fixed code and replays verify replies.
pub(crate) struct ScriptedOtp {
    code: String,
    verify_replies: Mutex<VecDeque<ClientResult<VerifyOutcome>>>,
    generate_replies: Mutex<VecDeque<ClientResult<String>>>,
    generate_calls: AtomicU32,
    verify_calls: AtomicU32,
}

impl ScriptedOtp {
    pub(crate) fn new(code: &str) -> Arc<Self> {
        Arc::new(Self {
            code: code.to_string(),
            verify_replies: Mutex::new(VecDeque::new()),
            generate_replies: Mutex::new(VecDeque::new()),
            generate_calls: AtomicU32::new(0),
            verify_calls: AtomicU32::new(0),
        })
    }

    pub(crate) fn push_verify(&self, reply: ClientResult<VerifyOutcome>) {
        self.verify_replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_generate(&self, reply: ClientResult<String>) {
        self.generate_replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn generate_calls(&self) -> u32 {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn verify_calls(&self) -> u32 {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OtpService for ScriptedOtp {
    async fn generate_otp(&self, _email: &EmailAddress) -> ClientResult<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.generate_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.code.clone()))
    }

    async fn verify_otp(&self, _email: &EmailAddress, _code: &str) -> ClientResult<VerifyOutcome> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(VerifyOutcome::Invalid))
    }
}

pub(crate) fn draft(name: &str) -> ProfileDraft {
    ProfileDraft::new(
        name.to_string(),
        "alex@example.com".to_string(),
        "+1 555 0100".to_string(),
    )
}

/// Publish a full ready session: live handle, resolved identity, no
/// fetch in progress.
pub(crate) fn make_ready(context: &SessionContext, channel: Arc<ScriptedChannel>) {
    let actor: ActorHandle = channel;
    context.replace(crate::SessionSnapshot {
        identity: Some(SessionIdentity::authenticated(Uuid::new_v4())),
        actor: Some(actor),
        fetching: false,
    });
}
