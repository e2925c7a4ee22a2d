//! Profile-save coordination over an unreliable session.
//!
//! A save submitted while the session is not ready is captured rather
//! than failed: the coordinator holds a single pending request (latest
//! submission wins) and fires it when readiness arrives, either within
//! the submitting caller's wait budget or later via the auto-fire path.
//! The pending slot is claimed before any dispatch, and a submit that
//! lands while a save sequence is already in flight joins that sequence
//! instead of starting a second one, so a queued request is sent at
//! most once.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, sleep, sleep_until};

use crate::error::{SaveError, SaveResult};
use crate::retry::{RetrySchedule, with_retry};
use crate::session_context::SessionSnapshot;
use crm_client::ClientError;
use crm_config::{ReadinessConfig, SaveConfig};
use crm_core::ProfileDraft;

const COMMAND_BUFFER: usize = 16;

/// Result of a save that reached the backend successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Attempts consumed, including the successful one
    pub attempts: u32,
}

/// Observable state of the coordinator, published through a watch
/// channel for UIs to render.
#[derive(Debug, Clone, Default)]
pub struct SaveStatus {
    /// True while a submit is captured or a sequence is in flight
    pub is_pending: bool,
    /// Terminal failure of the most recent save, cleared by a new submit
    pub error: Option<SaveError>,
}

type ReplyTx = oneshot::Sender<SaveResult<SaveOutcome>>;

enum SaveCommand {
    Submit { draft: ProfileDraft, reply: ReplyTx },
}

/// Handle to the save worker. Cheap to clone; all clones feed the same
/// worker and observe the same status.
#[derive(Clone)]
pub struct SaveCoordinator {
    cmd_tx: mpsc::Sender<SaveCommand>,
    status_rx: watch::Receiver<SaveStatus>,
}

impl SaveCoordinator {
    /// Spawn the coordinator worker over a session subscription.
    pub fn spawn(
        session: watch::Receiver<SessionSnapshot>,
        readiness: ReadinessConfig,
        save: SaveConfig,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let (seq_tx, seq_rx) = mpsc::channel(1);
        let (status_tx, status_rx) = watch::channel(SaveStatus::default());

        let worker = SaveWorker {
            session,
            wait_budget: readiness.wait_timeout(),
            schedule: RetrySchedule::from(&save),
            settle_delay: save.settle_delay(),
            status_tx,
            seq_tx,
            pending: None,
            in_flight: None,
            was_ready: false,
            context_closed: false,
        };

        tokio::spawn(worker.run(cmd_rx, seq_rx));

        Self { cmd_tx, status_rx }
    }

    /// Submit a profile save.
    ///
    /// Resolves once the save reaches a terminal state: success, a
    /// fatal rejection, an exhausted retry budget, or a session that
    /// never became ready within the wait budget. Transient failures
    /// are absorbed by the retry schedule and never surface here.
    pub async fn submit(&self, draft: ProfileDraft) -> SaveResult<SaveOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.cmd_tx
            .send(SaveCommand::Submit {
                draft,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SaveError::fatal("save coordinator is not running", None))?;

        reply_rx
            .await
            .map_err(|_| SaveError::fatal("save coordinator dropped the request", None))?
    }

    /// Subscribe to the observable save status
    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status_rx.clone()
    }

    /// Whether a save is currently captured or in flight
    pub fn is_pending(&self) -> bool {
        self.status_rx.borrow().is_pending
    }
}

/// A submit captured while the session was not ready.
struct PendingSave {
    draft: ProfileDraft,
    waiters: Vec<ReplyTx>,
    /// Wait budget for the submitting callers; `None` once it has
    /// already elapsed and the waiters were failed
    deadline: Option<Instant>,
}

struct SaveWorker {
    session: watch::Receiver<SessionSnapshot>,
    wait_budget: Duration,
    schedule: RetrySchedule,
    settle_delay: Duration,
    status_tx: watch::Sender<SaveStatus>,
    seq_tx: mpsc::Sender<SaveResult<SaveOutcome>>,
    pending: Option<PendingSave>,
    /// Waiters attached to the sequence currently in flight
    in_flight: Option<Vec<ReplyTx>>,
    was_ready: bool,
    context_closed: bool,
}

impl SaveWorker {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<SaveCommand>,
        mut seq_rx: mpsc::Receiver<SaveResult<SaveOutcome>>,
    ) {
        // Change notifications come through a dedicated receiver so the
        // select arms below borrow locals, not worker state.
        let mut session_events = self.session.clone();
        self.was_ready = self.session.borrow().is_ready();

        loop {
            let deadline = self.pending.as_ref().and_then(|pending| pending.deadline);

            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(SaveCommand::Submit { draft, reply }) => self.on_submit(draft, reply),
                    None => break,
                },
                Some(result) = seq_rx.recv() => self.on_sequence_end(result),
                changed = session_events.changed(), if !self.context_closed => match changed {
                    Ok(()) => self.on_session_changed(),
                    Err(_) => self.on_context_closed(),
                },
                _ = wait_deadline(deadline) => self.on_wait_deadline(),
            }
        }

        debug!("save coordinator stopped");
    }

    fn on_submit(&mut self, draft: ProfileDraft, reply: ReplyTx) {
        // A sequence already in flight adopts the new submit; the queued
        // request was claimed before dispatch and must not be sent twice.
        if let Some(waiters) = self.in_flight.as_mut() {
            debug!("submit while a save sequence is in flight; joining it");
            waiters.push(reply);
            return;
        }

        if self.session.borrow().is_ready() {
            self.start_sequence(draft, vec![reply], false);
            return;
        }

        // Not ready: capture as the single pending request. An earlier
        // capture is superseded but its waiters settle with the new
        // request's outcome.
        let waiters = match self.pending.take() {
            Some(mut prior) => {
                debug!("pending save replaced; latest submission wins");
                let mut waiters = std::mem::take(&mut prior.waiters);
                waiters.push(reply);
                waiters
            }
            None => vec![reply],
        };

        self.pending = Some(PendingSave {
            draft,
            waiters,
            deadline: Some(Instant::now() + self.wait_budget),
        });
        self.refresh_status(None);
    }

    fn on_session_changed(&mut self) {
        let now_ready = self.session.borrow().is_ready();
        let became_ready = now_ready && !self.was_ready;
        self.was_ready = now_ready;

        if became_ready {
            self.maybe_auto_fire();
        }
    }

    fn on_context_closed(&mut self) {
        // Without a publisher the session can never become ready again;
        // captured submits run out their wait budget as usual.
        self.context_closed = true;
        warn!("session context closed; queued saves can no longer become ready");
    }

    fn on_wait_deadline(&mut self) {
        let waiters = match self.pending.as_mut() {
            Some(pending) => {
                pending.deadline = None;
                std::mem::take(&mut pending.waiters)
            }
            None => return,
        };

        let waited_ms = self.wait_budget.as_millis() as u64;
        warn!("queued save not dispatched within {waited_ms}ms; failing its submitters");

        let error = SaveError::actor_not_ready(waited_ms);
        for waiter in waiters {
            let _ = waiter.send(Err(error.clone()));
        }

        // The captured draft stays armed so a later readiness transition
        // still delivers it.
        self.refresh_status(Some(error));
    }

    fn on_sequence_end(&mut self, result: SaveResult<SaveOutcome>) {
        if let Some(waiters) = self.in_flight.take() {
            for waiter in waiters {
                let _ = waiter.send(result.clone());
            }
        }

        match &result {
            Ok(outcome) => info!("profile save succeeded after {} attempts", outcome.attempts),
            Err(e) => warn!("profile save failed: {e}"),
        }
        self.refresh_status(result.err());

        // A request captured while the sequence ran fires now if the
        // session is ready; otherwise it keeps waiting for the next
        // transition.
        self.maybe_auto_fire();
    }

    fn maybe_auto_fire(&mut self) {
        if self.in_flight.is_some() || !self.session.borrow().is_ready() {
            return;
        }
        if let Some(pending) = self.pending.take() {
            info!("auto-firing captured profile save");
            self.start_sequence(pending.draft, pending.waiters, true);
        }
    }

    fn start_sequence(&mut self, draft: ProfileDraft, waiters: Vec<ReplyTx>, auto_fired: bool) {
        self.in_flight = Some(waiters);
        self.refresh_status(None);

        let session = self.session.clone();
        let schedule = self.schedule.clone();
        let settle = auto_fired.then_some(self.settle_delay);
        let seq_tx = self.seq_tx.clone();

        tokio::spawn(async move {
            let result = run_save_sequence(session, schedule, settle, draft).await;
            // A send failure means the worker is gone and nothing is
            // left to observe the result.
            let _ = seq_tx.send(result).await;
        });
    }

    fn refresh_status(&self, error: Option<SaveError>) {
        let is_pending = self.in_flight.is_some()
            || self
                .pending
                .as_ref()
                .is_some_and(|pending| !pending.waiters.is_empty());
        self.status_tx.send_replace(SaveStatus { is_pending, error });
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// One dispatched save: optional settle delay, then retried attempts
/// against whatever handle the session publishes at each attempt.
async fn run_save_sequence(
    session: watch::Receiver<SessionSnapshot>,
    schedule: RetrySchedule,
    settle: Option<Duration>,
    draft: ProfileDraft,
) -> SaveResult<SaveOutcome> {
    if let Some(delay) = settle {
        sleep(delay).await;
    }

    let max_attempts = schedule.max_attempts;
    let result = with_retry(&schedule, "profile save", || {
        let snapshot = session.borrow().clone();
        let draft = &draft;
        async move {
            // Readiness is re-checked at every attempt; a session that
            // regressed mid-sequence counts as a transient failure.
            let Some(actor) = snapshot.ready_actor() else {
                return Err(ClientError::identity_not_ready(
                    "session not ready at attempt time",
                ));
            };
            actor.save_profile(draft).await
        }
    })
    .await;

    match result {
        Ok(((), attempts)) => Ok(SaveOutcome { attempts }),
        Err(e) => Err(classify_terminal(e, max_attempts)),
    }
}

fn classify_terminal(error: ClientError, max_attempts: u32) -> SaveError {
    if error.is_retryable() {
        // Budget exhausted on transient failures; keep the last failure
        // text verbatim for the caller.
        SaveError::fatal(
            format!("save failed after {max_attempts} attempts"),
            Some(error.message().to_string()),
        )
    } else {
        SaveError::fatal(error.message(), None)
    }
}
