//! Profile save command.
//!
//! Publishes a ready session over the HTTP backend and drives one
//! submit through the save coordinator, so a login that is still
//! propagating server-side is retried rather than failed outright.

use std::sync::Arc;

use log::info;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::CliResult;
use crm_client::{ActorHandle, HttpBackend};
use crm_config::Config;
use crm_core::{ProfileDraft, SessionIdentity};
use crm_session::{SaveCoordinator, SessionContext};

pub(crate) async fn save(
    backend: Arc<HttpBackend>,
    config: &Config,
    name: String,
    email: String,
    phone: String,
) -> CliResult<Value> {
    // The subject only labels this process's session; the backend trusts
    // the request header, not this value.
    let subject = config
        .backend
        .user_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(Uuid::new_v4);

    let actor: ActorHandle = backend;
    let context = SessionContext::new();
    context.set_identity(Some(SessionIdentity::authenticated(subject)));
    context.set_actor(Some(actor));

    let coordinator = SaveCoordinator::spawn(
        context.subscribe(),
        config.readiness.clone(),
        config.save.clone(),
    );

    let outcome = coordinator
        .submit(ProfileDraft::new(name, email, phone))
        .await?;

    info!("profile saved after {} attempts", outcome.attempts);
    Ok(json!({ "status": "saved", "attempts": outcome.attempts }))
}
