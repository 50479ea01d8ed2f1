//! Interactive console session.
//!
//! Line syntax:
//!   `/id rest`      run command `id` with content `rest`
//!   `!action_id`    invoke an action offered earlier
//!   `+path`         attach a file to the next message
//!   `:profile NAME` switch profile
//!   `:quit`         leave

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::Value;
use switchyard_config::SettingsStore;
use switchyard_core::{AttachmentRef, IncomingMessage, OutboundBus, ResponseEnvelope};
use switchyard_routing::{build_default_router, MessageRouter};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::terminal_output::{note_error, note_info, note_warn, render_outbound};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Command { id: String, content: String },
    Action(String),
    Attach(PathBuf),
    SwitchProfile(String),
    Quit,
    Text(String),
    Empty,
}

pub fn parse_line(line: &str) -> ReplInput {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() {
        return ReplInput::Empty;
    }
    if trimmed.trim() == ":quit" {
        return ReplInput::Quit;
    }
    if let Some(name) = trimmed.strip_prefix(":profile ") {
        return ReplInput::SwitchProfile(name.trim().to_string());
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        let (id, content) = rest.split_once(' ').unwrap_or((rest, ""));
        if !id.is_empty() {
            return ReplInput::Command { id: id.to_string(), content: content.to_string() };
        }
    }
    if let Some(id) = trimmed.strip_prefix('!') {
        if !id.trim().is_empty() {
            return ReplInput::Action(id.trim().to_string());
        }
    }
    if let Some(path) = trimmed.strip_prefix('+') {
        if !path.trim().is_empty() {
            return ReplInput::Attach(PathBuf::from(path.trim()));
        }
    }
    ReplInput::Text(trimmed.to_string())
}

/// Remember the payload of every action offered so far. A later offer of the
/// same id replaces the earlier one.
fn remember_actions(payloads: &mut HashMap<String, Value>, sent: &[ResponseEnvelope]) {
    for envelope in sent {
        for action in &envelope.actions {
            payloads.insert(action.id.clone(), action.payload.clone());
        }
    }
}

async fn attachment_for(path: PathBuf) -> Option<AttachmentRef> {
    if tokio::fs::metadata(&path).await.is_err() {
        note_warn(&format!("{} does not exist; not attached", path.display()));
        return None;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Some(AttachmentRef::new(name, None, path))
}

pub async fn run(config: &Config, profile: Option<String>) -> Result<()> {
    let mut bus = OutboundBus::new();
    let mut rx = bus.take_rx().ok_or_else(|| anyhow!("outbound receiver already taken"))?;
    let router = build_default_router(
        Arc::new(bus.transport()),
        SettingsStore::new(&config.settings_path),
    )?;

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print!("{}", render_outbound(&event));
            let _ = std::io::stdout().flush();
        }
    });

    let session_id = Uuid::new_v4().to_string();
    info!(session = %session_id, "Starting console session");
    router.publish_profiles().await;
    router.open_session(&session_id).await;
    let name = profile.unwrap_or_else(|| router.profiles().default_profile().name.clone());
    router.select_profile(&session_id, &name).await?;
    note_info(&format!("Profile '{name}' active. Type :quit to leave."));

    let result = repl(&router, &session_id).await;

    router.close_session(&session_id).await;
    drop(router);
    drop(bus);
    let _ = printer.await;
    result
}

async fn repl(router: &MessageRouter, session_id: &str) -> Result<()> {
    let mut payloads: HashMap<String, Value> = HashMap::new();
    let mut pending: Vec<AttachmentRef> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let sent = match parse_line(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Attach(path) => {
                if let Some(attachment) = attachment_for(path).await {
                    note_info(&format!("Attached {} to the next message", attachment.name));
                    pending.push(attachment);
                }
                continue;
            }
            ReplInput::SwitchProfile(name) => {
                match router.select_profile(session_id, &name).await {
                    Ok(()) => note_info(&format!("Profile '{name}' active.")),
                    Err(e) => note_error(&e.to_string()),
                }
                continue;
            }
            ReplInput::Action(id) => {
                let payload = payloads.get(&id).cloned().unwrap_or(Value::Null);
                router.invoke_action(session_id, &id, payload).await?
            }
            ReplInput::Command { id, content } => {
                let mut message = IncomingMessage::text(content).with_command(id);
                message.attachments = std::mem::take(&mut pending);
                router.route(session_id, message).await?
            }
            ReplInput::Text(content) => {
                let mut message = IncomingMessage::text(content);
                message.attachments = std::mem::take(&mut pending);
                router.route(session_id, message).await?
            }
        };
        remember_actions(&mut payloads, &sent);
    }
    Ok(())
}
