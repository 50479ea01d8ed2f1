//! Message router: sessions in, envelopes out.
//!
//! Every public entry point follows the same shape: look up the session, take
//! its turn lock, compute a [`Reply`], then deliver it through the transport
//! while still holding the lock. Runtime failures are turned into envelopes at
//! this boundary; only an unknown session is reported back to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use logging::{EventLogger, TurnEvent};
use media::classify_all;
use serde_json::Value;
use switchyard_commands::{ActionContext, ActionDispatcher, CatalogSet, CommandCatalog, CommandResolver};
use switchyard_config::{PartialSettings, SettingKey, SettingsStore};
use switchyard_core::{IncomingMessage, ResponseEnvelope, SwitchyardError, Transport};
use tracing::{debug, info, warn};

use crate::composer::{self, Reply};
use crate::handlers::{ProfileHandlers, TurnContext};
use crate::profile::ProfileRegistry;
use crate::session::{Session, SessionState, SessionTable};

pub struct MessageRouter {
    profiles: ProfileRegistry,
    catalogs: CatalogSet,
    tables: HashMap<String, ProfileHandlers>,
    actions: ActionDispatcher,
    settings: SettingsStore,
    transport: Arc<dyn Transport>,
    sessions: SessionTable,
}

impl MessageRouter {
    /// Assemble a router. Every registered profile needs exactly one handler
    /// table, and every table and catalog must name a registered profile.
    pub fn new(
        profiles: ProfileRegistry,
        catalogs: CatalogSet,
        tables: Vec<ProfileHandlers>,
        actions: ActionDispatcher,
        settings: SettingsStore,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, SwitchyardError> {
        let mut by_profile = HashMap::with_capacity(tables.len());
        for table in tables {
            if !profiles.contains(table.profile()) {
                return Err(SwitchyardError::config(format!(
                    "handler table for unknown profile '{}'",
                    table.profile()
                )));
            }
            let name = table.profile().to_string();
            if by_profile.insert(name.clone(), table).is_some() {
                return Err(SwitchyardError::config(format!(
                    "profile '{name}' has more than one handler table"
                )));
            }
        }

        for profile in profiles.profiles() {
            if !by_profile.contains_key(&profile.name) {
                return Err(SwitchyardError::config(format!(
                    "profile '{}' has no handler table",
                    profile.name
                )));
            }
        }

        for name in catalogs.profiles() {
            if !profiles.contains(name) {
                return Err(SwitchyardError::config(format!(
                    "command catalog for unknown profile '{name}'"
                )));
            }
        }

        for (name, table) in &by_profile {
            let catalog = catalogs.get(name);
            for id in table.command_ids() {
                if catalog.and_then(|c| c.find(id)).is_none() {
                    return Err(SwitchyardError::config(format!(
                        "profile '{name}' handles command '{id}' that its catalog does not advertise"
                    )));
                }
            }
            for literal in table.trigger_literals() {
                let registered = catalog
                    .map(|c| c.triggers().iter().any(|t| t.literal == literal))
                    .unwrap_or(false);
                if !registered {
                    return Err(SwitchyardError::config(format!(
                        "profile '{name}' handles trigger '{literal}' that its catalog does not register"
                    )));
                }
            }
        }

        info!(
            profiles = profiles.profiles().len(),
            actions = actions.action_ids().len(),
            "[Router] Ready"
        );
        Ok(Self {
            profiles,
            catalogs,
            tables: by_profile,
            actions,
            settings,
            transport,
            sessions: SessionTable::new(),
        })
    }

    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// Publish the ordered profile list. Failures are logged and ignored.
    pub async fn publish_profiles(&self) {
        if let Err(e) = self.transport.publish_profiles(self.profiles.profiles()).await {
            warn!("[Router] Failed to publish profiles: {:#}", e);
        }
    }

    /// Start tracking `session_id`. Opening an open session is a no-op.
    pub async fn open_session(&self, session_id: &str) {
        self.sessions.open(session_id).await;
    }

    /// Stop tracking `session_id`. A turn still running for it sends nothing more.
    pub async fn close_session(&self, session_id: &str) {
        if !self.sessions.close(session_id).await {
            debug!(session = %session_id, "[Router] Close for unknown session");
        }
    }

    pub async fn active_profile(&self, session_id: &str) -> Option<String> {
        let session = self.sessions.get(session_id).await?;
        let guard = session.lock().await;
        guard.state.active_profile().map(str::to_string)
    }

    async fn session(&self, session_id: &str) -> Result<Arc<Session>, SwitchyardError> {
        self.sessions
            .get(session_id)
            .await
            .ok_or_else(|| SwitchyardError::not_found("session", session_id))
    }

    /// Make `name` the session's active profile and advertise its commands.
    ///
    /// An unknown name leaves the session unchanged.
    pub async fn select_profile(&self, session_id: &str, name: &str) -> Result<(), SwitchyardError> {
        let session = self.session(session_id).await?;
        let mut guard = session.lock().await;
        let profile = self.profiles.resolve(name)?;

        guard.state = SessionState::ProfileActive { profile: profile.name.clone() };
        info!(session = %session_id, profile = %profile.name, "[Router] Profile selected");
        EventLogger::log_event(session_id, TurnEvent::ProfileSelected { profile: profile.name.clone() });

        if session.is_closed() {
            return Ok(());
        }
        let commands = self.catalogs.get(&profile.name).map(CommandCatalog::all).unwrap_or_default();
        if let Err(e) = self.transport.set_commands(session.id(), commands).await {
            warn!(session = %session_id, "[Router] Failed to publish commands: {:#}", e);
        }
        Ok(())
    }

    /// Handle one user message and return the envelopes that were sent.
    pub async fn route(
        &self,
        session_id: &str,
        message: IncomingMessage,
    ) -> Result<Vec<ResponseEnvelope>, SwitchyardError> {
        let session = self.session(session_id).await?;
        let mut guard = session.lock().await;
        guard.turns += 1;
        let turn = guard.turns;

        let reply = match self.profiles.resolve_selected(guard.state.active_profile()) {
            Ok(profile) => self.dispatch_turn(session_id, &profile.name, turn, &message).await,
            Err(e) => {
                debug!(session = %session_id, "[Router] {}; asking for a profile", e);
                Reply::single(composer::selection_prompt())
            }
        };

        let sent = self.deliver(&session, reply).await;
        drop(guard);
        Ok(sent)
    }

    async fn dispatch_turn(
        &self,
        session_id: &str,
        profile: &str,
        turn: u64,
        message: &IncomingMessage,
    ) -> Reply {
        let empty;
        let catalog = match self.catalogs.get(profile) {
            Some(catalog) => catalog,
            None => {
                empty = CommandCatalog::empty(profile);
                &empty
            }
        };
        let intent = CommandResolver::resolve(message, catalog);

        let Some(table) = self.tables.get(profile) else {
            let err = SwitchyardError::not_found("handler table", profile);
            EventLogger::log_event(session_id, TurnEvent::Error { error_msg: err.to_string() });
            return Reply::single(composer::error_envelope(&err));
        };

        let ctx = TurnContext {
            session_id: session_id.to_string(),
            profile: profile.to_string(),
            intent,
            turn,
        };
        debug!(session = %session_id, profile = %profile, intent = ctx.intent.label(), turn, "[Router] Dispatching");

        match table.handler_for(&ctx.intent).handle(&ctx, message).await {
            Ok(mut reply) => {
                if table.accepts_attachments()
                    && !message.attachments.is_empty()
                    && reply.side_panel().is_none()
                {
                    let items = classify_all(&message.attachments).await;
                    debug!(session = %session_id, count = items.len(), "[Router] Classified attachments");
                    reply = reply.with_side_panel(items);
                }
                EventLogger::log_event(
                    session_id,
                    TurnEvent::MessageRouted {
                        profile: profile.to_string(),
                        intent: ctx.intent.label().to_string(),
                        content: message.content.clone(),
                        envelopes: reply.steps().len(),
                    },
                );
                reply
            }
            Err(e) => {
                warn!(session = %session_id, profile = %profile, "[Router] Handler failed: {:#}", e);
                let err = SwitchyardError::from(e);
                EventLogger::log_event(session_id, TurnEvent::Error { error_msg: err.to_string() });
                Reply::single(composer::error_envelope(&err))
            }
        }
    }

    /// Run the action `action_id` and return the envelopes that were sent.
    pub async fn invoke_action(
        &self,
        session_id: &str,
        action_id: &str,
        payload: Value,
    ) -> Result<Vec<ResponseEnvelope>, SwitchyardError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;
        let ctx = ActionContext {
            session_id: session_id.to_string(),
            profile: guard.state.active_profile().map(str::to_string),
        };

        let envelope = match self.actions.invoke(&ctx, action_id, &payload).await {
            Ok(envelope) => {
                EventLogger::log_event(
                    session_id,
                    TurnEvent::ActionInvoked {
                        action_id: action_id.to_string(),
                        chained: envelope.action_ids().into_iter().map(str::to_string).collect(),
                    },
                );
                envelope
            }
            Err(e) => {
                debug!(session = %session_id, action = %action_id, "[Router] Action failed: {}", e);
                EventLogger::log_event(session_id, TurnEvent::Error { error_msg: e.to_string() });
                composer::error_envelope(&e)
            }
        };

        let sent = self.deliver(&session, Reply::single(envelope)).await;
        drop(guard);
        Ok(sent)
    }

    /// Validate and persist a settings change, then confirm or explain.
    pub async fn update_settings(
        &self,
        session_id: &str,
        patch: PartialSettings,
    ) -> Result<Vec<ResponseEnvelope>, SwitchyardError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;

        let envelope = match self.settings.update(&patch).await {
            Ok(_) => {
                EventLogger::log_event(session_id, TurnEvent::SettingsUpdated { keys: changed_keys(&patch) });
                composer::settings_updated()
            }
            Err(e) => {
                warn!(session = %session_id, "[Router] Settings update rejected: {:#}", e);
                EventLogger::log_event(session_id, TurnEvent::Error { error_msg: format!("{e:#}") });
                composer::settings_rejected(&format!("{e:#}"))
            }
        };

        let sent = self.deliver(&session, Reply::single(envelope)).await;
        drop(guard);
        Ok(sent)
    }

    /// Send a reply in order, honouring delays. Stops as soon as the session
    /// is closed.
    async fn deliver(&self, session: &Session, reply: Reply) -> Vec<ResponseEnvelope> {
        let (steps, side_panel) = reply.into_parts();
        let mut sent = Vec::with_capacity(steps.len());

        if let Some(items) = side_panel {
            if session.is_closed() {
                return sent;
            }
            if let Err(e) = self.transport.set_side_panel(session.id(), &items).await {
                warn!(session = %session.id(), "[Router] Failed to publish side panel: {:#}", e);
            }
        }

        for step in steps {
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            if session.is_closed() {
                debug!(session = %session.id(), "[Router] Session closed; dropping remaining envelopes");
                break;
            }
            match self.transport.send(session.id(), &step.envelope).await {
                Ok(()) => sent.push(step.envelope),
                Err(e) => warn!(session = %session.id(), "[Router] Failed to send envelope: {:#}", e),
            }
        }
        sent
    }
}

fn changed_keys(patch: &PartialSettings) -> Vec<String> {
    SettingKey::ALL
        .into_iter()
        .filter(|key| match key {
            SettingKey::AssistantName => patch.assistant_name.is_some(),
            SettingKey::Theme => patch.theme.is_some(),
            SettingKey::Layout => patch.layout.is_some(),
            SettingKey::AllowHtml => patch.allow_html.is_some(),
            SettingKey::AllowLatex => patch.allow_latex.is_some(),
            SettingKey::AllowEditMessage => patch.allow_edit_message.is_some(),
            SettingKey::SessionTimeout => patch.session_timeout_secs.is_some(),
        })
        .map(|key| key.to_string())
        .collect()
}
