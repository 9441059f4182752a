//! Message dispatcher setup.
//!
//! Builds the dispatcher with the message, member and callback handlers.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;

use crate::events;
use crate::moderation::{
    Actuator, AdminGate, ChatSettings, FloodGuard, MemberLookup, ModerationPipeline, UserRef,
    WarnLedger,
};
use crate::plugins;
use crate::store::ConfigStore;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Per-chat settings.
    pub settings: ChatSettings,

    /// Warning counters.
    pub warns: WarnLedger,

    /// Role checks for commands and panel buttons.
    pub gate: AdminGate,

    /// Enforcement requests.
    pub actuator: Arc<dyn Actuator>,

    /// Checks run on every inbound group message.
    pub pipeline: ModerationPipeline,

    /// Display name used in /help.
    pub bot_name: String,
}

impl AppState {
    /// Wire the moderation core to its ports.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        lookup: Arc<dyn MemberLookup>,
        actuator: Arc<dyn Actuator>,
        flood: FloodGuard,
        owner_ids: Vec<UserRef>,
        bot_name: String,
    ) -> Self {
        let settings = ChatSettings::new(store.clone());
        let pipeline = ModerationPipeline::new(settings.clone(), flood, actuator.clone());

        Self {
            settings,
            warns: WarnLedger::new(store),
            gate: AdminGate::new(lookup, owner_ids),
            actuator,
            pipeline,
            bot_name,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    // Moderation pipeline, then commands, then command cleanup
    let message_handler = Update::filter_message().endpoint(events::on_message);

    // Chat member events (welcome new members)
    let member_handler = Update::filter_chat_member().branch(events::welcome::handler());

    // Panel and help buttons
    let callback_handler = Update::filter_callback_query().endpoint(plugins::panel::callback_handler);

    dptree::entry()
        .branch(message_handler)
        .branch(member_handler)
        .branch(callback_handler)
}
