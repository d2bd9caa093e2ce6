//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error};

use crate::intake::Event;
use crate::submission::Category;

use super::message_handler::{reply_with_outcome, submitter_from_user};
use super::SupportIntake;

/// Handle category selection from the `/start` keyboard
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    intake: Arc<SupportIntake>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    // Answer the callback query to remove the loading state
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        error!(user_id = %q.from.id, error = %e, "Failed to answer callback query");
    }

    let Some(category) = q.data.as_deref().and_then(Category::from_callback_data) else {
        debug!(user_id = %q.from.id, data = ?q.data, "Ignoring unknown callback data");
        return Ok(());
    };

    let submitter = submitter_from_user(&q.from);
    let outcome = intake.handle(&submitter, Event::Select(category)).await;

    if let Some(msg) = &q.message {
        reply_with_outcome(&bot, msg.chat().id, &outcome).await?;
    }

    Ok(())
}
