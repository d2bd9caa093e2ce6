//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::User;
use tracing::debug;

use crate::intake::{Event, Outcome};
use crate::messages;
use crate::submission::{PhotoRef, Submitter};

use super::ui_builder::{create_category_keyboard, reply_for_outcome};
use super::SupportIntake;

/// Bot commands understood in private chat
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Done,
}

/// Parse a command message such as `/done` or `/done@support_bot`
///
/// A command name must follow the slash directly and consist of latin
/// letters, digits and underscores, as Telegram marks bot commands. Anything
/// else is regular text. Returns `Ok(None)` for regular text and `Err(name)`
/// for unknown commands.
pub fn parse_command(text: &str) -> Result<Option<Command>, &str> {
    let Some(rest) = text.strip_prefix('/') else {
        return Ok(None);
    };
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..name_len];

    match name {
        "" => Ok(None),
        "start" => Ok(Some(Command::Start)),
        "done" => Ok(Some(Command::Done)),
        _ => Err(name),
    }
}

pub fn submitter_from_user(user: &User) -> Submitter {
    Submitter {
        id: user.id.0,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
    }
}

/// Send the reply for an outcome back to the user, if there is one
pub(super) async fn reply_with_outcome(bot: &Bot, chat_id: ChatId, outcome: &Outcome) -> Result<()> {
    if let Some(reply) = reply_for_outcome(outcome) {
        bot.send_message(chat_id, reply).await?;
    }
    Ok(())
}

async fn handle_start(bot: &Bot, msg: &Message) -> Result<()> {
    bot.send_message(msg.chat.id, messages::CHOOSE_ACTION)
        .reply_markup(create_category_keyboard())
        .await?;
    Ok(())
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    intake: &SupportIntake,
    submitter: &Submitter,
    text: &str,
) -> Result<()> {
    debug!(user_id = %submitter.id, message_length = text.len(), "Received text message from user");

    let outcome = match parse_command(text) {
        Ok(Some(Command::Start)) => return handle_start(bot, msg).await,
        Ok(Some(Command::Done)) => intake.handle(submitter, Event::Complete).await,
        Ok(None) => intake.handle(submitter, Event::Text(text.to_string())).await,
        Err(command) => {
            debug!(user_id = %submitter.id, command, "Ignoring unknown command");
            return Ok(());
        }
    };

    reply_with_outcome(bot, msg.chat.id, &outcome).await
}

async fn handle_photo_message(
    bot: &Bot,
    msg: &Message,
    intake: &SupportIntake,
    submitter: &Submitter,
) -> Result<()> {
    debug!(user_id = %submitter.id, "Received photo message from user");

    // Telegram lists sizes smallest first
    let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) else {
        return Ok(());
    };

    let photo = PhotoRef(largest_photo.file.id.to_string());
    let outcome = intake.handle(submitter, Event::Photo(photo)).await;
    reply_with_outcome(bot, msg.chat.id, &outcome).await
}

pub async fn message_handler(bot: Bot, msg: Message, intake: Arc<SupportIntake>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let submitter = submitter_from_user(user);

    if let Some(text) = msg.text() {
        handle_text_message(&bot, &msg, &intake, &submitter, text).await?;
    } else if msg.photo().is_some() {
        handle_photo_message(&bot, &msg, &intake, &submitter).await?;
    } else {
        debug!(user_id = %submitter.id, "Ignoring unsupported message type");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(parse_command("/start"), Ok(Some(Command::Start)));
        assert_eq!(parse_command("/done"), Ok(Some(Command::Done)));
        assert_eq!(parse_command("/done@college_support_bot"), Ok(Some(Command::Done)));
        assert_eq!(parse_command("/done please"), Ok(Some(Command::Done)));
    }

    #[test]
    fn test_parse_plain_text_and_unknown_commands() {
        assert_eq!(parse_command("the door is broken"), Ok(None));
        assert_eq!(parse_command("/help"), Err("help"));
        assert_eq!(parse_command("/ the door in room 5 is broken"), Ok(None));
        assert_eq!(parse_command("//comment"), Ok(None));
        assert_eq!(parse_command("/"), Ok(None));
    }
}
