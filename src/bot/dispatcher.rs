//! Group Dispatcher module for delivering finished reports to the staff group

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ReplyParameters;
use tracing::{debug, error, info};

use crate::intake::Dispatcher;
use crate::submission::Report;

use super::ui_builder::{
    build_media_group, caption_header, create_user_link_keyboard, format_report_caption,
    photo_input, ReportLayout,
};

/// Sends reports to a fixed group chat
///
/// Each report is delivered on its own spawned task; failures are logged and
/// the report is dropped.
#[derive(Clone)]
pub struct GroupDispatcher {
    bot: Bot,
    group_id: ChatId,
}

impl GroupDispatcher {
    pub fn new(bot: Bot, group_id: ChatId) -> Self {
        Self { bot, group_id }
    }
}

impl Dispatcher for GroupDispatcher {
    fn dispatch(&self, report: Report) {
        let bot = self.bot.clone();
        let group_id = self.group_id;

        tokio::spawn(async move {
            let user_id = report.submitter_id;
            match send_report(&bot, group_id, report).await {
                Ok(()) => info!(user_id = %user_id, group_id = %group_id, "Report delivered to group"),
                Err(e) => error!(user_id = %user_id, group_id = %group_id, error = %e, "Failed to deliver report"),
            }
        });
    }
}

/// Render a report into the group chat
///
/// No photos: one text message. One photo: a captioned photo. Several photos:
/// a media group captioned on its first item, followed by a reply carrying the
/// header line and the link back to the submitter.
///
/// Telegram limits photo captions to 1024 characters; longer texts make the
/// photo forms fail and the error is returned to the caller.
pub async fn send_report(bot: &Bot, group_id: ChatId, report: Report) -> Result<()> {
    let caption = format_report_caption(&report);
    let keyboard = create_user_link_keyboard(report.submitter_id)?;

    match ReportLayout::for_photo_count(report.photos.len()) {
        ReportLayout::Text => {
            bot.send_message(group_id, caption)
                .reply_markup(keyboard)
                .await?;
        }
        ReportLayout::SinglePhoto => {
            bot.send_photo(group_id, photo_input(&report.photos[0]))
                .caption(caption)
                .reply_markup(keyboard)
                .await?;
        }
        ReportLayout::MediaGroup => {
            let media = build_media_group(&report, &caption);
            let sent = bot.send_media_group(group_id, media).await?;
            debug!(group_id = %group_id, items = sent.len(), "Media group sent");

            if let Some(first) = sent.first() {
                bot.send_message(group_id, caption_header(&caption))
                    .reply_parameters(ReplyParameters::new(first.id))
                    .reply_markup(keyboard)
                    .await?;
            }
        }
    }

    Ok(())
}
