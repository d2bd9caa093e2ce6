//! UI Builder module for creating keyboards and formatting messages

use anyhow::Result;
use reqwest::Url;
use teloxide::types::{
    FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto,
};

use crate::intake::Outcome;
use crate::messages;
use crate::submission::{Category, PhotoRef, Report};

/// Shape of the group message used for a report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportLayout {
    /// Plain text message
    Text,
    /// One captioned photo
    SinglePhoto,
    /// Media group plus a header reply carrying the user link
    MediaGroup,
}

impl ReportLayout {
    pub fn for_photo_count(count: usize) -> Self {
        match count {
            0 => ReportLayout::Text,
            1 => ReportLayout::SinglePhoto,
            _ => ReportLayout::MediaGroup,
        }
    }
}

/// One entry of a media group before conversion to Telegram types
#[derive(Clone, Debug, PartialEq)]
pub struct MediaItem<'a> {
    pub photo: &'a PhotoRef,
    pub caption: Option<&'a str>,
}

/// Media group entries in insertion order, captioned on the first one only
pub fn media_group_items<'a>(report: &'a Report, caption: &'a str) -> Vec<MediaItem<'a>> {
    report
        .photos
        .iter()
        .enumerate()
        .map(|(i, photo)| MediaItem {
            photo,
            caption: (i == 0).then_some(caption),
        })
        .collect()
}

pub fn photo_input(photo: &PhotoRef) -> InputFile {
    InputFile::file_id(FileId(photo.as_str().to_string()))
}

/// Telegram media group for a report with several photos
pub fn build_media_group(report: &Report, caption: &str) -> Vec<InputMedia> {
    media_group_items(report, caption)
        .into_iter()
        .map(|item| {
            let photo = InputMediaPhoto::new(photo_input(item.photo));
            let photo = match item.caption {
                Some(caption) => photo.caption(caption),
                None => photo,
            };
            InputMedia::Photo(photo)
        })
        .collect()
}

/// Inline keyboard offered by `/start` to choose a submission category
pub fn create_category_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            messages::BUTTON_REPORT_PROBLEM,
            Category::ProblemReport.callback_data(),
        )],
        vec![InlineKeyboardButton::callback(
            messages::BUTTON_MAKE_SUGGESTION,
            Category::Suggestion.callback_data(),
        )],
    ])
}

/// Link to a user's profile that staff can open from the group
pub fn user_link(user_id: u64) -> Result<Url> {
    Ok(Url::parse(&format!("tg://user?id={user_id}"))?)
}

/// Single-button keyboard pointing back to the submitter
pub fn create_user_link_keyboard(user_id: u64) -> Result<InlineKeyboardMarkup> {
    Ok(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        messages::BUTTON_OPEN_USER,
        user_link(user_id)?,
    )]]))
}

/// Caption posted to the group: header line, blank line, then the user's text
pub fn format_report_caption(report: &Report) -> String {
    format!(
        "{} от {}:\n\n{}",
        messages::category_label(report.category),
        report.display_name,
        report.text
    )
}

/// First paragraph of a caption, i.e. the header line
pub fn caption_header(caption: &str) -> &str {
    caption.split("\n\n").next().unwrap_or(caption)
}

/// Reply sent back to the submitter for an intake outcome, if any
pub fn reply_for_outcome(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Started(category) => Some(messages::category_prompt(*category)),
        Outcome::TextAccepted { first: true } => Some(messages::text_accepted()),
        Outcome::TextAccepted { first: false } => None,
        Outcome::PhotoAccepted { count } => Some(messages::photo_accepted(*count)),
        Outcome::Rejected(rejection) => Some(messages::rejection(*rejection)),
        Outcome::Completed => Some(messages::SUBMISSION_SENT.to_string()),
        Outcome::Ignored => None,
    }
}
