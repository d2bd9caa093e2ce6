//! User-facing texts sent by the bot.

use crate::intake::Rejection;
use crate::submission::{Category, MAX_PHOTOS};

pub const CHOOSE_ACTION: &str = "Выберите действие:";
pub const BUTTON_REPORT_PROBLEM: &str = "Сообщить о проблеме";
pub const BUTTON_MAKE_SUGGESTION: &str = "Сделать предложение";
pub const BUTTON_OPEN_USER: &str = "Перейти к пользователю";

pub const TEXT_REQUIRED: &str = "Сначала отправьте текст, а затем фотографии.";
pub const SUBMISSION_SENT: &str = "Спасибо! Ваше сообщение отправлено.";

/// Label used in the group message header
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::ProblemReport => "Проблема",
        Category::Suggestion => "Предложение",
    }
}

/// Instructions sent right after a category is chosen
pub fn category_prompt(category: Category) -> String {
    let subject = match category {
        Category::ProblemReport => "проблему",
        Category::Suggestion => "ваше предложение",
    };
    format!(
        "Опишите {subject} и приложите до {MAX_PHOTOS} фотографий (если нужно). Когда закончите, отправьте /done"
    )
}

pub fn text_accepted() -> String {
    format!("Текст принят. Можете отправить фото (до {MAX_PHOTOS}) или отправьте /done для завершения.")
}

pub fn photo_accepted(count: usize) -> String {
    format!("Фото принято ({count}/{MAX_PHOTOS}). Отправьте ещё фото или /done для завершения.")
}

pub fn photo_limit_reached() -> String {
    format!("Вы уже прикрепили максимум фотографий ({MAX_PHOTOS}). Отправьте /done для завершения.")
}

pub fn rejection(rejection: Rejection) -> String {
    match rejection {
        Rejection::TextRequired => TEXT_REQUIRED.to_string(),
        Rejection::PhotoLimitReached => photo_limit_reached(),
    }
}
