use support_bot::bot::ui_builder::{
    build_media_group, caption_header, create_category_keyboard, create_user_link_keyboard,
    format_report_caption, media_group_items, reply_for_outcome, user_link, ReportLayout,
};
use support_bot::intake::{Outcome, Rejection};
use support_bot::messages;
use support_bot::submission::{Category, PhotoRef, Report, MAX_PHOTOS};
use teloxide::types::{InlineKeyboardButtonKind, InputMedia};

#[cfg(test)]
mod tests {
    use super::*;

    fn report(category: Category, display_name: &str, text: &str) -> Report {
        Report {
            category,
            submitter_id: 42,
            display_name: display_name.to_string(),
            text: text.to_string(),
            photos: vec![PhotoRef::from("a"), PhotoRef::from("b")],
        }
    }

    #[test]
    fn test_report_caption_format() {
        let caption = format_report_caption(&report(
            Category::ProblemReport,
            "@student",
            "fix the chair\nroom 204",
        ));
        assert_eq!(caption, "Проблема от @student:\n\nfix the chair\nroom 204");

        let caption = format_report_caption(&report(Category::Suggestion, "Anna", "plants"));
        assert_eq!(caption, "Предложение от Anna:\n\nplants");
    }

    #[test]
    fn test_caption_header_is_first_paragraph() {
        let caption = format_report_caption(&report(
            Category::ProblemReport,
            "@student",
            "line one\n\nline two",
        ));
        assert_eq!(caption_header(&caption), "Проблема от @student:");
        assert_eq!(caption_header("no paragraphs"), "no paragraphs");
    }

    #[test]
    fn test_user_link() {
        let url = user_link(42).unwrap();
        assert_eq!(url.as_str(), "tg://user?id=42");
    }

    #[test]
    fn test_user_link_keyboard() {
        let keyboard = create_user_link_keyboard(42).unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 1);

        let button = &keyboard.inline_keyboard[0][0];
        assert_eq!(button.text, messages::BUTTON_OPEN_USER);
        match &button.kind {
            InlineKeyboardButtonKind::Url(url) => assert_eq!(url.as_str(), "tg://user?id=42"),
            other => panic!("Unexpected button kind: {other:?}"),
        }
    }

    #[test]
    fn test_category_keyboard_callback_data() {
        let keyboard = create_category_keyboard();
        let data: Vec<String> = keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(data, vec!["report_problem", "make_suggestion"]);
    }

    fn report_with_photos(ids: &[&str]) -> Report {
        Report {
            photos: ids.iter().map(|id| PhotoRef::from(*id)).collect(),
            ..report(Category::ProblemReport, "@student", "fix the chair")
        }
    }

    #[test]
    fn test_layout_by_photo_count() {
        assert_eq!(ReportLayout::for_photo_count(0), ReportLayout::Text);
        assert_eq!(ReportLayout::for_photo_count(1), ReportLayout::SinglePhoto);
        for count in 2..=MAX_PHOTOS {
            assert_eq!(ReportLayout::for_photo_count(count), ReportLayout::MediaGroup);
        }
    }

    #[test]
    fn test_media_group_items_keep_order_and_caption_first() {
        let report = report_with_photos(&["p1", "p2", "p3"]);
        let caption = format_report_caption(&report);
        let items = media_group_items(&report, &caption);

        let ids: Vec<&str> = items.iter().map(|item| item.photo.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);

        assert_eq!(items[0].caption, Some(caption.as_str()));
        assert_eq!(items.iter().filter(|item| item.caption.is_some()).count(), 1);
    }

    #[test]
    fn test_build_media_group_captions_first_item_only() {
        let report = report_with_photos(&["p1", "p2", "p3", "p4"]);
        let caption = format_report_caption(&report);
        let media = build_media_group(&report, &caption);
        assert_eq!(media.len(), 4);

        let captions: Vec<Option<String>> = media
            .iter()
            .map(|item| match item {
                InputMedia::Photo(photo) => photo.caption.clone(),
                other => panic!("Unexpected media kind: {other:?}"),
            })
            .collect();

        assert_eq!(captions[0].as_deref(), Some("Проблема от @student:\n\nfix the chair"));
        assert!(captions[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_photo_limit_in_texts() {
        let limit = MAX_PHOTOS.to_string();
        assert!(messages::category_prompt(Category::ProblemReport).contains(&limit));
        assert!(messages::category_prompt(Category::Suggestion).contains(&limit));
        assert!(messages::text_accepted().contains(&limit));
        assert!(messages::photo_limit_reached().contains(&limit));
        assert!(messages::photo_accepted(2).contains(&format!("2/{limit}")));
    }

    #[test]
    fn test_replies_for_outcomes() {
        assert_eq!(
            reply_for_outcome(&Outcome::Started(Category::ProblemReport)),
            Some(messages::category_prompt(Category::ProblemReport))
        );
        assert_eq!(
            reply_for_outcome(&Outcome::TextAccepted { first: true }),
            Some(messages::text_accepted())
        );
        assert_eq!(reply_for_outcome(&Outcome::TextAccepted { first: false }), None);
        assert_eq!(
            reply_for_outcome(&Outcome::PhotoAccepted { count: 2 }).as_deref(),
            Some("Фото принято (2/4). Отправьте ещё фото или /done для завершения.")
        );
        assert_eq!(
            reply_for_outcome(&Outcome::Rejected(Rejection::TextRequired)).as_deref(),
            Some(messages::TEXT_REQUIRED)
        );
        assert_eq!(
            reply_for_outcome(&Outcome::Rejected(Rejection::PhotoLimitReached)),
            Some(messages::photo_limit_reached())
        );
        assert_eq!(
            reply_for_outcome(&Outcome::Completed).as_deref(),
            Some(messages::SUBMISSION_SENT)
        );
        assert_eq!(reply_for_outcome(&Outcome::Ignored), None);
    }
}
