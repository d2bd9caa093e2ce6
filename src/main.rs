use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::info;
use tracing_subscriber::EnvFilter;

use support_bot::bot::{self, GroupDispatcher, SupportIntake};
use support_bot::config::Config;
use support_bot::intake::Intake;
use support_bot::store::SubmissionStore;
use support_bot::submission::SubmissionConfig;
use support_bot::sweeper::spawn_sweeper;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // LOG_FORMAT=json switches to structured JSON lines
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("Starting Support Telegram Bot");

    let config = Config::from_env()?;
    let bot = Bot::new(&config.bot_token);

    let me = bot.get_me().await?;
    info!(username = ?me.username, "Authorized on account");

    let submission_config = SubmissionConfig::default();
    let store = SubmissionStore::new();
    let sweeper = spawn_sweeper(
        store.clone(),
        submission_config.sweep_interval,
        submission_config.max_age,
    );

    let dispatcher = GroupDispatcher::new(bot.clone(), ChatId(config.group_chat_id));
    let intake: Arc<SupportIntake> = Arc::new(Intake::new(store, dispatcher, submission_config));

    info!(group_id = config.group_chat_id, "Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(
            |bot: Bot, msg: Message, intake: Arc<SupportIntake>| async move {
                bot::message_handler(bot, msg, intake).await
            },
        ))
        .branch(Update::filter_callback_query().endpoint(
            |bot: Bot, q: CallbackQuery, intake: Arc<SupportIntake>| async move {
                bot::callback_handler(bot, q, intake).await
            },
        ));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![intake])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    sweeper.shutdown().await;
    info!("Bot stopped");

    Ok(())
}
