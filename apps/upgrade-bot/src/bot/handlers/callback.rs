use crate::AppState;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::debug;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    debug!("Received callback: {:?}", q.data);
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let (Some(item_id), Some(msg)) = (q.data.as_deref(), q.message.as_ref()) else {
        return Ok(());
    };

    let stage = state.flow.handle_selection(msg.chat().id.0, item_id).await;
    debug!("Selection of {} by {} ended in {:?}", item_id, q.from.id, stage);
    Ok(())
}
