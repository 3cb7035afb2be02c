use crate::bot::messages::Buyer;
use crate::flow::PreCheckoutVerdict;
use crate::AppState;
use teloxide::prelude::*;
use teloxide::types::{PreCheckoutQuery, SuccessfulPayment};
use tracing::{error, info, warn};

pub async fn pre_checkout_handler(
    bot: Bot,
    q: PreCheckoutQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let verdict = state.flow.validate_precheckout(&q.invoice_payload);
    info!(
        "Pre-checkout for {:?} from {}: {:?}",
        q.invoice_payload,
        q.from.id,
        verdict.stage()
    );
    match verdict {
        PreCheckoutVerdict::Accept => {
            bot.answer_pre_checkout_query(q.id, true).await?;
        }
        PreCheckoutVerdict::Reject { reason } => {
            bot.answer_pre_checkout_query(q.id, false)
                .error_message(reason)
                .await?;
        }
    }
    Ok(())
}

pub async fn successful_payment_handler(msg: &Message, payment: &SuccessfulPayment, state: &AppState) {
    let Some(user) = msg.from.as_ref() else {
        warn!("Successful payment without sender in chat {}", msg.chat.id);
        return;
    };
    let buyer = Buyer {
        id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
    };
    let charge_id = payment.telegram_payment_charge_id.0.as_str();

    match state
        .flow
        .confirm_payment(msg.chat.id.0, &buyer, &payment.invoice_payload, charge_id)
        .await
    {
        Ok(receipt) => info!(
            "Purchase of {} by {} reached {:?}; {} admin(s) notified, {} failed",
            receipt.item_id, buyer.id, receipt.stage, receipt.admins.delivered, receipt.admins.failed
        ),
        Err(e) => error!(
            "Payment {} from user {} could not be recorded: {}",
            charge_id, buyer.id, e
        ),
    }
}
