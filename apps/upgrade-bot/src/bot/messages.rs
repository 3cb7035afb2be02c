use std::collections::BTreeMap;
use teloxide::utils::html::escape;
use upgrade_catalog::CatalogItem;

pub const WELCOME: &str = "Welcome to the $BLACK Upgrade Center\n\
\n\
Get a permanent boost using\n\
Telegram stars ⭐️ and mine more $BLACK.\n\
\n\
Choose an upgrade";

pub const UPGRADE_PROMPT: &str = "Choose an upgrade";

pub const PURCHASE_SUCCESS: &str = "🎉 Purchased Successfully!\n\
\n\
Your upgrade has been applied permanently.\n\
\n\
If your Mining Power does not increase within 6 hours, please contact our support team.\n\
\n\
You will receive a full refund of your stars, and your Mining Power will be upgraded to the level of the pack you purchased completely free of charge.\n\
\n\
We are committed to ensuring your satisfaction and a seamless experience.";

pub const APOLOGY: &str = "Something went wrong while processing your request.";

pub const UNKNOWN_ITEM_REASON: &str = "This upgrade is no longer available. Please choose another one.";

/// Who paid, as far as the notice to administrators is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

impl Buyer {
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("@{}", username),
            None => self.first_name.clone(),
        }
    }
}

pub fn admin_purchase_notice(buyer: &Buyer, item: &CatalogItem, charge_id: &str) -> String {
    format!(
        "<b>New Purchase</b>\n\
        User: {} (<code>{}</code>)\n\
        Pack: <b>{}</b>\n\
        Cost: <code>{} ⭐️</code>\n\
        Charge ID: <code>{}</code>",
        escape(&buyer.display_name()),
        buyer.id,
        escape(&item.display_name),
        item.price,
        escape(charge_id)
    )
}

pub fn stats_report(counts: &BTreeMap<String, u64>) -> String {
    let total: u64 = counts.values().sum();
    let mut text = format!(
        "<b>Purchase Stats</b>\nBuyers: <code>{}</code>\nPurchases: <code>{}</code>",
        counts.len(),
        total
    );
    for (user_id, count) in counts {
        text.push_str(&format!("\n<code>{}</code>: {}", escape(user_id), count));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(username: Option<&str>) -> Buyer {
        Buyer {
            id: 123,
            username: username.map(str::to_string),
            first_name: "Ann <3".to_string(),
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(buyer(Some("ann")).display_name(), "@ann");
        assert_eq!(buyer(None).display_name(), "Ann <3");
    }

    #[test]
    fn test_admin_notice_contains_purchase_details() {
        let item = CatalogItem {
            id: "basic".to_string(),
            display_name: "+0.2× Mining Power — 50 ⭐️".to_string(),
            price: 50,
            description: "upgrade".to_string(),
        };
        let notice = admin_purchase_notice(&buyer(None), &item, "abc");

        assert!(notice.contains("Ann &lt;3"));
        assert!(notice.contains("<code>123</code>"));
        assert!(notice.contains("+0.2× Mining Power — 50 ⭐️"));
        assert!(notice.contains("<code>50 ⭐️</code>"));
        assert!(notice.contains("Charge ID: <code>abc</code>"));
    }

    #[test]
    fn test_stats_report_totals() {
        let mut counts = BTreeMap::new();
        counts.insert("1".to_string(), 2);
        counts.insert("2".to_string(), 1);
        let report = stats_report(&counts);

        assert!(report.contains("Buyers: <code>2</code>"));
        assert!(report.contains("Purchases: <code>3</code>"));
        assert!(report.contains("<code>1</code>: 2"));
    }
}
