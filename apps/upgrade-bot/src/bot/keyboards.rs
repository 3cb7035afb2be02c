use crate::flow::messenger::Menu;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// One button per row; the callback data is the item id.
pub fn upgrade_keyboard(menu: &Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.entries.iter().map(|entry| {
        vec![InlineKeyboardButton::callback(
            entry.label.clone(),
            entry.item_id.clone(),
        )]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::messenger::MenuEntry;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_upgrade_keyboard_rows() {
        let menu = Menu {
            prompt: "Choose an upgrade".to_string(),
            entries: vec![
                MenuEntry {
                    label: "Basic".to_string(),
                    item_id: "basic".to_string(),
                },
                MenuEntry {
                    label: "Ultra".to_string(),
                    item_id: "ultra".to_string(),
                },
            ],
        };

        let keyboard = upgrade_keyboard(&menu);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert!(keyboard.inline_keyboard.iter().all(|row| row.len() == 1));

        let first = &keyboard.inline_keyboard[0][0];
        assert_eq!(first.text, "Basic");
        assert_eq!(
            first.kind,
            InlineKeyboardButtonKind::CallbackData("basic".to_string())
        );
    }
}
