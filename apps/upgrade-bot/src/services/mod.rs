pub mod ledger_service;
pub mod notification_service;
