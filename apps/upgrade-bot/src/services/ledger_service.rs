use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-user tally of completed purchases.
///
/// Confirmations are counted at least once: replaying the same charge
/// increments the tally again.
#[async_trait]
pub trait PurchaseAccounting: Send + Sync {
    /// Records one completed purchase and returns the user's new count.
    async fn record_purchase(&self, user_id: &str) -> u64;
    async fn purchases_for(&self, user_id: &str) -> u64;
    async fn snapshot(&self) -> BTreeMap<String, u64>;
}

/// Process-local ledger. Lost on restart.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    counts: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseAccounting for InMemoryLedger {
    async fn record_purchase(&self, user_id: &str) -> u64 {
        let mut counts = self.counts.write().await;
        let count = counts.entry(user_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    async fn purchases_for(&self, user_id: &str) -> u64 {
        let counts = self.counts.read().await;
        counts.get(user_id).copied().unwrap_or(0)
    }

    async fn snapshot(&self) -> BTreeMap<String, u64> {
        let counts = self.counts.read().await;
        counts.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_purchase_returns_new_count() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.record_purchase("123").await, 1);
        assert_eq!(ledger.record_purchase("123").await, 2);
        assert_eq!(ledger.record_purchase("456").await, 1);

        assert_eq!(ledger.purchases_for("123").await, 2);
        assert_eq!(ledger.purchases_for("789").await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_counts() {
        let ledger = InMemoryLedger::new();
        let other = ledger.clone();
        other.record_purchase("1").await;
        assert_eq!(ledger.purchases_for("1").await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_for_one_user_are_not_lost() {
        let ledger = InMemoryLedger::new();
        let mut handles = Vec::new();
        for _ in 0..64 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.record_purchase("123").await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(ledger.purchases_for("123").await, 64);
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted_by_user() {
        let ledger = InMemoryLedger::new();
        ledger.record_purchase("b").await;
        ledger.record_purchase("a").await;
        ledger.record_purchase("b").await;

        let snapshot: Vec<(String, u64)> = ledger.snapshot().await.into_iter().collect();
        assert_eq!(snapshot, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }
}
