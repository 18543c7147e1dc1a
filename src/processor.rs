// ⚙️ Receipt Processor - Submit and look up scored receipts
// Ties id generation, the points engine and the store together

use crate::error::{ReceiptError, ReceiptResult};
use crate::id::{IdGenerator, RandomIdGenerator};
use crate::points::PointsBreakdown;
use crate::receipt::Receipt;
use crate::store::{InMemoryReceiptStore, ReceiptStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for request handlers
///
/// Constructed once at startup and shared by handle; holds no global state.
#[derive(Clone)]
pub struct ReceiptProcessor {
    store: Arc<dyn ReceiptStore>,
    ids: Arc<dyn IdGenerator>,
}

impl ReceiptProcessor {
    pub fn new(store: Arc<dyn ReceiptStore>, ids: Arc<dyn IdGenerator>) -> Self {
        ReceiptProcessor { store, ids }
    }

    /// In-memory store with OS-random ids
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryReceiptStore::new()),
            Arc::new(RandomIdGenerator),
        )
    }

    /// Score a receipt, store it under a fresh id and return that id
    pub fn submit(&self, receipt: Receipt) -> ReceiptResult<String> {
        let id = self.ids.generate()?;

        let breakdown = PointsBreakdown::for_receipt(&receipt);
        for (rule, points) in &breakdown.contributions {
            debug!(receipt_id = %id, rule = rule.id(), points, "rule evaluated");
        }
        let points = breakdown.total();

        self.store.put(&id, receipt, points)?;
        info!(receipt_id = %id, points, "receipt processed");

        Ok(id)
    }

    /// Points previously awarded to the receipt stored under `id`
    pub fn lookup(&self, id: &str) -> ReceiptResult<i64> {
        self.store
            .get_points(id)
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    /// The receipt stored under `id`
    pub fn receipt(&self, id: &str) -> ReceiptResult<Receipt> {
        self.store
            .get_receipt(id)
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    pub fn store(&self) -> &dyn ReceiptStore {
        self.store.as_ref()
    }
}

impl Default for ReceiptProcessor {
    fn default() -> Self {
        Self::in_memory()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::compute_points;
    use crate::receipt::Item;

    struct FixedIdGenerator(&'static str);

    impl IdGenerator for FixedIdGenerator {
        fn generate(&self) -> ReceiptResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingIdGenerator;

    impl IdGenerator for FailingIdGenerator {
        fn generate(&self) -> ReceiptResult<String> {
            Err(rand::Error::new("entropy source unavailable").into())
        }
    }

    fn create_test_receipt() -> Receipt {
        Receipt {
            retailer: "Walgreens".to_string(),
            purchase_date: "2022-01-02".to_string(),
            purchase_time: "08:13".to_string(),
            items: vec![
                Item::new("Pepsi - 12-oz", "1.25"),
                Item::new("Dasani", "1.40"),
            ],
            total: "2.65".to_string(),
        }
    }

    #[test]
    fn test_submit_then_lookup() {
        let processor = ReceiptProcessor::in_memory();
        let receipt = create_test_receipt();
        let expected = compute_points(&receipt);

        let id = processor.submit(receipt.clone()).unwrap();

        assert!(!id.is_empty());
        assert_eq!(processor.lookup(&id).unwrap(), expected);
        assert_eq!(processor.receipt(&id).unwrap(), receipt);
    }

    #[test]
    fn test_walgreens_points() {
        let processor = ReceiptProcessor::in_memory();

        let id = processor.submit(create_test_receipt()).unwrap();

        // 9 (retailer) + 5 (one pair) + 1 (Dasani: ceil(1.40 * 0.2))
        assert_eq!(processor.lookup(&id).unwrap(), 15);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let processor = ReceiptProcessor::in_memory();

        let result = processor.lookup("never-issued");

        assert!(matches!(result, Err(ReceiptError::NotFound(id)) if id == "never-issued"));
        assert!(processor.receipt("never-issued").is_err());
    }

    #[test]
    fn test_same_receipt_gets_distinct_ids() {
        let processor = ReceiptProcessor::in_memory();

        let first = processor.submit(create_test_receipt()).unwrap();
        let second = processor.submit(create_test_receipt()).unwrap();

        assert_ne!(first, second);
        assert_eq!(processor.store().len(), 2);
    }

    #[test]
    fn test_id_generation_failure_stores_nothing() {
        let processor = ReceiptProcessor::new(
            Arc::new(InMemoryReceiptStore::new()),
            Arc::new(FailingIdGenerator),
        );

        let result = processor.submit(create_test_receipt());

        assert!(matches!(result, Err(ReceiptError::IdGeneration(_))));
        assert!(processor.store().is_empty());
    }

    #[test]
    fn test_repeated_id_is_rejected() {
        let processor = ReceiptProcessor::new(
            Arc::new(InMemoryReceiptStore::new()),
            Arc::new(FixedIdGenerator("fixed")),
        );

        assert_eq!(processor.submit(create_test_receipt()).unwrap(), "fixed");

        let result = processor.submit(create_test_receipt());
        assert!(matches!(result, Err(ReceiptError::DuplicateId(_))));
        assert_eq!(processor.store().len(), 1);
    }
}
