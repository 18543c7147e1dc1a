// 🗄️ Receipt Store - Id-keyed storage of receipts and their points
// Insert-only: entries are written once and never mutated or evicted

use crate::error::{ReceiptError, ReceiptResult};
use crate::receipt::Receipt;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// ============================================================================
// STORE ENTRY
// ============================================================================

/// A receipt together with the points it was awarded at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEntry {
    pub id: String,
    pub receipt: Receipt,
    pub points: i64,
}

// ============================================================================
// STORE CONTRACT
// ============================================================================

/// Associative store of submitted receipts
///
/// Implementations must be safe to share between request handlers: writes
/// are exclusive with respect to other writes and to reads.
pub trait ReceiptStore: Send + Sync {
    /// Store a receipt and its points under a new id
    ///
    /// Fails with `DuplicateId` if the id is already taken; the existing
    /// entry is left untouched.
    fn put(&self, id: &str, receipt: Receipt, points: i64) -> ReceiptResult<()>;

    /// Full entry for an id, if present
    fn get(&self, id: &str) -> Option<StoreEntry>;

    /// Number of stored entries
    fn len(&self) -> usize;

    fn get_receipt(&self, id: &str) -> Option<Receipt> {
        self.get(id).map(|entry| entry.receipt)
    }

    fn get_points(&self, id: &str) -> Option<i64> {
        self.get(id).map(|entry| entry.points)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// `HashMap` behind a `RwLock`; lives as long as the process
pub struct InMemoryReceiptStore {
    entries: RwLock<HashMap<String, StoreEntry>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        InMemoryReceiptStore {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // Entries are insert-only, so a map left behind by a panicking writer is
    // still consistent and safe to keep using.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StoreEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StoreEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryReceiptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, id: &str, receipt: Receipt, points: i64) -> ReceiptResult<()> {
        let mut entries = self.write();
        if entries.contains_key(id) {
            return Err(ReceiptError::DuplicateId(id.to_string()));
        }

        entries.insert(
            id.to_string(),
            StoreEntry {
                id: id.to_string(),
                receipt,
                points,
            },
        );
        Ok(())
    }

    fn get(&self, id: &str) -> Option<StoreEntry> {
        self.read().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

impl std::fmt::Debug for InMemoryReceiptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryReceiptStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::Item;
    use std::sync::Arc;
    use std::thread;

    fn create_test_receipt(retailer: &str) -> Receipt {
        Receipt {
            retailer: retailer.to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![Item::new("Mountain Dew 12PK", "6.49")],
            total: "6.49".to_string(),
        }
    }

    #[test]
    fn test_put_then_get() {
        let store = InMemoryReceiptStore::new();
        let receipt = create_test_receipt("Target");

        store.put("abc", receipt.clone(), 28).unwrap();

        assert_eq!(store.get_points("abc"), Some(28));
        assert_eq!(store.get_receipt("abc"), Some(receipt.clone()));
        assert_eq!(
            store.get("abc"),
            Some(StoreEntry {
                id: "abc".to_string(),
                receipt,
                points: 28,
            })
        );
    }

    #[test]
    fn test_unknown_id_is_distinct_from_zero_points() {
        let store = InMemoryReceiptStore::new();
        store.put("zero", create_test_receipt(""), 0).unwrap();

        assert_eq!(store.get_points("zero"), Some(0));
        assert_eq!(store.get_points("missing"), None);
        assert_eq!(store.get_receipt("missing"), None);
    }

    #[test]
    fn test_duplicate_id_keeps_original_entry() {
        let store = InMemoryReceiptStore::new();
        store.put("abc", create_test_receipt("Target"), 28).unwrap();

        let result = store.put("abc", create_test_receipt("Walgreens"), 15);

        assert!(matches!(result, Err(ReceiptError::DuplicateId(id)) if id == "abc"));
        assert_eq!(store.get_points("abc"), Some(28));
        assert_eq!(store.get_receipt("abc").unwrap().retailer, "Target");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_not_truncated() {
        let store = InMemoryReceiptStore::new();
        store.put("abc", create_test_receipt("Target"), 28).unwrap();

        assert_eq!(store.get_points("bc"), None);
        assert_eq!(store.get_points("/abc"), None);
    }

    #[test]
    fn test_concurrent_puts() {
        let store = Arc::new(InMemoryReceiptStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        let id = format!("{}-{}", t, i);
                        store.put(&id, create_test_receipt("Target"), i).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 800);
        assert_eq!(store.get_points("7-99"), Some(99));
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryReceiptStore::default();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
