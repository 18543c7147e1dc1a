// 🔑 Identifier Generator - Opaque ids for stored receipts
// Random bytes, hex-encoded; never derived from receipt content

use crate::error::ReceiptResult;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes behind each id (72 hex characters)
pub const ID_BYTES: usize = 36;

/// Source of fresh receipt identifiers
///
/// Implementations must never hand out an empty or repeated id. When they
/// cannot produce one they return an error instead.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> ReceiptResult<String>;
}

/// Ids drawn from the operating system's randomness source
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> ReceiptResult<String> {
        let mut bytes = [0u8; ID_BYTES];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_is_lowercase_hex() {
        let id = RandomIdGenerator.generate().unwrap();

        assert_eq!(id.len(), ID_BYTES * 2);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_are_unique() {
        let generator = RandomIdGenerator;
        let ids: HashSet<String> = (0..1000).map(|_| generator.generate().unwrap()).collect();

        assert_eq!(ids.len(), 1000);
    }
}
