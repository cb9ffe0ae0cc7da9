//! Staked asset references.
//!
//! An [`AssetRef`] identifies one non-fungible item by its collection
//! contract address and token id. While staked, an asset belongs to exactly
//! one participant; the registry enforces this uniqueness.

use serde::{Deserialize, Serialize};

use crate::{Address, TokenId};

/// Reference to a single non-fungible item: `(collection, item)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetRef {
    /// The NFT collection contract address.
    pub collection: Address,
    /// The token id within the collection.
    pub item: TokenId,
}

impl AssetRef {
    /// Create an asset reference.
    pub fn new(collection: Address, item: TokenId) -> Self {
        Self { collection, item }
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 4 address bytes are enough to tell collections apart in logs.
        write!(f, "{}#{}", hex::encode(&self.collection[..4]), self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_ref_equality() {
        let a = AssetRef::new([0x11; 20], 1);
        let b = AssetRef::new([0x11; 20], 1);
        let c = AssetRef::new([0x11; 20], 2);
        let d = AssetRef::new([0x22; 20], 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_asset_ref_display() {
        let a = AssetRef::new([0xAB; 20], 42);
        assert_eq!(a.to_string(), "abababab#42");
    }

    #[test]
    fn test_asset_ref_serde_round_trip() {
        let a = AssetRef::new([0x07; 20], 9);
        let json = serde_json::to_string(&a).expect("serialize");
        let back: AssetRef = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(a, back);
    }
}
