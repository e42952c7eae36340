//! Hex renderings of the minting blobs, as a minting transaction carries
//! them.

use crate::error::{Error, Result};
use commons::{blob_to_hex, AccessoryMintingData, PortraitMintingData};

/// Portrait minting blob as a `0x`-prefixed hex string.
pub fn make_portrait_minting_blob(data: &PortraitMintingData) -> String {
    blob_to_hex(&data.minting_blob())
}

/// Accessory minting blob as a `0x`-prefixed, 32-byte hex string.
pub fn make_accessory_minting_blob(data: &AccessoryMintingData) -> Result<String> {
    let blob = data.minting_blob().map_err(Error::Blob)?;
    Ok(blob_to_hex(&blob))
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::{AccessoryType, BoxType, CustomContractError};

    #[test]
    fn test_portrait_blob_hex() {
        let data = PortraitMintingData {
            token_id: 1,
            box_type: BoxType::Gold,
            tier: 2,
            skin_id: 3,
            body_id: 4,
            eye_id: 5,
            head_id: 6,
            props_id: 7,
        };
        // "{1}:{32,3,4,5,6,7}"
        assert_eq!(
            make_portrait_minting_blob(&data),
            "0x7b317d3a7b33322c332c342c352c362c377d"
        );
    }

    #[test]
    fn test_accessory_blob_hex_is_padded() {
        let data = AccessoryMintingData {
            token_id: 9,
            box_type: BoxType::Bronze,
            tier: 0,
            accessory_type: AccessoryType::Props,
        };
        let hex = make_accessory_minting_blob(&data).unwrap();

        // "{9}:{104}" followed by zero bytes up to 32.
        assert_eq!(hex.len(), 2 + 64);
        assert!(hex.starts_with("0x7b397d3a7b3130347d00"));
        assert!(hex.ends_with("0000"));
    }

    #[test]
    fn test_accessory_blob_too_long() {
        let data = AccessoryMintingData {
            token_id: u128::MAX,
            box_type: BoxType::Diamond,
            tier: 9,
            accessory_type: AccessoryType::Skin,
        };
        assert!(matches!(
            make_accessory_minting_blob(&data),
            Err(Error::Blob(CustomContractError::BlobTooLong))
        ));
    }
}
