//! Minting blobs are produced off-chain by the signer and checked on-chain,
//! so both sides must agree on every byte.
use super::*;
use alloc::format;

/// Everything that identifies a portrait to be minted.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct PortraitMintingData {
    pub token_id: u128,
    pub box_type: BoxType,
    pub tier: u8,
    pub skin_id: u64,
    pub body_id: u64,
    pub eye_id: u64,
    pub head_id: u64,
    pub props_id: u64,
}

/// Everything that identifies an accessory to be minted.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct AccessoryMintingData {
    pub token_id: u128,
    pub box_type: BoxType,
    pub tier: u8,
    pub accessory_type: AccessoryType,
}

impl PortraitMintingData {
    /// Packed string form: `{tokenId}:{<boxType><tier>,skin,body,eye,head,props}`.
    /// Box type and tier are written back to back.
    pub fn minting_blob(&self) -> Vec<u8> {
        format!(
            "{{{}}}:{{{}{},{},{},{},{},{}}}",
            self.token_id,
            self.box_type.index(),
            self.tier,
            self.skin_id,
            self.body_id,
            self.eye_id,
            self.head_id,
            self.props_id,
        )
        .into_bytes()
    }
}

impl AccessoryMintingData {
    /// `{tokenId}:{<boxType><tier><accessoryType>}` as a zero padded 32 byte
    /// string. The text must leave room for at least one trailing zero.
    pub fn minting_blob(&self) -> Result<[u8; BYTES32_LEN], CustomContractError> {
        let text = format!(
            "{{{}}}:{{{}{}{}}}",
            self.token_id,
            self.box_type.index(),
            self.tier,
            self.accessory_type.index(),
        );
        let bytes = text.as_bytes();
        ensure!(bytes.len() < BYTES32_LEN, CustomContractError::BlobTooLong);

        let mut blob = [0u8; BYTES32_LEN];
        blob[..bytes.len()].copy_from_slice(bytes);
        Ok(blob)
    }
}

/// Render a blob as `0x` prefixed lowercase hex.
pub fn blob_to_hex(blob: &[u8]) -> String {
    let mut hex = String::with_capacity(2 + blob.len() * 2);
    hex.push_str("0x");
    for byte in blob {
        hex.push(bits_to_hex_char(byte >> 4));
        hex.push(bits_to_hex_char(byte & 0xF));
    }
    hex
}

fn bits_to_hex_char(bits: u8) -> char {
    match bits & 0xF {
        0x0..=0x9 => (bits + b'0') as char,
        0xA..=0xF => (bits - 10 + b'a') as char,
        _ => unreachable!(),
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    fn portrait() -> PortraitMintingData {
        PortraitMintingData {
            token_id: 1,
            box_type: BoxType::Gold,
            tier: 2,
            skin_id: 10,
            body_id: 11,
            eye_id: 12,
            head_id: 13,
            props_id: 14,
        }
    }

    fn accessory() -> AccessoryMintingData {
        AccessoryMintingData {
            token_id: 7,
            box_type: BoxType::Diamond,
            tier: 1,
            accessory_type: AccessoryType::HeadWear,
        }
    }

    #[concordium_test]
    fn portrait_blob_layout() {
        claim_eq!(portrait().minting_blob(), b"{1}:{32,10,11,12,13,14}".to_vec());
    }

    #[concordium_test]
    fn portrait_blob_is_deterministic() {
        claim_eq!(portrait().minting_blob(), portrait().minting_blob());
    }

    #[concordium_test]
    fn accessory_blob_is_zero_padded() {
        let blob = accessory().minting_blob().expect_report("Blob should fit");
        let text = b"{7}:{513}";

        claim_eq!(&blob[..text.len()], &text[..]);
        claim!(blob[text.len()..].iter().all(|byte| *byte == 0));
        claim_eq!(blob, accessory().minting_blob().expect_report("Blob should fit"));
    }

    #[concordium_test]
    fn accessory_blob_rejects_long_text() {
        // "{<23 digits>}:{513}" is 31 bytes, the longest text that fits.
        let mut data = accessory();
        data.token_id = 10u128.pow(22);
        claim!(data.minting_blob().is_ok());

        data.token_id = 10u128.pow(23);
        claim_eq!(data.minting_blob(), Err(CustomContractError::BlobTooLong));

        data.token_id = u128::MAX;
        claim_eq!(data.minting_blob(), Err(CustomContractError::BlobTooLong));
    }

    #[concordium_test]
    fn hex_rendering() {
        claim_eq!(blob_to_hex(&[0x00, 0x7b, 0xff]), "0x007bff");
        claim_eq!(blob_to_hex(&[]), "0x");
    }
}
