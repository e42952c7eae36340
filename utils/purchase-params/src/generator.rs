//! Purchase parameter generator.
//!
//! Draws a random batch of portrait, semi-random accessory and full-random
//! accessory mint requests and prices it from the fixed box tables. The
//! accumulated `ether_price` is the value a purchasing contract must charge
//! for the batch, so the generator doubles as a test oracle.

use crate::error::{Error, Result};
use crate::random::{random_element, random_int};
use commons::{AccessoryType, BoxType};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Size limits for a generated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseBounds {
    pub portrait_mint_max_length: u64,
    pub accessory_semi_random_mint_max_length: u64,
    pub accessory_full_random_mint_max_length: u64,
    /// Exclusive upper bound of the amount of a single request.
    pub max_amount_per_mint: u64,
}

impl Default for PurchaseBounds {
    fn default() -> Self {
        Self {
            portrait_mint_max_length: 3,
            accessory_semi_random_mint_max_length: 3,
            accessory_full_random_mint_max_length: 3,
            max_amount_per_mint: 2,
        }
    }
}

impl PurchaseBounds {
    /// Every list must be allowed at least one request and every request at
    /// least one token.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("portraitMintMaxLength", self.portrait_mint_max_length),
            (
                "accessorySemiRandomMintMaxLength",
                self.accessory_semi_random_mint_max_length,
            ),
            (
                "accessoryFullRandomMintMaxLength",
                self.accessory_full_random_mint_max_length,
            ),
        ];
        for (name, value) in lengths {
            if value < 1 {
                return Err(Error::InvalidBounds(format!("{} must be at least 1", name)));
            }
        }

        if self.max_amount_per_mint < 2 {
            return Err(Error::InvalidBounds(format!(
                "maxAmountPerMint must be at least 2, got {}",
                self.max_amount_per_mint
            )));
        }

        Ok(())
    }

    /// Load bounds from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let bounds: Self = serde_json::from_str(json)?;
        bounds.validate()?;
        Ok(bounds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortraitMintParams {
    pub box_type: BoxType,
    pub amount: u64,
}

impl PortraitMintParams {
    pub fn price(&self) -> Result<u128> {
        line_price(self.amount, self.box_type.portrait_price())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorySemiRandomMintParams {
    pub accessory_type: AccessoryType,
    pub box_type: BoxType,
    pub amount: u64,
}

impl AccessorySemiRandomMintParams {
    pub fn price(&self) -> Result<u128> {
        line_price(
            self.amount,
            self.box_type.accessory_prices().semi_random_price,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryFullRandomMintParams {
    pub box_type: BoxType,
    pub amount: u64,
}

impl AccessoryFullRandomMintParams {
    pub fn price(&self) -> Result<u128> {
        line_price(self.amount, self.box_type.accessory_prices().random_price)
    }
}

/// Draw a list length uniformly from `[1, max_length]`.
fn random_length<R: Rng + ?Sized>(rng: &mut R, max_length: u64) -> Result<u64> {
    Ok(random_int(rng, 0, max_length)? + 1)
}

fn line_price(amount: u64, unit_price: u128) -> Result<u128> {
    u128::from(amount)
        .checked_mul(unit_price)
        .ok_or(Error::PriceOverflow)
}

/// A generated batch of mint requests and its total price in wei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseParams {
    pub portrait_mint_params: Vec<PortraitMintParams>,
    pub accessory_semi_random_mint_params: Vec<AccessorySemiRandomMintParams>,
    pub accessory_full_random_mint_params: Vec<AccessoryFullRandomMintParams>,
    /// Written as a decimal string, JSON numbers lose precision past 2^53.
    #[serde(with = "decimal")]
    pub ether_price: u128,
}

impl PurchaseParams {
    /// Price of the batch recomputed from the tables.
    pub fn expected_price(&self) -> Result<u128> {
        let portraits = self.portrait_mint_params.iter().map(|p| p.price());
        let semi_random = self
            .accessory_semi_random_mint_params
            .iter()
            .map(|p| p.price());
        let full_random = self
            .accessory_full_random_mint_params
            .iter()
            .map(|p| p.price());

        portraits
            .chain(semi_random)
            .chain(full_random)
            .try_fold(0u128, |total, price| {
                total.checked_add(price?).ok_or(Error::PriceOverflow)
            })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Generate one batch with the given random source.
pub fn generate_purchase_params<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &PurchaseBounds,
) -> Result<PurchaseParams> {
    bounds.validate()?;

    let mut ether_price = 0u128;
    let mut accumulate = |price: u128| -> Result<()> {
        ether_price = ether_price
            .checked_add(price)
            .ok_or(Error::PriceOverflow)?;
        Ok(())
    };

    let length = random_length(rng, bounds.portrait_mint_max_length)?;
    let mut portrait_mint_params = Vec::new();
    for _ in 0..length {
        let params = PortraitMintParams {
            box_type: *random_element(rng, &BoxType::ALL)?,
            amount: random_int(rng, 1, bounds.max_amount_per_mint)?,
        };
        accumulate(params.price()?)?;
        portrait_mint_params.push(params);
    }

    let length = random_length(rng, bounds.accessory_semi_random_mint_max_length)?;
    let mut accessory_semi_random_mint_params = Vec::new();
    for _ in 0..length {
        let params = AccessorySemiRandomMintParams {
            accessory_type: *random_element(rng, &AccessoryType::ALL)?,
            box_type: *random_element(rng, &BoxType::ALL)?,
            amount: random_int(rng, 1, bounds.max_amount_per_mint)?,
        };
        accumulate(params.price()?)?;
        accessory_semi_random_mint_params.push(params);
    }

    let length = random_length(rng, bounds.accessory_full_random_mint_max_length)?;
    let mut accessory_full_random_mint_params = Vec::new();
    for _ in 0..length {
        let params = AccessoryFullRandomMintParams {
            box_type: *random_element(rng, &BoxType::ALL)?,
            amount: random_int(rng, 1, bounds.max_amount_per_mint)?,
        };
        accumulate(params.price()?)?;
        accessory_full_random_mint_params.push(params);
    }

    Ok(PurchaseParams {
        portrait_mint_params,
        accessory_semi_random_mint_params,
        accessory_full_random_mint_params,
        ether_price,
    })
}

/// Repeatedly generates batches from one random source and fixed bounds.
#[derive(Debug)]
pub struct PurchaseGenerator<R> {
    rng: R,
    bounds: PurchaseBounds,
}

impl<R: Rng> PurchaseGenerator<R> {
    pub fn new(rng: R, bounds: PurchaseBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self { rng, bounds })
    }

    pub fn bounds(&self) -> &PurchaseBounds {
        &self.bounds
    }

    pub fn generate(&mut self) -> Result<PurchaseParams> {
        generate_purchase_params(&mut self.rng, &self.bounds)
    }
}

impl PurchaseGenerator<StdRng> {
    /// A reproducible generator with default bounds.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bounds: PurchaseBounds::default(),
        }
    }
}

mod decimal {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commons::centiethers;

    #[test]
    fn test_default_bounds() {
        let bounds = PurchaseBounds::default();
        assert_eq!(bounds.portrait_mint_max_length, 3);
        assert_eq!(bounds.accessory_semi_random_mint_max_length, 3);
        assert_eq!(bounds.accessory_full_random_mint_max_length, 3);
        assert_eq!(bounds.max_amount_per_mint, 2);
        assert!(bounds.validate().is_ok());
    }

    #[test]
    fn test_invalid_bounds() {
        let mut rng = StdRng::seed_from_u64(1);

        let bounds = PurchaseBounds {
            portrait_mint_max_length: 0,
            ..Default::default()
        };
        assert!(matches!(
            generate_purchase_params(&mut rng, &bounds),
            Err(Error::InvalidBounds(_))
        ));

        let bounds = PurchaseBounds {
            max_amount_per_mint: 1,
            ..Default::default()
        };
        assert!(matches!(
            PurchaseGenerator::new(rng, bounds),
            Err(Error::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_default_bounds_mint_one_token_per_request() {
        let mut generator = PurchaseGenerator::seeded(3);
        assert_eq!(generator.bounds().max_amount_per_mint, 2);
        for _ in 0..50 {
            let params = generator.generate().unwrap();
            assert!(params.portrait_mint_params.iter().all(|p| p.amount == 1));
            assert!(params
                .accessory_semi_random_mint_params
                .iter()
                .all(|p| p.amount == 1));
            assert!(params
                .accessory_full_random_mint_params
                .iter()
                .all(|p| p.amount == 1));
        }
    }

    #[test]
    fn test_lengths_and_price() {
        let mut generator = PurchaseGenerator::new(
            StdRng::seed_from_u64(4),
            PurchaseBounds {
                portrait_mint_max_length: 5,
                accessory_semi_random_mint_max_length: 1,
                accessory_full_random_mint_max_length: 8,
                max_amount_per_mint: 10,
            },
        )
        .unwrap();
        assert_eq!(generator.bounds().portrait_mint_max_length, 5);

        for _ in 0..100 {
            let params = generator.generate().unwrap();
            assert!((1..=5).contains(&params.portrait_mint_params.len()));
            assert_eq!(params.accessory_semi_random_mint_params.len(), 1);
            assert!((1..=8).contains(&params.accessory_full_random_mint_params.len()));
            assert_eq!(params.ether_price, params.expected_price().unwrap());
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let first = PurchaseGenerator::seeded(42).generate().unwrap();
        let second = PurchaseGenerator::seeded(42).generate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expected_price_of_known_batch() {
        let params = PurchaseParams {
            portrait_mint_params: vec![PortraitMintParams {
                box_type: BoxType::Diamond,
                amount: 2,
            }],
            accessory_semi_random_mint_params: vec![AccessorySemiRandomMintParams {
                accessory_type: AccessoryType::EyeWear,
                box_type: BoxType::Gold,
                amount: 1,
            }],
            accessory_full_random_mint_params: vec![
                AccessoryFullRandomMintParams {
                    box_type: BoxType::Bronze,
                    amount: 3,
                },
                AccessoryFullRandomMintParams {
                    box_type: BoxType::Virtual,
                    amount: 4,
                },
            ],
            ether_price: 0,
        };

        // 2 * 250 + 1 * 30 + 3 * 5 + 4 * 0
        assert_eq!(params.expected_price().unwrap(), centiethers(545));
    }

    #[test]
    fn test_json_round_trip() {
        let params = PurchaseGenerator::seeded(9).generate().unwrap();
        let json = params.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["etherPrice"].as_str(),
            Some(params.ether_price.to_string().as_str())
        );
        assert_eq!(
            value["portraitMintParams"][0]["boxType"].as_u64(),
            Some(u64::from(params.portrait_mint_params[0].box_type.index()))
        );

        let parsed: PurchaseParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_enums_are_numeric_in_json() {
        let json = r#"{
            "portraitMintParams": [{"boxType": 3, "amount": 1}],
            "accessorySemiRandomMintParams": [{"accessoryType": 2, "boxType": 5, "amount": 1}],
            "accessoryFullRandomMintParams": [{"boxType": 0, "amount": 2}],
            "etherPrice": "0"
        }"#;
        let params: PurchaseParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.portrait_mint_params[0].box_type, BoxType::Gold);
        assert_eq!(
            params.accessory_semi_random_mint_params[0].accessory_type,
            AccessoryType::EyeWear
        );
        assert_eq!(
            params.accessory_semi_random_mint_params[0].box_type,
            BoxType::Diamond
        );
        assert_eq!(
            params.accessory_full_random_mint_params[0].box_type,
            BoxType::Virtual
        );

        for json in [r#"{"boxType": 6, "amount": 1}"#, r#"{"boxType": "Gold", "amount": 1}"#] {
            assert!(serde_json::from_str::<PortraitMintParams>(json).is_err());
        }
    }

    #[test]
    fn test_bounds_from_json() {
        let bounds = PurchaseBounds::from_json(r#"{"portraitMintMaxLength": 7}"#).unwrap();
        assert_eq!(bounds.portrait_mint_max_length, 7);
        assert_eq!(bounds.max_amount_per_mint, 2);

        assert!(matches!(
            PurchaseBounds::from_json(r#"{"maxAmountPerMint": 1}"#),
            Err(Error::InvalidBounds(_))
        ));
        assert!(matches!(
            PurchaseBounds::from_json("not json"),
            Err(Error::Json(_))
        ));
    }
}
