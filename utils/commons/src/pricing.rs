use super::*;
use core::convert::TryFrom;

/// Purchase tier of a box. The order of the variants is the tier order.
#[derive(Serialize, SchemaType, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum BoxType {
    Virtual,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// Category of an accessory minted out of a box.
#[derive(Serialize, SchemaType, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum AccessoryType {
    Skin,
    Body,
    EyeWear,
    HeadWear,
    Props,
}

/// Unit prices of an accessory for both purchasing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessoryPrices {
    /// Price of a fully random accessory.
    pub random_price: u128,
    /// Price of an accessory whose type is picked by the buyer.
    pub semi_random_price: u128,
}

/// Converts an amount of centiethers to wei.
pub const fn centiethers(cents: u128) -> u128 {
    cents * CENTIETHER
}

const PORTRAIT_PRICES: [u128; BoxType::COUNT] = [
    0,
    centiethers(5),
    centiethers(10),
    centiethers(25),
    centiethers(75),
    centiethers(250),
];

const ACCESSORY_PRICES: [AccessoryPrices; BoxType::COUNT] = [
    AccessoryPrices::new(0, 0),
    AccessoryPrices::new(centiethers(5), centiethers(10)),
    AccessoryPrices::new(centiethers(10), centiethers(20)),
    AccessoryPrices::new(centiethers(15), centiethers(30)),
    AccessoryPrices::new(centiethers(20), centiethers(40)),
    AccessoryPrices::new(centiethers(25), centiethers(50)),
];

impl AccessoryPrices {
    pub const fn new(random_price: u128, semi_random_price: u128) -> Self {
        Self {
            random_price,
            semi_random_price,
        }
    }
}

impl BoxType {
    pub const COUNT: usize = 6;

    pub const ALL: [BoxType; BoxType::COUNT] = [
        BoxType::Virtual,
        BoxType::Bronze,
        BoxType::Silver,
        BoxType::Gold,
        BoxType::Platinum,
        BoxType::Diamond,
    ];

    /// Numeric value of the tier, as used in minting blobs.
    #[inline(always)]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Unit price of a portrait minted out of this box.
    #[inline(always)]
    pub const fn portrait_price(self) -> u128 {
        PORTRAIT_PRICES[self as usize]
    }

    /// Unit prices of an accessory minted out of this box.
    #[inline(always)]
    pub const fn accessory_prices(self) -> AccessoryPrices {
        ACCESSORY_PRICES[self as usize]
    }
}

impl AccessoryType {
    pub const COUNT: usize = 5;

    pub const ALL: [AccessoryType; AccessoryType::COUNT] = [
        AccessoryType::Skin,
        AccessoryType::Body,
        AccessoryType::EyeWear,
        AccessoryType::HeadWear,
        AccessoryType::Props,
    ];

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

// Off-chain fixtures carry both enums as their discriminant.
impl From<BoxType> for u8 {
    fn from(box_type: BoxType) -> u8 {
        box_type.index()
    }
}

impl TryFrom<u8> for BoxType {
    type Error = &'static str;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or("unknown box type")
    }
}

impl From<AccessoryType> for u8 {
    fn from(accessory_type: AccessoryType) -> u8 {
        accessory_type.index()
    }
}

impl TryFrom<u8> for AccessoryType {
    type Error = &'static str;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or("unknown accessory type")
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn virtual_box_is_free() {
        claim_eq!(BoxType::Virtual.portrait_price(), 0);
        claim_eq!(BoxType::Virtual.accessory_prices().random_price, 0);
        claim_eq!(BoxType::Virtual.accessory_prices().semi_random_price, 0);
    }

    #[concordium_test]
    fn prices_grow_with_tier() {
        for pair in BoxType::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            claim!(lower.portrait_price() < higher.portrait_price());
            claim!(
                lower.accessory_prices().random_price < higher.accessory_prices().random_price
            );
            claim!(
                lower.accessory_prices().semi_random_price
                    < higher.accessory_prices().semi_random_price
            );
        }
    }

    #[concordium_test]
    fn diamond_portrait_costs_two_and_a_half_ether() {
        claim_eq!(
            BoxType::Diamond.portrait_price(),
            2_500_000_000_000_000_000u128
        );
    }

    #[concordium_test]
    fn index_round_trips_through_the_closed_set() {
        for box_type in BoxType::ALL.iter() {
            claim_eq!(BoxType::from_index(box_type.index()), Some(*box_type));
        }
        claim_eq!(BoxType::from_index(6), None);

        for accessory_type in AccessoryType::ALL.iter() {
            claim_eq!(
                AccessoryType::from_index(accessory_type.index()),
                Some(*accessory_type)
            );
        }
        claim_eq!(AccessoryType::from_index(5), None);
    }
}
