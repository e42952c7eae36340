use commons::{AccessoryType, BoxType};
use proptest::prelude::*;
use purchase_params::{
    generate_purchase_params, random_element_with_index, random_int, Error, PurchaseBounds,
};
use rand::{rngs::StdRng, SeedableRng};

fn bounds() -> impl Strategy<Value = PurchaseBounds> {
    (1u64..6, 1u64..6, 1u64..6, 2u64..20).prop_map(|(portrait, semi, full, amount)| {
        PurchaseBounds {
            portrait_mint_max_length: portrait,
            accessory_semi_random_mint_max_length: semi,
            accessory_full_random_mint_max_length: full,
            max_amount_per_mint: amount,
        }
    })
}

proptest! {
    #[test]
    fn generated_batches_respect_bounds(seed in any::<u64>(), bounds in bounds()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = generate_purchase_params(&mut rng, &bounds).unwrap();

        let lengths = [
            (params.portrait_mint_params.len(), bounds.portrait_mint_max_length),
            (
                params.accessory_semi_random_mint_params.len(),
                bounds.accessory_semi_random_mint_max_length,
            ),
            (
                params.accessory_full_random_mint_params.len(),
                bounds.accessory_full_random_mint_max_length,
            ),
        ];
        for (length, max) in lengths {
            prop_assert!(length >= 1 && length as u64 <= max);
        }

        let amounts = params
            .portrait_mint_params
            .iter()
            .map(|p| p.amount)
            .chain(params.accessory_semi_random_mint_params.iter().map(|p| p.amount))
            .chain(params.accessory_full_random_mint_params.iter().map(|p| p.amount));
        for amount in amounts {
            prop_assert!(amount >= 1 && amount < bounds.max_amount_per_mint);
        }
    }

    #[test]
    fn ether_price_matches_tables(seed in any::<u64>(), bounds in bounds()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = generate_purchase_params(&mut rng, &bounds).unwrap();

        prop_assert_eq!(params.ether_price, params.expected_price().unwrap());
    }

    #[test]
    fn random_int_stays_in_half_open_range(seed in any::<u64>(), from in 0u64..1_000, span in 1u64..1_000) {
        let mut rng = StdRng::seed_from_u64(seed);
        let value = random_int(&mut rng, from, from + span).unwrap();

        prop_assert!(value >= from && value < from + span);
    }

    #[test]
    fn random_int_rejects_inverted_range(seed in any::<u64>(), to in 0u64..1_000, gap in 1u64..1_000) {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = random_int(&mut rng, to + gap, to);

        prop_assert!(
            matches!(result, Err(Error::InvalidRange { .. })),
            "assertion failed: expected Err(Error::InvalidRange {{ .. }})"
        );
    }

    #[test]
    fn random_element_index_points_at_element(seed in any::<u64>(), items in prop::collection::vec(any::<u32>(), 1..32)) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (element, index) = random_element_with_index(&mut rng, &items).unwrap();

        prop_assert!(index < items.len());
        prop_assert_eq!(*element, items[index]);
    }
}

#[test]
fn virtual_tier_is_free() {
    assert_eq!(BoxType::Virtual.portrait_price(), 0);
    for accessory_type in AccessoryType::ALL {
        let params = purchase_params::AccessorySemiRandomMintParams {
            accessory_type,
            box_type: BoxType::Virtual,
            amount: 5,
        };
        assert_eq!(params.price().unwrap(), 0);
    }
    let params = purchase_params::AccessoryFullRandomMintParams {
        box_type: BoxType::Virtual,
        amount: 5,
    };
    assert_eq!(params.price().unwrap(), 0);
}
