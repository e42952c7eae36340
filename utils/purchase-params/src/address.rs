//! Random account addresses for test fixtures.

use concordium_std::AccountAddress;
use rand::Rng;

/// An account address made of 32 random bytes.
pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> AccountAddress {
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes[..]);
    AccountAddress(bytes)
}

/// An account address drawn from the thread-local CSPRNG.
pub fn generate_random_address() -> AccountAddress {
    random_address(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_address_follows_the_seed() {
        let first = random_address(&mut StdRng::seed_from_u64(11));
        let second = random_address(&mut StdRng::seed_from_u64(11));
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_addresses_differ() {
        assert_ne!(generate_random_address(), generate_random_address());
    }
}
