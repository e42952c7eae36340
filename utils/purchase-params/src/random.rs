//! Random primitives the generator is built from. Every function takes the
//! random source explicitly, so a seeded RNG reproduces a run exactly.

use crate::error::{Error, Result};
use rand::Rng;

/// Draw an integer uniformly from `[from, to)`.
///
/// A degenerate range (`from == to`) yields `from`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, from: u64, to: u64) -> Result<u64> {
    if from > to {
        return Err(Error::InvalidRange { from, to });
    }
    if from == to {
        return Ok(from);
    }
    Ok(rng.gen_range(from..to))
}

/// Pick a uniformly random element of `items`.
pub fn random_element<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Result<&'a T> {
    random_element_with_index(rng, items).map(|(element, _)| element)
}

/// Pick a uniformly random element of `items` together with its index.
pub fn random_element_with_index<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
) -> Result<(&'a T, usize)> {
    if items.is_empty() {
        return Err(Error::EmptySequence);
    }
    let index = random_int(rng, 0, items.len() as u64)? as usize;
    Ok((&items[index], index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_int_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let value = random_int(&mut rng, 3, 9).unwrap();
            assert!((3..9).contains(&value));
        }
    }

    #[test]
    fn test_random_int_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(2);
        let values: Vec<u64> = (0..1_000)
            .map(|_| random_int(&mut rng, 0, 3).unwrap())
            .collect();
        assert!(values.contains(&0));
        assert!(values.contains(&2));
        assert!(!values.contains(&3));
    }

    #[test]
    fn test_random_int_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_int(&mut rng, 5, 5).unwrap(), 5);
    }

    #[test]
    fn test_random_int_inverted_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = random_int(&mut rng, 6, 5).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { from: 6, to: 5 }));
    }

    #[test]
    fn test_random_element_with_index() {
        let mut rng = StdRng::seed_from_u64(5);
        let items = ["eye", "body", "mouth", "head"];
        for _ in 0..100 {
            let (element, index) = random_element_with_index(&mut rng, &items).unwrap();
            assert_eq!(*element, items[index]);
        }
    }

    #[test]
    fn test_random_element_single() {
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(*random_element(&mut rng, &[42]).unwrap(), 42);
    }

    #[test]
    fn test_random_element_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: [u8; 0] = [];
        assert!(matches!(
            random_element(&mut rng, &items),
            Err(Error::EmptySequence)
        ));
    }
}
