//! Document identifiers.

use rand::Rng;
use uuid::{Builder, Uuid};

/// A v4 UUID whose 122 random bits come from `rng`, so seeded runs repeat.
pub fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Variant;

    #[test]
    fn test_ids_are_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = random_id(&mut rng);
        let second = random_id(&mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_seed_same_ids() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(random_id(&mut rng1), random_id(&mut rng2));
    }

    #[test]
    fn test_id_is_rfc4122_v4() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = random_id(&mut rng);
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), Variant::RFC4122);
    }

    #[test]
    fn test_id_keeps_drawn_bits() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn: [u8; 16] = StdRng::seed_from_u64(7).gen();
        let id = random_id(&mut rng);

        let bytes = id.as_bytes();
        for (i, (got, raw)) in bytes.iter().zip(drawn.iter()).enumerate() {
            match i {
                6 => assert_eq!(got & 0x0f, raw & 0x0f),
                8 => assert_eq!(got & 0x3f, raw & 0x3f),
                _ => assert_eq!(got, raw),
            }
        }
        assert_eq!(id.to_string(), id.hyphenated().to_string());
    }
}
