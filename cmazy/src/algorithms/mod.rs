mod depth_first_search;

use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{dims::Dims, error::MazeError};
pub use depth_first_search::DepthFirstSearch;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Smallest side a maze may have.
pub const MIN_SIDE: i32 = 5;

/// Seeds a [`Random`], drawing a seed from the thread rng if none is given. Returns the seed
/// actually used so the maze can be reproduced.
pub fn seeded(seed: Option<u64>) -> (Random, u64) {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    (Random::seed_from_u64(seed), seed)
}

/// Independent generators, one per consumer. Each one is `long_jump`ed past the previous, so
/// the streams don't overlap.
pub fn split_rng(rng: &mut Random, count: usize) -> Vec<Random> {
    (0..count)
        .map(|_| {
            rng.long_jump();
            rng.clone()
        })
        .collect()
}

pub fn validate_size(size: Dims) -> Result<(), MazeError> {
    let valid = |side: i32| side >= MIN_SIDE && side % 2 == 1;

    if valid(size.0) && valid(size.1) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimension {
            width: size.0,
            height: size.1,
        })
    }
}

pub fn validate_endpoint(size: Dims, role: &'static str, pos: Dims) -> Result<(), MazeError> {
    let inside = pos.all_non_negative() && pos.0 < size.0 && pos.1 < size.1;

    if inside && pos.is_room() {
        Ok(())
    } else {
        Err(MazeError::InvalidEndpoint { role, pos })
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn sizes() {
        assert!(validate_size(Dims(5, 5)).is_ok());
        assert!(validate_size(Dims(31, 21)).is_ok());
        assert_eq!(
            validate_size(Dims(4, 5)),
            Err(MazeError::InvalidDimension {
                width: 4,
                height: 5
            })
        );
        assert!(validate_size(Dims(5, 4)).is_err());
        assert!(validate_size(Dims(3, 3)).is_err());
        assert!(validate_size(Dims(-5, 5)).is_err());
    }

    #[test]
    fn endpoints() {
        let size = Dims(7, 5);
        assert!(validate_endpoint(size, "start", Dims(1, 1)).is_ok());
        assert!(validate_endpoint(size, "exit", Dims(5, 3)).is_ok());
        assert!(validate_endpoint(size, "exit", Dims(2, 1)).is_err());
        assert!(validate_endpoint(size, "exit", Dims(7, 3)).is_err());
        assert!(validate_endpoint(size, "exit", Dims(-1, 1)).is_err());
    }

    #[test]
    fn split_streams_differ() {
        let (mut rng, _) = seeded(Some(7));
        let mut rngs = split_rng(&mut rng, 3);
        let firsts: Vec<u64> = rngs.iter_mut().map(|r| r.gen()).collect();
        assert_ne!(firsts[0], firsts[1]);
        assert_ne!(firsts[1], firsts[2]);

        let (mut again, _) = seeded(Some(7));
        let mut again = split_rng(&mut again, 3);
        assert_eq!(again[0].gen::<u64>(), firsts[0]);
    }
}
