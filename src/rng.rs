use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// The only randomness the engine consumes.
pub trait RandomSource {
    /// A die face in `1..=6`.
    fn roll_die(&mut self) -> u8;
    fn coin_flip(&mut self) -> bool;
    /// An index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Seeded source so whole games can be replayed from a `u64`.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: StdRng,
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed ^ 0x5EED) }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 { self.inner.gen_range(1..=6) }
    fn coin_flip(&mut self) -> bool { self.inner.gen_bool(0.5) }
    fn pick_index(&mut self, len: usize) -> usize { self.inner.gen_range(0..len) }
}

/// Replays queued dice faces and decisions, then falls back to a seeded source.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    faces: VecDeque<u8>,
    flips: VecDeque<bool>,
    picks: VecDeque<usize>,
    fallback: GameRng,
}

impl ScriptedRng {
    pub fn new(seed: u64) -> Self {
        Self {
            faces: VecDeque::new(),
            flips: VecDeque::new(),
            picks: VecDeque::new(),
            fallback: GameRng::seed_from_u64(seed),
        }
    }

    pub fn with_rolls(mut self, rolls: &[(u8, u8)]) -> Self {
        for &(a, b) in rolls {
            debug_assert!((1..=6).contains(&a) && (1..=6).contains(&b), "die faces are 1-6, got ({a}, {b})");
            self.faces.push_back(a);
            self.faces.push_back(b);
        }
        self
    }

    pub fn with_flips(mut self, flips: &[bool]) -> Self {
        self.flips.extend(flips.iter().copied());
        self
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks.iter().copied());
        self
    }
}

impl RandomSource for ScriptedRng {
    fn roll_die(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or_else(|| self.fallback.roll_die())
    }

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or_else(|| self.fallback.coin_flip())
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match self.picks.pop_front() {
            Some(i) => i.min(len - 1),
            None => self.fallback.pick_index(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_is_reproducible_and_in_range() {
        let mut a = GameRng::seed_from_u64(7);
        let mut b = GameRng::seed_from_u64(7);
        for _ in 0..200 {
            let face = a.roll_die();
            assert!((1..=6).contains(&face));
            assert_eq!(face, b.roll_die());
            assert!(a.pick_index(3) < 3);
            b.pick_index(3);
        }
    }

    #[test]
    fn scripted_rng_replays_queue_then_falls_back() {
        let mut rng = ScriptedRng::new(1).with_rolls(&[(3, 4)]).with_flips(&[true, false]).with_picks(&[9]);
        assert_eq!(rng.roll_die(), 3);
        assert_eq!(rng.roll_die(), 4);
        assert!(rng.coin_flip());
        assert!(!rng.coin_flip());
        assert_eq!(rng.pick_index(2), 1);
        assert!((1..=6).contains(&rng.roll_die()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "die faces are 1-6")]
    fn scripted_faces_must_be_real_die_faces() {
        let _ = ScriptedRng::new(0).with_rolls(&[(200, 1)]);
    }
}
