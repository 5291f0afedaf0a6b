use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::rules::DOUBLES_TO_JAIL;

/// A pair of dice handed to one player for the length of their turn.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dice {
    pub faces: [u8; 2],
    pub sum: u8,
    pub double: bool,
    /// Consecutive doubles rolled with this pair.
    pub double_counter: u8,
}

impl Dice {
    pub fn new() -> Self { Self::default() }

    pub fn roll(&mut self, rng: &mut dyn RandomSource) {
        let faces = [rng.roll_die(), rng.roll_die()];
        self.faces = faces;
        self.sum = faces[0] + faces[1];
        self.double = faces[0] == faces[1];
        if self.double {
            self.double_counter += 1;
        } else {
            self.double_counter = 0;
        }
    }

    #[inline] pub fn third_double(&self) -> bool { self.double_counter == DOUBLES_TO_JAIL }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn three_doubles_from_fresh_reach_the_jail_count() {
        let mut rng = ScriptedRng::new(0).with_rolls(&[(2, 2), (5, 5), (1, 1)]);
        let mut dice = Dice::new();
        for _ in 0..3 {
            dice.roll(&mut rng);
            assert!(dice.double);
        }
        assert_eq!(dice.double_counter, 3);
        assert!(dice.third_double());
    }

    #[test]
    fn non_double_resets_streak() {
        let mut rng = ScriptedRng::new(0).with_rolls(&[(6, 6), (6, 6), (3, 4)]);
        let mut dice = Dice::new();
        dice.roll(&mut rng);
        dice.roll(&mut rng);
        assert_eq!(dice.double_counter, 2);
        dice.roll(&mut rng);
        assert_eq!(dice.double_counter, 0);
        assert_eq!(dice.sum, 7);
        assert_eq!(dice.faces, [3, 4]);
        assert!(!dice.double);
    }
}
