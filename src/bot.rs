//! Placeholder decision policies. None of these try to play well.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// How a player decides on an unowned, affordable property.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PurchasePolicy {
    /// Fair coin: buy or walk away.
    #[default]
    CoinFlip,
    /// Buy whenever affordable.
    Always,
}

pub fn wants_to_buy(policy: PurchasePolicy, rng: &mut dyn RandomSource) -> bool {
    match policy {
        PurchasePolicy::CoinFlip => rng.coin_flip(),
        PurchasePolicy::Always => true,
    }
}

/// Uniform pick among the positions where a building could go.
pub fn pick_building_site(eligible: &[usize], rng: &mut dyn RandomSource) -> Option<usize> {
    match eligible.len() {
        0 => None,
        1 => Some(eligible[0]),
        n => Some(eligible[rng.pick_index(n)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn coin_flip_follows_the_source() {
        let mut rng = ScriptedRng::new(0).with_flips(&[false, true]);
        assert!(!wants_to_buy(PurchasePolicy::CoinFlip, &mut rng));
        assert!(wants_to_buy(PurchasePolicy::CoinFlip, &mut rng));
        assert!(wants_to_buy(PurchasePolicy::Always, &mut rng));
    }

    #[test]
    fn building_site_pick() {
        let mut rng = ScriptedRng::new(0).with_picks(&[2]);
        assert_eq!(pick_building_site(&[], &mut rng), None);
        assert_eq!(pick_building_site(&[7], &mut rng), Some(7));
        assert_eq!(pick_building_site(&[1, 3, 39], &mut rng), Some(39));
    }
}
