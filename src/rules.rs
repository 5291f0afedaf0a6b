use crate::model::Cash;

pub const BOARD_SIZE: usize = 40;
pub const JAIL_POSITION: usize = 10;
pub const JAIL_SENTENCE: u8 = 3;
pub const JAIL_FEE: Cash = 50;
pub const GO_BONUS: Cash = 200;
pub const STARTING_CASH: Cash = 1500;
pub const BANK_RESERVE: Cash = 20_580;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;
/// Four houses then a hotel.
pub const MAX_BUILDINGS: u8 = 5;
pub const DOUBLES_TO_JAIL: u8 = 3;

#[inline] pub fn is_hotel(buildings: u8) -> bool { buildings == MAX_BUILDINGS }

/// Rent for a street carrying `buildings` houses, given the base rent and
/// the five building tiers (houses 1-4, hotel).
pub fn street_rent(base: Cash, tiers: &[Cash], buildings: u8) -> Cash {
    match buildings {
        0 => base,
        n => tiers.get(n as usize - 1).copied().unwrap_or(base),
    }
}

/// Wraps `position + roll` around the board, returning the new position and
/// how many times Go was passed.
pub fn advance(position: usize, roll: usize) -> (usize, usize) {
    let raw = position + roll;
    (raw % BOARD_SIZE, raw / BOARD_SIZE)
}
