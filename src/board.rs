//! Board spaces and loading of the 40-space board definition.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::model::{Cash, GroupId, PlayerId};
use crate::rules::{street_rent, BOARD_SIZE, MAX_BUILDINGS};

const STANDARD_BOARD: &str = include_str!("../data/board.json");

/// A purchasable space: street, railroad or utility.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub price: Cash,
    pub group: GroupId,
    pub group_size: usize,
    /// Rent with no buildings.
    pub rent: Cash,
    /// Houses 1-4 then hotel. Streets only.
    #[serde(default)]
    pub building_rents: Vec<Cash>,
    #[serde(default)]
    pub build_cost: Cash,
    #[serde(default)]
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub mortgaged: bool,
    #[serde(default)]
    pub rent_now: Cash,
    #[serde(default)]
    pub buildings: u8,
}

impl Property {
    pub fn is_owned(&self) -> bool { self.owner.is_some() }

    /// Adds one building and refreshes `rent_now`. Returns the new count.
    pub(crate) fn add_building(&mut self) -> u8 {
        self.buildings = (self.buildings + 1).min(MAX_BUILDINGS);
        self.rent_now = street_rent(self.rent, &self.building_rents, self.buildings);
        self.buildings
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "class")]
pub enum Space {
    Street(Property),
    Railroad(Property),
    Utility(Property),
    Tax { name: String, tax: Cash },
    Chance,
    Chest,
    Jail { name: String },
    Idle { name: String },
}

impl Space {
    pub fn property(&self) -> Option<&Property> {
        match self {
            Space::Street(p) | Space::Railroad(p) | Space::Utility(p) => Some(p),
            _ => None,
        }
    }

    pub fn property_mut(&mut self) -> Option<&mut Property> {
        match self {
            Space::Street(p) | Space::Railroad(p) | Space::Utility(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_street(&self) -> bool { matches!(self, Space::Street(_)) }

    pub fn name(&self) -> &str {
        match self {
            Space::Street(p) | Space::Railroad(p) | Space::Utility(p) => p.name.as_str(),
            Space::Tax { name, .. } | Space::Jail { name } | Space::Idle { name } => name.as_str(),
            Space::Chance => "Chance",
            Space::Chest => "Community Chest",
        }
    }
}

pub enum BoardSource<'a> {
    Standard,
    Path(PathBuf),
    Json(&'a str),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    spaces: Vec<Space>,
}

impl Board {
    pub fn load(source: BoardSource<'_>) -> Result<Self, BoardError> {
        let spaces: Vec<Space> = match source {
            BoardSource::Standard => serde_json::from_str(STANDARD_BOARD)?,
            BoardSource::Path(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            BoardSource::Json(json) => serde_json::from_str(json)?,
        };
        Self::from_spaces(spaces)
    }

    pub fn standard() -> Result<Self, BoardError> { Self::load(BoardSource::Standard) }

    /// Validates the layout and resets every property to its unowned state.
    pub fn from_spaces(mut spaces: Vec<Space>) -> Result<Self, BoardError> {
        if spaces.len() != BOARD_SIZE {
            return Err(BoardError::WrongSize { expected: BOARD_SIZE, found: spaces.len() });
        }

        let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for space in &spaces {
            if let Space::Street(p) = space {
                if p.building_rents.len() != MAX_BUILDINGS as usize {
                    return Err(BoardError::RentTiers { name: p.name.clone(), found: p.building_rents.len() });
                }
            }
            if let Some(p) = space.property() {
                let entry = groups.entry(p.group.as_str()).or_insert((p.group_size, 0));
                entry.1 += 1;
            }
        }
        for (group, (declared, found)) in groups {
            if declared != found {
                return Err(BoardError::GroupSize { group: group.to_string(), declared, found });
            }
        }

        for p in spaces.iter_mut().filter_map(Space::property_mut) {
            p.owner = None;
            p.mortgaged = false;
            p.buildings = 0;
            p.rent_now = p.rent;
        }
        Ok(Self { spaces })
    }

    pub fn len(&self) -> usize { self.spaces.len() }

    pub fn is_empty(&self) -> bool { self.spaces.is_empty() }

    pub fn space(&self, position: usize) -> &Space { &self.spaces[position % BOARD_SIZE] }

    pub fn space_mut(&mut self, position: usize) -> &mut Space { &mut self.spaces[position % BOARD_SIZE] }

    pub fn property(&self, position: usize) -> Option<&Property> { self.space(position).property() }

    pub fn property_mut(&mut self, position: usize) -> Option<&mut Property> { self.space_mut(position).property_mut() }

    pub fn spaces(&self) -> &[Space] { &self.spaces }

    /// Positions of every property in `group`.
    pub fn group_positions<'a>(&'a self, group: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.spaces
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.property().is_some_and(|p| p.group == group))
            .map(|(i, _)| i)
    }
}
