//! Outcome tables for unarmed attacks.
//!
//! Each table maps a clamped 2-6 roll to what the blow did: a descriptor,
//! damage, where it landed, and the modifier the attacker carries into
//! their next roll.

use sd_core::BodyLocation;

use crate::error::{MechError, MechResult};

/// Lowest roll after clamping.
pub const MIN_ROLL: u32 = 2;
/// Highest roll after clamping.
pub const MAX_ROLL: u32 = 6;

/// One row of an outcome table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeRow {
    /// Short name for the result, e.g. "Solid Hit".
    pub descriptor: &'static str,
    /// Strength the defender loses.
    pub damage: u32,
    /// Where the blow lands.
    pub location: BodyLocation,
    /// Shift applied to the attacker's next roll.
    pub next_round_modifier: i32,
}

/// What an unresolvable roll turns into.
pub const MISS: OutcomeRow = OutcomeRow {
    descriptor: "Miss",
    damage: 0,
    location: BodyLocation::Chest,
    next_round_modifier: 0,
};

/// An immutable roll-to-outcome table covering rolls 2 through 6.
#[derive(Debug)]
pub struct BrawlingTable {
    name: &'static str,
    rows: [OutcomeRow; 5],
}

impl BrawlingTable {
    /// Table name, e.g. "punching".
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up the row for a clamped roll.
    pub fn row(&self, roll: u32) -> MechResult<&OutcomeRow> {
        roll.checked_sub(MIN_ROLL)
            .and_then(|i| self.rows.get(i as usize))
            .ok_or(MechError::InvalidTableLookup { roll })
    }

    /// Look up a row, resolving anything outside the table as a miss.
    ///
    /// Reaching the fallback means a roll escaped the clamp; it is logged
    /// as an error rather than passed off as a normal miss.
    pub fn row_or_miss(&self, roll: u32) -> &OutcomeRow {
        match self.row(roll) {
            Ok(row) => row,
            Err(err) => {
                tracing::error!(table = self.name, roll, %err, "outcome lookup fell back to a miss");
                &MISS
            }
        }
    }

    /// All rows with their rolls, lowest first.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &OutcomeRow)> {
        (MIN_ROLL..).zip(self.rows.iter())
    }
}

/// Outcomes for a punch.
pub static PUNCHING: BrawlingTable = BrawlingTable {
    name: "punching",
    rows: [
        MISS,
        OutcomeRow {
            descriptor: "Glancing Blow",
            damage: 1,
            location: BodyLocation::LeftArm,
            next_round_modifier: 0,
        },
        OutcomeRow {
            descriptor: "Solid Hit",
            damage: 2,
            location: BodyLocation::Chest,
            next_round_modifier: 0,
        },
        OutcomeRow {
            descriptor: "Body Blow",
            damage: 3,
            location: BodyLocation::Abdomen,
            next_round_modifier: 1,
        },
        OutcomeRow {
            descriptor: "Critical Hit",
            damage: 4,
            location: BodyLocation::Head,
            next_round_modifier: 1,
        },
    ],
};

/// Outcomes for a grapple.
pub static GRAPPLING: BrawlingTable = BrawlingTable {
    name: "grappling",
    rows: [
        MISS,
        OutcomeRow {
            descriptor: "Arm Lock",
            damage: 1,
            location: BodyLocation::RightArm,
            next_round_modifier: 0,
        },
        OutcomeRow {
            descriptor: "Headlock",
            damage: 2,
            location: BodyLocation::Head,
            next_round_modifier: 0,
        },
        OutcomeRow {
            descriptor: "Leg Sweep",
            damage: 2,
            location: BodyLocation::LeftLeg,
            next_round_modifier: 1,
        },
        OutcomeRow {
            descriptor: "Bear Hug",
            damage: 3,
            location: BodyLocation::Abdomen,
            next_round_modifier: 1,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_clamped_roll_resolves() {
        for table in [&PUNCHING, &GRAPPLING] {
            for roll in MIN_ROLL..=MAX_ROLL {
                assert!(table.row(roll).is_ok(), "{} missing {roll}", table.name());
            }
        }
    }

    #[test]
    fn out_of_range_is_invalid_lookup() {
        for roll in [0, 1, 7, 100] {
            assert!(matches!(
                PUNCHING.row(roll),
                Err(MechError::InvalidTableLookup { roll: r }) if r == roll
            ));
        }
    }

    #[test]
    fn fallback_is_a_miss() {
        let row = GRAPPLING.row_or_miss(9);
        assert_eq!(row.descriptor, "Miss");
        assert_eq!(row.damage, 0);
    }

    #[test]
    fn lowest_roll_misses_highest_hurts_most() {
        for table in [&PUNCHING, &GRAPPLING] {
            assert_eq!(table.row(MIN_ROLL).unwrap().damage, 0);
            let max = table.rows().map(|(_, r)| r.damage).max().unwrap();
            assert_eq!(table.row(MAX_ROLL).unwrap().damage, max);
        }
    }

    #[test]
    fn rows_iterate_in_roll_order() {
        let rolls: Vec<u32> = PUNCHING.rows().map(|(roll, _)| roll).collect();
        assert_eq!(rolls, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn solid_hit_row() {
        let row = PUNCHING.row(4).unwrap();
        assert_eq!(row.descriptor, "Solid Hit");
        assert_eq!(row.damage, 2);
        assert_eq!(row.location, BodyLocation::Chest);
        assert_eq!(row.next_round_modifier, 0);
    }
}
