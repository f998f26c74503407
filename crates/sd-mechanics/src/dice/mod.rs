//! Dice types, expressions, and the randomness source.
//!
//! Supports standard polyhedral dice and `XdY+Z` expressions rolled
//! normally, with advantage (best of two), or with disadvantage (worst of two).

pub mod roll;
pub mod source;

pub use roll::RollResult;
pub use source::{RandomSource, ScriptedRandom, SeededRandom};

use crate::error::{MechError, MechResult};

/// Most dice a single expression may roll.
pub const MAX_DICE: u32 = 100;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Parse a die from a string like "d20", "d6", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "d4" => Some(Self::D4),
            "d6" => Some(Self::D6),
            "d8" => Some(Self::D8),
            "d10" => Some(Self::D10),
            "d12" => Some(Self::D12),
            "d20" => Some(Self::D20),
            "d100" => Some(Self::D100),
            other => {
                let num = other.strip_prefix('d')?.parse::<u32>().ok()?;
                if num >= 2 {
                    Some(Self::Custom(num))
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// How many times a pool is rolled and which result is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollMode {
    /// Roll once.
    #[default]
    Normal,
    /// Roll twice, keep the higher total.
    Advantage,
    /// Roll twice, keep the lower total.
    Disadvantage,
}

/// A dice expression: `count` dice of one type plus a flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of dice.
    pub count: u32,
    /// Die type.
    pub die: Die,
    /// Flat modifier added to the total.
    pub modifier: i32,
    /// Normal, advantage, or disadvantage.
    pub mode: RollMode,
}

impl DiceRoll {
    /// A single die with no modifier.
    pub fn single(die: Die) -> Self {
        Self {
            count: 1,
            die,
            modifier: 0,
            mode: RollMode::Normal,
        }
    }

    /// Set the roll mode.
    pub fn with_mode(mut self, mode: RollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse notation like `2d6+1`, `d20`, or `3d8-2`.
    pub fn parse(input: &str) -> MechResult<Self> {
        let expr: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let expr = expr.to_lowercase();
        let invalid = || MechError::InvalidDiceExpression(input.trim().to_string());

        let d_pos = expr.find('d').ok_or_else(invalid)?;
        let count = match &expr[..d_pos] {
            "" => 1,
            n => n.parse::<u32>().map_err(|_| invalid())?,
        };
        if count == 0 || count > MAX_DICE {
            return Err(invalid());
        }

        let rest = &expr[d_pos..];
        let (die_part, modifier) = match rest.find(['+', '-']) {
            Some(pos) => {
                let modifier = rest[pos..].parse::<i32>().map_err(|_| invalid())?;
                (&rest[..pos], modifier)
            }
            None => (rest, 0),
        };
        let die = Die::from_str_tag(die_part).ok_or_else(invalid)?;

        Ok(Self {
            count,
            die,
            modifier,
            mode: RollMode::Normal,
        })
    }

    /// Roll the expression using the given source.
    pub fn roll(&self, source: &mut impl RandomSource) -> RollResult {
        let first = self.roll_pool(source);
        let (kept, discarded) = match self.mode {
            RollMode::Normal => (first, Vec::new()),
            RollMode::Advantage | RollMode::Disadvantage => {
                let second = self.roll_pool(source);
                let first_sum: u64 = first.iter().map(|&v| u64::from(v)).sum();
                let second_sum: u64 = second.iter().map(|&v| u64::from(v)).sum();
                let keep_first = if self.mode == RollMode::Advantage {
                    first_sum >= second_sum
                } else {
                    first_sum <= second_sum
                };
                if keep_first {
                    (first, second)
                } else {
                    (second, first)
                }
            }
        };
        RollResult {
            kept,
            discarded,
            modifier: self.modifier,
        }
    }

    fn roll_pool(&self, source: &mut impl RandomSource) -> Vec<u32> {
        (0..self.count)
            .map(|_| source.roll_die(self.die.sides()))
            .collect()
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D20.sides(), 20);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(30).sides(), 30);
    }

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d20"), Some(Die::D20));
        assert_eq!(Die::from_str_tag("D6"), Some(Die::D6));
        assert_eq!(Die::from_str_tag("d30"), Some(Die::Custom(30)));
        assert_eq!(Die::from_str_tag("d1"), None);
        assert_eq!(Die::from_str_tag("foo"), None);
    }

    #[test]
    fn parse_expressions() {
        let r = DiceRoll::parse("2d6+1").unwrap();
        assert_eq!((r.count, r.die, r.modifier), (2, Die::D6, 1));

        let r = DiceRoll::parse("d20").unwrap();
        assert_eq!((r.count, r.die, r.modifier), (1, Die::D20, 0));

        let r = DiceRoll::parse(" 3D8 - 2 ").unwrap();
        assert_eq!((r.count, r.die, r.modifier), (3, Die::D8, -2));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "6", "0d6", "2d", "2d1", "xd6", "2d6+", "2d6+x", "101d6"] {
            assert!(
                matches!(DiceRoll::parse(bad), Err(MechError::InvalidDiceExpression(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn display_roundtrips_notation() {
        assert_eq!(DiceRoll::parse("2d6+1").unwrap().to_string(), "2d6+1");
        assert_eq!(DiceRoll::parse("d20").unwrap().to_string(), "1d20");
        assert_eq!(DiceRoll::parse("3d8-2").unwrap().to_string(), "3d8-2");
    }

    #[test]
    fn normal_roll_uses_one_pool() {
        let mut src = ScriptedRandom::new().with_rolls([3, 5]);
        let result = DiceRoll::parse("2d6+1").unwrap().roll(&mut src);
        assert_eq!(result.kept, vec![3, 5]);
        assert!(result.discarded.is_empty());
        assert_eq!(result.total(), 9);
    }

    #[test]
    fn advantage_keeps_higher_pool() {
        let mut src = ScriptedRandom::new().with_rolls([2, 6]);
        let result = DiceRoll::single(Die::D6)
            .with_mode(RollMode::Advantage)
            .roll(&mut src);
        assert_eq!(result.kept, vec![6]);
        assert_eq!(result.discarded, vec![2]);
    }

    #[test]
    fn disadvantage_keeps_lower_pool() {
        let mut src = ScriptedRandom::new().with_rolls([2, 6]);
        let result = DiceRoll::single(Die::D6)
            .with_mode(RollMode::Disadvantage)
            .roll(&mut src);
        assert_eq!(result.kept, vec![2]);
        assert_eq!(result.discarded, vec![6]);
    }

    #[test]
    fn advantage_on_huge_dice_compares_full_totals() {
        let mut src = ScriptedRandom::new().with_rolls([4_000_000_000, 4_000_000_000, 1, 1]);
        let result = DiceRoll::parse("2d4294967295")
            .unwrap()
            .with_mode(RollMode::Advantage)
            .roll(&mut src);
        assert_eq!(result.kept, vec![4_000_000_000, 4_000_000_000]);
        assert_eq!(result.discarded, vec![1, 1]);
        assert_eq!(result.total(), 8_000_000_000);

        let mut src = ScriptedRandom::new().with_rolls([4_000_000_000, 4_000_000_000, 1, 1]);
        let result = DiceRoll::parse("2d4294967295")
            .unwrap()
            .with_mode(RollMode::Disadvantage)
            .roll(&mut src);
        assert_eq!(result.kept, vec![1, 1]);
    }

    #[test]
    fn seeded_rolls_in_range() {
        let mut src = SeededRandom::new(42);
        let expr = DiceRoll::parse("10d6").unwrap();
        for _ in 0..50 {
            let result = expr.roll(&mut src);
            assert_eq!(result.kept.len(), 10);
            assert!(result.kept.iter().all(|v| (1..=6).contains(v)));
        }
    }
}
