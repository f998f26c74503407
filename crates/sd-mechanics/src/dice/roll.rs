//! Dice roll results.

/// The result of rolling a dice expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollResult {
    /// Die values that count toward the total.
    pub kept: Vec<u32>,
    /// Die values from the losing pool of an advantage/disadvantage roll.
    pub discarded: Vec<u32>,
    /// Flat modifier added to the total.
    pub modifier: i32,
}

impl RollResult {
    /// Sum of kept dice plus the modifier.
    pub fn total(&self) -> i64 {
        self.kept.iter().map(|&v| i64::from(v)).sum::<i64>() + i64::from(self.modifier)
    }

}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.kept.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))?;
        match self.modifier {
            0 => {}
            m if m > 0 => write!(f, " + {m}")?,
            m => write!(f, " - {}", m.unsigned_abs())?,
        }
        write!(f, " = {}", self.total())
    }
}
