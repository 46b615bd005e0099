//! Types for minimum coin change computation.

use rust_decimal::Decimal;
use serde::Serialize;

/// Integer count of the smallest currency unit.
pub type Units = u128;

/// How the smallest currency unit is chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalePolicy {
    /// Always use this many decimal places (e.g. 2 for cents).
    Fixed(u32),
    /// Use the largest number of decimal places present across all inputs.
    #[default]
    Inferred,
}

impl From<Option<u32>> for ScalePolicy {
    fn from(scale: Option<u32>) -> Self {
        scale.map_or(Self::Inferred, Self::Fixed)
    }
}

/// Ceilings that keep a single request's work bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverLimits {
    /// Largest scale accepted, fixed or inferred.
    pub max_scale: u32,
    /// Maximum DP table entries (target units + 1).
    pub max_table_entries: usize,
    /// Maximum number of distinct denominations.
    pub max_denominations: usize,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_scale: 8,
            max_table_entries: 1_000_000,
            max_denominations: 256,
        }
    }
}

/// A coin value in both integer units and display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Denomination {
    /// Value in smallest units at the input's scale.
    pub units: Units,
    /// Decimal value with trailing zeros removed.
    pub value: Decimal,
}

/// Request after conversion to the integer domain.
///
/// Denominations are distinct and sorted by descending value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedInput {
    /// Decimal places of the smallest unit.
    pub scale: u32,
    /// Target amount in smallest units.
    pub target: Units,
    /// Target amount as given, trailing zeros removed.
    pub amount: Decimal,
    /// Usable coin values, largest first.
    pub denominations: Vec<Denomination>,
}

/// A minimum-cardinality set of coins summing exactly to the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSolution {
    /// Coins in decimal form, largest first.
    pub coins: Vec<Decimal>,
    /// The same coins in smallest units.
    pub units: Vec<Units>,
    /// Decimal places of the smallest unit.
    pub scale: u32,
}

impl ChangeSolution {
    /// Empty solution for a zero target.
    #[must_use]
    pub const fn empty(scale: u32) -> Self {
        Self {
            coins: Vec::new(),
            units: Vec::new(),
            scale,
        }
    }

    /// Number of coins used.
    #[must_use]
    pub fn coin_count(&self) -> usize {
        self.coins.len()
    }

    /// Returns true if no coins are needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Sum of the coins in smallest units.
    #[must_use]
    pub fn total_units(&self) -> Units {
        self.units.iter().sum()
    }
}

/// Result of a well-formed change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// An optimal combination was found.
    Solved(ChangeSolution),
    /// No combination of the denominations makes the amount exactly.
    Unreachable {
        /// The requested amount.
        amount: Decimal,
    },
}

impl ChangeOutcome {
    /// Returns the solution, if any.
    #[must_use]
    pub const fn solution(&self) -> Option<&ChangeSolution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Unreachable { .. } => None,
        }
    }

    /// Returns true if the amount cannot be made exactly.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}
