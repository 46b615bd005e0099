//! Minimum coin change by exact dynamic programming.
//!
//! Greedy selection is only optimal for canonical coin systems such as
//! {1, 5, 10, 25}. For {1, 3, 4} greedy makes 6 as 4 + 1 + 1 while the
//! optimum is 3 + 3, so every amount from 0 to the target is solved exactly:
//!
//! 1. `counts[0] = 0`, every other amount starts unreachable
//! 2. `counts[a] = min(counts[a - d] + 1)` over denominations `d <= a`
//! 3. `choice[a]` records the denomination achieving the minimum
//! 4. The combination is rebuilt by repeatedly subtracting `choice[a]`
//!
//! Time is O(target x denominations) and space O(target), both in smallest
//! units, so the target is checked against [`SolverLimits`] before the
//! tables are allocated.

use super::error::ChangeError;
use super::types::{ChangeOutcome, ChangeSolution, NormalizedInput, SolverLimits, Units};

const UNREACHABLE: u32 = u32::MAX;

/// Exact minimum-coin solver over normalized integer inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinCoinSolver {
    limits: SolverLimits,
}

impl MinCoinSolver {
    /// Creates a solver bounded by `limits`.
    #[must_use]
    pub const fn new(limits: SolverLimits) -> Self {
        Self { limits }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> &SolverLimits {
        &self.limits
    }

    /// Finds the fewest coins summing exactly to `input.target`.
    ///
    /// When two denominations give the same count for an amount the larger
    /// one wins, so results are deterministic and favour bigger coins.
    /// Coins are returned largest first.
    pub fn solve(&self, input: &NormalizedInput) -> Result<ChangeOutcome, ChangeError> {
        if input.target == 0 {
            return Ok(ChangeOutcome::Solved(ChangeSolution::empty(input.scale)));
        }

        let target = self.table_size(input.target)?;

        // (index into input.denominations, units). Denominations larger than
        // the target can never be used. Input order is descending, which the
        // tie-break relies on.
        let usable: Vec<(usize, usize)> = input
            .denominations
            .iter()
            .enumerate()
            .filter_map(|(index, d)| usize::try_from(d.units).ok().map(|units| (index, units)))
            .filter(|&(_, units)| units <= target)
            .collect();

        let mut counts = vec![UNREACHABLE; target + 1];
        let mut choice = vec![0usize; target + 1];
        counts[0] = 0;

        for amount in 1..=target {
            for (slot, &(_, units)) in usable.iter().enumerate() {
                if units > amount {
                    continue;
                }
                let previous = counts[amount - units];
                if previous == UNREACHABLE {
                    continue;
                }
                // Strictly smaller only: an equal count keeps the larger coin.
                if previous + 1 < counts[amount] {
                    counts[amount] = previous + 1;
                    choice[amount] = slot;
                }
            }
        }

        if counts[target] == UNREACHABLE {
            return Ok(ChangeOutcome::Unreachable {
                amount: input.amount,
            });
        }

        Ok(ChangeOutcome::Solved(Self::reconstruct(
            input, &usable, &choice, target,
        )))
    }

    /// Converts the target into a table length, enforcing the size ceiling.
    fn table_size(&self, target: Units) -> Result<usize, ChangeError> {
        let limit = self.limits.max_table_entries;
        usize::try_from(target)
            .ok()
            .filter(|&t| t < limit && u32::try_from(t).is_ok_and(|t| t < UNREACHABLE))
            .ok_or_else(|| {
                ChangeError::ResourceLimitExceeded(format!(
                    "target of {target} units needs more than the {limit} table entries allowed"
                ))
            })
    }

    fn reconstruct(
        input: &NormalizedInput,
        usable: &[(usize, usize)],
        choice: &[usize],
        target: usize,
    ) -> ChangeSolution {
        let mut picked: Vec<usize> = Vec::new();
        let mut remaining = target;
        while remaining > 0 {
            let (index, units) = usable[choice[remaining]];
            picked.push(index);
            remaining -= units;
        }
        // Lower index means larger coin.
        picked.sort_unstable();

        let (coins, units) = picked
            .into_iter()
            .map(|index| {
                let denomination = input.denominations[index];
                (denomination.value, denomination.units)
            })
            .unzip();

        let solution = ChangeSolution {
            coins,
            units,
            scale: input.scale,
        };
        debug_assert_eq!(solution.total_units(), input.target);
        solution
    }
}
