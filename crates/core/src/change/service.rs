//! Change service tying normalization and solving together.

use coinchange_shared::SolverConfig;
use rust_decimal::Decimal;

use super::error::ChangeError;
use super::normalize::normalize;
use super::solver::MinCoinSolver;
use super::types::{ChangeOutcome, NormalizedInput, ScalePolicy, SolverLimits};

/// Computes minimum coin change for decimal requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeService {
    policy: ScalePolicy,
    solver: MinCoinSolver,
}

impl ChangeService {
    /// Creates a new change service.
    #[must_use]
    pub const fn new(policy: ScalePolicy, limits: SolverLimits) -> Self {
        Self {
            policy,
            solver: MinCoinSolver::new(limits),
        }
    }

    /// Returns the scale policy.
    #[must_use]
    pub const fn policy(&self) -> ScalePolicy {
        self.policy
    }

    /// Returns the solver limits.
    #[must_use]
    pub const fn limits(&self) -> &SolverLimits {
        self.solver.limits()
    }

    /// Converts a request into integer units.
    pub fn normalize(
        &self,
        amount: Option<Decimal>,
        denominations: &[Decimal],
    ) -> Result<NormalizedInput, ChangeError> {
        normalize(amount, denominations, self.policy, self.solver.limits())
    }

    /// Solves an already normalized request.
    pub fn solve(&self, input: &NormalizedInput) -> Result<ChangeOutcome, ChangeError> {
        self.solver.solve(input)
    }

    /// Normalizes and solves a request in one step.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use coinchange_core::change::ChangeService;
    ///
    /// let outcome = ChangeService::default()
    ///     .make_change(Some(dec!(6)), &[dec!(1), dec!(3), dec!(4)])
    ///     .unwrap();
    /// assert_eq!(outcome.solution().unwrap().coins, vec![dec!(3), dec!(3)]);
    /// ```
    pub fn make_change(
        &self,
        amount: Option<Decimal>,
        denominations: &[Decimal],
    ) -> Result<ChangeOutcome, ChangeError> {
        let input = self.normalize(amount, denominations)?;
        self.solve(&input)
    }
}

impl From<&SolverConfig> for ChangeService {
    fn from(config: &SolverConfig) -> Self {
        Self::new(
            ScalePolicy::from(config.scale),
            SolverLimits {
                max_scale: config.max_scale,
                max_table_entries: config.max_table_entries,
                max_denominations: config.max_denominations,
            },
        )
    }
}
