//! Tunable constants of the allocation rules.

use leave_shared::AllocationConfig;
use rust_decimal::Decimal;

/// Allocation rule settings, usually built from [`AllocationConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// User-entered allocations must be a multiple of this step.
    pub step: Decimal,
    /// Row limit of the prior-allocation query when carry-forward never expires.
    ///
    /// Only the most recent row sizes the carry-forward; the limit bounds
    /// what a store has to fetch and must be at least 1.
    pub chained_lookback: usize,
    /// Row limit of the prior-allocation query when carry-forward has a finite expiry.
    pub expiring_lookback: usize,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::from(&AllocationConfig::default())
    }
}

impl From<&AllocationConfig> for AllocationPolicy {
    fn from(config: &AllocationConfig) -> Self {
        Self {
            step: config.step,
            chained_lookback: config.chained_lookback.max(1),
            expiring_lookback: config.expiring_lookback.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy() {
        let policy = AllocationPolicy::default();
        assert_eq!(policy.step, dec!(0.5));
        assert_eq!(policy.chained_lookback, 2);
        assert_eq!(policy.expiring_lookback, 1);
    }

    #[test]
    fn test_lookback_is_at_least_one() {
        let config = AllocationConfig {
            step: dec!(1),
            chained_lookback: 0,
            expiring_lookback: 0,
        };
        let policy = AllocationPolicy::from(&config);
        assert_eq!(policy.chained_lookback, 1);
        assert_eq!(policy.expiring_lookback, 1);
    }
}
