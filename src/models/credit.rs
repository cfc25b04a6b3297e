//! Credit ledger operations

/// A change to a credit balance. Results are clamped to `0..=u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditChange {
    /// Absolute override (admin)
    Set(i64),
    /// Relative adjustment (booking, cancellation, admin +/-)
    Delta(i64),
}

impl CreditChange {
    pub fn apply(self, current: u32) -> u32 {
        let next = match self {
            CreditChange::Set(value) => value,
            CreditChange::Delta(delta) => i64::from(current).saturating_add(delta),
        };
        next.clamp(0, i64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_clamps_at_zero() {
        assert_eq!(CreditChange::Delta(-1).apply(0), 0);
        assert_eq!(CreditChange::Delta(-5).apply(3), 0);
        assert_eq!(CreditChange::Delta(2).apply(3), 5);
    }

    #[test]
    fn test_set_overrides() {
        assert_eq!(CreditChange::Set(10).apply(3), 10);
        assert_eq!(CreditChange::Set(-4).apply(3), 0);
    }

    #[test]
    fn test_sequence_never_negative() {
        let changes = [
            CreditChange::Delta(3),
            CreditChange::Delta(-7),
            CreditChange::Set(1),
            CreditChange::Delta(-1),
            CreditChange::Delta(-1),
            CreditChange::Delta(i64::MIN),
            CreditChange::Delta(i64::MAX),
        ];
        let mut balance = 0u32;
        let mut seen = Vec::new();
        for change in changes {
            balance = change.apply(balance);
            seen.push(balance);
        }
        assert_eq!(seen, vec![3, 0, 1, 0, 0, 0, u32::MAX]);
    }
}
