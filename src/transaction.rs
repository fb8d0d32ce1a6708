use crate::denomination::Denomination;
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub customer: usize,
    pub amount: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Stopped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => f.write_str("Transaction accepted!"),
            Outcome::Stopped => f.write_str("Transaction stopped!"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The greedy choice had no units left in the till.
    Exhausted(Denomination),
    /// No denomination in the set is small enough for what remained.
    NoDenomination,
}

/// Units handed out for one request, as a count per denomination in the
/// order they were first taken.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dispensed {
    counts: SmallVec<[(Denomination, u64); 8]>,
}

impl Dispensed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, denomination: Denomination) {
        if let Some((last, count)) = self.counts.last_mut() {
            if *last == denomination {
                *count += 1;
                return;
            }
        }
        self.counts.push((denomination, 1));
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        self.counts.iter().copied()
    }

    pub fn units(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn value(&self) -> u64 {
        self.counts.iter().map(|(d, count)| d.value() * count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub request: WithdrawalRequest,
    pub outcome: Outcome,
    // kept for stopped requests too: nothing is put back into the till
    pub dispensed: Dispensed,
    pub remaining: u64,
    pub stop_reason: Option<StopReason>,
}

impl Receipt {
    pub fn dispensed_value(&self) -> u64 {
        self.dispensed.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denomination(value: u64) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_repeated_units_share_an_entry() {
        let mut dispensed = Dispensed::new();
        for _ in 0..1_000 {
            dispensed.add(denomination(100));
        }
        dispensed.add(denomination(20));
        dispensed.add(denomination(20));
        dispensed.add(denomination(1));

        let entries: Vec<(u64, u64)> = dispensed.iter().map(|(d, c)| (d.value(), c)).collect();
        assert_eq!(entries, vec![(100, 1_000), (20, 2), (1, 1)]);
        assert_eq!(dispensed.units(), 1_003);
        assert_eq!(dispensed.value(), 100_041);
    }

    #[test]
    fn test_empty_breakdown() {
        let dispensed = Dispensed::new();
        assert!(dispensed.is_empty());
        assert_eq!(dispensed.units(), 0);
        assert_eq!(dispensed.value(), 0);
    }
}
