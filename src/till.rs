use crate::denomination::{Denomination, DenominationSet};
use crate::error::TillError;
use indexmap::IndexMap;

/// The till's inventory: how many units of each denomination are on hand.
pub struct Till {
    set: DenominationSet,
    counts: IndexMap<Denomination, u64>,
    initial: IndexMap<Denomination, u64>,
    book: TillBook,
}

/// Running totals of what left the till.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TillBook {
    pub dispensed_value: u128,
    pub dispensed_units: u64,
}

/// One row of the end-of-run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenominationSummary {
    pub denomination: Denomination,
    pub initial: u64,
    pub remaining: u64,
}

impl DenominationSummary {
    pub fn dispensed(&self) -> u64 {
        self.initial - self.remaining
    }
}

impl Till {
    pub fn empty(set: DenominationSet) -> Self {
        let counts: IndexMap<Denomination, u64> = set.iter().map(|d| (d, 0)).collect();
        Till {
            initial: counts.clone(),
            counts,
            set,
            book: TillBook::default(),
        }
    }

    /// Stocks the till from `(value, count)` pairs. Denominations not listed
    /// start empty.
    pub fn from_counts<I>(set: DenominationSet, counts: I) -> Result<Self, TillError>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut till = Till::empty(set);
        for (value, count) in counts {
            let denomination = till
                .set
                .get(value)
                .ok_or(TillError::UnknownDenomination(value))?;
            till.counts.insert(denomination, count);
            till.initial.insert(denomination, count);
        }
        Ok(till)
    }

    /// Stocks the till from counts listed smallest denomination first.
    pub fn from_ascending_counts(set: DenominationSet, counts: &[u64]) -> Result<Self, TillError> {
        if counts.len() != set.len() {
            return Err(TillError::CountMismatch {
                expected: set.len(),
                actual: counts.len(),
            });
        }
        let pairs: Vec<(u64, u64)> = set
            .ascending()
            .map(Denomination::value)
            .zip(counts.iter().copied())
            .collect();
        Till::from_counts(set, pairs)
    }

    pub fn denominations(&self) -> &DenominationSet {
        &self.set
    }

    pub fn book(&self) -> &TillBook {
        &self.book
    }

    pub fn count(&self, value: u64) -> u64 {
        self.set
            .get(value)
            .and_then(|d| self.counts.get(&d).copied())
            .unwrap_or(0)
    }

    pub fn initial_count(&self, value: u64) -> u64 {
        self.set
            .get(value)
            .and_then(|d| self.initial.get(&d).copied())
            .unwrap_or(0)
    }

    /// Removes a single unit. Returns false, leaving the till untouched, when
    /// none are left.
    pub fn take(&mut self, denomination: Denomination) -> bool {
        let Some(count) = self.counts.get_mut(&denomination) else {
            return false;
        };
        if *count == 0 {
            return false;
        }
        *count -= 1;
        self.book.dispensed_value += denomination.value() as u128;
        self.book.dispensed_units += 1;
        true
    }

    pub fn total_value(&self) -> u128 {
        value_of(&self.counts)
    }

    pub fn initial_value(&self) -> u128 {
        value_of(&self.initial)
    }

    pub fn dispensed_value(&self) -> u128 {
        self.book.dispensed_value
    }

    /// Largest-first view of the current counts.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }

    pub fn summary(&self) -> Vec<DenominationSummary> {
        self.counts
            .iter()
            .map(|(denomination, remaining)| DenominationSummary {
                denomination: *denomination,
                initial: self.initial.get(denomination).copied().unwrap_or(0),
                remaining: *remaining,
            })
            .collect()
    }
}

fn value_of(counts: &IndexMap<Denomination, u64>) -> u128 {
    counts
        .iter()
        .map(|(d, c)| d.value() as u128 * *c as u128)
        .sum()
}
