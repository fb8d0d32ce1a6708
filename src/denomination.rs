use crate::error::TillError;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;

lazy_static! {
    static ref STANDARD_DENOMINATIONS: DenominationSet = DenominationSet {
        values: [100, 50, 20, 10, 5, 2, 1].into_iter().map(Denomination).collect(),
    };
}

/// Largest search range `check_greedy` will allocate for.
pub const MAX_GREEDY_CHECK_BOUND: u64 = 1 << 20;

/// Result of checking whether greedy dispensing is optimal for a set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GreedyCheck {
    Optimal,
    /// Smallest amount greedy handles worse than the best combination.
    Counterexample(u64),
    /// The search range is too large to scan; `None` if it overflows `u64`.
    Skipped { bound: Option<u64> },
}

/// One discrete unit of currency, e.g. a 20 note or a 2 coin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Denomination(u64);

impl Denomination {
    pub fn new(value: u64) -> Result<Self, TillError> {
        if value == 0 {
            return Err(TillError::ZeroDenomination);
        }
        Ok(Denomination(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The denominations a till can hold, kept largest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationSet {
    values: Vec<Denomination>,
}

impl DenominationSet {
    pub fn new<I: IntoIterator<Item = u64>>(values: I) -> Result<Self, TillError> {
        let mut seen = HashSet::new();
        let mut denominations = vec![];
        for value in values {
            let denomination = Denomination::new(value)?;
            if !seen.insert(value) {
                return Err(TillError::DuplicateDenomination(value));
            }
            denominations.push(denomination);
        }
        if denominations.is_empty() {
            return Err(TillError::EmptyDenominationSet);
        }
        denominations.sort_unstable_by(|a, b| b.cmp(a));
        Ok(Self {
            values: denominations,
        })
    }

    /// 100, 50, 20, 10, 5, 2 and 1.
    pub fn standard() -> Self {
        STANDARD_DENOMINATIONS.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, value: u64) -> Option<Denomination> {
        self.values.iter().copied().find(|d| d.value() == value)
    }

    /// Largest-first, the order dispensing scans in.
    pub fn iter(&self) -> impl Iterator<Item = Denomination> + '_ {
        self.values.iter().copied()
    }

    /// Smallest-first, the order initial counts are read in.
    pub fn ascending(&self) -> impl Iterator<Item = Denomination> + '_ {
        self.values.iter().rev().copied()
    }

    pub fn largest_at_most(&self, amount: u64) -> Option<Denomination> {
        self.iter().find(|d| d.value() <= amount)
    }

    /// Looks for the smallest amount where greedy dispensing from an
    /// unlimited supply is not optimal: either it gets stuck where some
    /// combination exists, or it uses more units than needed.
    ///
    /// Any counterexample is smaller than the sum of the two largest values
    /// (Kozen and Zaks), so only that range is searched. Sets whose bound
    /// exceeds `MAX_GREEDY_CHECK_BOUND` are not searched.
    pub fn check_greedy(&self) -> GreedyCheck {
        if self.values.len() < 2 {
            return GreedyCheck::Optimal;
        }
        let bound = match self.values[0].value().checked_add(self.values[1].value()) {
            Some(bound) if bound <= MAX_GREEDY_CHECK_BOUND => bound,
            bound => return GreedyCheck::Skipped { bound },
        };

        // fewest[a] = minimal number of units summing to a, if reachable
        let mut fewest: Vec<Option<u64>> = vec![None; bound as usize];
        fewest[0] = Some(0);
        for amount in 1..bound {
            let best = self
                .iter()
                .filter(|d| d.value() <= amount)
                .filter_map(|d| fewest[(amount - d.value()) as usize])
                .min()
                .map(|units| units + 1);
            fewest[amount as usize] = best;
        }

        let counterexample = (1..bound).find(|&amount| match fewest[amount as usize] {
            None => false,
            Some(optimal) => match self.greedy_units(amount) {
                None => true,
                Some(greedy) => greedy > optimal,
            },
        });
        match counterexample {
            Some(amount) => GreedyCheck::Counterexample(amount),
            None => GreedyCheck::Optimal,
        }
    }

    fn greedy_units(&self, mut amount: u64) -> Option<u64> {
        let mut units = 0;
        while amount > 0 {
            let denomination = self.largest_at_most(amount)?;
            units += amount / denomination.value();
            amount %= denomination.value();
        }
        Some(units)
    }
}
