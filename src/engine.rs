use crate::till::Till;
use crate::transaction::{Dispensed, Outcome, Receipt, StopReason, WithdrawalRequest};
use tracing::{debug, trace};

/// Serves withdrawal requests one after another from a single till.
///
/// Dispensing is greedy: the largest denomination not exceeding what is still
/// owed is always chosen, and a request stops as soon as that denomination
/// has run out. There is no backtracking and no rollback, so a stopped
/// request keeps whatever it already took out of the till.
pub struct TillSimulator {
    till: Till,
}

impl TillSimulator {
    pub fn new(till: Till) -> Self {
        Self { till }
    }

    pub fn till(&self) -> &Till {
        &self.till
    }

    pub fn into_till(self) -> Till {
        self.till
    }

    pub fn process(&mut self, amount: u64) -> Outcome {
        self.dispense(WithdrawalRequest {
            customer: 0,
            amount,
        })
        .outcome
    }

    pub fn dispense(&mut self, request: WithdrawalRequest) -> Receipt {
        let mut remaining = request.amount;
        let mut dispensed = Dispensed::new();

        while remaining > 0 {
            let Some(denomination) = self.till.denominations().largest_at_most(remaining) else {
                return stopped(request, dispensed, remaining, StopReason::NoDenomination);
            };
            if !self.till.take(denomination) {
                return stopped(
                    request,
                    dispensed,
                    remaining,
                    StopReason::Exhausted(denomination),
                );
            }
            trace!(customer = request.customer, %denomination, "dispensed");
            dispensed.add(denomination);
            remaining -= denomination.value();
        }

        debug!(
            customer = request.customer,
            amount = request.amount,
            units = dispensed.units(),
            "transaction accepted"
        );
        Receipt {
            request,
            outcome: Outcome::Accepted,
            dispensed,
            remaining: 0,
            stop_reason: None,
        }
    }

    pub fn run<I>(&mut self, requests: I) -> Vec<Receipt>
    where
        I: IntoIterator<Item = WithdrawalRequest>,
    {
        requests
            .into_iter()
            .map(|request| self.dispense(request))
            .collect()
    }
}

fn stopped(
    request: WithdrawalRequest,
    dispensed: Dispensed,
    remaining: u64,
    reason: StopReason,
) -> Receipt {
    debug!(
        customer = request.customer,
        amount = request.amount,
        remaining,
        ?reason,
        "transaction stopped"
    );
    Receipt {
        request,
        outcome: Outcome::Stopped,
        dispensed,
        remaining,
        stop_reason: Some(reason),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub stopped: usize,
    pub dispensed_value: u128,
}

impl RunSummary {
    pub fn from_receipts(receipts: &[Receipt]) -> Self {
        receipts.iter().fold(RunSummary::default(), |mut s, r| {
            match r.outcome {
                Outcome::Accepted => s.accepted += 1,
                Outcome::Stopped => s.stopped += 1,
            }
            s.dispensed_value += r.dispensed_value() as u128;
            s
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denomination::{Denomination, DenominationSet};

    fn simulator(counts: &[(u64, u64)]) -> TillSimulator {
        let till = Till::from_counts(DenominationSet::standard(), counts.iter().copied()).unwrap();
        TillSimulator::new(till)
    }

    fn requests(amounts: &[u64]) -> Vec<WithdrawalRequest> {
        amounts
            .iter()
            .enumerate()
            .map(|(customer, &amount)| WithdrawalRequest { customer, amount })
            .collect()
    }

    fn outcomes(receipts: &[Receipt]) -> Vec<Outcome> {
        receipts.iter().map(|r| r.outcome).collect()
    }

    #[test]
    fn test_single_note_accepted() {
        let mut sim = simulator(&[(100, 1)]);
        assert_eq!(sim.process(100), Outcome::Accepted);
        assert_eq!(sim.till().count(100), 0);
    }

    #[test]
    fn test_empty_till_stops() {
        let mut sim = simulator(&[]);
        assert_eq!(sim.process(1), Outcome::Stopped);
    }

    #[test]
    fn test_zero_amount_accepted() {
        let mut sim = simulator(&[]);
        let receipt = sim.dispense(WithdrawalRequest {
            customer: 0,
            amount: 0,
        });
        assert_eq!(receipt.outcome, Outcome::Accepted);
        assert!(receipt.dispensed.is_empty());
    }

    #[test]
    fn test_depletion_carries_across_requests() {
        let mut sim = simulator(&[(1, 3)]);
        let receipts = sim.run(requests(&[1, 1, 1, 1]));
        assert_eq!(
            outcomes(&receipts),
            vec![
                Outcome::Accepted,
                Outcome::Accepted,
                Outcome::Accepted,
                Outcome::Stopped
            ]
        );
        assert_eq!(
            receipts[3].stop_reason,
            Some(StopReason::Exhausted(Denomination::new(1).unwrap()))
        );
    }

    #[test]
    fn test_largest_first_breakdown() {
        let mut sim = simulator(&[(100, 1), (50, 1), (20, 2), (5, 1), (2, 1), (1, 1)]);
        let receipt = sim.dispense(WithdrawalRequest {
            customer: 0,
            amount: 198,
        });
        let breakdown: Vec<(u64, u64)> = receipt
            .dispensed
            .iter()
            .map(|(d, count)| (d.value(), count))
            .collect();
        assert_eq!(
            breakdown,
            vec![(100, 1), (50, 1), (20, 2), (5, 1), (2, 1), (1, 1)]
        );
        assert_eq!(receipt.outcome, Outcome::Accepted);
        assert_eq!(sim.till().total_value(), 0);
    }

    #[test]
    fn test_stopped_request_is_not_rolled_back() {
        let mut sim = simulator(&[(100, 1)]);
        let receipt = sim.dispense(WithdrawalRequest {
            customer: 0,
            amount: 101,
        });
        assert_eq!(receipt.outcome, Outcome::Stopped);
        assert_eq!(receipt.dispensed_value(), 100);
        assert_eq!(receipt.remaining, 1);
        assert_eq!(sim.till().count(100), 0);

        // the next customer sees the depleted till
        assert_eq!(sim.process(100), Outcome::Stopped);
    }

    #[test]
    fn test_greedy_does_not_backtrack() {
        // 20 + 20 + 20 would pay 60, but greedy insists on a 50 first
        let mut sim = simulator(&[(20, 3)]);
        let receipt = sim.dispense(WithdrawalRequest {
            customer: 0,
            amount: 60,
        });
        assert_eq!(receipt.outcome, Outcome::Stopped);
        assert_eq!(
            receipt.stop_reason,
            Some(StopReason::Exhausted(Denomination::new(50).unwrap()))
        );
        assert_eq!(sim.till().count(20), 3);
    }

    #[test]
    fn test_greedy_limitation_cases() {
        assert_eq!(simulator(&[(5, 1)]).process(5), Outcome::Accepted);
        assert_eq!(simulator(&[(2, 2)]).process(4), Outcome::Accepted);
        assert_eq!(simulator(&[(2, 1), (5, 1)]).process(6), Outcome::Stopped);
    }

    #[test]
    fn test_no_denomination_small_enough() {
        let set = DenominationSet::new([5, 2]).unwrap();
        let till = Till::from_counts(set, [(5, 1), (2, 5)]).unwrap();
        let mut sim = TillSimulator::new(till);
        let receipt = sim.dispense(WithdrawalRequest {
            customer: 0,
            amount: 6,
        });
        assert_eq!(receipt.outcome, Outcome::Stopped);
        assert_eq!(receipt.stop_reason, Some(StopReason::NoDenomination));
        assert_eq!(receipt.remaining, 1);
    }

    #[test]
    fn test_well_stocked_till_accepts_everything() {
        let counts: Vec<(u64, u64)> = DenominationSet::standard()
            .iter()
            .map(|d| (d.value(), 1_000))
            .collect();
        let mut sim = simulator(&counts);
        let receipts = sim.run(requests(&[1, 3, 8, 17, 88, 99, 123, 250, 999]));
        assert!(receipts.iter().all(|r| r.outcome == Outcome::Accepted));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let till = [(1, 2), (2, 1), (10, 3), (50, 1), (100, 1)];
        let amounts = [3, 60, 151, 2, 12, 1, 7];
        let first = simulator(&till).run(requests(&amounts));
        let second = simulator(&till).run(requests(&amounts));
        assert_eq!(first, second);
    }

    #[test]
    fn test_till_value_never_increases() {
        let mut sim = simulator(&[(1, 4), (5, 2), (20, 2), (100, 1)]);
        let mut last = sim.till().total_value();
        for amount in [26, 3, 100, 40, 9, 1] {
            sim.process(amount);
            let now = sim.till().total_value();
            assert!(now <= last);
            last = now;
        }
        let till = sim.into_till();
        assert_eq!(
            till.total_value() + till.dispensed_value(),
            till.initial_value()
        );
    }

    #[test]
    fn test_large_withdrawal_keeps_compact_breakdown() {
        let mut sim = simulator(&[(100, 2_000_000)]);
        let receipt = sim.dispense(WithdrawalRequest {
            customer: 0,
            amount: 200_000_000,
        });
        assert_eq!(receipt.outcome, Outcome::Accepted);
        let breakdown: Vec<(u64, u64)> = receipt
            .dispensed
            .iter()
            .map(|(d, count)| (d.value(), count))
            .collect();
        assert_eq!(breakdown, vec![(100, 2_000_000)]);
        assert_eq!(receipt.dispensed_value(), 200_000_000);
        assert_eq!(sim.till().count(100), 0);
    }

    #[test]
    fn test_run_summary() {
        let mut sim = simulator(&[(10, 1), (1, 1)]);
        let receipts = sim.run(requests(&[10, 1, 5]));
        let summary = RunSummary::from_receipts(&receipts);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.stopped, 1);
        assert_eq!(summary.dispensed_value, 11);
    }
}
