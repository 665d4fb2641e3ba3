//! Round resolution.

use super::match_record::{Choice, Seat};

/// Result of comparing two choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner(Seat),
    Tie,
}

impl RoundOutcome {
    /// Value written to the `winner` field
    pub fn winner(self) -> Option<Seat> {
        match self {
            RoundOutcome::Winner(seat) => Some(seat),
            RoundOutcome::Tie => None,
        }
    }
}

/// Decides a round from seat 1's and seat 2's choices.
///
/// Pure and deterministic: both clients compute the same outcome from the
/// same pair, so their resolution writes are identical.
pub fn resolve(seat1: Choice, seat2: Choice) -> RoundOutcome {
    if seat1 == seat2 {
        RoundOutcome::Tie
    } else if seat1.beats(seat2) {
        RoundOutcome::Winner(Seat::One)
    } else {
        RoundOutcome::Winner(Seat::Two)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all_pairs() {
        // テスト項目: 9 通りの組み合わせすべてで勝敗が規則どおりになる
        // given (前提条件):
        use Choice::*;
        let expected = [
            (Rock, Rock, RoundOutcome::Tie),
            (Rock, Paper, RoundOutcome::Winner(Seat::Two)),
            (Rock, Scissors, RoundOutcome::Winner(Seat::One)),
            (Paper, Rock, RoundOutcome::Winner(Seat::One)),
            (Paper, Paper, RoundOutcome::Tie),
            (Paper, Scissors, RoundOutcome::Winner(Seat::Two)),
            (Scissors, Rock, RoundOutcome::Winner(Seat::Two)),
            (Scissors, Paper, RoundOutcome::Winner(Seat::One)),
            (Scissors, Scissors, RoundOutcome::Tie),
        ];

        for (seat1, seat2, outcome) in expected {
            // when (操作):
            let actual = resolve(seat1, seat2);

            // then (期待する結果):
            assert_eq!(actual, outcome, "{seat1} vs {seat2}");
        }
    }

    #[test]
    fn test_resolve_is_symmetric_under_seat_swap() {
        // テスト項目: 席を入れ替えると勝者の席も入れ替わる
        // given (前提条件):
        let pairs: Vec<(Choice, Choice)> = Choice::ALL
            .iter()
            .flat_map(|a| Choice::ALL.iter().map(move |b| (*a, *b)))
            .collect();

        for (a, b) in pairs {
            // when (操作):
            let forward = resolve(a, b).winner();
            let swapped = resolve(b, a).winner();

            // then (期待する結果):
            assert_eq!(forward, swapped.map(Seat::opponent));
        }
    }
}
