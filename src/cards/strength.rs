use super::cards::Cards;
use super::evaluator::Evaluator;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// The comparable value of a card set's best five-card hand: category plus
/// embedded ranks first, kickers to break what remains.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
}

impl From<Cards> for Strength {
    fn from(cards: Cards) -> Self {
        Self::from(Evaluator::from(cards))
    }
}

impl From<Evaluator> for Strength {
    fn from(evaluator: Evaluator) -> Self {
        let ranking = evaluator.ranking();
        let kickers = evaluator.kickers(ranking);
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.ranking, self.kickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::rank::Rank;

    fn strength(s: &str) -> Strength {
        Strength::from(Cards::try_from(s).unwrap())
    }

    #[test]
    fn high_card() {
        let hand = strength("As Kh Qd Jc 9s");
        assert_eq!(hand.ranking(), Ranking::HighCard(Rank::Ace));
        assert_eq!(
            hand.kickers,
            Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine])
        );
    }

    #[test]
    fn one_pair() {
        let hand = strength("As Ah Kd Qc Js");
        assert_eq!(hand.ranking(), Ranking::OnePair(Rank::Ace));
        assert_eq!(
            hand.kickers,
            Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack])
        );
    }

    #[test]
    fn two_pair() {
        let hand = strength("As Ah Kd Kc Qs");
        assert_eq!(hand.ranking(), Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(hand.kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn three_pair_keeps_best_two() {
        let hand = strength("As Ah Kd Kc Qs Qh Jd");
        assert_eq!(hand.ranking(), Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(hand.kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn trips() {
        let hand = strength("As Ah Ad Kc Qs");
        assert_eq!(hand.ranking(), Ranking::Trips(Rank::Ace));
        assert_eq!(hand.kickers, Kickers::from(vec![Rank::King, Rank::Queen]));
    }

    #[test]
    fn straight() {
        let hand = strength("Ts Jh Qd Kc As");
        assert_eq!(hand.ranking(), Ranking::Straight(Rank::Ace));
    }

    #[test]
    fn wheel_straight() {
        let hand = strength("As 2h 3d 4c 5s");
        assert_eq!(hand.ranking(), Ranking::Straight(Rank::Five));
    }

    #[test]
    fn six_card_straight_takes_high_end() {
        let hand = strength("As 2s 3h 4d 5c 6s");
        assert_eq!(hand.ranking(), Ranking::Straight(Rank::Six));
    }

    #[test]
    fn flush() {
        let hand = strength("As Ks Qs Js 9s");
        assert_eq!(hand.ranking(), Ranking::Flush(Rank::Ace));
        assert_eq!(
            hand.kickers,
            Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine])
        );
    }

    #[test]
    fn flush_kickers_stay_in_suit() {
        // the Kh outranks every spade kicker but cannot play
        let hand = strength("As Kh 9s 7s 5s 2s");
        assert_eq!(hand.ranking(), Ranking::Flush(Rank::Ace));
        assert_eq!(
            hand.kickers,
            Kickers::from(vec![Rank::Nine, Rank::Seven, Rank::Five, Rank::Two])
        );
    }

    #[test]
    fn flush_over_straight() {
        let hand = strength("4h 6h 7h 8h 9h Ts");
        assert_eq!(hand.ranking(), Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn full_house() {
        let hand = strength("2s 2h 2d 3c 3s");
        assert_eq!(hand.ranking(), Ranking::FullHouse(Rank::Two, Rank::Three));
    }

    #[test]
    fn full_house_over_flush() {
        let hand = strength("Kh Ah Ad As Ks Qs Js 9s");
        assert_eq!(hand.ranking(), Ranking::FullHouse(Rank::Ace, Rank::King));
    }

    #[test]
    fn double_trips_is_full_house() {
        let hand = strength("As Ah Ad Kc Ks Kh Qd");
        assert_eq!(hand.ranking(), Ranking::FullHouse(Rank::Ace, Rank::King));
    }

    #[test]
    fn quads() {
        let hand = strength("As Ah Ad Ac Ks");
        assert_eq!(hand.ranking(), Ranking::Quads(Rank::Ace));
        assert_eq!(hand.kickers, Kickers::from(vec![Rank::King]));
    }

    #[test]
    fn quads_over_full_house() {
        let hand = strength("As Ah Ad Ac Ks Kh Qd");
        assert_eq!(hand.ranking(), Ranking::Quads(Rank::Ace));
    }

    #[test]
    fn straight_flush() {
        let hand = strength("Ts Js Qs Ks As");
        assert_eq!(hand.ranking(), Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn wheel_straight_flush() {
        let hand = strength("As 2s 3s 4s 5s");
        assert_eq!(hand.ranking(), Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn straight_flush_over_quads() {
        let hand = strength("Ts Js Qs Ks As Ah Ad Ac");
        assert_eq!(hand.ranking(), Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn seven_card_two_pair() {
        let hand = strength("As Ah Kd Kc Qs Jh 9d");
        assert_eq!(hand.ranking(), Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(hand.kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn kicker_breaks_tie() {
        let better = strength("As Ah Kd Qc Js");
        let worse = strength("Ad Ac Kh Qs Ts");
        assert!(better > worse);
    }
}
