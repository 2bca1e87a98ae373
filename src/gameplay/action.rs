use crate::Chips;
use crate::Position;
use crate::cards::street::Street;
use colored::Colorize;
use serde::Deserialize;
use serde::Serialize;

/// What a player did. Sizes live on the event, not the kind, because the
/// engine only ever observes actions; it never generates legal moves.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    /// canonical ordering, shared with the policy model output contract
    pub const fn all() -> [Self; 5] {
        [Self::Fold, Self::Check, Self::Call, Self::Bet, Self::Raise]
    }
    pub const fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }
    /// whether this kind moves chips into the pot
    pub const fn commits(&self) -> bool {
        matches!(self, Self::Call | Self::Bet | Self::Raise)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "{}", "FOLD ".red()),
            Self::Check => write!(f, "{}", "CHECK".cyan()),
            Self::Call => write!(f, "{}", "CALL ".yellow()),
            Self::Bet => write!(f, "{}", "BET  ".green()),
            Self::Raise => write!(f, "{}", "RAISE".magenta()),
        }
    }
}

/// One observed action in a hand's history: append-only, totally ordered by
/// sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub index: usize,
    pub street: Street,
    pub actor: Position,
    pub kind: ActionKind,
    pub size: Chips,
}

impl ActionEvent {
    /// chips this event moved into the pot
    pub fn committed(&self) -> Chips {
        if self.kind.commits() { self.size } else { 0 }
    }
}

impl std::fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind.commits() {
            true => write!(f, "#{} P{} {} {}", self.index, self.actor, self.kind, self.size),
            false => write!(f, "#{} P{} {}", self.index, self.actor, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment() {
        let bet = ActionEvent {
            index: 0,
            street: Street::Flop,
            actor: 1,
            kind: ActionKind::Bet,
            size: 12,
        };
        let fold = ActionEvent {
            index: 1,
            street: Street::Flop,
            actor: 0,
            kind: ActionKind::Fold,
            size: 0,
        };
        assert_eq!(bet.committed(), 12);
        assert_eq!(fold.committed(), 0);
    }

    #[test]
    fn canonical_order_is_stable() {
        let all = ActionKind::all();
        assert_eq!(all[0], ActionKind::Fold);
        assert_eq!(all[4], ActionKind::Raise);
        assert!(ActionKind::Fold < ActionKind::Raise);
    }
}
