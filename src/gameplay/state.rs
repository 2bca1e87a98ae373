use super::action::ActionEvent;
use super::action::ActionKind;
use crate::Chips;
use crate::Position;
use crate::Probability;
use crate::Utility;
use crate::cards::board::Board;
use crate::cards::cards::Cards;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::error::EngineError;
use serde::Serialize;

/// Everything the engine knows about the hand at decision time, assembled by
/// external collaborators (card interpreter, state collector) and passed in
/// by reference. The engine never mutates it.
///
/// Blinds are modeled as part of the pot baseline rather than as events, so
/// `pot == sblind + bblind + sum of committed event sizes` is the arithmetic
/// the validator holds callers to.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub hero: Hole,
    pub board: Board,
    pub history: Vec<ActionEvent>,
    pub stacks: Vec<Chips>,
    pub pot: Chips,
    pub sblind: Chips,
    pub bblind: Chips,
    pub hero_position: Position,
}

impl GameState {
    pub fn n_players(&self) -> usize {
        self.stacks.len()
    }
    pub fn n_opponents(&self) -> usize {
        self.n_players().saturating_sub(1)
    }
    pub fn opponents(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.n_players()).filter(|p| *p != self.hero_position)
    }
    pub fn street(&self) -> Result<Street, EngineError> {
        self.board.street()
    }
    /// cards visible to the hero, excluded from all opponent holdings
    pub fn dead(&self) -> Cards {
        self.hero.cards().merge(self.board.cards())
    }
    pub fn hero_stack(&self) -> Chips {
        self.stacks.get(self.hero_position).copied().unwrap_or(0)
    }

    /// chips the hero must add to continue; preflop the big blind is owed
    /// until matched even before anyone raises
    pub fn to_call(&self) -> Chips {
        let street = match self.street() {
            Ok(street) => street,
            Err(_) => return 0,
        };
        let stakes = self.stakes(street);
        let top = stakes.iter().copied().max().unwrap_or(0);
        let top = match street {
            Street::Preflop => top.max(self.bblind),
            _ => top,
        };
        let hero = stakes.get(self.hero_position).copied().unwrap_or(0);
        (top - hero).max(0)
    }

    /// break-even call equity: to_call / (pot + to_call)
    pub fn pot_odds(&self) -> Option<Probability> {
        match self.to_call() {
            0 => None,
            owed => Some(owed as Probability / (self.pot + owed) as Probability),
        }
    }

    /// smallest legal raise-to delta for the hero, from the top two stakes
    /// on the current street
    pub fn min_raise(&self) -> Chips {
        let street = match self.street() {
            Ok(street) => street,
            Err(_) => return self.bblind,
        };
        let stakes = self.stakes(street);
        let (most, next) = stakes.iter().fold((0, 0), |(most, next), stake| {
            if *stake > most {
                (*stake, most)
            } else if *stake > next {
                (most, *stake)
            } else {
                (most, next)
            }
        });
        let most = match street {
            Street::Preflop => most.max(self.bblind),
            _ => most,
        };
        let hero = stakes.get(self.hero_position).copied().unwrap_or(0);
        let relative = most - hero;
        let marginal = (most - next).max(self.bblind);
        relative + marginal
    }

    /// stack-to-pot ratio for the hero
    pub fn spr(&self) -> Utility {
        match self.pot {
            0 => self.hero_stack() as Utility,
            pot => self.hero_stack() as Utility / pot as Utility,
        }
    }

    /// chips each position committed on the given street
    fn stakes(&self, street: Street) -> Vec<Chips> {
        let mut stakes = vec![0; self.n_players()];
        for event in self.history.iter().filter(|e| e.street == street) {
            if let Some(stake) = stakes.get_mut(event.actor) {
                *stake += event.committed();
            }
        }
        stakes
    }

    /// structural consistency; any violation is fatal to the request
    pub fn validate(&self) -> Result<(), EngineError> {
        let street = self.street()?;
        if self.hero.known() != 2 {
            return Err(EngineError::InvalidGameState(format!(
                "{} known hole cards at decision time",
                self.hero.known()
            )));
        }
        if self.n_players() < 2 {
            return Err(EngineError::InvalidGameState(
                "fewer than two players".into(),
            ));
        }
        if self.hero_position >= self.n_players() {
            return Err(EngineError::InvalidGameState(format!(
                "hero position {} out of bounds",
                self.hero_position
            )));
        }
        if self.stacks.iter().any(|s| *s < 0) {
            return Err(EngineError::InvalidGameState("negative stack".into()));
        }
        if self.sblind < 0 || self.bblind <= 0 {
            return Err(EngineError::InvalidGameState("degenerate blinds".into()));
        }
        if self.hero.cards().intersects(self.board.cards()) {
            return Err(EngineError::InvalidGameState(
                "hole cards overlap the board".into(),
            ));
        }
        self.validate_history(street)?;
        self.validate_pot()?;
        Ok(())
    }

    fn validate_history(&self, street: Street) -> Result<(), EngineError> {
        let mut last = Street::Preflop;
        for (i, event) in self.history.iter().enumerate() {
            if event.index != i {
                return Err(EngineError::InvalidGameState(format!(
                    "event index {} at position {}",
                    event.index, i
                )));
            }
            if event.actor >= self.n_players() {
                return Err(EngineError::InvalidGameState(format!(
                    "actor {} out of bounds",
                    event.actor
                )));
            }
            if event.street < last {
                return Err(EngineError::InvalidGameState(
                    "event streets moved backward".into(),
                ));
            }
            if event.street > street {
                return Err(EngineError::InvalidGameState(
                    "event street ahead of the board".into(),
                ));
            }
            match event.kind {
                ActionKind::Fold | ActionKind::Check if event.size != 0 => {
                    return Err(EngineError::InvalidGameState(format!(
                        "{:?} carries a size",
                        event.kind
                    )));
                }
                ActionKind::Call | ActionKind::Bet | ActionKind::Raise if event.size <= 0 => {
                    return Err(EngineError::InvalidGameState(format!(
                        "{:?} without chips",
                        event.kind
                    )));
                }
                _ => {}
            }
            last = event.street;
        }
        Ok(())
    }

    fn validate_pot(&self) -> Result<(), EngineError> {
        let committed = self
            .history
            .iter()
            .map(|e| e.committed())
            .fold(0 as Chips, |a, b| a + b);
        let expected = self.sblind + self.bblind + committed;
        if self.pot != expected {
            return Err(EngineError::InvalidGameState(format!(
                "pot {} does not match blinds plus {} committed",
                self.pot, committed
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        write!(
            f,
            "{}",
            format!(
                "{} @ {:>5} {} {}",
                self.hero,
                self.pot,
                self.board,
                self.street().map(|s| s.to_string()).unwrap_or_default()
            )
            .bright_green()
        )
    }
}
