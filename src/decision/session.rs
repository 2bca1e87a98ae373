use super::recommendation::Factor;
use super::recommendation::Signal;
use crate::Position;
use crate::error::EngineError;
use crate::gameplay::state::GameState;
use crate::ranging::likelihood::Likelihood;
use crate::ranging::range::Range;
use crate::ranging::tendencies::Tendencies;
use std::collections::BTreeMap;

/// Per-hand ownership of opponent posteriors. Created when a hand starts,
/// threaded by `&mut` through every decision of that hand, dropped when the
/// hand ends. The exclusive borrow is the single-writer discipline: two
/// decisions can never race one session's ranges.
#[derive(Debug, Default, Clone)]
pub struct HandSession {
    ranges: BTreeMap<Position, Range>,
    tendencies: BTreeMap<Position, Tendencies>,
    cursor: usize,
    watermark: usize,
}

impl HandSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// seed a specific opponent's prior from observed tendencies instead of
    /// uniform; only affects ranges not yet initialized
    pub fn profile_opponent(&mut self, position: Position, tendencies: Tendencies) {
        self.tendencies.insert(position, tendencies);
    }

    /// pin an opponent to a known or assumed range
    pub fn assume(&mut self, position: Position, range: Range) {
        self.ranges.insert(position, range);
    }

    pub fn range(&self, position: Position) -> Option<&Range> {
        self.ranges.get(&position)
    }

    /// cloned ranges in opponent-position order, for the simulator
    pub fn ranges(&self, state: &GameState) -> Vec<Range> {
        state
            .opponents()
            .filter_map(|p| self.ranges.get(&p))
            .cloned()
            .collect()
    }

    /// Bring posteriors up to date with the observed state: initialize
    /// missing priors, reapply dead-card removal when the board has grown,
    /// and fold in unseen action events strictly in sequence order. Returns
    /// rationale factors for any range that had to be re-seeded.
    pub fn sync(
        &mut self,
        state: &GameState,
        model: &dyn Likelihood,
    ) -> Result<Vec<Factor>, EngineError> {
        let mut factors = Vec::new();
        self.initialize(state);
        self.rake(state, &mut factors)?;
        self.replay(state, model, &mut factors)?;
        Ok(factors)
    }

    /// one prior per opponent who does not have a posterior yet
    fn initialize(&mut self, state: &GameState) {
        for position in state.opponents() {
            if !self.ranges.contains_key(&position) {
                let prior = match self.tendencies.get(&position) {
                    Some(tendencies) => Range::baseline(state.dead(), tendencies),
                    None => Range::uniform(state.dead()),
                };
                log::debug!("seat {} prior: {}", position, prior);
                self.ranges.insert(position, prior);
            }
        }
    }

    /// dead-card removal whenever new board cards have appeared
    fn rake(&mut self, state: &GameState, factors: &mut Vec<Factor>) -> Result<(), EngineError> {
        if state.board.size() == self.watermark {
            return Ok(());
        }
        let board = state.board.cards();
        for (position, range) in self.ranges.iter_mut() {
            match range.discard(board) {
                Ok(raked) => *range = raked,
                Err(EngineError::RangeExhausted) => {
                    log::warn!("seat {} range died on the new board, re-seeding", position);
                    *range = Range::uniform(state.dead());
                    factors.push(Factor {
                        signal: Signal::RangeReset,
                        value: *position as crate::Utility,
                    });
                }
                Err(fatal) => return Err(fatal),
            }
        }
        self.watermark = state.board.size();
        Ok(())
    }

    /// apply action events the session has not seen yet, in order, updates
    /// all-or-nothing per event
    fn replay(
        &mut self,
        state: &GameState,
        model: &dyn Likelihood,
        factors: &mut Vec<Factor>,
    ) -> Result<(), EngineError> {
        let unseen = match state.history.get(self.cursor..) {
            Some(unseen) => unseen,
            None => {
                return Err(EngineError::InvalidGameState(format!(
                    "history shrank below {} applied events",
                    self.cursor
                )));
            }
        };
        // ordering is checked for the whole batch before any update applies
        for (offset, event) in unseen.iter().enumerate() {
            if event.index != self.cursor + offset {
                return Err(EngineError::InvalidGameState(format!(
                    "event index {} where {} was expected",
                    event.index,
                    self.cursor + offset
                )));
            }
        }
        for event in unseen.iter().copied().collect::<Vec<_>>() {
            if event.actor != state.hero_position {
                if let Some(range) = self.ranges.get(&event.actor) {
                    match range.observe(&event, state, model) {
                        Ok(posterior) => {
                            log::debug!("seat {} {} -> {}", event.actor, event, posterior);
                            self.ranges.insert(event.actor, posterior);
                        }
                        Err(EngineError::RangeExhausted) => {
                            log::warn!("seat {} range died on {}, re-seeding", event.actor, event);
                            self.ranges.insert(event.actor, Range::uniform(state.dead()));
                            factors.push(Factor {
                                signal: Signal::RangeReset,
                                value: event.actor as crate::Utility,
                            });
                        }
                        Err(fatal) => return Err(fatal),
                    }
                }
            }
            self.cursor += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::cards::hole::Hole;
    use crate::cards::street::Street;
    use crate::gameplay::action::ActionEvent;
    use crate::gameplay::action::ActionKind;
    use crate::ranging::likelihood::StrengthBuckets;

    fn state() -> GameState {
        GameState {
            hero: Hole::try_from("As Ah").unwrap(),
            board: Board::empty(),
            history: vec![],
            stacks: vec![100, 100, 100],
            pot: 3,
            sblind: 1,
            bblind: 2,
            hero_position: 0,
        }
    }

    fn raise(index: usize, actor: usize) -> ActionEvent {
        ActionEvent {
            index,
            street: Street::Preflop,
            actor,
            kind: ActionKind::Raise,
            size: 6,
        }
    }

    #[test]
    fn initializes_one_range_per_opponent() {
        let mut session = HandSession::new();
        let state = state();
        session.sync(&state, &StrengthBuckets).unwrap();
        assert!(session.range(1).is_some());
        assert!(session.range(2).is_some());
        assert!(session.range(0).is_none());
    }

    #[test]
    fn raises_narrow_the_actor_only() {
        let mut session = HandSession::new();
        let mut state = state();
        session.sync(&state, &StrengthBuckets).unwrap();
        let flat = session.range(2).unwrap().narrowness();
        state.history.push(raise(0, 1));
        state.pot += 6;
        session.sync(&state, &StrengthBuckets).unwrap();
        assert!(session.range(1).unwrap().narrowness() > flat);
        assert_eq!(session.range(2).unwrap().narrowness(), flat);
    }

    #[test]
    fn events_apply_exactly_once() {
        let mut session = HandSession::new();
        let mut state = state();
        state.history.push(raise(0, 1));
        state.pot += 6;
        session.sync(&state, &StrengthBuckets).unwrap();
        let once = session.range(1).unwrap().clone();
        session.sync(&state, &StrengthBuckets).unwrap();
        assert_eq!(session.range(1).unwrap(), &once);
    }

    #[test]
    fn out_of_order_event_rejected_before_any_update() {
        let mut session = HandSession::new();
        let mut state = state();
        session.sync(&state, &StrengthBuckets).unwrap();
        let pristine = session.range(1).unwrap().clone();
        state.history.push(raise(0, 1));
        state.history.push(raise(2, 2)); // gap: index 2 where 1 expected
        state.pot += 12;
        let err = session.sync(&state, &StrengthBuckets).unwrap_err();
        assert!(matches!(err, EngineError::InvalidGameState(_)));
        assert_eq!(session.range(1).unwrap(), &pristine);
    }

    #[test]
    fn board_growth_rakes_dead_combos() {
        let mut session = HandSession::new();
        let mut state = state();
        session.sync(&state, &StrengthBuckets).unwrap();
        let preflop = session.range(1).unwrap().len();
        state.board = Board::try_from("Kd Qd Jd").unwrap();
        session.sync(&state, &StrengthBuckets).unwrap();
        let flop = session.range(1).unwrap().len();
        assert!(flop < preflop);
        let board = state.board.cards();
        assert!(
            session
                .range(1)
                .unwrap()
                .combos()
                .keys()
                .all(|c| !c.overlaps(board))
        );
    }

    #[test]
    fn exhausted_range_reseeds_with_receipt() {
        let mut session = HandSession::new();
        let state = state();
        let pinned = Range::from(crate::ranging::combo::Combo::try_from("Kd Qd").unwrap());
        session.assume(1, pinned);
        let mut state = state;
        state.board = Board::try_from("Kd 7s 2c").unwrap();
        let factors = session.sync(&state, &StrengthBuckets).unwrap();
        assert!(factors.iter().any(|f| f.signal == Signal::RangeReset));
        assert!(session.range(1).unwrap().len() > 1);
    }
}
