use super::recommendation::Factor;
use super::recommendation::Recommendation;
use super::recommendation::Signal;
use super::session::HandSession;
use crate::Chips;
use crate::Utility;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use crate::equity::estimate::EquityEstimate;
use crate::equity::simulator::Simulator;
use crate::error::EngineError;
use crate::gameplay::action::ActionKind;
use crate::gameplay::state::GameState;
use crate::policy::adapter;
use crate::policy::adapter::Oracle;
use crate::policy::fallback;
use crate::policy::output::PolicyOutput;
use crate::policy::profile::Profile;
use crate::ranging::combo::Combo;
use crate::ranging::likelihood::Likelihood;
use crate::ranging::likelihood::StrengthBuckets;
use crate::ranging::range::Range;
use std::time::Duration;
use std::time::Instant;

/// Where a decision request stands. One request walks the phases top to
/// bottom and ends in Decided or Failed; nothing here outlives the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    RangeReady,
    EquityReady,
    PolicyReady,
    ProfileApplied,
    Decided,
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::RangeReady => write!(f, "range ready"),
            Self::EquityReady => write!(f, "equity ready"),
            Self::PolicyReady => write!(f, "policy ready"),
            Self::ProfileApplied => write!(f, "profile applied"),
            Self::Decided => write!(f, "decided"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The Decision Aggregator: orchestrates range updates, equity simulation,
/// policy scoring, and profile adjustment into one recommendation.
///
/// The engine itself is stateless across requests; per-hand state lives in
/// the caller's `HandSession`. Non-fatal trouble (model offline, exhausted
/// ranges, expired deadline) degrades with a rationale receipt instead of
/// failing, because live play always needs an answer.
pub struct Engine<'a> {
    oracle: Option<&'a dyn Oracle>,
    likelihood: &'a dyn Likelihood,
    timeout: Duration,
    seed: Option<u64>,
    workers: Option<usize>,
}

impl Engine<'static> {
    pub fn new() -> Self {
        Self {
            oracle: None,
            likelihood: &StrengthBuckets,
            timeout: Duration::from_millis(crate::DECIDE_TIMEOUT_MS),
            seed: None,
            workers: None,
        }
    }
}

impl Default for Engine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Engine<'a> {
    pub fn oracle(mut self, oracle: &'a dyn Oracle) -> Self {
        self.oracle = Some(oracle);
        self
    }
    pub fn likelihood(mut self, likelihood: &'a dyn Likelihood) -> Self {
        self.likelihood = likelihood;
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// One synchronous decision request against the caller's session.
    pub fn decide(
        &self,
        session: &mut HandSession,
        state: &GameState,
        profile: Profile,
    ) -> Result<Recommendation, EngineError> {
        let mut phase = Phase::Idle;
        match self.advance(&mut phase, session, state, profile) {
            Ok(recommendation) => {
                log::info!("{} -> {}", state, recommendation);
                log::debug!("{}", recommendation.transcript(state));
                Ok(recommendation)
            }
            Err(error) => {
                log::warn!("request abandoned after phase {}: {}", phase, error);
                phase = Phase::Failed;
                log::debug!("phase: {}", phase);
                Err(error)
            }
        }
    }

    fn advance(
        &self,
        phase: &mut Phase,
        session: &mut HandSession,
        state: &GameState,
        profile: Profile,
    ) -> Result<Recommendation, EngineError> {
        state.validate()?;
        let street = state.street()?;
        let deadline = Instant::now() + self.timeout;

        let mut extras = session.sync(state, self.likelihood)?;
        Self::step(phase, Phase::RangeReady);

        let ranges = session.ranges(state);
        let equity = self.equity(state, street, &ranges, deadline, &mut extras)?;
        Self::step(phase, Phase::EquityReady);

        let (output, degraded) = self.policy(state, &equity, &ranges);
        if degraded {
            extras.push(Factor {
                signal: Signal::Degraded,
                value: 1.0,
            });
        }
        Self::step(phase, Phase::PolicyReady);

        let adjusted = profile.apply(output.clone());
        let shift = ActionKind::all()
            .iter()
            .map(|k| (adjusted.logit(*k) - output.logit(*k)).abs())
            .sum::<Utility>();
        Self::step(phase, Phase::ProfileApplied);

        let recommendation = self.merge(state, street, &equity, &ranges, adjusted, shift, profile, extras);
        Self::step(phase, Phase::Decided);
        Ok(recommendation)
    }

    fn step(phase: &mut Phase, next: Phase) {
        *phase = next;
        log::debug!("phase: {}", next);
    }

    /// equity with soft landings: exhausted ranges widen to uniform and
    /// retry once; an expired deadline downgrades to the preflop heuristic
    /// rather than failing the request
    fn equity(
        &self,
        state: &GameState,
        street: Street,
        ranges: &[Range],
        deadline: Instant,
        extras: &mut Vec<Factor>,
    ) -> Result<EquityEstimate, EngineError> {
        let attempt = match self.simulate(state, ranges, deadline) {
            Err(EngineError::RangeExhausted) => {
                log::warn!("joint ranges exhausted, widening to uniform");
                extras.push(Factor {
                    signal: Signal::RangeReset,
                    value: -1.0,
                });
                let uniform = state
                    .opponents()
                    .map(|_| Range::uniform(state.dead()))
                    .collect::<Vec<Range>>();
                self.simulate(state, &uniform, deadline)
            }
            outcome => outcome,
        };
        match attempt {
            Ok(estimate) => {
                if estimate.samples < street.samples() && Instant::now() >= deadline {
                    log::warn!("deadline clipped sampling at {} draws", estimate.samples);
                    extras.push(Factor {
                        signal: Signal::ReducedSamples,
                        value: estimate.samples as Utility,
                    });
                }
                Ok(estimate)
            }
            Err(EngineError::SimulationTimeout) => {
                log::warn!("no samples completed before the deadline");
                extras.push(Factor {
                    signal: Signal::ReducedSamples,
                    value: 0.0,
                });
                let combo = Combo::try_from(state.hero.cards())
                    .expect("validated hole has two cards");
                Ok(EquityEstimate::presumed(
                    StrengthBuckets::preflop(combo),
                    street,
                ))
            }
            Err(error) => Err(error),
        }
    }

    fn simulate(
        &self,
        state: &GameState,
        ranges: &[Range],
        deadline: Instant,
    ) -> Result<EquityEstimate, EngineError> {
        let mut simulator = Simulator::new(&state.hero, &state.board, ranges)?.deadline(deadline);
        if let Some(seed) = self.seed {
            simulator = simulator.seed(seed);
        }
        if let Some(workers) = self.workers {
            simulator = simulator.workers(workers);
        }
        simulator.estimate()
    }

    /// learned model when it cooperates, pot-odds arithmetic when it does not
    fn policy(
        &self,
        state: &GameState,
        equity: &EquityEstimate,
        ranges: &[Range],
    ) -> (PolicyOutput, bool) {
        match self.oracle {
            Some(oracle) => match adapter::score(oracle, state, equity, ranges) {
                Ok(output) => (output, false),
                Err(error) => {
                    log::warn!("{}; substituting pot-odds fallback", error);
                    (fallback::score(state, equity), true)
                }
            },
            None => (fallback::score(state, equity), true),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn merge(
        &self,
        state: &GameState,
        street: Street,
        equity: &EquityEstimate,
        ranges: &[Range],
        adjusted: PolicyOutput,
        shift: Utility,
        profile: Profile,
        extras: Vec<Factor>,
    ) -> Recommendation {
        let action = adjusted.best();
        let confidence = adjusted.distribution()[&action];
        let narrowness = match ranges.len() {
            0 => 0.0,
            n => ranges.iter().map(Range::narrowness).sum::<Utility>() / n as Utility,
        };
        let mut rationale = vec![
            Factor {
                signal: Signal::Equity,
                value: equity.strength(),
            },
            Factor {
                signal: Signal::Narrowness,
                value: narrowness,
            },
            Factor {
                signal: Signal::PolicyValue,
                value: adjusted.value(action),
            },
            Factor {
                signal: Signal::ProfileShift,
                value: shift,
            },
        ];
        if let Some(odds) = state.pot_odds() {
            rationale.push(Factor {
                signal: Signal::PotOdds,
                value: odds,
            });
        }
        if street != Street::Preflop {
            let made = Strength::from(state.dead()).ranking();
            rationale.push(Factor {
                signal: Signal::MadeHand,
                value: made.category() as Utility,
            });
        }
        rationale.extend(extras);
        Recommendation {
            action,
            size: action.is_aggressive().then(|| self.sizing(state)),
            confidence,
            ev_delta: adjusted.ev_delta(),
            rationale,
            profile,
        }
    }

    /// three quarters of the pot, floored by the table's minimum raise,
    /// capped by what the hero has behind
    fn sizing(&self, state: &GameState) -> Chips {
        let (num, den) = crate::BET_POT_FRACTION;
        let goal = (state.pot as i32 * num as i32 / den as i32) as Chips;
        goal.max(state.min_raise()).min(state.hero_stack())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::cards::hole::Hole;
    use crate::gameplay::action::ActionEvent;
    use crate::policy::features;

    fn preflop_spot() -> GameState {
        GameState {
            hero: Hole::try_from("As Ah").unwrap(),
            board: Board::empty(),
            history: vec![ActionEvent {
                index: 0,
                street: Street::Preflop,
                actor: 1,
                kind: ActionKind::Raise,
                size: 6,
            }],
            stacks: vec![100, 94],
            pot: 9,
            sblind: 1,
            bblind: 2,
            hero_position: 0,
        }
    }

    fn engine() -> Engine<'static> {
        Engine::new()
            .seed(42)
            .workers(1)
            .timeout(Duration::from_secs(30))
    }

    #[test]
    fn decides_without_an_oracle() {
        let mut session = HandSession::new();
        let state = preflop_spot();
        let recommendation = engine()
            .decide(&mut session, &state, Profile::Balanced)
            .unwrap();
        assert!(recommendation.degraded());
        assert!(recommendation.confidence > 0.0 && recommendation.confidence <= 1.0);
        assert!(matches!(
            recommendation.action,
            ActionKind::Call | ActionKind::Raise
        ));
        assert!(recommendation.factor(Signal::Equity).unwrap() > 0.6);
    }

    #[test]
    fn rationale_leads_with_the_merge_order() {
        let mut session = HandSession::new();
        let state = preflop_spot();
        let recommendation = engine()
            .decide(&mut session, &state, Profile::Balanced)
            .unwrap();
        let signals = recommendation
            .rationale
            .iter()
            .map(|f| f.signal)
            .collect::<Vec<Signal>>();
        assert_eq!(signals[0], Signal::Equity);
        assert_eq!(signals[1], Signal::Narrowness);
        assert_eq!(signals[2], Signal::PolicyValue);
        assert_eq!(signals[3], Signal::ProfileShift);
    }

    #[test]
    fn oracle_failure_still_decides_with_receipt() {
        struct Offline;
        impl Oracle for Offline {
            fn version(&self) -> u32 {
                features::VERSION
            }
            fn infer(&self, _: &[f32]) -> Result<Vec<f32>, String> {
                Err("socket closed".into())
            }
        }
        let mut session = HandSession::new();
        let state = preflop_spot();
        let recommendation = engine()
            .oracle(&Offline)
            .decide(&mut session, &state, Profile::Balanced)
            .unwrap();
        assert!(recommendation.degraded());
    }

    #[test]
    fn healthy_oracle_is_not_degraded() {
        struct Confident;
        impl Oracle for Confident {
            fn version(&self) -> u32 {
                features::VERSION
            }
            fn infer(&self, _: &[f32]) -> Result<Vec<f32>, String> {
                Ok(vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 0.5, 0.0, 1.5])
            }
        }
        let mut session = HandSession::new();
        let state = preflop_spot();
        let recommendation = engine()
            .oracle(&Confident)
            .decide(&mut session, &state, Profile::Balanced)
            .unwrap();
        assert!(!recommendation.degraded());
        assert_eq!(recommendation.action, ActionKind::Raise);
        assert!(recommendation.size.is_some());
        assert!((recommendation.ev_delta - 1.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_state_is_fatal_and_touches_nothing() {
        let mut session = HandSession::new();
        let mut state = preflop_spot();
        state.history[0].index = 5;
        let error = engine()
            .decide(&mut session, &state, Profile::Balanced)
            .unwrap_err();
        assert!(error.is_fatal());
        assert!(session.range(1).is_none());
    }

    #[test]
    fn expired_deadline_degrades_to_heuristic() {
        let mut session = HandSession::new();
        let state = preflop_spot();
        let recommendation = engine()
            .timeout(Duration::ZERO)
            .decide(&mut session, &state, Profile::Balanced)
            .unwrap();
        assert_eq!(recommendation.factor(Signal::ReducedSamples), Some(0.0));
        assert!(recommendation.confidence > 0.0);
    }

    #[test]
    fn profiles_change_the_lean() {
        let mut tight_session = HandSession::new();
        let mut aggro_session = HandSession::new();
        let state = preflop_spot();
        let tight = engine()
            .decide(&mut tight_session, &state, Profile::Tight)
            .unwrap();
        let aggro = engine()
            .decide(&mut aggro_session, &state, Profile::Aggressive)
            .unwrap();
        assert_eq!(tight.profile, Profile::Tight);
        assert_eq!(aggro.profile, Profile::Aggressive);
    }

    #[test]
    fn sizing_respects_table_bounds() {
        let state = preflop_spot();
        let size = engine().sizing(&state);
        assert!(size >= state.min_raise());
        assert!(size <= state.hero_stack());
    }
}
