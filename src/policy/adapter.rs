use super::features;
use super::output::PolicyOutput;
use crate::Utility;
use crate::equity::estimate::EquityEstimate;
use crate::error::EngineError;
use crate::gameplay::state::GameState;
use crate::ranging::range::Range;

/// The learned policy model, seen from the outside: a versioned pure
/// function from the documented feature vector to raw numbers. Everything
/// about its architecture, weights, and training is someone else's problem.
pub trait Oracle: Sync {
    /// layout version the model was trained against
    fn version(&self) -> u32;
    /// raw scores: five logits then five EVs, fold/check/call/bet/raise
    fn infer(&self, features: &[f32]) -> Result<Vec<f32>, String>;
}

/// Assemble the feature vector, call the model, and parse its output.
/// Any disagreement about versions or shape is `PolicyUnavailable`, never a
/// silent misinterpretation.
pub fn score(
    oracle: &dyn Oracle,
    state: &GameState,
    equity: &EquityEstimate,
    ranges: &[Range],
) -> Result<PolicyOutput, EngineError> {
    if oracle.version() != features::VERSION {
        return Err(EngineError::PolicyUnavailable(format!(
            "model speaks feature version {}, engine speaks {}",
            oracle.version(),
            features::VERSION
        )));
    }
    let features = features::encode(state, equity, ranges);
    let raw = oracle
        .infer(&features)
        .map_err(EngineError::PolicyUnavailable)?;
    if raw.len() != 10 {
        return Err(EngineError::PolicyUnavailable(format!(
            "expected 10 outputs, model produced {}",
            raw.len()
        )));
    }
    if raw.iter().any(|x| !x.is_finite()) {
        return Err(EngineError::PolicyUnavailable(
            "model produced non-finite output".into(),
        ));
    }
    let mut logits = [0.0 as Utility; 5];
    let mut values = [0.0 as Utility; 5];
    logits.copy_from_slice(&raw[0..5]);
    values.copy_from_slice(&raw[5..10]);
    Ok(PolicyOutput::from((logits, values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::cards::hole::Hole;
    use crate::cards::street::Street;
    use crate::gameplay::action::ActionKind;

    struct Stub {
        version: u32,
        output: Vec<f32>,
    }
    impl Oracle for Stub {
        fn version(&self) -> u32 {
            self.version
        }
        fn infer(&self, features: &[f32]) -> Result<Vec<f32>, String> {
            assert_eq!(features.len(), features::WIDTH);
            Ok(self.output.clone())
        }
    }
    struct Offline;
    impl Oracle for Offline {
        fn version(&self) -> u32 {
            features::VERSION
        }
        fn infer(&self, _: &[f32]) -> Result<Vec<f32>, String> {
            Err("connection refused".into())
        }
    }

    fn fixture() -> (GameState, EquityEstimate, Vec<Range>) {
        let state = GameState {
            hero: Hole::try_from("As Ks").unwrap(),
            board: Board::empty(),
            history: vec![],
            stacks: vec![100, 100],
            pot: 3,
            sblind: 1,
            bblind: 2,
            hero_position: 0,
        };
        let equity = EquityEstimate {
            win: 0.6,
            tie: 0.05,
            lose: 0.35,
            samples: 1000,
            street: Street::Preflop,
        };
        let ranges = vec![Range::uniform(state.dead())];
        (state, equity, ranges)
    }

    #[test]
    fn parses_well_formed_output() {
        let (state, equity, ranges) = fixture();
        let stub = Stub {
            version: features::VERSION,
            output: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.0, 0.1, 0.2, 0.3, 0.4],
        };
        let output = score(&stub, &state, &equity, &ranges).unwrap();
        assert_eq!(output.best(), ActionKind::Raise);
        assert!((output.value(ActionKind::Raise) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn rejects_version_mismatch() {
        let (state, equity, ranges) = fixture();
        let stub = Stub {
            version: features::VERSION + 1,
            output: vec![0.0; 10],
        };
        assert!(matches!(
            score(&stub, &state, &equity, &ranges),
            Err(EngineError::PolicyUnavailable(_))
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        let (state, equity, ranges) = fixture();
        let stub = Stub {
            version: features::VERSION,
            output: vec![0.0; 7],
        };
        assert!(matches!(
            score(&stub, &state, &equity, &ranges),
            Err(EngineError::PolicyUnavailable(_))
        ));
    }

    #[test]
    fn rejects_non_finite_output() {
        let (state, equity, ranges) = fixture();
        let stub = Stub {
            version: features::VERSION,
            output: vec![0.0, 0.0, f32::NAN, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        };
        assert!(matches!(
            score(&stub, &state, &equity, &ranges),
            Err(EngineError::PolicyUnavailable(_))
        ));
    }

    #[test]
    fn surfaces_model_errors() {
        let (state, equity, ranges) = fixture();
        assert!(matches!(
            score(&Offline, &state, &equity, &ranges),
            Err(EngineError::PolicyUnavailable(_))
        ));
    }
}
