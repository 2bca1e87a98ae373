use super::output::PolicyOutput;
use crate::Utility;
use crate::equity::estimate::EquityEstimate;
use crate::gameplay::state::GameState;

/// Deterministic stand-in for the learned model, built from pot odds and
/// the equity estimate alone. Calling is +EV exactly when equity clears the
/// break-even price; aggression gets a small implied-odds credit and only
/// overtakes calling when equity is commanding.
///
/// Expected values are chip EVs converted to big blinds and double as the
/// logits, so the softmax ordering follows the arithmetic directly. Actions
/// that cannot be taken in the current spot are pushed far below everything
/// else rather than omitted, to honor the fixed five-action contract.
pub fn score(state: &GameState, equity: &EquityEstimate) -> PolicyOutput {
    let bb = state.bblind.max(1) as Utility;
    let pot = state.pot as Utility;
    let owed = state.to_call() as Utility;
    let strength = equity.strength();
    let wager = pot * crate::BET_POT_FRACTION.0 as Utility / crate::BET_POT_FRACTION.1 as Utility;
    let implied = crate::FALLBACK_IMPLIED_BONUS * pot / bb;
    // chip EV of putting `bet` more in, winning the grown pot at `strength`
    let risk = |bet: Utility| (strength * (pot + bet + bet) - bet) / bb;
    let illegal = crate::FALLBACK_ILLEGAL;
    match owed > 0.0 {
        // facing a bet: fold, call, or raise
        true => {
            let fold = 0.0;
            let call = (strength * (pot + owed) - owed) / bb;
            let raise = risk(owed + wager) + implied
                + match strength >= crate::FALLBACK_RAISE_EQUITY {
                    true => 1.0,
                    false => -0.5,
                };
            PolicyOutput::from((
                [fold, illegal, call, illegal, raise],
                [fold, 0.0, call, 0.0, raise],
            ))
        }
        // first to act: check or bet
        false => {
            let check = strength * pot / bb;
            let bet = risk(wager) + implied
                + match strength >= crate::FALLBACK_RAISE_EQUITY {
                    true => 1.0,
                    false => -0.5,
                };
            PolicyOutput::from((
                [illegal, check, illegal, bet, illegal],
                [0.0, check, 0.0, bet, 0.0],
            ))
        }
    }
}
