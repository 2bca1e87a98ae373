use crate::Probability;
use crate::equity::estimate::EquityEstimate;
use crate::gameplay::state::GameState;
use crate::ranging::range::Range;

/// Version of the feature-vector layout below. The adapter refuses to call
/// a model built against any other version; bump this whenever the layout
/// changes shape or meaning.
pub const VERSION: u32 = 3;

/// fixed width of the encoded vector
pub const WIDTH: usize = 52;

/// Assemble the documented model input. Layout, by index:
///
///   0..13   hero rank counts (0, 1, or 2 per rank)
///   13      hero suited flag
///   14      hero pocket-pair flag
///   15..28  board rank counts
///   28..32  street one-hot (preflop, flop, turn, river)
///   32..35  equity win / tie / lose
///   35      pot in big blinds
///   36      hero stack in big blinds
///   37      stack-to-pot ratio
///   38      pot odds (0 when nothing to call)
///   39      amount to call in big blinds
///   40      hero position scaled by table size
///   41      opponent count
///   42..46  passive actions (check/call) per street
///   46..50  aggressive actions (bet/raise) per street
///   50      mean opponent range narrowness
///   51      minimum opponent range narrowness
pub fn encode(state: &GameState, equity: &EquityEstimate, ranges: &[Range]) -> Vec<f32> {
    let bb = state.bblind.max(1) as f32;
    let mut features = vec![0.0f32; WIDTH];
    for card in state.hero.cards() {
        features[u8::from(card.rank()) as usize] += 1.0;
    }
    let hero = state.hero.cards();
    let suits = crate::cards::suit::Suit::all();
    features[13] = suits.iter().any(|s| hero.of(*s).count_ones() == 2) as u8 as f32;
    features[14] = (hero.size() == 2 && hero.ranks().count_ones() == 1) as u8 as f32;
    for card in state.board.cards() {
        features[15 + u8::from(card.rank()) as usize] += 1.0;
    }
    if let Ok(street) = state.street() {
        features[28 + street as usize] = 1.0;
    }
    features[32] = equity.win;
    features[33] = equity.tie;
    features[34] = equity.lose;
    features[35] = state.pot as f32 / bb;
    features[36] = state.hero_stack() as f32 / bb;
    features[37] = state.spr();
    features[38] = state.pot_odds().unwrap_or(0.0);
    features[39] = state.to_call() as f32 / bb;
    features[40] = state.hero_position as f32 / state.n_players().max(1) as f32;
    features[41] = state.n_opponents() as f32;
    for event in state.history.iter() {
        let street = event.street as usize;
        match event.kind.is_aggressive() {
            false => features[42 + street] += 1.0,
            true => features[46 + street] += 1.0,
        }
    }
    let narrowness = ranges.iter().map(Range::narrowness).collect::<Vec<Probability>>();
    features[50] = match narrowness.len() {
        0 => 0.0,
        n => narrowness.iter().sum::<Probability>() / n as Probability,
    };
    features[51] = narrowness.iter().copied().fold(f32::INFINITY, f32::min).min(1.0).max(0.0);
    features
}
