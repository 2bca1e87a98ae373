//! Real-time decision engine for No-Limit Texas Hold'em.
//!
//! Given an observed game state (hole cards, board, stacks, pot, action
//! history) and a risk profile, the engine produces a ranked, confidence-scored
//! action recommendation by merging a Monte Carlo equity estimate, a Bayesian
//! posterior over each opponent's holdings, and the output of an external
//! learned policy model (with a pot-odds fallback when that model is away).
pub mod cards;
pub mod decision;
pub mod equity;
pub mod error;
pub mod gameplay;
pub mod policy;
pub mod ranging;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes, bet amounts, and pot sizes in chips. Blinds are part of the
/// game state, so big-blind-denominated quantities are derived ratios.
pub type Chips = i16;
/// Seat index around the table.
pub type Position = usize;
/// Expected values, logits, and rationale contributions.
pub type Utility = f32;
/// Win rates, range weights, and confidence scores.
pub type Probability = f32;
/// Temperature parameters for logit sharpening.
pub type Entropy = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// EQUITY SIMULATION
// Sample budgets scale with how much of the board is still unknown; variance
// matters most preflop, and a fixed river board needs few samples.
// ============================================================================
/// Sample budget when no community cards are revealed.
pub const EQUITY_SAMPLES_PREFLOP: usize = 16_384;
/// Sample budget on the flop.
pub const EQUITY_SAMPLES_FLOP: usize = 8_192;
/// Sample budget on the turn.
pub const EQUITY_SAMPLES_TURN: usize = 4_096;
/// Sample budget on the river (opponent holdings are the only unknown).
pub const EQUITY_SAMPLES_RIVER: usize = 2_048;
/// Samples drawn between deadline and convergence checks.
pub const EQUITY_BATCH: usize = 256;
/// Minimum samples per worker before early convergence stopping is allowed.
pub const EQUITY_MIN_SAMPLES: usize = 1_024;
/// Early-stop threshold on the standard error of the win probability.
pub const EQUITY_CI_TARGET: Probability = 0.005;

// ============================================================================
// RANGE UPDATING
// ============================================================================
/// Floor applied to every likelihood so a single action never zeroes a combo.
pub const LIKELIHOOD_SMOOTHING: Probability = 0.05;
/// Total posterior weight below which a range counts as exhausted.
pub const RANGE_FLOOR: Probability = 1e-9;
/// Baseline weight for combos outside an opponent's implied opening range.
pub const BASELINE_DAMPING: Probability = 0.15;
/// Baseline boost for combos inside an opponent's implied raising range.
pub const BASELINE_SHARPENING: Probability = 1.5;

// ============================================================================
// STRATEGY PROFILES
// ============================================================================
/// Logit shift applied by the Tight profile toward passive actions.
pub const TIGHT_BIAS: Utility = 0.5;
/// EV margin (in big blinds) over folding past which Tight stops interfering.
pub const TIGHT_EV_OVERRIDE: Utility = 1.5;
/// Temperature divisor for bet/raise logits under the Aggressive profile.
pub const AGGRESSIVE_TEMPERATURE: Entropy = 0.75;
/// Minimum bet/raise probability enforced by the Aggressive profile.
pub const BLUFF_FLOOR: Probability = 0.08;

// ============================================================================
// FALLBACK SCORER
// Used when the learned policy model is unavailable; pot odds and equity only.
// ============================================================================
/// Equity above which the fallback scorer prefers raising over calling.
pub const FALLBACK_RAISE_EQUITY: Probability = 0.65;
/// Implied-odds nudge (fraction of pot) credited to aggressive lines.
pub const FALLBACK_IMPLIED_BONUS: Probability = 0.04;
/// Logit assigned to actions the fallback scorer considers unavailable.
pub const FALLBACK_ILLEGAL: Utility = -1e3;

// ============================================================================
// DECISION AGGREGATION
// ============================================================================
/// Default wall-clock budget for one decision request, in milliseconds.
pub const DECIDE_TIMEOUT_MS: u64 = 2_000;
/// Suggested bet size as a fraction of pot (numerator, denominator).
pub const BET_POT_FRACTION: (Chips, Chips) = (3, 4);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
