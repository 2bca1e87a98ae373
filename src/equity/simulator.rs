use super::estimate::EquityEstimate;
use super::tally::Tally;
use crate::cards::board::Board;
use crate::cards::cards::Cards;
use crate::cards::deck::Deck;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::cards::strength::Strength;
use crate::error::EngineError;
use crate::ranging::range::Range;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::Instant;

/// Monte Carlo estimator of the hero's showdown equity against one or more
/// weighted opponent ranges.
///
/// Each sample draws a combo per opponent (proportional to range weight,
/// excluding every card already spoken for in that draw), completes the
/// board from the remaining deck, and compares best-five strengths. Workers
/// own independent rngs seeded from `seed + worker`, so a fixed seed and
/// worker count reproduce the estimate exactly; their tallies merge through
/// an associative, commutative sum after all complete. The simulator holds
/// no state across calls.
pub struct Simulator<'a> {
    hero: Cards,
    board: Cards,
    street: Street,
    ranges: &'a [Range],
    budget: usize,
    seed: u64,
    workers: usize,
    deadline: Option<Instant>,
}

impl<'a> Simulator<'a> {
    pub fn new(hero: &Hole, board: &Board, ranges: &'a [Range]) -> Result<Self, EngineError> {
        if hero.known() != 2 {
            return Err(EngineError::InvalidGameState(format!(
                "{} known hole cards",
                hero.known()
            )));
        }
        if ranges.is_empty() {
            return Err(EngineError::InvalidGameState("no opponent ranges".into()));
        }
        let street = board.street()?;
        Ok(Self {
            hero: hero.cards(),
            board: board.cards(),
            street,
            ranges,
            budget: street.samples(),
            seed: rand::rng().random(),
            workers: num_cpus::get().max(1),
            deadline: None,
        })
    }

    pub fn budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn estimate(&self) -> Result<EquityEstimate, EngineError> {
        if self.budget == 0 {
            return Err(EngineError::InvalidGameState("zero sample budget".into()));
        }
        let dead = self.hero.merge(self.board);
        for range in self.ranges {
            if range.live(dead) < crate::RANGE_FLOOR {
                return Err(EngineError::RangeExhausted);
            }
        }
        if let Some(estimate) = self.showdown() {
            return Ok(estimate);
        }
        let share = self.budget.div_ceil(self.workers);
        let tally = (0..self.workers)
            .into_par_iter()
            .map(|worker| self.run(worker, share))
            .reduce(Tally::default, Tally::absorb);
        match tally.samples() {
            0 if self.expired() => Err(EngineError::SimulationTimeout),
            0 => Err(EngineError::RangeExhausted),
            _ => Ok(tally.estimate(self.street)),
        }
    }

    /// complete board and fully collapsed ranges settle deterministically,
    /// with no budget spent at all
    fn showdown(&self) -> Option<EquityEstimate> {
        if self.street != Street::River {
            return None;
        }
        let mut dead = self.hero.merge(self.board);
        let mut villains = Vec::with_capacity(self.ranges.len());
        for range in self.ranges {
            let combo = range.single()?;
            if combo.overlaps(dead) {
                return None;
            }
            dead = dead.merge(combo.cards());
            villains.push(combo.cards());
        }
        let mut tally = Tally::default();
        tally.record(self.compare(self.board, &villains));
        Some(tally.estimate(self.street))
    }

    /// one worker's share of the budget, in deadline-checked batches
    fn run(&self, worker: usize, share: usize) -> Tally {
        let ref mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(worker as u64));
        let mut tally = Tally::default();
        let mut drawn = 0;
        while drawn < share {
            if self.expired() {
                break;
            }
            let batch = crate::EQUITY_BATCH.min(share - drawn);
            for _ in 0..batch {
                if let Some(showdown) = self.once(rng) {
                    tally.record(showdown);
                }
            }
            drawn += batch;
            if tally.samples() >= crate::EQUITY_MIN_SAMPLES
                && tally.standard_error() < crate::EQUITY_CI_TARGET
            {
                break;
            }
        }
        tally
    }

    /// one sample: a combo per opponent, then the rest of the board
    fn once(&self, rng: &mut SmallRng) -> Option<Ordering> {
        let mut dead = self.hero.merge(self.board);
        let mut villains = Vec::with_capacity(self.ranges.len());
        for range in self.ranges {
            let combo = range.sample(rng, dead)?;
            dead = dead.merge(combo.cards());
            villains.push(combo.cards());
        }
        let mut board = self.board;
        let mut deck = Deck::from(Cards::ALL.without(dead));
        for _ in 0..self.street.n_to_come() {
            board.insert(deck.draw(rng));
        }
        Some(self.compare(board, &villains))
    }

    fn compare(&self, board: Cards, villains: &[Cards]) -> Ordering {
        let hero = Strength::from(self.hero.merge(board));
        villains
            .iter()
            .map(|v| Strength::from(v.merge(board)))
            .max()
            .map(|best| hero.cmp(&best))
            .expect("at least one opponent")
    }

    fn expired(&self) -> bool {
        self.deadline.map_or(false, |d| Instant::now() >= d)
    }
}
