//=========================================================================
// Economy Engine
//=========================================================================
//
// Owns the ledger and generator catalog for one round.
//
// Operations:
//   add_resource(n) → credit, schedule counter tween, unlock scan
//   tick()          → add_resource(rate), accumulate lifetime totals
//   purchase(id)    → debit, raise rate, reprice from base
//   close()         → reject every further purchase
//   step(dt)        → advance counter/reveal tasks
//
// All animations the economy starts run on its own scheduler whose target
// is `EconomyState`, so nothing outside this module mutates the ledger.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::generator::{Generator, GeneratorId, GeneratorSpec};
use super::ledger::ResourceLedger;
use super::EconomyError;
use crate::config::GameConfig;
use crate::core::tasks::easing::{circular_ease_out, hover_out_scale, lerp_u64};
use crate::core::tasks::{Task, TaskFault, TaskScheduler};

//=== Hint ================================================================

/// One-time contextual hint shown when the first generator appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    /// No generator has been revealed yet.
    Pending,

    /// Visible, anchored next to the most recently revealed generator.
    Shown { anchor: GeneratorId },

    /// Hidden by the first purchase; never shown again.
    Dismissed,
}

//=== Outcomes ============================================================

/// Side effects of an [`EconomyEngine::add_resource`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Generators that became visible during this add, in catalog order.
    pub revealed: Vec<GeneratorId>,

    /// Set when this add triggered the one-time hint.
    pub hint: Option<GeneratorId>,

    /// Generator the visible hint now sits next to, when a reveal moved it.
    pub hint_anchor: Option<GeneratorId>,
}

/// Why a purchase did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownGenerator,
    Locked,
    Closed,
    InsufficientBalance { balance: u64, price: u64 },
}

/// Result of a purchase attempt. A rejection is normal play, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased {
        id: GeneratorId,
        paid: u64,
        new_price: u64,
        hint_dismissed: bool,
    },
    Rejected(RejectReason),
}

//=== EconomyState ========================================================

/// State animated by the economy's tasks.
#[derive(Debug, Clone)]
pub struct EconomyState {
    ledger: ResourceLedger,
    generators: Vec<Generator>,
    counter_scale: f32,
    hint: HintState,
    open: bool,
}

//=== EconomyEngine =======================================================

/// Resource ledger, generator catalog and purchase rules for one round.
pub struct EconomyEngine {
    state: EconomyState,
    tasks: TaskScheduler<EconomyState>,
    price_growth: f64,
    tween_duration: f32,
}

impl EconomyEngine {
    //--- Construction -----------------------------------------------------

    /// Creates an empty ledger over the given catalog.
    pub fn new(catalog: &[GeneratorSpec], price_growth: f64, tween_duration: f32) -> Self {
        let generators = catalog
            .iter()
            .enumerate()
            .map(|(id, spec)| Generator::from_spec(id, spec))
            .collect();

        Self {
            state: EconomyState {
                ledger: ResourceLedger::new(),
                generators,
                counter_scale: 1.0,
                hint: HintState::Pending,
                open: true,
            },
            tasks: TaskScheduler::new(),
            price_growth,
            tween_duration,
        }
    }

    /// Creates an engine using the catalog and tuning from `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(&config.generators, config.price_growth, config.counter_tween)
    }

    //--- Accrual ----------------------------------------------------------

    /// Adds `amount` to the balance.
    ///
    /// `0` is a strict no-op. `1` (a manual click) snaps the displayed
    /// balance; larger batches tween it. Afterwards every hidden generator
    /// whose threshold is met becomes visible.
    pub fn add_resource(&mut self, amount: u64) -> Result<AddOutcome, EconomyError> {
        if amount == 0 {
            return Ok(AddOutcome::default());
        }

        let before = self.state.ledger.credit(amount).map_err(log_overflow)?;
        let after = self.state.ledger.balance();

        if amount == 1 {
            self.state.ledger.snap_display();
        }
        let tween = amount != 1;

        self.tasks.start(Task::linear(self.tween_duration, move |state: &mut EconomyState, x| {
            state.counter_scale = hover_out_scale(x);
            if tween {
                let balance = state.ledger.balance();
                // Another add or a purchase may have moved the balance since
                // this tween started; the last frame always lands on it.
                let shown = if x >= 1.0 {
                    balance
                } else {
                    lerp_u64(before, after, x).max(state.ledger.displayed_balance)
                };
                state.ledger.displayed_balance = shown.min(balance);
            }
        }));

        Ok(self.unlock_scan())
    }

    /// One whole-second accrual step.
    pub fn tick(&mut self) -> Result<AddOutcome, EconomyError> {
        let rate = self.state.ledger.generation_rate();
        let outcome = self.add_resource(rate)?;

        for generator in &mut self.state.generators {
            generator.accumulate_output().map_err(log_overflow)?;
        }

        Ok(outcome)
    }

    fn unlock_scan(&mut self) -> AddOutcome {
        let balance = self.state.ledger.balance();
        let mut outcome = AddOutcome::default();

        for generator in &mut self.state.generators {
            if generator.is_visible() || generator.unlock_threshold() > balance {
                continue;
            }
            if generator.unlock() {
                outcome.revealed.push(generator.id());
            }
        }

        for &id in &outcome.revealed {
            debug!(target: "economy", "Generator {} unlocked at balance {}", id, balance);
            self.tasks.start(Task::fallible(self.tween_duration, move |state: &mut EconomyState, x| {
                let generator = state
                    .generators
                    .get_mut(id)
                    .ok_or_else(|| TaskFault::MissingTarget(format!("generator {}", id)))?;
                generator.reveal = circular_ease_out(x);
                Ok(())
            }));
        }

        // The hint follows the newest reveal until the first purchase.
        if let Some(&anchor) = outcome.revealed.last() {
            if self.state.hint == HintState::Pending {
                outcome.hint = outcome.revealed.first().copied();
            }
            if self.state.hint != HintState::Dismissed {
                self.state.hint = HintState::Shown { anchor };
                outcome.hint_anchor = Some(anchor);
            }
        }

        outcome
    }

    //--- Purchasing -------------------------------------------------------

    /// Attempts to buy one unit of generator `id`.
    pub fn purchase(&mut self, id: GeneratorId) -> Result<PurchaseOutcome, EconomyError> {
        let balance = self.state.ledger.balance();

        let Some(generator) = self.state.generators.get(id) else {
            return Ok(PurchaseOutcome::Rejected(RejectReason::UnknownGenerator));
        };
        if !generator.is_visible() {
            return Ok(PurchaseOutcome::Rejected(RejectReason::Locked));
        }
        if !self.state.open {
            return Ok(PurchaseOutcome::Rejected(RejectReason::Closed));
        }

        let price = generator.price();
        if balance < price {
            return Ok(PurchaseOutcome::Rejected(RejectReason::InsufficientBalance {
                balance,
                price,
            }));
        }

        // Validate everything that can overflow before mutating.
        let new_price = generator.next_price(self.price_growth).map_err(log_overflow)?;
        let rate = generator.rate_per_unit();
        self.state
            .ledger
            .generation_rate()
            .checked_add(rate)
            .ok_or(EconomyError::Overflow("generation rate"))
            .map_err(log_overflow)?;

        if !self.state.ledger.try_debit(price) {
            return Ok(PurchaseOutcome::Rejected(RejectReason::InsufficientBalance {
                balance,
                price,
            }));
        }
        self.state.ledger.raise_rate(rate)?;
        self.state.generators[id].apply_purchase(new_price);

        let hint_dismissed = self.state.hint != HintState::Dismissed;
        self.state.hint = HintState::Dismissed;

        info!(
            target: "economy",
            "Purchased {} for {} (now {}, rate {}/s)",
            self.state.generators[id].name(),
            price,
            new_price,
            self.state.ledger.generation_rate()
        );

        Ok(PurchaseOutcome::Purchased {
            id,
            paid: price,
            new_price,
            hint_dismissed,
        })
    }

    /// Closes the shop for the rest of the round.
    pub fn close(&mut self) {
        self.state.open = false;
    }

    //--- Frame Update -----------------------------------------------------

    /// Advances the economy's own animations.
    pub fn step(&mut self, real_dt: f32) {
        self.tasks.step_all(real_dt, &mut self.state);
    }

    //--- Queries ----------------------------------------------------------

    pub fn ledger(&self) -> &ResourceLedger {
        &self.state.ledger
    }

    pub fn generators(&self) -> &[Generator] {
        &self.state.generators
    }

    pub fn generator(&self, id: GeneratorId) -> Option<&Generator> {
        self.state.generators.get(id)
    }

    pub fn hint(&self) -> HintState {
        self.state.hint
    }

    /// Pulse scale of the balance counter.
    pub fn counter_scale(&self) -> f32 {
        self.state.counter_scale
    }

    /// True until [`close`](Self::close) is called.
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Number of economy animations still running.
    pub fn pending_animations(&self) -> usize {
        self.tasks.len()
    }
}

fn log_overflow(err: EconomyError) -> EconomyError {
    error!(target: "economy", "{}", err);
    err
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::economy::generator::{default_catalog, DEFAULT_PRICE_GROWTH};
    use proptest::prelude::*;

    fn engine() -> EconomyEngine {
        EconomyEngine::new(&default_catalog(), DEFAULT_PRICE_GROWTH, 0.3)
    }

    fn single(base_price: u64, rate: u64, unlock: u64) -> EconomyEngine {
        EconomyEngine::new(
            &[GeneratorSpec::new("Test", "test", base_price, rate, unlock)],
            DEFAULT_PRICE_GROWTH,
            0.3,
        )
    }

    //=====================================================================
    // Accrual
    //=====================================================================

    #[test]
    fn add_zero_is_a_strict_no_op() {
        let mut economy = engine();
        let outcome = economy.add_resource(0).unwrap();

        assert_eq!(outcome, AddOutcome::default());
        assert_eq!(economy.ledger(), &ResourceLedger::new());
        assert_eq!(economy.pending_animations(), 0);
        assert_eq!(economy.hint(), HintState::Pending);
    }

    #[test]
    fn click_snaps_displayed_balance() {
        let mut economy = engine();
        economy.add_resource(1).unwrap();
        assert_eq!(economy.ledger().balance(), 1);
        assert_eq!(economy.ledger().displayed_balance(), 1);
    }

    #[test]
    fn batch_add_tweens_displayed_balance() {
        let mut economy = engine();
        economy.add_resource(100).unwrap();
        assert_eq!(economy.ledger().displayed_balance(), 0);

        economy.step(0.15);
        assert_eq!(economy.ledger().displayed_balance(), 50);

        economy.step(0.15);
        assert_eq!(economy.ledger().displayed_balance(), 100);
        assert_eq!(economy.pending_animations(), 0);
    }

    #[test]
    fn tween_never_shows_more_than_balance() {
        let mut economy = single(10, 1, 0);
        economy.add_resource(1_000).unwrap();
        economy.step(0.1);
        economy.purchase(0).unwrap();
        economy.step(0.1);
        assert!(economy.ledger().displayed_balance() <= economy.ledger().balance());
    }

    #[test]
    fn click_during_tween_still_ends_on_balance() {
        let mut economy = engine();
        economy.add_resource(100).unwrap();
        economy.step(0.15);
        economy.add_resource(1).unwrap();
        assert_eq!(economy.ledger().displayed_balance(), 101);

        for _ in 0..20 {
            economy.step(0.05);
            assert_eq!(economy.ledger().displayed_balance(), 101);
        }
        assert_eq!(economy.pending_animations(), 0);
    }

    #[test]
    fn purchase_during_tween_still_ends_on_balance() {
        let mut economy = single(10, 1, 0);
        economy.add_resource(1_000).unwrap();
        economy.step(0.1);
        economy.purchase(0).unwrap();
        economy.step(0.3);

        assert_eq!(economy.ledger().balance(), 990);
        assert_eq!(economy.ledger().displayed_balance(), 990);
    }

    #[test]
    fn ten_ticks_at_rate_ten_reach_one_hundred_with_one_hint() {
        let mut economy = single(10, 10, 50);
        economy.state.ledger.raise_rate(10).unwrap();

        let mut hints = 0;
        for _ in 0..10 {
            if economy.tick().unwrap().hint.is_some() {
                hints += 1;
            }
        }

        assert_eq!(economy.ledger().balance(), 100);
        assert_eq!(hints, 1);
    }

    #[test]
    fn tick_accumulates_lifetime_output() {
        let mut economy = single(10, 3, 0);
        economy.add_resource(30).unwrap();
        economy.purchase(0).unwrap();
        economy.tick().unwrap();
        economy.tick().unwrap();
        assert_eq!(economy.generator(0).unwrap().total_generated(), 6);
    }

    //=====================================================================
    // Unlocking
    //=====================================================================

    #[test]
    fn unlock_happens_on_threshold_and_reveals_in_order() {
        let mut economy = engine();
        let outcome = economy.add_resource(20).unwrap();

        assert_eq!(outcome.revealed, vec![0, 1]);
        assert_eq!(outcome.hint, Some(0));
        assert_eq!(outcome.hint_anchor, Some(1));
        assert_eq!(economy.hint(), HintState::Shown { anchor: 1 });

        let outcome = economy.add_resource(1).unwrap();
        assert!(outcome.revealed.is_empty());
        assert_eq!(outcome.hint, None);
    }

    #[test]
    fn reveal_animation_completes() {
        let mut economy = engine();
        economy.add_resource(10).unwrap();
        economy.step(0.3);
        assert_eq!(economy.generator(0).unwrap().reveal(), 1.0);
        assert_eq!(economy.pending_animations(), 0);
    }

    //=====================================================================
    // Purchasing
    //=====================================================================

    #[test]
    fn purchase_rejected_without_funds() {
        let mut economy = engine();
        economy.add_resource(9).unwrap();
        economy.state.generators[0].unlock();

        let outcome = economy.purchase(0).unwrap();
        assert_eq!(
            outcome,
            PurchaseOutcome::Rejected(RejectReason::InsufficientBalance { balance: 9, price: 10 })
        );
        assert_eq!(economy.ledger().balance(), 9);
        assert_eq!(economy.generator(0).unwrap().owned(), 0);
    }

    #[test]
    fn purchase_rejected_when_locked_unknown_or_closed() {
        let mut economy = engine();
        economy.add_resource(10).unwrap();

        assert_eq!(
            economy.purchase(1).unwrap(),
            PurchaseOutcome::Rejected(RejectReason::Locked)
        );
        assert_eq!(
            economy.purchase(99).unwrap(),
            PurchaseOutcome::Rejected(RejectReason::UnknownGenerator)
        );

        economy.close();
        assert_eq!(
            economy.purchase(0).unwrap(),
            PurchaseOutcome::Rejected(RejectReason::Closed)
        );
        assert_eq!(economy.ledger().balance(), 10);
    }

    #[test]
    fn purchase_moves_balance_into_rate() {
        let mut economy = engine();
        economy.add_resource(25).unwrap();

        let outcome = economy.purchase(0).unwrap();
        assert_eq!(
            outcome,
            PurchaseOutcome::Purchased {
                id: 0,
                paid: 10,
                new_price: 11,
                hint_dismissed: true,
            }
        );
        assert_eq!(economy.ledger().balance(), 15);
        assert_eq!(economy.ledger().displayed_balance(), 15);
        assert_eq!(economy.ledger().generation_rate(), 1);
        assert_eq!(economy.hint(), HintState::Dismissed);
    }

    #[test]
    fn hint_never_returns_after_dismissal() {
        let mut economy = engine();
        economy.add_resource(10).unwrap();
        economy.purchase(0).unwrap();
        let outcome = economy.add_resource(100_000).unwrap();
        assert_eq!(outcome.hint, None);
        assert_eq!(outcome.hint_anchor, None);
        assert_eq!(economy.hint(), HintState::Dismissed);
    }

    #[test]
    fn shown_hint_moves_to_each_new_generator() {
        let mut economy = engine();
        let first = economy.add_resource(10).unwrap();
        assert_eq!(first.hint, Some(0));
        assert_eq!(first.hint_anchor, Some(0));

        let second = economy.add_resource(10).unwrap();
        assert_eq!(second.revealed, vec![1]);
        assert_eq!(second.hint, None);
        assert_eq!(second.hint_anchor, Some(1));
        assert_eq!(economy.hint(), HintState::Shown { anchor: 1 });
    }

    #[test]
    fn fifty_purchases_match_direct_formula() {
        let mut economy = single(10, 1, 0);
        economy.add_resource(u64::MAX / 2).unwrap();

        for n in 1..=50_u32 {
            match economy.purchase(0).unwrap() {
                PurchaseOutcome::Purchased { new_price, .. } => {
                    let expected = (10.0_f64 * 1.15_f64.powi(n as i32)).floor() as u64;
                    assert_eq!(new_price, expected, "purchase {}", n);
                }
                other => panic!("purchase {} rejected: {:?}", n, other),
            }
        }
        assert_eq!(economy.generator(0).unwrap().owned(), 50);
    }

    //=====================================================================
    // Properties
    //=====================================================================

    proptest! {
        #[test]
        fn visibility_is_monotonic(adds in proptest::collection::vec(0_u64..5_000, 1..60)) {
            let mut economy = engine();
            let mut seen = vec![false; economy.generators().len()];

            for amount in adds {
                economy.add_resource(amount).unwrap();
                for (i, generator) in economy.generators().iter().enumerate() {
                    prop_assert!(!(seen[i] && !generator.is_visible()));
                    seen[i] |= generator.is_visible();
                }
            }
        }

        #[test]
        fn purchase_never_overdraws(adds in proptest::collection::vec(0_u64..500, 1..40),
                                    buys in proptest::collection::vec(0_usize..5, 1..40)) {
            let mut economy = engine();
            for (amount, id) in adds.into_iter().zip(buys) {
                economy.add_resource(amount).unwrap();
                let before = economy.ledger().balance();
                let price = economy.generator(id).map(|g| g.price()).unwrap_or(0);
                if let PurchaseOutcome::Purchased { paid, .. } = economy.purchase(id).unwrap() {
                    prop_assert!(before >= price);
                    prop_assert_eq!(economy.ledger().balance(), before - paid);
                }
            }
        }
    }
}
