//! Ordered roll modifiers
//!
//! Each roll or max hit runs its conditional bonuses as a fixed list of
//! `Modifier`s. A modifier inspects the calculator and the running value and
//! either declines or returns the detail key it traces under and the effect
//! to apply. Lists run in order; each effect truncates on its own.

use super::base::BaseCalc;
use crate::details::DetailKey;
use crate::math::Factor;

/// What a matching modifier does to the running value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    /// `value * n / d`
    Factor(Factor),
    /// `value + n`
    Add(i32),
    /// `value + base * n / d`, where `base` is the unmodified roll
    AddOfBase(Factor),
    /// Replace the value outright
    Set(i32),
}

/// Inputs a modifier sees
#[derive(Debug, Clone, Copy)]
pub(crate) struct Step {
    pub value: i32,
}

pub(crate) type ModifierFn = fn(&BaseCalc, Step) -> Option<(DetailKey, Effect)>;

#[derive(Clone, Copy)]
pub(crate) struct Modifier {
    pub name: &'static str,
    pub apply: ModifierFn,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier").field("name", &self.name).finish()
    }
}

pub(crate) const fn modifier(name: &'static str, apply: ModifierFn) -> Modifier {
    Modifier { name, apply }
}

/// Run a modifier list over `value`, tracing every effect that applies
pub(crate) fn run_chain(calc: &BaseCalc, base: i32, mut value: i32, chain: &[Modifier]) -> i32 {
    for m in chain {
        let Some((key, effect)) = (m.apply)(calc, Step { value }) else {
            continue;
        };
        value = match effect {
            Effect::Factor(f) => calc.track_factor(key, value, f),
            Effect::Add(n) => calc.track_add(key, value, n),
            Effect::AddOfBase(f) => {
                let bonus = calc.track_factor(key, base, f);
                calc.track_add(key, value, bonus)
            }
            Effect::Set(v) => calc.track(key, v),
        };
    }
    value
}
