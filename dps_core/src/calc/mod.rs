//! Combat calculators
//!
//! `PlayerVsNpcCalc` answers how fast a loadout kills a monster,
//! `NpcVsPlayerCalc` how much damage the monster deals back. Both build on
//! the shared `BaseCalc` state and the roll calculators in `rolls`.

mod base;
mod bolts;
mod distribution;
mod modifiers;
mod npc_vs_player;
mod player_vs_npc;
mod result;
mod rolls;
pub mod ttk;

pub use base::{BaseCalc, CalcOpts, Overrides, UserIssue, UserIssueType};
pub use bolts::Bolt;
pub use npc_vs_player::NpcVsPlayerCalc;
pub use player_vs_npc::{PlayerVsNpcCalc, SpecSupport};
pub use result::{CalcResult, DamageTaken};
pub use rolls::{tbow_scaling, MinMax};
