//! Known rolls and max hits for loadouts built from the bundled tables

use dps_core::prelude::*;
use dps_core::{DetailKey, DetailValue};

fn data() -> DataSource {
    DataSource::builtin().unwrap()
}

fn demon(data: &DataSource) -> Monster {
    data.monster("Abyssal demon", Some("Standard")).unwrap()
}

fn level_one(mut player: Player) -> Player {
    player.skills.atk = 1;
    player.skills.str = 1;
    player.skills.ranged = 1;
    player.skills.magic = 1;
    player
}

fn calc(player: &Player, monster: &Monster) -> PlayerVsNpcCalc {
    PlayerVsNpcCalc::new(player, monster, CalcOpts::default()).unwrap()
}

#[test]
fn test_unarmed_vs_abyssal_demon() {
    let data = data();
    let c = calc(&Player::default(), &demon(&data));

    // (99 + 3 + 8) * 64
    assert_eq!(c.max_attack_roll(), 7040);
    // (99 + 8) * 64 rounded down to tenths of a hitpoint
    assert_eq!(c.max_hit(), 11);
    // (135 + 9) * (20 + 64)
    assert_eq!(c.npc_defence_roll(), 12096);

    let acc = c.hit_chance();
    assert!((acc - 7040.0 / (2.0 * 12097.0)).abs() < 1e-9);
    assert!((acc - 0.2910).abs() < 1e-4);

    // accurate zeroes become ones: (1 + 1 + 2 + ... + 11) / 12
    let expected = acc * 67.0 / 12.0;
    assert!((c.distribution().expected_damage() - expected).abs() < 1e-9);
    assert!((c.dps() - expected / 2.4).abs() < 1e-9);
    assert!(c.dps() > 0.66 && c.dps() < 0.69);
}

#[test]
fn test_whip_levels() {
    let data = data();
    let whip = data.equipment("Abyssal whip").unwrap();

    let low = level_one(Player::default().with_equipment([whip.clone()]));
    let c = calc(&low, &demon(&data));
    assert_eq!(c.max_attack_roll(), 1752);
    assert_eq!(c.max_hit(), 2);

    let maxed = Player::default().with_equipment([whip]);
    let c = calc(&maxed, &demon(&data));
    assert_eq!(c.max_attack_roll(), 16060);
    assert_eq!(c.max_hit(), 24);
    assert_eq!(c.attack_speed(), 4);
}

#[test]
fn test_bow_of_faerdhinen_level_one() {
    let data = data();
    let bow = data.equipment("Bow of faerdhinen (c)").unwrap();
    let player = level_one(Player::default().with_equipment([bow]));
    let c = calc(&player, &demon(&data));

    // (1 + 3 + 8) * (128 + 64)
    assert_eq!(c.max_attack_roll(), 2304);
    assert_eq!(c.max_hit(), 3);
    assert!(c.user_issues().is_empty());
}

#[test]
fn test_trident_level_one() {
    let data = data();
    let trident = data.equipment("Trident of the seas").unwrap();
    let player = level_one(Player::default().with_equipment([trident]));
    let c = calc(&player, &demon(&data));

    // (1 + 2 + 9) * (15 + 64)
    assert_eq!(c.max_attack_roll(), 948);
    assert_eq!(c.max_hit(), 0);
    // every accurate cast still lands a one
    assert!((c.distribution().expected_damage() - c.hit_chance()).abs() < 1e-9);
}

#[test]
fn test_gear_bonuses_add_up() {
    let data = data();
    let pieces = ["Abyssal whip", "Amulet of fury", "Fire cape", "Barrows gloves", "Berserker ring (i)"]
        .iter()
        .map(|name| data.equipment(name).unwrap());
    let player = Player::default().with_equipment(pieces);
    let c = calc(&player, &demon(&data));

    // slash 82 + 10 + 1 + 12, strength 82 + 8 + 4 + 12 + 8
    assert_eq!(c.player().bonuses.offensive.slash, 105);
    assert_eq!(c.player().bonuses.bonuses.str, 114);
    assert_eq!(c.max_attack_roll(), 110 * (105 + 64));
}

#[test]
fn test_summary_round_trips_through_json() {
    let data = data();
    let whip = data.equipment("Abyssal whip").unwrap();
    let player = Player::new("Whip").with_equipment([whip]);
    let result = PlayerVsNpcCalc::new(&player, &demon(&data), CalcOpts::new("Whip"))
        .unwrap()
        .summary()
        .unwrap();

    assert_eq!(result.max_hit, 24);
    assert!(result.summary().starts_with("Whip: max hit 24"));

    let json = serde_json::to_string(&result).unwrap();
    let back: CalcResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.max_attack_roll, result.max_attack_roll);
    assert_eq!(back.loadout, "Whip");
}

#[test]
fn test_defence_roll_details() {
    let data = data();
    let c = PlayerVsNpcCalc::new(&Player::default(), &demon(&data), CalcOpts::default().detailed()).unwrap();
    assert_eq!(c.npc_defence_roll(), 12096);

    assert_eq!(c.detail(DetailKey::DefenceRollLevel), Some(DetailValue::Int(135)));
    assert_eq!(c.detail(DetailKey::DefenceRollEffectiveLevel), Some(DetailValue::Int(144)));
    assert_eq!(c.detail(DetailKey::DefenceStatBonus), Some(DetailValue::Int(84)));
    assert_eq!(c.detail(DetailKey::DefenceRollBase), Some(DetailValue::Int(12096)));
    assert_eq!(c.detail(DetailKey::DefenceRollFinal), Some(DetailValue::Int(12096)));
    // only raid monsters get the invocation step
    assert_eq!(c.detail(DetailKey::DefenceRollToa), None);
}
