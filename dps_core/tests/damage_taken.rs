//! Monster-side rolls and expected damage taken per kill

use dps_core::prelude::*;

fn data() -> DataSource {
    DataSource::builtin().unwrap()
}

fn calc(player: &Player, monster: &Monster) -> NpcVsPlayerCalc {
    NpcVsPlayerCalc::new(player, monster, CalcOpts::default()).unwrap()
}

fn bandos(data: &DataSource) -> Vec<EquipmentPiece> {
    ["Bandos chestplate", "Bandos tassets", "Neitiznot faceguard"]
        .iter()
        .map(|name| data.equipment(name).unwrap())
        .collect()
}

#[test]
fn test_graardor_against_naked_player() {
    let data = data();
    let graardor = data.monster("General Graardor", None).unwrap();
    let c = calc(&Player::default(), &graardor);

    assert_eq!(c.npc_attack_roll(), 289 * 184);
    assert_eq!(c.npc_max_hit(), 60);
    assert_eq!(c.player_defence_roll(), 107 * 64);

    let expected_acc = 1.0 - (107.0 * 64.0 + 2.0) / (2.0 * (289.0 * 184.0 + 1.0));
    assert!((c.hit_chance() - expected_acc).abs() < 1e-9);
    // uniform 0..=60 every 6 ticks
    assert!((c.dps() - expected_acc * 30.0 / 6.0 / 0.6).abs() < 1e-9);
}

#[test]
fn test_armour_lowers_damage_taken() {
    let data = data();
    let graardor = data.monster("General Graardor", None).unwrap();
    let naked = calc(&Player::default(), &graardor);
    let armoured = calc(&Player::default().with_equipment(bandos(&data)), &graardor);

    // crush 105 + 66 + 59
    assert_eq!(armoured.player_defence_roll(), 107 * (230 + 64));
    assert!(armoured.hit_chance() < naked.hit_chance());
    assert!(armoured.dps() < naked.dps());
}

#[test]
fn test_formula_max_hit_without_listed_value() {
    let data = data();
    let spectre = data.monster("Aberrant spectre", None).unwrap();
    let c = calc(&Player::default(), &spectre);
    // ((9 + 105) * 64 + 320) / 640
    assert_eq!(c.npc_max_hit(), 11);

    let mut player = Player::default();
    player.skills.magic = 1;
    let c = calc(&player, &spectre);
    // (7 * 1 + 3 * 99) / 10 = 30
    assert_eq!(c.player_defence_roll(), (8 + 30) * 64);
}

#[test]
fn test_overhead_prayer_blocks_matching_style() {
    let data = data();
    let zulrah = data.monster("Zulrah", None).unwrap();

    let mut player = Player::default();
    player.activate_prayer(Prayer::ProtectFromMagic);
    assert!(calc(&player, &zulrah).dps() > 0.0);

    player.activate_prayer(Prayer::ProtectFromMissiles);
    let c = calc(&player, &zulrah);
    assert_eq!(c.dps(), 0.0);
    assert_eq!(
        c.damage_taken().unwrap(),
        DamageTaken::Expected {
            dps: 0.0,
            per_kill: 0.0
        }
    );
}

#[test]
fn test_damage_per_kill_uses_kill_time() {
    let data = data();
    let whip = data.equipment("Abyssal whip").unwrap();
    let player = Player::default().with_equipment([whip]);
    let demon = data.monster("Abyssal demon", Some("Standard")).unwrap();

    let taken = calc(&player, &demon).damage_taken().unwrap();
    let kill_time = PlayerVsNpcCalc::new(&player, &demon, CalcOpts::default()).unwrap().ttk();
    let dps = taken.dps().unwrap();
    assert!((taken.per_kill().unwrap() - dps * kill_time).abs() < 1e-9);
}

#[test]
fn test_weaker_loadout_takes_more_damage() {
    let data = data();
    let demon = data.monster("Abyssal demon", Some("Standard")).unwrap();
    let whip = Player::default().with_equipment([data.equipment("Abyssal whip").unwrap()]);

    let unarmed = calc(&Player::default(), &demon).damage_taken().unwrap();
    let armed = calc(&whip, &demon).damage_taken().unwrap();
    assert!(armed.per_kill().unwrap() < unarmed.per_kill().unwrap());
}

#[test]
fn test_unknown_style_is_unavailable() {
    let mut m = Monster {
        name: "Typeless thing".to_string(),
        ..Default::default()
    };
    m.skills.hp = 50;
    let taken = calc(&Player::default(), &m).damage_taken().unwrap();
    assert_eq!(taken, DamageTaken::Unavailable);
    assert_eq!(taken.per_kill(), None);
}
