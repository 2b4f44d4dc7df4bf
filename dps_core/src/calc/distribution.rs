//! Player attack distributions
//!
//! Builds the standard single-roll distribution and then layers weapon,
//! set and monster specific effects over it in a fixed order. Later steps
//! see the result of earlier ones, so the order below is significant.

use super::base::{BaseCalc, Overrides};
use super::bolts::{bolt_distribution, ruby_bolts, Bolt, BoltContext};
use crate::config::ids;
use crate::details::DetailKey;
use crate::dist::claws::{burning_claw_spec, dragon_claw_spec};
use crate::dist::transformers::{capped_reroll, division, flat_add, linear_min, multiply};
use crate::dist::{AttackDistribution, HitDistribution, Hitsplat, TransformOpts, WeightedHit};
use crate::scaling::scale_monster;
use crate::types::{EquipmentCategory, MonsterAttribute, SpellElement, StyleType};

impl BaseCalc {
    /// The full distribution for one attack against the scaled monster
    pub(crate) fn attack_distribution(&self) -> AttackDistribution {
        let acc = self.hit_chance();
        let (min, max) = self.min_and_max();
        let style = self.style_type();
        let melee = self.is_using_melee();
        let monster = &self.monster;

        let standard = HitDistribution::linear(acc, min, max);
        let mut dist = AttackDistribution::single(standard.clone());

        // === Fixed outcomes ===

        if ids::ONE_HIT_MONSTER_IDS.contains(&monster.id) {
            return AttackDistribution::single(HitDistribution::single(1.0, vec![Hitsplat::new(monster.skills.hp)]));
        }

        let always_max = match style {
            Some(StyleType::Magic) => ids::ALWAYS_MAX_HIT_MAGIC_IDS.contains(&monster.id),
            Some(StyleType::Ranged) => ids::ALWAYS_MAX_HIT_RANGED_IDS.contains(&monster.id),
            Some(_) => ids::ALWAYS_MAX_HIT_MELEE_IDS.contains(&monster.id),
            None => false,
        };
        if always_max {
            return AttackDistribution::single(HitDistribution::single(1.0, vec![Hitsplat::new(max)]));
        }

        // === Weapon shapes ===

        if style == Some(StyleType::Ranged) && self.wearing("Tonalztics of ralos") && self.weapon_version() == "Charged" {
            if !self.spec() {
                dist = AttackDistribution::new(vec![standard.clone(), standard.clone()]);
            } else {
                // a landed first hit drains defence before the second rolls
                let mut lowered = self.base_monster.clone();
                lowered.inputs.defence_reductions.tonalztic += 1;
                let lowered_acc = self.sub_calc(scale_monster(&lowered), None).hit_chance();
                let lowered_dist = HitDistribution::linear(lowered_acc, min, max);
                dist = dist.transform(
                    &|first: Hitsplat| {
                        let second = if first.accurate { &lowered_dist } else { &standard };
                        HitDistribution::single(1.0, vec![first]).zip(second)
                    },
                    TransformOpts::default(),
                );
            }
        }

        if melee && self.wearing("Gadderhammer") && monster.has(MonsterAttribute::Shade) {
            let mut hits = standard.scale_probability(0.95).scale_damage(5, 4).hits;
            hits.extend(standard.scale_probability(0.05).scale_damage(2, 1).hits);
            dist = AttackDistribution::single(HitDistribution::new(hits));
        }

        let mut raise_accurate_zeroes = true;
        if self.spec() && self.wearing("Dragon claws") {
            raise_accurate_zeroes = false;
            dist = dragon_claw_spec(acc, max);
        }
        if self.spec() && self.wearing("Burning claws") {
            raise_accurate_zeroes = false;
            dist = burning_claw_spec(acc, max);
        }

        if self.spec() && self.wearing_any(&["Dragon halberd", "Crystal halberd"]) && monster.size > 1 {
            let second_roll = self.max_attack_roll() * 3 / 4;
            let overrides = Overrides {
                attack_roll: Some(second_roll),
                ..self.opts.overrides
            };
            let second_acc = self.sub_calc(monster.clone(), Some(overrides)).hit_chance();
            dist = AttackDistribution::new(vec![standard.clone(), HitDistribution::linear(second_acc, min, max)]);
        }

        if self.spec() && self.wearing("Dragon dagger") {
            dist = AttackDistribution::new(vec![standard.clone(), standard.clone()]);
        }

        if melee && self.wearing_dharok() {
            let full = self.player.skills.hp;
            let current = full + self.player.boosts.hp;
            dist = dist.scale_damage(10000 + (full - current) * full, 10000);
        }

        if melee && self.wearing_veracs() {
            let mut hits = standard.scale_probability(0.75).hits;
            hits.extend(HitDistribution::linear(1.0, 1, max + 1).scale_probability(0.25).hits);
            dist = AttackDistribution::single(HitDistribution::new(hits));
        }

        if style == Some(StyleType::Ranged) && self.wearing_karils() {
            dist = dist.transform(
                &|h: Hitsplat| {
                    HitDistribution::new(vec![
                        WeightedHit::new(0.75, vec![h]),
                        WeightedHit::new(0.25, vec![h, Hitsplat::new(h.damage / 2)]),
                    ])
                },
                TransformOpts::ACCURATE_ONLY,
            );
        }

        if melee && self.wearing_scythe() {
            let hits = monster.size.clamp(1, 3);
            dist = AttackDistribution::new(
                (0..hits)
                    .map(|i| {
                        let splat_max = max >> i;
                        HitDistribution::linear(acc, min.min(splat_max), splat_max)
                    })
                    .collect(),
            );
        }

        if melee && self.wearing("Dual macuahuitl") {
            let second = HitDistribution::linear(acc, 0, max - max / 2);
            let first = AttackDistribution::single(HitDistribution::linear(acc, 0, max / 2));
            dist = first.transform(
                &|h: Hitsplat| HitDistribution::single(1.0, vec![h]).zip(&second),
                TransformOpts::ACCURATE_ONLY,
            );
        }

        if melee && self.wearing_any(&["Torag's hammers", "Sulphur blades"]) {
            dist = AttackDistribution::new(vec![
                HitDistribution::linear(acc, 0, max / 2),
                HitDistribution::linear(acc, 0, max - max / 2),
            ]);
        }

        if melee && self.wearing_keris() && monster.has(MonsterAttribute::Kalphite) {
            let mut hits = standard.scale_probability(50.0 / 51.0).hits;
            hits.extend(standard.scale_probability(1.0 / 51.0).scale_damage(3, 1).hits);
            dist = AttackDistribution::single(HitDistribution::new(hits));
        }

        if melee
            && ids::GUARDIAN_IDS.contains(&monster.id)
            && self.player.equipment.weapon_category() == EquipmentCategory::Pickaxe
        {
            let factor = 50 + self.player.skills.mining + pickaxe_bonus(self.weapon_name());
            let divisor = 150;
            self.track(DetailKey::GuardiansDmgBonus, factor as f64 / divisor as f64);
            dist = dist.transform(&multiply(factor, divisor, 0), TransformOpts::default());
        }

        if self.player.buffs.mark_of_darkness_spell
            && self.player.spell.as_ref().is_some_and(|s| s.name.contains("Demonbane"))
            && monster.has(MonsterAttribute::Demon)
        {
            dist = dist.scale_damage(5, 4);
        }

        if self.player.is_using(StyleType::Magic) && self.wearing_ahrims() {
            dist = dist.transform(
                &|h: Hitsplat| {
                    HitDistribution::new(vec![
                        WeightedHit::new(0.75, vec![h]),
                        WeightedHit::new(0.25, vec![Hitsplat::with_accuracy(h.damage * 13 / 10, h.accurate)]),
                    ])
                },
                TransformOpts::default(),
            );
        }

        // === Bolts ===

        let bolt = self.crossbow_bolt();
        if let Some(bolt) = bolt {
            if let Some(with_bolt) = bolt_distribution(bolt, &self.bolt_context(acc, max), &standard) {
                dist = AttackDistribution::single(with_bolt);
            }
        }

        if raise_accurate_zeroes {
            dist = dist.transform(
                &|h: Hitsplat| HitDistribution::single(1.0, vec![Hitsplat::new(h.damage.max(1))]),
                TransformOpts::ACCURATE_ONLY,
            );
        }

        // Corporeal Beast halves bolt effects but takes rubies in full
        if monster.name == "Corporeal Beast" && !self.wearing_corpbane_weapon() {
            dist = dist.transform(&division(2, 0), TransformOpts::default());
        }

        if bolt == Some(Bolt::Ruby) {
            if let Some(first) = dist.dists.first() {
                dist = AttackDistribution::single(ruby_bolts(&self.bolt_context(acc, max), first));
            }
        }

        self.apply_npc_transforms(dist)
    }

    /// The style damage actually lands as
    fn damage_style(&self) -> Option<StyleType> {
        if self.spec() && self.wearing("Voidwaker") {
            Some(StyleType::Magic)
        } else {
            self.style_type()
        }
    }

    fn weapon_version(&self) -> &str {
        self.player
            .equipment
            .weapon
            .as_ref()
            .map(|w| w.version.as_str())
            .unwrap_or("")
    }

    fn crossbow_bolt(&self) -> Option<Bolt> {
        if !self.player.is_using(StyleType::Ranged) || !self.weapon_name().contains("rossbow") {
            return None;
        }
        self.player.equipment.ammo_name().and_then(Bolt::from_ammo)
    }

    fn bolt_context(&self, accuracy: f64, max_hit: i32) -> BoltContext<'_> {
        BoltContext {
            ranged_level: self.player.skills.ranged + self.player.boosts.ranged,
            accuracy,
            max_hit,
            zaryte: self.wearing("Zaryte crossbow"),
            spec: self.spec(),
            kandarin_diary: self.player.buffs.kandarin_diary,
            monster: &self.monster,
        }
    }

    fn apply_npc_transforms(&self, mut dist: AttackDistribution) -> AttackDistribution {
        if self.is_immune() {
            return AttackDistribution::single(HitDistribution::new(vec![WeightedHit::new(
                1.0,
                vec![Hitsplat::INACCURATE],
            )]));
        }

        let monster = &self.monster;
        let id = monster.id;
        let style = self.damage_style();
        let is_magic = style == Some(StyleType::Magic);
        let is_ranged = style == Some(StyleType::Ranged);
        let all = TransformOpts::default();

        if monster.name == "Zulrah" {
            dist = dist.transform(&capped_reroll(50, 5, 45), all);
        }
        if monster.name == "Fragment of Seren" {
            dist = dist.transform(&linear_min(2, 22), all);
        }
        if monster.name == "Kraken" && is_ranged {
            dist = dist.transform(&division(7, 1), all);
        }
        if ids::VERZIK_P1_IDS.contains(&id) && !self.wearing("Dawnbringer") {
            let limit = if self.is_using_melee() { 10 } else { 3 };
            dist = dist.transform(&linear_min(limit, 0), all);
        }
        if ids::TEKTON_IDS.contains(&id) && is_magic {
            dist = dist.transform(&division(5, 1), all);
        }
        if ids::GLOWING_CRYSTAL_IDS.contains(&id) && is_magic {
            dist = dist.transform(&division(3, 0), all);
        }
        if (ids::OLM_MELEE_HAND_IDS.contains(&id) || ids::OLM_HEAD_IDS.contains(&id)) && is_magic {
            dist = dist.transform(&division(3, 0), all);
        }
        if (ids::OLM_MAGE_HAND_IDS.contains(&id) || ids::OLM_MELEE_HAND_IDS.contains(&id)) && is_ranged {
            dist = dist.transform(&division(3, 0), all);
        }
        if monster.name == "Ice demon" && self.spell_element() != Some(SpellElement::Fire) {
            dist = dist.transform(&division(3, 0), all);
        }
        if monster.name == "Slagilith" && self.player.equipment.weapon_category() != EquipmentCategory::Pickaxe {
            dist = dist.transform(&division(3, 0), all);
        }
        if ids::NIGHTMARE_TOTEM_IDS.contains(&id) && is_magic {
            dist = dist.transform(&multiply(2, 1, 0), all);
        }
        if matches!(monster.name.as_str(), "Slash Bash" | "Zogre" | "Skogre") {
            if self.player.spell.as_ref().is_some_and(|s| s.name == "Crumble Undead") {
                dist = dist.transform(&division(2, 0), all);
            } else if !self.player.is_using(StyleType::Ranged)
                || !self.player.equipment.ammo_name().is_some_and(|a| a.contains(" brutal"))
                || self.weapon_name() != "Comp ogre bow"
            {
                dist = dist.transform(&division(4, 0), all);
            }
        }
        if ids::BA_ATTACKER_IDS.contains(&id) && self.player.buffs.ba_attacker_level != 0 {
            dist = dist.transform(&flat_add(self.player.buffs.ba_attacker_level, 0), all);
        }
        if monster.defensive.flat_armour > 0 {
            dist = dist.transform(&flat_add(-monster.defensive.flat_armour, 1), TransformOpts::ACCURATE_ONLY);
        }

        dist
    }

    fn spell_element(&self) -> Option<SpellElement> {
        self.player.spell.as_ref().and_then(|s| s.element)
    }

    /// Whether nothing the player does can damage the monster
    pub(crate) fn is_immune(&self) -> bool {
        let monster = &self.monster;
        let id = monster.id;
        let style = self.damage_style();
        let melee = self.is_using_melee();
        let category = self.player.equipment.weapon_category();

        if style == Some(StyleType::Magic) && ids::is_immune_to_magic(id) {
            return true;
        }
        if style == Some(StyleType::Ranged) && ids::is_immune_to_ranged(id) {
            return true;
        }
        if melee && ids::is_immune_to_melee(id) {
            return true;
        }
        if melee && ids::IMMUNE_TO_NON_SALAMANDER_MELEE_IDS.contains(&id) && category != EquipmentCategory::Salamander {
            return true;
        }
        if monster.has(MonsterAttribute::Vampyre3) && !self.wearing_vampyrebane(false) {
            return true;
        }
        if monster.has(MonsterAttribute::Vampyre2) && !self.wearing_silver_weapon() && !self.wearing("Efaritay's aid") {
            return true;
        }
        if ids::GUARDIAN_IDS.contains(&id) && (!melee || category != EquipmentCategory::Pickaxe) {
            return true;
        }
        if monster.has(MonsterAttribute::Leafy) && !self.wearing_leaf_bladed_weapon() {
            return true;
        }
        if !monster.has(MonsterAttribute::Rat) && self.wearing_rat_bone_weapon() {
            return true;
        }

        let ammo = self.player.equipment.ammo_name();
        if monster.name == "Fire Warrior of Lesarkus" && (style != Some(StyleType::Ranged) || ammo != Some("Ice arrows")) {
            return true;
        }
        if monster.name == "Fareed" {
            let bad_magic = style == Some(StyleType::Magic) && self.spell_element() != Some(SpellElement::Water);
            let bad_ranged = style == Some(StyleType::Ranged) && !ammo.is_some_and(|a| a.contains("arrow"));
            if bad_magic || bad_ranged {
                return true;
            }
        }

        false
    }

    /// Whether the distribution changes with the monster's remaining hitpoints
    pub(crate) fn dist_is_current_hp_dependent(&self) -> bool {
        if self.monster.name == "Vardorvis" {
            return true;
        }
        self.crossbow_bolt() == Some(Bolt::Ruby)
    }

    /// Ruby bolt damage stops growing past this many hitpoints
    pub(crate) fn ruby_hp_cap_reached(&self, hp: i32) -> bool {
        self.crossbow_bolt() == Some(Bolt::Ruby) && self.monster.inputs.monster_current_hp >= 500 && hp >= 500
    }
}

/// Wield requirement of the pickaxe, which guardians scale damage by
fn pickaxe_bonus(name: &str) -> i32 {
    match name {
        "Bronze pickaxe" | "Iron pickaxe" => 1,
        "Steel pickaxe" => 6,
        "Black pickaxe" => 11,
        "Mithril pickaxe" => 21,
        "Adamant pickaxe" => 31,
        "Rune pickaxe" | "Gilded pickaxe" => 41,
        _ => 61,
    }
}
