//! resolution.rs：
//! - 戰鬥判定的純計算：傷害、治療、行動順序、目標選擇。
//! - 需要隨機的計算分成兩層：`calc_*` 負責擲骰，`*_with_*` 接收擲骰結果做純計算，方便測試固定數值。
//! - 不修改任何單位狀態。
use crate::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// 計算傷害，浮動值於 [0.8, 1.2) 之間隨機
pub fn calc_damage(
    rng: &mut impl Rng,
    attacker: &Unit,
    defender: &Unit,
    is_critical: bool,
) -> Hp {
    let variance = rng.random_range(DAMAGE_VARIANCE_MIN..DAMAGE_VARIANCE_MAX);
    damage_with_variance(attacker, defender, is_critical, variance)
}

/// 傷害公式
/// - 原始值 = 攻擊 × 攻擊加成 × 浮動值，爆擊再 × 1.8
/// - 防禦減傷：× (1 - defense / (defense + 50))，四捨五入
/// - 護盾：再減半並四捨五入
/// - 最低 1 點
pub fn damage_with_variance(
    attacker: &Unit,
    defender: &Unit,
    is_critical: bool,
    variance: f64,
) -> Hp {
    let mut raw = attacker.attack as f64 * attacker.attack_buff * variance;
    if is_critical {
        raw *= CRITICAL_MULTIPLIER;
    }

    let defense = defender.defense as f64;
    let mitigation = 1.0 - defense / (defense + DEFENSE_CONSTANT);
    let mut damage = (raw * mitigation).round();

    if defender.is_shielded {
        damage = (damage * SHIELD_FACTOR).round();
    }

    // NaN 轉型為 0、無限大轉型為 i32 上限，皆由 max 收斂
    (damage as Hp).max(MIN_DAMAGE)
}

/// 普通攻擊是否爆擊
pub fn roll_critical(rng: &mut impl Rng) -> bool {
    rng.random_bool(CRITICAL_CHANCE)
}

/// 治療技能的治療量：治療者最大血量的 30% ~ 40%
pub fn calc_healing(rng: &mut impl Rng, healer: &Unit) -> Hp {
    let ratio = rng.random_range(HEALING_RATIO_MIN..HEALING_RATIO_MAX);
    healing_with_ratio(healer, ratio)
}

pub fn healing_with_ratio(healer: &Unit, ratio: f64) -> Hp {
    (healer.max_hp as f64 * ratio).round() as Hp
}

/// 一般治療行動的治療量：行動者最大血量的 20%
pub fn basic_heal_amount(actor: &Unit) -> Hp {
    healing_with_ratio(actor, BASIC_HEAL_RATIO)
}

/// 計算本回合行動順序
/// - 只包含存活單位
/// - 速度高者優先
/// - 同速時順序隨機：先洗牌再做穩定排序
pub fn determine_turn_order<'a>(rng: &mut impl Rng, units: &'a [Unit]) -> Vec<&'a Unit> {
    let mut order: Vec<&Unit> = units.iter().filter(|u| u.is_alive()).collect();
    order.shuffle(rng);
    order.sort_by(|a, b| b.speed.cmp(&a.speed));
    order
}

/// 選擇攻擊目標
/// - 有嘲諷中的單位時必須選它（多個時取第一個）
/// - 否則選血量最低者，同血量取列舉順序較前者
pub fn select_target<'a>(enemies: &[&'a Unit]) -> Option<&'a Unit> {
    if let Some(taunting) = enemies.iter().find(|u| u.is_taunting) {
        return Some(*taunting);
    }
    enemies
        .iter()
        .copied()
        .reduce(|lowest, u| if u.hp < lowest.hp { u } else { lowest })
}

/// 選擇治療目標：血量比例最低的友方，同比例取列舉順序較前者
pub fn select_heal_target<'a>(allies: &[&'a Unit]) -> Option<&'a Unit> {
    allies.iter().copied().reduce(|lowest, u| {
        if u.hp_ratio() < lowest.hp_ratio() {
            u
        } else {
            lowest
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit(id: &str, class: UnitClass, team: TeamID, overrides: UnitOverrides) -> Unit {
        create_unit(id, id, class, team, Some(&overrides))
    }

    #[test]
    fn test_damage_with_variance() {
        let dps = create_unit("p2", "dps", UnitClass::Dps, PLAYER_TEAM, None);
        let tank = create_unit("e1", "tank", UnitClass::Tank, ENEMY_TEAM, None);
        let shielded_tank = unit(
            "e1",
            UnitClass::Tank,
            ENEMY_TEAM,
            UnitOverrides {
                is_shielded: Some(true),
                ..Default::default()
            },
        );

        // 減傷 = 1 - 20/70
        let test_data = [
            (&tank, false, 0.8, 14),
            (&tank, false, 1.0, 18),
            (&tank, false, 1.2, 21),
            (&tank, true, 1.0, 32),
            (&shielded_tank, false, 1.0, 9),
            (&shielded_tank, true, 1.0, 16),
        ];
        for (defender, is_critical, variance, expected) in test_data {
            assert_eq!(
                damage_with_variance(&dps, defender, is_critical, variance),
                expected,
                "critical {is_critical} variance {variance} shielded {}",
                defender.is_shielded
            );
        }
    }

    #[test]
    fn test_damage_uses_attack_buff() {
        let buffed = unit(
            "p2",
            UnitClass::Dps,
            PLAYER_TEAM,
            UnitOverrides {
                attack_buff: Some(2.0),
                ..Default::default()
            },
        );
        let tank = create_unit("e1", "tank", UnitClass::Tank, ENEMY_TEAM, None);
        // 25 × 2.0 × 1.0 × 0.714... = 35.7
        assert_eq!(damage_with_variance(&buffed, &tank, false, 1.0), 36);
    }

    #[test]
    fn test_damage_minimum_is_one() {
        let weak = unit(
            "p1",
            UnitClass::Healer,
            PLAYER_TEAM,
            UnitOverrides {
                attack: Some(0),
                ..Default::default()
            },
        );
        let fortress = unit(
            "e1",
            UnitClass::Tank,
            ENEMY_TEAM,
            UnitOverrides {
                defense: Some(100_000),
                is_shielded: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(damage_with_variance(&weak, &fortress, false, 0.8), 1);
        assert_eq!(damage_with_variance(&weak, &fortress, true, 1.2), 1);

        // defense + 50 == 0 時除以零
        let broken = unit(
            "e2",
            UnitClass::Tank,
            ENEMY_TEAM,
            UnitOverrides {
                defense: Some(-50),
                ..Default::default()
            },
        );
        assert!(damage_with_variance(&weak, &broken, false, 1.0) >= 1);
    }

    #[test]
    fn test_calc_damage_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let dps = create_unit("p2", "dps", UnitClass::Dps, PLAYER_TEAM, None);
        let tank = create_unit("e1", "tank", UnitClass::Tank, ENEMY_TEAM, None);
        for _ in 0..500 {
            let damage = calc_damage(&mut rng, &dps, &tank, false);
            assert!((14..=21).contains(&damage), "{damage}");
        }
    }

    #[test]
    fn test_healing() {
        let healer = create_unit("p3", "healer", UnitClass::Healer, PLAYER_TEAM, None);
        assert_eq!(healing_with_ratio(&healer, 0.30), 30);
        assert_eq!(healing_with_ratio(&healer, 0.349), 35);
        assert_eq!(basic_heal_amount(&healer), 20);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let amount = calc_healing(&mut rng, &healer);
            assert!((30..=40).contains(&amount), "{amount}");
        }
    }

    #[test]
    fn test_determine_turn_order() {
        let dead_dps = unit(
            "e2",
            UnitClass::Dps,
            ENEMY_TEAM,
            UnitOverrides {
                hp: Some(0),
                ..Default::default()
            },
        );
        let units = vec![
            create_unit("p1", "tank", UnitClass::Tank, PLAYER_TEAM, None),
            create_unit("p2", "dps", UnitClass::Dps, PLAYER_TEAM, None),
            create_unit("p3", "healer", UnitClass::Healer, PLAYER_TEAM, None),
            create_unit("e1", "tank", UnitClass::Tank, ENEMY_TEAM, None),
            dead_dps,
            create_unit("e3", "support", UnitClass::Support, ENEMY_TEAM, None),
        ];

        let mut rng = StdRng::seed_from_u64(3);
        let mut seen_tank_orders = std::collections::BTreeSet::new();
        for _ in 0..64 {
            let order: Vec<&str> = determine_turn_order(&mut rng, &units)
                .into_iter()
                .map(|u| u.id.as_str())
                .collect();
            assert_eq!(order.len(), 5);
            assert!(!order.contains(&"e2"));
            assert_eq!(&order[..3], &["p2", "e3", "p3"]);
            // 同速的兩個 Tank 順序不固定，但都必須出現一次
            let tail = (order[3], order[4]);
            assert!(tail == ("p1", "e1") || tail == ("e1", "p1"), "{tail:?}");
            seen_tank_orders.insert(tail);
        }
        assert_eq!(seen_tank_orders.len(), 2);
    }

    #[test]
    fn test_select_target() {
        let low = unit(
            "e2",
            UnitClass::Dps,
            ENEMY_TEAM,
            UnitOverrides {
                hp: Some(10),
                ..Default::default()
            },
        );
        let also_low = unit(
            "e3",
            UnitClass::Support,
            ENEMY_TEAM,
            UnitOverrides {
                hp: Some(10),
                ..Default::default()
            },
        );
        let taunting = unit(
            "e1",
            UnitClass::Tank,
            ENEMY_TEAM,
            UnitOverrides {
                is_taunting: Some(true),
                ..Default::default()
            },
        );
        let plain_tank = create_unit("e1", "tank", UnitClass::Tank, ENEMY_TEAM, None);

        let pick = |enemies: &[&Unit]| select_target(enemies).map(|u| u.id.clone());
        assert_eq!(pick(&[&plain_tank, &low, &also_low]), Some("e2".to_string()));
        assert_eq!(pick(&[&also_low, &low]), Some("e3".to_string()));
        assert_eq!(pick(&[&low, &taunting, &also_low]), Some("e1".to_string()));
        assert_eq!(pick(&[]), None);
    }

    #[test]
    fn test_select_heal_target() {
        let tank = unit(
            "p1",
            UnitClass::Tank,
            PLAYER_TEAM,
            UnitOverrides {
                hp: Some(75),
                ..Default::default()
            },
        );
        let dps = unit(
            "p2",
            UnitClass::Dps,
            PLAYER_TEAM,
            UnitOverrides {
                hp: Some(60),
                ..Default::default()
            },
        );
        let healer = unit(
            "p3",
            UnitClass::Healer,
            PLAYER_TEAM,
            UnitOverrides {
                hp: Some(50),
                ..Default::default()
            },
        );
        // 比例：0.5、0.75、0.5，取第一個 0.5
        let target = select_heal_target(&[&tank, &dps, &healer]).unwrap();
        assert_eq!(target.id, "p1");
        assert!(select_heal_target(&[]).is_none());
    }
}
