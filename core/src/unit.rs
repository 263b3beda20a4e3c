//! unit.rs：
//! - 定義單位（Unit）、職業（UnitClass）與職業基礎數值（ClassStats）等資料結構。
//! - 單位自身狀態的變動（扣血、回血、攻擊加成、回合旗標）以方法實作於此。
//! - 不負責戰鬥判定（傷害公式、目標選擇）與回合流程。
use crate::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// 職業，固定四種
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitClass {
    Tank,
    Dps,
    Healer,
    Support,
}

impl UnitClass {
    /// 職業基礎數值
    pub fn base_stats(self) -> ClassStats {
        match self {
            UnitClass::Tank => ClassStats {
                hp: 150,
                attack: 12,
                defense: 20,
                speed: 5,
            },
            UnitClass::Dps => ClassStats {
                hp: 80,
                attack: 25,
                defense: 8,
                speed: 12,
            },
            UnitClass::Healer => ClassStats {
                hp: 100,
                attack: 10,
                defense: 12,
                speed: 8,
            },
            UnitClass::Support => ClassStats {
                hp: 90,
                attack: 14,
                defense: 14,
                speed: 10,
            },
        }
    }

    /// 職業技能名稱
    pub fn skill_name(self) -> &'static str {
        match self {
            UnitClass::Tank => "Iron Wall",
            UnitClass::Dps => "Critical Strike",
            UnitClass::Healer => "Healing Pulse",
            UnitClass::Support => "War Cry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStats {
    pub hp: Hp,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

/// 建立單位時的覆寫欄位，未指定者沿用職業模板
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitOverrides {
    pub hp: Option<Hp>,
    pub max_hp: Option<Hp>,
    pub attack: Option<i32>,
    pub defense: Option<i32>,
    pub speed: Option<i32>,
    pub is_shielded: Option<bool>,
    pub is_taunting: Option<bool>,
    pub attack_buff: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitID,
    pub name: String,
    pub class: UnitClass,
    pub team: TeamID,
    pub hp: Hp,
    pub max_hp: Hp,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    /// 本回合受到的傷害減半，回合開始時清除
    pub is_shielded: bool,
    /// 本回合強制敵方以自己為目標，回合開始時清除
    pub is_taunting: bool,
    /// 攻擊倍率，跨回合保留，範圍 [1.0, 2.0]
    pub attack_buff: f64,
}

impl Unit {
    /// 以預設職業數值建立單位
    pub fn from_class(
        id: impl Into<UnitID>,
        name: impl Into<String>,
        class: UnitClass,
        team: TeamID,
        overrides: Option<&UnitOverrides>,
    ) -> Self {
        Self::from_template(id, name, class, class.base_stats(), team, overrides)
    }

    /// 以指定的職業數值建立單位（例如由設定檔載入的數值表）
    pub fn from_template(
        id: impl Into<UnitID>,
        name: impl Into<String>,
        class: UnitClass,
        stats: ClassStats,
        team: TeamID,
        overrides: Option<&UnitOverrides>,
    ) -> Self {
        let mut unit = Unit {
            id: id.into(),
            name: name.into(),
            class,
            team,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            is_shielded: false,
            is_taunting: false,
            attack_buff: ATTACK_BUFF_BASE,
        };
        if let Some(overrides) = overrides {
            unit.apply_overrides(overrides);
        }
        unit
    }

    /// 套用覆寫後重新夾住數值，確保 0 <= hp <= max_hp 與攻擊加成範圍
    fn apply_overrides(&mut self, overrides: &UnitOverrides) {
        let UnitOverrides {
            hp,
            max_hp,
            attack,
            defense,
            speed,
            is_shielded,
            is_taunting,
            attack_buff,
        } = overrides;
        self.hp = hp.unwrap_or(self.hp);
        self.max_hp = max_hp.unwrap_or(self.max_hp).max(1);
        self.attack = attack.unwrap_or(self.attack);
        self.defense = defense.unwrap_or(self.defense);
        self.speed = speed.unwrap_or(self.speed);
        self.is_shielded = is_shielded.unwrap_or(self.is_shielded);
        self.is_taunting = is_taunting.unwrap_or(self.is_taunting);
        self.attack_buff = attack_buff
            .unwrap_or(self.attack_buff)
            .clamp(ATTACK_BUFF_BASE, ATTACK_BUFF_MAX);
        self.hp = self.hp.clamp(0, self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// 剩餘血量比例
    pub fn hp_ratio(&self) -> f64 {
        self.hp as f64 / self.max_hp as f64
    }

    /// 扣血，最低為 0，回傳實際扣除量
    pub fn take_damage(&mut self, damage: Hp) -> Hp {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(damage.max(0)).max(0);
        before - self.hp
    }

    /// 回血，最高為 max_hp，回傳實際回復量
    pub fn restore_hp(&mut self, amount: Hp) -> Hp {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    pub fn add_attack_buff(&mut self, bonus: f64) {
        self.attack_buff = (self.attack_buff + bonus).min(ATTACK_BUFF_MAX);
    }

    pub fn clear_round_flags(&mut self) {
        self.is_shielded = false;
        self.is_taunting = false;
    }
}

/// 建立單位，永遠成功
pub fn create_unit(
    id: impl Into<UnitID>,
    name: impl Into<String>,
    class: UnitClass,
    team: TeamID,
    overrides: Option<&UnitOverrides>,
) -> Unit {
    Unit::from_class(id, name, class, team, overrides)
}

/// 示範用隊伍：{Tank, DPS, Healer} 對 {Tank, DPS, Support}
/// - (id, 名稱, 職業, 隊伍)
pub const DEMO_ROSTER: [(&str, &str, UnitClass, TeamID); 6] = [
    ("p1", "HTS-Tank", UnitClass::Tank, PLAYER_TEAM),
    ("p2", "HTS-Blaze", UnitClass::Dps, PLAYER_TEAM),
    ("p3", "HTS-Mend", UnitClass::Healer, PLAYER_TEAM),
    ("e1", "ZRK-Wall", UnitClass::Tank, ENEMY_TEAM),
    ("e2", "ZRK-Fury", UnitClass::Dps, ENEMY_TEAM),
    ("e3", "ZRK-Aid", UnitClass::Support, ENEMY_TEAM),
];

/// 以內建職業數值建立示範隊伍
pub fn create_demo_teams() -> (Vec<Unit>, Vec<Unit>) {
    BattleConfig::default().create_demo_teams()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_create_unit_base_stats() {
        let test_data = [
            (UnitClass::Tank, 150, 12, 20, 5),
            (UnitClass::Dps, 80, 25, 8, 12),
            (UnitClass::Healer, 100, 10, 12, 8),
            (UnitClass::Support, 90, 14, 14, 10),
        ];
        for (class, hp, attack, defense, speed) in test_data {
            let unit = create_unit("u", "unit", class, PLAYER_TEAM, None);
            assert_eq!(unit.hp, hp, "{class}");
            assert_eq!(unit.max_hp, hp, "{class}");
            assert_eq!(unit.attack, attack, "{class}");
            assert_eq!(unit.defense, defense, "{class}");
            assert_eq!(unit.speed, speed, "{class}");
            assert!(!unit.is_shielded);
            assert!(!unit.is_taunting);
            assert_eq!(unit.attack_buff, 1.0);
        }
    }

    #[test]
    fn test_create_unit_overrides() {
        let overrides = UnitOverrides {
            hp: Some(40),
            speed: Some(99),
            is_taunting: Some(true),
            ..Default::default()
        };
        let unit = create_unit("e1", "wall", UnitClass::Tank, ENEMY_TEAM, Some(&overrides));
        assert_eq!(unit.hp, 40);
        // max_hp 在覆寫前已由模板決定
        assert_eq!(unit.max_hp, 150);
        assert_eq!(unit.speed, 99);
        assert!(unit.is_taunting);
        assert_eq!(unit.team, ENEMY_TEAM);
    }

    #[test]
    fn test_create_unit_overrides_are_clamped() {
        let overrides = UnitOverrides {
            hp: Some(500),
            attack_buff: Some(3.5),
            ..Default::default()
        };
        let unit = create_unit("u", "unit", UnitClass::Dps, PLAYER_TEAM, Some(&overrides));
        assert_eq!(unit.hp, 80);
        assert_eq!(unit.attack_buff, ATTACK_BUFF_MAX);

        let overrides = UnitOverrides {
            hp: Some(-5),
            max_hp: Some(0),
            attack_buff: Some(0.2),
            ..Default::default()
        };
        let unit = create_unit("u", "unit", UnitClass::Dps, PLAYER_TEAM, Some(&overrides));
        assert_eq!(unit.hp, 0);
        assert_eq!(unit.max_hp, 1);
        assert_eq!(unit.attack_buff, ATTACK_BUFF_BASE);
    }

    #[test]
    fn test_take_damage_and_restore_hp() {
        let mut unit = create_unit("u", "unit", UnitClass::Healer, PLAYER_TEAM, None);
        assert_eq!(unit.take_damage(30), 30);
        assert_eq!(unit.hp, 70);
        assert_eq!(unit.take_damage(500), 70);
        assert_eq!(unit.hp, 0);
        assert!(!unit.is_alive());

        unit.hp = 95;
        assert_eq!(unit.restore_hp(20), 5);
        assert_eq!(unit.hp, unit.max_hp);
    }

    #[test]
    fn test_extreme_hp_saturates() {
        let overrides = UnitOverrides {
            max_hp: Some(Hp::MAX),
            hp: Some(Hp::MAX - 10),
            ..Default::default()
        };
        let mut unit = create_unit("u", "unit", UnitClass::Tank, PLAYER_TEAM, Some(&overrides));
        assert_eq!(unit.restore_hp(Hp::MAX), 10);
        assert_eq!(unit.hp, Hp::MAX);
        assert_eq!(unit.take_damage(Hp::MAX), Hp::MAX);
        assert_eq!(unit.hp, 0);
        assert_eq!(unit.take_damage(Hp::MAX), 0);
    }

    #[test]
    fn test_add_attack_buff_caps_at_max() {
        let mut unit = create_unit("u", "unit", UnitClass::Support, ENEMY_TEAM, None);
        for _ in 0..10 {
            unit.add_attack_buff(WAR_CRY_BONUS);
        }
        assert_eq!(unit.attack_buff, ATTACK_BUFF_MAX);
    }

    #[test]
    fn test_unit_class_parse_and_skill_name() {
        assert_eq!(UnitClass::from_str("tank").unwrap(), UnitClass::Tank);
        assert_eq!(UnitClass::from_str("DPS").unwrap(), UnitClass::Dps);
        assert!(UnitClass::from_str("wizard").is_err());
        assert_eq!(UnitClass::iter().count(), 4);
        assert_eq!(UnitClass::Support.skill_name(), "War Cry");
    }

    #[test]
    fn test_create_demo_teams() {
        let (player_team, enemy_team) = create_demo_teams();
        let classes = |team: &[Unit]| team.iter().map(|u| u.class).collect::<Vec<_>>();
        assert_eq!(
            classes(&player_team),
            vec![UnitClass::Tank, UnitClass::Dps, UnitClass::Healer]
        );
        assert_eq!(
            classes(&enemy_team),
            vec![UnitClass::Tank, UnitClass::Dps, UnitClass::Support]
        );
        assert!(player_team.iter().all(|u| u.team == PLAYER_TEAM));
        assert!(enemy_team.iter().all(|u| u.team == ENEMY_TEAM));
    }
}
