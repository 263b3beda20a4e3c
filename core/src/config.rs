//! config.rs：
//! - 戰鬥設定：職業數值表、AI 門檻、戰後獎勵，皆可由 TOML 載入。
//! - 未出現在設定檔中的欄位一律使用預設值，預設值即為標準平衡數值。
use crate::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub classes: ClassTable,
    pub ai: AiConfig,
    pub rewards: RewardConfig,
}

impl BattleConfig {
    pub fn from_toml_str(data: &str) -> Result<Self, Error> {
        let func = "BattleConfig::from_toml_str";
        toml::from_str(data).map_err(|e| Error::ConfigParse {
            func,
            reason: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let func = "BattleConfig::load";
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| Error::ConfigIo {
            func,
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&data).map_err(|e| Error::Wrap {
            func,
            source: Box::new(e),
        })
    }

    /// 以設定中的職業數值表建立單位
    pub fn create_unit(
        &self,
        id: impl Into<UnitID>,
        name: impl Into<String>,
        class: UnitClass,
        team: TeamID,
        overrides: Option<&UnitOverrides>,
    ) -> Unit {
        Unit::from_template(id, name, class, self.classes.stats(class), team, overrides)
    }

    /// 以設定中的職業數值建立示範隊伍
    pub fn create_demo_teams(&self) -> (Vec<Unit>, Vec<Unit>) {
        let build = |team: TeamID| -> Vec<Unit> {
            DEMO_ROSTER
                .iter()
                .filter(|(.., t)| *t == team)
                .map(|&(id, name, class, team)| self.create_unit(id, name, class, team, None))
                .collect()
        };
        (build(PLAYER_TEAM), build(ENEMY_TEAM))
    }
}

/// 職業數值表，未列出的職業使用內建數值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassTable(BTreeMap<UnitClass, ClassStats>);

impl ClassTable {
    pub fn stats(&self, class: UnitClass) -> ClassStats {
        self.0
            .get(&class)
            .copied()
            .unwrap_or_else(|| class.base_stats())
    }

    pub fn insert(&mut self, class: UnitClass, stats: ClassStats) {
        self.0.insert(class, stats);
    }
}

/// AI 決策門檻，擲骰 roll ∈ [0, 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// 友方血量比例低於此值時 Healer 考慮施放技能
    pub healer_low_hp_ratio: f64,
    pub healer_skill_chance: f64,
    /// 友方攻擊加成低於此值時 Support 考慮施放技能
    pub support_buff_threshold: f64,
    pub support_skill_chance: f64,
    pub tank_skill_chance: f64,
    /// 與技能判定共用同一個 roll
    pub tank_defend_chance: f64,
    pub dps_skill_chance: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            healer_low_hp_ratio: 0.5,
            healer_skill_chance: 0.7,
            support_buff_threshold: 1.3,
            support_skill_chance: 0.5,
            tank_skill_chance: 0.5,
            tank_defend_chance: 0.3,
            dps_skill_chance: 0.4,
        }
    }
}

/// 戰後獎勵
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub win_tokens: u32,
    pub loss_tokens: u32,
    pub win_xp: u32,
    pub loss_xp: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win_tokens: 10,
            loss_tokens: 2,
            win_xp: 50,
            loss_xp: 10,
        }
    }
}

impl RewardConfig {
    pub fn reward(&self, won: bool) -> Reward {
        if won {
            Reward {
                tokens: self.win_tokens,
                xp: self.win_xp,
            }
        } else {
            Reward {
                tokens: self.loss_tokens,
                xp: self.loss_xp,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub tokens: u32,
    pub xp: u32,
}
