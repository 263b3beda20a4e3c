//! outcome.rs：
//! - 定義行動種類（ActionKind）與行動結果（ActionOutcome）。
//! - ActionOutcome 是單次行動的紀錄，供回合狀態機保存歷史與呈現層播放動畫；
//!   Battle 保存的歷史只以唯讀切片對外公開。
use crate::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Attack,
    Skill,
    Defend,
    Heal,
}

impl ActionKind {
    /// 由外部輸入解析行動，無法辨識時回傳 UnknownAction
    pub fn parse(input: &str) -> Result<Self, Error> {
        let func = "ActionKind::parse";
        ActionKind::from_str(input.trim()).map_err(|_| Error::UnknownAction {
            func,
            action: input.to_string(),
        })
    }

    /// 是否需要再選擇目標（僅玩家的普通攻擊）
    pub fn needs_target(self) -> bool {
        matches!(self, ActionKind::Attack)
    }
}

/// 單次行動的結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub actor: UnitID,
    pub target: Option<UnitID>,
    /// 造成的傷害或治療量；無數值效果時為 0
    pub value: Hp,
    pub description: String,
    pub is_critical: bool,
    /// 職業技能名稱，僅 Skill 行動有值
    pub skill_name: Option<&'static str>,
}

impl ActionOutcome {
    pub(crate) fn logged(self) -> Self {
        tracing::debug!(
            kind = %self.kind,
            actor = %self.actor,
            target = ?self.target,
            value = self.value,
            critical = self.is_critical,
            "{}",
            self.description
        );
        self
    }
}
