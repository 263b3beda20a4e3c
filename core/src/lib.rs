//! 回合制雙隊戰鬥引擎
//!
//! 此函式庫實作戰鬥判定的核心規則，包括：
//! - 單位模型與職業模板
//! - 傷害、治療、行動順序與目標選擇
//! - 攻擊、技能、防禦、治療等行動執行
//! - 非玩家單位的 AI 決策
//! - 回合狀態機與勝負判定
//!
//! 不負責畫面、動畫與輸入處理；呈現層只消費 [`ActionOutcome`]。

mod action;
mod ai;
mod battle;
mod config;
mod constants;
mod error;
mod resolution;
mod roster;
mod unit;

pub use action::*;
pub use ai::*;
pub use battle::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use resolution::*;
pub use roster::*;
pub use unit::*;

pub type UnitID = String;
pub type TeamID = u8;
pub type Hp = i32;

/// 玩家控制的隊伍（等待外部輸入）
pub const PLAYER_TEAM: TeamID = 0;
/// AI 控制的隊伍
pub const ENEMY_TEAM: TeamID = 1;

/// 回傳對手隊伍
pub fn opposing_team(team: TeamID) -> TeamID {
    if team == PLAYER_TEAM {
        ENEMY_TEAM
    } else {
        PLAYER_TEAM
    }
}
