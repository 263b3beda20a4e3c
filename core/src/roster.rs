//! roster.rs：
//! - 定義戰場上的全部單位集合（BattleContext），兩隊依序合併，列舉順序即為平手時的優先順序。
//! - 提供依隊伍篩選存活單位、全滅判定、回合旗標清除等查詢。
//! - 同名自由函式對 `&[Unit]` 提供相同功能，供呈現層或測試直接使用。
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleContext {
    pub units: Vec<Unit>,
}

impl BattleContext {
    /// 合併兩隊，team 0 在前
    pub fn new(team_a: Vec<Unit>, team_b: Vec<Unit>) -> Self {
        let mut units = team_a;
        units.extend(team_b);
        Self { units }
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    pub fn unit_mut(&mut self, unit_id: &str) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == unit_id)
    }

    /// 存活的敵方單位
    pub fn enemies_of(&self, team: TeamID) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|u| u.team != team && u.is_alive())
            .collect()
    }

    /// 存活的友方單位（包含自己）
    pub fn allies_of(&self, team: TeamID) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|u| u.team == team && u.is_alive())
            .collect()
    }

    pub fn living_count(&self, team: TeamID) -> usize {
        self.units
            .iter()
            .filter(|u| u.team == team && u.is_alive())
            .count()
    }

    pub fn is_team_defeated(&self, team: TeamID) -> bool {
        is_team_defeated(&self.units, team)
    }

    pub fn clear_round_buffs(&mut self) {
        clear_round_buffs(&mut self.units);
    }
}

pub fn get_enemies<'a>(units: &'a [Unit], actor: &Unit) -> Vec<&'a Unit> {
    units
        .iter()
        .filter(|u| u.team != actor.team && u.is_alive())
        .collect()
}

pub fn get_allies<'a>(units: &'a [Unit], actor: &Unit) -> Vec<&'a Unit> {
    units
        .iter()
        .filter(|u| u.team == actor.team && u.is_alive())
        .collect()
}

/// 該隊所有單位 hp <= 0 時為真；沒有任何單位的隊伍也視為全滅
pub fn is_team_defeated(units: &[Unit], team: TeamID) -> bool {
    units.iter().filter(|u| u.team == team).all(|u| u.hp <= 0)
}

/// 回合開始時清除護盾與嘲諷，攻擊加成不受影響
pub fn clear_round_buffs(units: &mut [Unit]) {
    for unit in units.iter_mut() {
        unit.clear_round_flags();
    }
}
