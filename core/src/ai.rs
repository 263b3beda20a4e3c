//! ai.rs：
//! - 非玩家單位的行動決策，每次決策只擲一次 roll ∈ [0, 1)。
//! - decide_ai_action 為純函式，choose_ai_action 負責擲骰並直接執行行動。
use crate::*;
use rand::Rng;

/// 依職業與同一個 roll 決定行動
/// - Healer：有友方血量比例 < 0.5 且 roll < 0.7 時施放技能
/// - Support：有友方攻擊加成 < 1.3 且 roll < 0.5 時施放技能
/// - Tank：未嘲諷且 roll < 0.5 時施放技能；否則 roll < 0.3 時防禦
/// - DPS：roll < 0.4 時施放技能
/// - 其餘情況普通攻擊
pub fn decide_ai_action(
    actor: &Unit,
    allies: &[&Unit],
    config: &AiConfig,
    roll: f64,
) -> ActionKind {
    match actor.class {
        UnitClass::Healer => {
            let any_low = allies
                .iter()
                .any(|a| a.hp_ratio() < config.healer_low_hp_ratio);
            if any_low && roll < config.healer_skill_chance {
                ActionKind::Skill
            } else {
                ActionKind::Attack
            }
        }
        UnitClass::Support => {
            let any_unbuffed = allies
                .iter()
                .any(|a| a.attack_buff < config.support_buff_threshold);
            if any_unbuffed && roll < config.support_skill_chance {
                ActionKind::Skill
            } else {
                ActionKind::Attack
            }
        }
        UnitClass::Tank => {
            // 防禦判定沿用同一個 roll，未嘲諷時實際上不會走到防禦
            if !actor.is_taunting && roll < config.tank_skill_chance {
                ActionKind::Skill
            } else if roll < config.tank_defend_chance {
                ActionKind::Defend
            } else {
                ActionKind::Attack
            }
        }
        UnitClass::Dps => {
            if roll < config.dps_skill_chance {
                ActionKind::Skill
            } else {
                ActionKind::Attack
            }
        }
    }
}

/// 擲骰決定行動種類
pub fn roll_ai_action(
    ctx: &BattleContext,
    actor_id: &str,
    config: &AiConfig,
    rng: &mut impl Rng,
) -> Result<ActionKind, Error> {
    let func = "roll_ai_action";

    let actor = ctx.unit(actor_id).ok_or_else(|| Error::NoActingUnit {
        func,
        unit_id: actor_id.to_string(),
    })?;
    let allies = ctx.allies_of(actor.team);
    let roll: f64 = rng.random();
    let kind = decide_ai_action(actor, &allies, config, roll);
    tracing::debug!(actor = %actor.id, class = %actor.class, roll, action = %kind, "ai decision");
    Ok(kind)
}

/// 決定並執行 AI 行動
pub fn choose_ai_action(
    ctx: &mut BattleContext,
    actor_id: &str,
    config: &AiConfig,
    rng: &mut impl Rng,
) -> Result<ActionOutcome, Error> {
    let kind = roll_ai_action(ctx, actor_id, config, rng)?;
    execute_action(ctx, actor_id, kind, None, rng)
}
