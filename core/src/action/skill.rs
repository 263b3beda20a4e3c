//! skill.rs：
//! - 職業技能的分派與效果，每個職業固定一個技能。
//!   - Tank「Iron Wall」：自身護盾 + 嘲諷
//!   - DPS「Critical Strike」：必定爆擊的攻擊
//!   - Healer「Healing Pulse」：治療血量比例最低的友方 30% ~ 40%
//!   - Support「War Cry」：所有存活友方攻擊加成 +0.3，上限 2.0
//! - 不負責 AI 決策與回合流程。
use super::basic::inner::*;
use crate::*;
use rand::Rng;

/// 施放行動者職業的技能
pub fn execute_skill(
    ctx: &mut BattleContext,
    actor_id: &str,
    rng: &mut impl Rng,
) -> Result<ActionOutcome, Error> {
    let func = "execute_skill";

    let actor = acting_unit(ctx, actor_id, func)?;
    let outcome = match actor.class {
        UnitClass::Tank => iron_wall(ctx, &actor, func)?,
        UnitClass::Dps => critical_strike(ctx, &actor, rng, func)?,
        UnitClass::Healer => healing_pulse(ctx, &actor, rng, func)?,
        UnitClass::Support => war_cry(ctx, &actor),
    };
    Ok(outcome.logged())
}

fn iron_wall(
    ctx: &mut BattleContext,
    actor: &Unit,
    func: &'static str,
) -> Result<ActionOutcome, Error> {
    let unit = ctx
        .unit_mut(&actor.id)
        .ok_or_else(|| Error::NoActingUnit {
            func,
            unit_id: actor.id.clone(),
        })?;
    unit.is_shielded = true;
    unit.is_taunting = true;

    Ok(ActionOutcome {
        kind: ActionKind::Skill,
        actor: actor.id.clone(),
        target: None,
        value: 0,
        description: format!("{} uses Iron Wall! Shield and Taunt active!", actor.name),
        is_critical: false,
        skill_name: Some(actor.class.skill_name()),
    })
}

fn critical_strike(
    ctx: &mut BattleContext,
    actor: &Unit,
    rng: &mut impl Rng,
    func: &'static str,
) -> Result<ActionOutcome, Error> {
    let target_id = auto_target(ctx, actor, func)?;
    let (target_name, damage) = strike(ctx, actor, &target_id, true, rng, func)?;

    Ok(ActionOutcome {
        kind: ActionKind::Skill,
        actor: actor.id.clone(),
        target: Some(target_id),
        value: damage,
        description: format!(
            "{} uses Critical Strike on {} for {} damage!",
            actor.name, target_name, damage
        ),
        is_critical: true,
        skill_name: Some(actor.class.skill_name()),
    })
}

fn healing_pulse(
    ctx: &mut BattleContext,
    actor: &Unit,
    rng: &mut impl Rng,
    func: &'static str,
) -> Result<ActionOutcome, Error> {
    let amount = calc_healing(rng, actor);
    let (target_id, target_name) = mend_lowest_ally(ctx, actor, amount, func)?;

    Ok(ActionOutcome {
        kind: ActionKind::Skill,
        actor: actor.id.clone(),
        target: Some(target_id),
        value: amount,
        description: format!(
            "{} uses Healing Pulse on {}! Heals {} HP!",
            actor.name, target_name, amount
        ),
        is_critical: false,
        skill_name: Some(actor.class.skill_name()),
    })
}

fn war_cry(ctx: &mut BattleContext, actor: &Unit) -> ActionOutcome {
    for ally in ctx
        .units
        .iter_mut()
        .filter(|u| u.team == actor.team && u.is_alive())
    {
        ally.add_attack_buff(WAR_CRY_BONUS);
    }

    ActionOutcome {
        kind: ActionKind::Skill,
        actor: actor.id.clone(),
        target: None,
        value: 0,
        description: format!("{} uses War Cry! All allies gain +30% attack!", actor.name),
        is_critical: false,
        skill_name: Some(actor.class.skill_name()),
    }
}
