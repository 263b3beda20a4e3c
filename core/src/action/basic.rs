//! basic.rs：
//! - 基本行動：普通攻擊、防禦、一般治療，以及依行動種類分派的入口 execute_action。
//! - 每個行動直接修改 BattleContext 中的單位，並回傳 ActionOutcome。
//! - 目標選擇與數值計算委派給 resolution.rs。
use crate::*;
use rand::Rng;

/// 依行動種類分派
/// - explicit_target 只對普通攻擊有意義（玩家手動選擇的目標）
pub fn execute_action(
    ctx: &mut BattleContext,
    actor_id: &str,
    kind: ActionKind,
    explicit_target: Option<&str>,
    rng: &mut impl Rng,
) -> Result<ActionOutcome, Error> {
    match kind {
        ActionKind::Attack => execute_attack(ctx, actor_id, explicit_target, rng),
        ActionKind::Skill => execute_skill(ctx, actor_id, rng),
        ActionKind::Defend => execute_defend(ctx, actor_id),
        ActionKind::Heal => execute_heal(ctx, actor_id),
    }
}

/// 普通攻擊
/// - 未指定目標時依 select_target 選擇（嘲諷優先，其次最低血量）
/// - 指定目標必須是存活的敵方單位
/// - 15% 機率爆擊
pub fn execute_attack(
    ctx: &mut BattleContext,
    actor_id: &str,
    explicit_target: Option<&str>,
    rng: &mut impl Rng,
) -> Result<ActionOutcome, Error> {
    let func = "execute_attack";

    let actor = acting_unit(ctx, actor_id, func)?;
    let target_id = match explicit_target {
        Some(target_id) => {
            let valid = ctx
                .unit(target_id)
                .is_some_and(|t| t.team != actor.team && t.is_alive());
            if !valid {
                return Err(Error::InvalidTarget {
                    func,
                    unit_id: target_id.to_string(),
                });
            }
            target_id.to_string()
        }
        None => auto_target(ctx, &actor, func)?,
    };

    let is_critical = roll_critical(rng);
    let (target_name, damage) = strike(ctx, &actor, &target_id, is_critical, rng, func)?;
    let crit_suffix = if is_critical { " CRITICAL!" } else { "" };

    Ok(ActionOutcome {
        kind: ActionKind::Attack,
        actor: actor.id.clone(),
        target: Some(target_id),
        value: damage,
        description: format!(
            "{} attacks {} for {} damage!{}",
            actor.name, target_name, damage, crit_suffix
        ),
        is_critical,
        skill_name: None,
    }
    .logged())
}

/// 防禦：本回合受到的傷害減半
pub fn execute_defend(ctx: &mut BattleContext, actor_id: &str) -> Result<ActionOutcome, Error> {
    let func = "execute_defend";

    let actor = ctx
        .unit_mut(actor_id)
        .ok_or_else(|| Error::NoActingUnit {
            func,
            unit_id: actor_id.to_string(),
        })?;
    actor.is_shielded = true;

    Ok(ActionOutcome {
        kind: ActionKind::Defend,
        actor: actor.id.clone(),
        target: None,
        value: 0,
        description: format!("{} defends! Damage reduced by 50%.", actor.name),
        is_critical: false,
        skill_name: None,
    }
    .logged())
}

/// 一般治療：治療血量比例最低的友方，治療量為行動者最大血量的 20%
pub fn execute_heal(ctx: &mut BattleContext, actor_id: &str) -> Result<ActionOutcome, Error> {
    let func = "execute_heal";

    let actor = acting_unit(ctx, actor_id, func)?;
    let amount = basic_heal_amount(&actor);
    let (target_id, target_name) = mend_lowest_ally(ctx, &actor, amount, func)?;

    Ok(ActionOutcome {
        kind: ActionKind::Heal,
        actor: actor.id.clone(),
        target: Some(target_id),
        value: amount,
        description: format!("{} heals {} for {} HP!", actor.name, target_name, amount),
        is_critical: false,
        skill_name: None,
    }
    .logged())
}

use inner::*;
pub(crate) mod inner {
    use super::*;

    /// 取得行動者的快照，避免在修改目標時同時借用
    pub fn acting_unit(
        ctx: &BattleContext,
        actor_id: &str,
        func: &'static str,
    ) -> Result<Unit, Error> {
        ctx.unit(actor_id)
            .cloned()
            .ok_or_else(|| Error::NoActingUnit {
                func,
                unit_id: actor_id.to_string(),
            })
    }

    /// 自動選擇攻擊目標
    pub fn auto_target(
        ctx: &BattleContext,
        actor: &Unit,
        func: &'static str,
    ) -> Result<UnitID, Error> {
        select_target(&ctx.enemies_of(actor.team))
            .map(|u| u.id.clone())
            .ok_or_else(|| Error::NoValidTarget {
                func,
                unit_id: actor.id.clone(),
            })
    }

    /// 對目標造成傷害，回傳 (目標名稱, 傷害)
    pub fn strike(
        ctx: &mut BattleContext,
        actor: &Unit,
        target_id: &str,
        is_critical: bool,
        rng: &mut impl Rng,
        func: &'static str,
    ) -> Result<(String, Hp), Error> {
        let target = ctx
            .unit_mut(target_id)
            .ok_or_else(|| Error::InvalidTarget {
                func,
                unit_id: target_id.to_string(),
            })?;
        let damage = calc_damage(rng, actor, target, is_critical);
        target.take_damage(damage);
        Ok((target.name.clone(), damage))
    }

    /// 治療血量比例最低的友方，回傳 (目標 ID, 目標名稱)
    pub fn mend_lowest_ally(
        ctx: &mut BattleContext,
        actor: &Unit,
        amount: Hp,
        func: &'static str,
    ) -> Result<(UnitID, String), Error> {
        let target_id = select_heal_target(&ctx.allies_of(actor.team))
            .map(|u| u.id.clone())
            .ok_or_else(|| Error::NoValidTarget {
                func,
                unit_id: actor.id.clone(),
            })?;
        let target = ctx
            .unit_mut(&target_id)
            .ok_or_else(|| Error::NoValidTarget {
                func,
                unit_id: actor.id.clone(),
            })?;
        target.restore_hp(amount);
        Ok((target_id, target.name.clone()))
    }
}
