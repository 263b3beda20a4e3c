//! interactive.rs：
//! - 由標準輸入操作 team 0，AI 操作 team 1。
//! - 輸入錯誤時顯示原因並重新詢問，戰鬥狀態不受影響。
//! - 選擇目標時可以直接輸入其他行動改選。
use crate::render::*;
use anyhow::{bail, Result};
use arena_core::*;
use rand::Rng;
use std::io::{BufRead, Write};

pub fn run(
    battle: &mut Battle,
    rng: &mut impl Rng,
    mut input: impl BufRead,
    mut out: impl Write,
) -> Result<BattleReport> {
    loop {
        match battle.advance(rng)? {
            BattleEvent::RoundStarted { round, turn_order } => {
                writeln!(out, "\n=== Round {round} === order: {}", turn_order.join(" > "))?;
            }
            BattleEvent::ActionResolved(outcome) => {
                writeln!(out, "{}", outcome_line(&outcome))?;
            }
            BattleEvent::AwaitingAction { unit_id }
            | BattleEvent::AwaitingTarget { unit_id, .. } => {
                writeln!(out, "{}", roster_status(battle.context()))?;
                play_turn(battle, rng, &unit_id, &mut input, &mut out)?;
            }
            BattleEvent::BattleEnded { .. } => {
                let report = battle.report();
                writeln!(out)?;
                for line in result_lines(&report) {
                    writeln!(out, "{line}")?;
                }
                return Ok(report);
            }
        }
    }
}

/// 詢問到該單位的行動結算為止
fn play_turn(
    battle: &mut Battle,
    rng: &mut impl Rng,
    unit_id: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let (name, class) = match battle.context().unit(unit_id) {
        Some(unit) => (unit.name.clone(), unit.class),
        None => bail!("unit {unit_id} is not on the field"),
    };
    let mut candidates: Option<Vec<UnitID>> = match battle.phase() {
        BattlePhase::AwaitingTarget { .. } => Some(battle.target_candidates(unit_id)),
        _ => None,
    };

    loop {
        match &candidates {
            None => write!(
                out,
                "{name} ({class}) action [attack/skill ({})/defend/heal]: ",
                class.skill_name()
            )?,
            Some(ids) => write!(out, "{name} target [{}] or another action: ", ids.join("/"))?,
        }
        out.flush()?;
        let line = read_line(input)?;

        let result = match &candidates {
            Some(_) if ActionKind::parse(&line).is_err() => battle
                .submit_target(unit_id, line.trim(), rng)
                .map(TurnProgress::Resolved),
            _ => battle.submit_action_name(unit_id, &line, rng),
        };
        match result {
            Ok(TurnProgress::Resolved(outcome)) => {
                writeln!(out, "{}", outcome_line(&outcome))?;
                return Ok(());
            }
            Ok(TurnProgress::TargetRequired { candidates: ids, .. }) => candidates = Some(ids),
            Err(e) => writeln!(out, "  ! {e}")?,
        }
    }
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before the battle ended");
    }
    Ok(line.trim().to_string())
}
