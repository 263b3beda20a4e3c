//! render.rs：文字模式的戰鬥紀錄與隊伍狀態
use arena_core::*;

pub fn team_label(team: TeamID) -> &'static str {
    if team == PLAYER_TEAM {
        "Team 0"
    } else {
        "Team 1"
    }
}

/// 單一單位的狀態列
pub fn unit_line(unit: &Unit) -> String {
    let mut flags = Vec::new();
    if unit.is_shielded {
        flags.push("shield".to_string());
    }
    if unit.is_taunting {
        flags.push("taunt".to_string());
    }
    if unit.attack_buff > ATTACK_BUFF_BASE {
        flags.push(format!("atk x{:.1}", unit.attack_buff));
    }
    if !unit.is_alive() {
        flags.push("down".to_string());
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    format!(
        "  {:<4}{:<12}{:<8}{:>4}/{:<4}{}",
        unit.id,
        unit.name,
        unit.class.to_string(),
        unit.hp,
        unit.max_hp,
        flags
    )
}

/// 兩隊的狀態表
pub fn roster_status(ctx: &BattleContext) -> String {
    let mut lines = Vec::new();
    for team in [PLAYER_TEAM, ENEMY_TEAM] {
        lines.push(format!("{}:", team_label(team)));
        lines.extend(
            ctx.units
                .iter()
                .filter(|u| u.team == team)
                .map(unit_line),
        );
    }
    lines.join("\n")
}

pub fn outcome_line(outcome: &ActionOutcome) -> String {
    match outcome.skill_name {
        Some(skill) => format!("  [{skill}] {}", outcome.description),
        None => format!("  {}", outcome.description),
    }
}

pub fn result_lines(report: &BattleReport) -> Vec<String> {
    let mut lines = Vec::new();
    match report.winner {
        Some(winner) => lines.push(format!(
            "{} wins after {} rounds ({} actions)",
            team_label(winner),
            report.rounds,
            report.turns
        )),
        None => lines.push(format!(
            "No winner after {} rounds ({} actions)",
            report.rounds, report.turns
        )),
    }
    for summary in &report.teams {
        let reward = summary
            .reward
            .map(|r| format!("+{} tokens, +{} XP", r.tokens, r.xp))
            .unwrap_or_else(|| "no reward".to_string());
        lines.push(format!(
            "  {}: survivors [{}], {}",
            team_label(summary.team),
            summary.survivors.join(", "),
            reward
        ));
    }
    lines
}

/// 無人操作時的完整戰鬥紀錄
pub fn battle_log(battle: &Battle, report: &BattleReport, seed: u64) -> String {
    let mut lines = vec![format!("Seed: {seed}")];
    lines.extend(report.outcomes.iter().map(outcome_line));
    lines.push(String::new());
    lines.push(roster_status(battle.context()));
    lines.push(String::new());
    lines.extend(result_lines(report));
    lines.push(String::new());
    lines.join("\n")
}
