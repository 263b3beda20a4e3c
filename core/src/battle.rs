//! battle.rs：
//! - 負責戰鬥流程與回合管理的狀態機，獨佔整場戰鬥的 BattleContext。
//! - 玩家單位（team 0）輪到時暫停，等待外部送入行動與目標；AI 單位（team 1）直接決策並結算。
//! - 呼叫端以 advance 推進，以 submit_action / submit_target 送入玩家輸入。
//! - 不負責畫面與動畫；呈現層依回傳的 BattleEvent 與 ActionOutcome 播放。
use crate::*;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BattlePhase {
    /// 清除回合旗標並重新計算行動順序
    RoundStart,
    /// 游標指向下一個單位，尚未決定行動
    TurnInProgress,
    /// 等待玩家選擇行動
    AwaitingAction { unit_id: UnitID },
    /// 玩家已選擇普通攻擊，等待選擇目標
    AwaitingTarget { unit_id: UnitID },
    /// 終止狀態，不再處理任何回合
    BattleEnded { winner: TeamID },
}

/// advance 回傳的可觀察事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
        turn_order: Vec<UnitID>,
    },
    AwaitingAction {
        unit_id: UnitID,
    },
    AwaitingTarget {
        unit_id: UnitID,
        candidates: Vec<UnitID>,
    },
    ActionResolved(ActionOutcome),
    BattleEnded {
        winner: TeamID,
    },
}

/// 玩家送出行動後的結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TurnProgress {
    /// 普通攻擊需要再選擇目標
    TargetRequired {
        unit_id: UnitID,
        candidates: Vec<UnitID>,
    },
    Resolved(ActionOutcome),
}

#[derive(Debug, Clone)]
pub struct Battle {
    ctx: BattleContext,
    config: BattleConfig,
    round: u32,
    turns: u32,
    turn_order: Vec<UnitID>,
    current_turn_index: usize,
    phase: BattlePhase,
    history: Vec<ActionOutcome>,
}

impl Battle {
    pub fn new(team_a: Vec<Unit>, team_b: Vec<Unit>, config: BattleConfig) -> Self {
        Self::from_context(BattleContext::new(team_a, team_b), config)
    }

    pub fn from_context(ctx: BattleContext, config: BattleConfig) -> Self {
        Self {
            ctx,
            config,
            round: 0,
            turns: 0,
            turn_order: Vec::new(),
            current_turn_index: 0,
            phase: BattlePhase::RoundStart,
            history: Vec::new(),
        }
    }

    /// 示範隊伍與預設設定
    pub fn demo() -> Self {
        Self::demo_with_config(BattleConfig::default())
    }

    /// 示範隊伍，職業數值取自設定
    pub fn demo_with_config(config: BattleConfig) -> Self {
        let (player_team, enemy_team) = config.create_demo_teams();
        Self::new(player_team, enemy_team, config)
    }

    pub fn context(&self) -> &BattleContext {
        &self.ctx
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> &BattlePhase {
        &self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_order(&self) -> &[UnitID] {
        &self.turn_order
    }

    pub fn history(&self) -> &[ActionOutcome] {
        &self.history
    }

    pub fn winner(&self) -> Option<TeamID> {
        match self.phase {
            BattlePhase::BattleEnded { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn get_current_unit_id(&self) -> Option<&UnitID> {
        self.turn_order.get(self.current_turn_index)
    }

    /// 推進狀態機，直到出現可觀察事件
    /// - 等待輸入時重複呼叫不改變狀態
    /// - 戰鬥結束後固定回傳 BattleEnded
    pub fn advance(&mut self, rng: &mut impl Rng) -> Result<BattleEvent, Error> {
        loop {
            match &self.phase {
                BattlePhase::RoundStart => return Ok(self.start_round(rng)),
                BattlePhase::TurnInProgress => {
                    let Some(unit_id) = self.next_living_unit() else {
                        // 本回合所有單位都行動完畢
                        self.phase = BattlePhase::RoundStart;
                        continue;
                    };
                    let team = self
                        .ctx
                        .unit(&unit_id)
                        .map(|u| u.team)
                        .ok_or_else(|| Error::NoActingUnit {
                            func: "Battle::advance",
                            unit_id: unit_id.clone(),
                        })?;

                    if team == PLAYER_TEAM {
                        self.phase = BattlePhase::AwaitingAction {
                            unit_id: unit_id.clone(),
                        };
                        return Ok(BattleEvent::AwaitingAction { unit_id });
                    }

                    let outcome =
                        choose_ai_action(&mut self.ctx, &unit_id, &self.config.ai, rng)?;
                    return Ok(BattleEvent::ActionResolved(self.resolve_turn(outcome)));
                }
                BattlePhase::AwaitingAction { unit_id } => {
                    return Ok(BattleEvent::AwaitingAction {
                        unit_id: unit_id.clone(),
                    });
                }
                BattlePhase::AwaitingTarget { unit_id } => {
                    let unit_id = unit_id.clone();
                    let candidates = self.target_candidates(&unit_id);
                    return Ok(BattleEvent::AwaitingTarget {
                        unit_id,
                        candidates,
                    });
                }
                BattlePhase::BattleEnded { winner } => {
                    return Ok(BattleEvent::BattleEnded { winner: *winner });
                }
            }
        }
    }

    /// 玩家選擇行動
    /// - 普通攻擊進入選擇目標階段
    /// - 其他行動立即結算
    /// - 選擇目標階段中可以改選其他行動
    pub fn submit_action(
        &mut self,
        unit_id: &str,
        kind: ActionKind,
        rng: &mut impl Rng,
    ) -> Result<TurnProgress, Error> {
        let func = "Battle::submit_action";

        self.check_pending_unit(func, unit_id, true)?;
        if kind.needs_target() {
            let candidates = self.target_candidates(unit_id);
            self.phase = BattlePhase::AwaitingTarget {
                unit_id: unit_id.to_string(),
            };
            return Ok(TurnProgress::TargetRequired {
                unit_id: unit_id.to_string(),
                candidates,
            });
        }

        let outcome = execute_action(&mut self.ctx, unit_id, kind, None, rng)?;
        Ok(TurnProgress::Resolved(self.resolve_turn(outcome)))
    }

    /// 以文字送出行動，無法辨識時回傳 UnknownAction 且不改變狀態
    pub fn submit_action_name(
        &mut self,
        unit_id: &str,
        action: &str,
        rng: &mut impl Rng,
    ) -> Result<TurnProgress, Error> {
        let kind = ActionKind::parse(action).inspect_err(|e| tracing::warn!("{e}"))?;
        self.submit_action(unit_id, kind, rng)
    }

    /// 玩家選擇普通攻擊的目標，必須是存活的敵方單位
    pub fn submit_target(
        &mut self,
        unit_id: &str,
        target_id: &str,
        rng: &mut impl Rng,
    ) -> Result<ActionOutcome, Error> {
        let func = "Battle::submit_target";

        self.check_pending_unit(func, unit_id, false)?;
        let outcome = execute_attack(&mut self.ctx, unit_id, Some(target_id), rng)
            .inspect_err(|e| tracing::warn!("{e}"))?;
        Ok(self.resolve_turn(outcome))
    }

    /// 以 AI 決策代替等待中的玩家單位行動
    pub fn autoplay_pending(&mut self, rng: &mut impl Rng) -> Result<ActionOutcome, Error> {
        let func = "Battle::autoplay_pending";

        let unit_id = match &self.phase {
            BattlePhase::AwaitingAction { unit_id } | BattlePhase::AwaitingTarget { unit_id } => {
                unit_id.clone()
            }
            phase => {
                return Err(Error::UnexpectedPhase {
                    func,
                    phase: phase.clone(),
                })
            }
        };
        let outcome = choose_ai_action(&mut self.ctx, &unit_id, &self.config.ai, rng)?;
        Ok(self.resolve_turn(outcome))
    }

    /// 雙方皆由 AI 操作，跑到分出勝負或達到行動次數上限
    pub fn run_to_end(
        &mut self,
        rng: &mut impl Rng,
        turn_limit: u32,
    ) -> Result<BattleReport, Error> {
        while self.turns < turn_limit {
            match self.advance(rng)? {
                BattleEvent::AwaitingAction { .. } | BattleEvent::AwaitingTarget { .. } => {
                    self.autoplay_pending(rng)?;
                }
                BattleEvent::BattleEnded { .. } => break,
                BattleEvent::RoundStarted { .. } | BattleEvent::ActionResolved(_) => {}
            }
        }
        Ok(self.report())
    }

    /// 戰鬥結果摘要，供服務層記錄勝負與獎勵
    pub fn report(&self) -> BattleReport {
        let winner = self.winner();
        let teams = [PLAYER_TEAM, ENEMY_TEAM]
            .into_iter()
            .map(|team| TeamSummary {
                team,
                survivors: self
                    .ctx
                    .allies_of(team)
                    .into_iter()
                    .map(|u| u.id.clone())
                    .collect(),
                reward: winner.map(|w| self.config.rewards.reward(w == team)),
            })
            .collect();
        BattleReport {
            winner,
            rounds: self.round,
            turns: self.turns,
            teams,
            outcomes: self.history.clone(),
        }
    }

    /// 存活的敵方單位，作為玩家選擇目標的候選
    pub fn target_candidates(&self, unit_id: &str) -> Vec<UnitID> {
        match self.ctx.unit(unit_id) {
            Some(unit) => self
                .ctx
                .enemies_of(unit.team)
                .into_iter()
                .map(|u| u.id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    fn start_round(&mut self, rng: &mut impl Rng) -> BattleEvent {
        if let Some(winner) = self.check_winner() {
            return self.end_battle(winner);
        }

        self.round += 1;
        self.ctx.clear_round_buffs();
        self.turn_order = determine_turn_order(rng, &self.ctx.units)
            .into_iter()
            .map(|u| u.id.clone())
            .collect();
        self.current_turn_index = 0;
        self.phase = BattlePhase::TurnInProgress;

        tracing::info!(round = self.round, order = ?self.turn_order, "round started");
        BattleEvent::RoundStarted {
            round: self.round,
            turn_order: self.turn_order.clone(),
        }
    }

    /// 跳過已陣亡的單位，回傳游標所指的單位
    fn next_living_unit(&mut self) -> Option<UnitID> {
        while let Some(unit_id) = self.turn_order.get(self.current_turn_index) {
            if self.ctx.unit(unit_id).is_some_and(|u| u.is_alive()) {
                return Some(unit_id.clone());
            }
            self.current_turn_index += 1;
        }
        None
    }

    /// 記錄結果、判定勝負、推進游標
    fn resolve_turn(&mut self, outcome: ActionOutcome) -> ActionOutcome {
        self.history.push(outcome.clone());
        self.turns += 1;

        match self.check_winner() {
            Some(winner) => {
                self.end_battle(winner);
            }
            None => {
                self.current_turn_index += 1;
                self.phase = BattlePhase::TurnInProgress;
            }
        }
        outcome
    }

    fn check_winner(&self) -> Option<TeamID> {
        if self.ctx.is_team_defeated(PLAYER_TEAM) {
            Some(ENEMY_TEAM)
        } else if self.ctx.is_team_defeated(ENEMY_TEAM) {
            Some(PLAYER_TEAM)
        } else {
            None
        }
    }

    fn end_battle(&mut self, winner: TeamID) -> BattleEvent {
        self.phase = BattlePhase::BattleEnded { winner };
        tracing::info!(winner, round = self.round, turns = self.turns, "battle ended");
        BattleEvent::BattleEnded { winner }
    }

    /// 確認目前正在等待 unit_id 的輸入
    /// - allow_reselect：選擇目標階段是否接受改選行動
    fn check_pending_unit(
        &self,
        func: &'static str,
        unit_id: &str,
        allow_reselect: bool,
    ) -> Result<(), Error> {
        let result = match &self.phase {
            BattlePhase::AwaitingAction { .. } if !allow_reselect => Err(Error::UnexpectedPhase {
                func,
                phase: self.phase.clone(),
            }),
            BattlePhase::AwaitingAction { unit_id: pending }
            | BattlePhase::AwaitingTarget { unit_id: pending } => {
                if pending == unit_id {
                    Ok(())
                } else {
                    Err(Error::NotCurrentUnit {
                        func,
                        expected: Some(pending.clone()),
                        got: unit_id.to_string(),
                    })
                }
            }
            _ => Err(Error::UnexpectedPhase {
                func,
                phase: self.phase.clone(),
            }),
        };
        result.inspect_err(|e| tracing::warn!("{e}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    /// 尚未分出勝負時為 None
    pub winner: Option<TeamID>,
    pub rounds: u32,
    pub turns: u32,
    pub teams: Vec<TeamSummary>,
    pub outcomes: Vec<ActionOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: TeamID,
    pub survivors: Vec<UnitID>,
    pub reward: Option<Reward>,
}
