// 戰鬥引擎錯誤型別，攜帶 function name 與 context，支援來源錯誤巢狀
use crate::*;
use thiserror::Error;

/// 戰鬥引擎錯誤型別
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{func}`: 無法找到行動中的單位 {unit_id}")]
    NoActingUnit { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 目前輪到 {expected:?}，不是 {got}")]
    NotCurrentUnit {
        func: &'static str,
        expected: Option<UnitID>,
        got: UnitID,
    },

    #[error("`{func}`: {unit_id} 不是可攻擊的存活敵人")]
    InvalidTarget { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: {unit_id} 找不到任何合法目標")]
    NoValidTarget { func: &'static str, unit_id: UnitID },

    #[error("`{func}`: 未知的行動 {action}")]
    UnknownAction { func: &'static str, action: String },

    #[error("`{func}`: 目前階段 {phase:?} 不接受此輸入")]
    UnexpectedPhase {
        func: &'static str,
        phase: BattlePhase,
    },

    #[error("`{func}`: 設定檔解析失敗: {reason}")]
    ConfigParse { func: &'static str, reason: String },

    #[error("`{func}`: 設定檔讀取失敗: {reason}")]
    ConfigIo { func: &'static str, reason: String },

    #[error("`{func}`: 包裝: {source}")]
    Wrap {
        func: &'static str,
        #[source]
        source: Box<Error>,
    },
}

pub fn root_error(err: &Error) -> &Error {
    let mut err = err;
    while let Error::Wrap { source, .. } = err {
        err = source.as_ref();
    }
    err
}
