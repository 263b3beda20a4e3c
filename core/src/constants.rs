//! 戰鬥常數定義
//!
//! 平衡相關數值固定於此，不開放設定檔修改。

/// 傷害浮動下限
pub const DAMAGE_VARIANCE_MIN: f64 = 0.8;
/// 傷害浮動上限
pub const DAMAGE_VARIANCE_MAX: f64 = 1.2;
/// 普通攻擊的爆擊機率
pub const CRITICAL_CHANCE: f64 = 0.15;
/// 爆擊傷害倍率
pub const CRITICAL_MULTIPLIER: f64 = 1.8;
/// 防禦減傷常數：減傷比例 = defense / (defense + DEFENSE_CONSTANT)
pub const DEFENSE_CONSTANT: f64 = 50.0;
/// 護盾狀態下的傷害倍率
pub const SHIELD_FACTOR: f64 = 0.5;
/// 最低傷害
pub const MIN_DAMAGE: i32 = 1;

/// 治療技能（Healing Pulse）治療量下限，以治療者最大血量為基準
pub const HEALING_RATIO_MIN: f64 = 0.30;
/// 治療技能治療量上限
pub const HEALING_RATIO_MAX: f64 = 0.40;
/// 一般治療行動的治療比例
pub const BASIC_HEAL_RATIO: f64 = 0.20;

/// 攻擊加成初始值
pub const ATTACK_BUFF_BASE: f64 = 1.0;
/// 攻擊加成上限
pub const ATTACK_BUFF_MAX: f64 = 2.0;
/// War Cry 每次增加的攻擊加成
pub const WAR_CRY_BONUS: f64 = 0.3;
