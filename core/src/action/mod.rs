//! action/mod.rs：
//! - 作為 action 子模組的入口，統一 re-export outcome、basic、skill 等子模組。
//! - 不放具體邏輯或資料結構實作。
//! - 僅負責模組組織與匯入。
mod basic;
mod outcome;
mod skill;

pub use basic::*;
pub use outcome::*;
pub use skill::*;
