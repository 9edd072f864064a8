/// 取引機能モジュール
///
/// 取引の登録・一覧取得と一覧の絞り込みを提供します。
pub mod api_commands;
pub mod filter;
pub mod models;

pub use api_commands::*;
pub use filter::*;
pub use models::*;
