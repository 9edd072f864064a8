/// 仮払い申請機能モジュール
///
/// 申請に関連するモデルとAPIコマンドを提供します。
pub mod api_commands;
pub mod models;

pub use api_commands::*;
pub use models::*;
