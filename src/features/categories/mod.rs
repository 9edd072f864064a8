/// カテゴリー機能モジュール
pub mod api_commands;
pub mod models;

pub use api_commands::*;
pub use models::*;
