/// ホーム画面機能モジュール
pub mod home;

pub use home::*;
