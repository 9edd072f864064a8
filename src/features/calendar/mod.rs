/// ジャラリ暦（イラン太陽暦）変換モジュール
///
/// 画面に表示する日付はすべてジャラリ暦で表記する。
pub mod converter;

pub use converter::*;
