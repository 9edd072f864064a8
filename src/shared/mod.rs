/// 共有モジュール
///
/// 機能横断で使用するAPIクライアント・設定・エラー型・ユーティリティを提供します。
pub mod api_client;
pub mod config;
pub mod errors;
pub mod utils;

#[cfg(test)]
pub mod test_server;
