use crate::features::auth::session::SessionContext;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;

/// API認証ミドルウェア
/// 認証が必要なコマンドの実行前にセッションを確認し、未ログインでのアクセスを記録する
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    /// セッションコンテキスト
    session: Arc<SessionContext>,
}

impl AuthMiddleware {
    /// 新しいAuthMiddlewareを作成する
    ///
    /// # 引数
    /// * `session` - セッションコンテキスト
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    /// APIリクエストの認証を検証する
    ///
    /// # 引数
    /// * `request_path` - リクエストパス
    ///
    /// # 戻り値
    /// Authorizationヘッダーに付与するトークン
    pub fn authenticate_request(&self, request_path: &str) -> AppResult<String> {
        log::debug!("APIリクエスト認証を開始: path={request_path}");

        match self.session.bearer_token() {
            Ok(token) if auth_helpers::is_valid_token_format(&token) => {
                log::debug!("APIリクエスト認証成功: path={request_path}");
                Ok(token)
            }
            Ok(_) => {
                log::warn!("無効なトークン形式: path={request_path}");
                self.log_unauthorized_access(request_path);
                Err(AppError::Unauthenticated)
            }
            Err(e) => {
                self.log_unauthorized_access(request_path);
                Err(e)
            }
        }
    }

    /// 未認証アクセスをログに記録する
    fn log_unauthorized_access(&self, request_path: &str) {
        log::warn!("未認証アクセスを検出しました: path={request_path}");
    }
}

/// 認証関連のヘルパー関数
pub mod auth_helpers {
    /// トークンの形式を検証する（空白を含まない非空文字列）
    pub fn is_valid_token_format(token: &str) -> bool {
        !token.is_empty() && !token.chars().any(char::is_whitespace)
    }
}
