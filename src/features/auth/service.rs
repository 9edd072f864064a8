use crate::features::auth::models::{
    CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest, User,
};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::AppResult;
use log::info;

/// ログインのエンドポイント
pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// ユーザー登録・現在のユーザー取得のエンドポイント
pub const AUTH_ENDPOINT: &str = "/auth";

/// 認証サービス
///
/// APIサーバーの認証系エンドポイントを呼び出す。
/// 入力検証とセッションの保存はコマンド側で行う。
#[derive(Debug, Clone)]
pub struct AuthService {
    api_client: ApiClient,
}

impl AuthService {
    /// 新しいAuthServiceを作成する
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// 電話番号とパスワードでログインする
    ///
    /// # 引数
    /// * `phone_number` - 電話番号
    /// * `password` - パスワード
    ///
    /// # 戻り値
    /// APIサーバーが発行したトークン
    pub async fn login(&self, phone_number: &str, password: &str) -> AppResult<String> {
        let body = LoginRequest {
            phone_number,
            password,
        };

        let response: LoginResponse = self.api_client.post(LOGIN_ENDPOINT, &body, None).await?;

        info!("ログインに成功しました");
        Ok(response.token)
    }

    /// ユーザーを登録する
    ///
    /// # 引数
    /// * `name` - 表示名
    /// * `phone_number` - 電話番号
    /// * `password` - パスワード
    pub async fn register(&self, name: &str, phone_number: &str, password: &str) -> AppResult<()> {
        let body = RegisterRequest {
            phone_number,
            name,
            password,
        };

        self.api_client.post_unit(AUTH_ENDPOINT, &body, None).await?;

        info!("ユーザー登録に成功しました");
        Ok(())
    }

    /// 現在のユーザー情報を取得する
    ///
    /// # 引数
    /// * `token` - Bearerトークン
    pub async fn fetch_current_user(&self, token: &str) -> AppResult<User> {
        let response: CurrentUserResponse = self.api_client.get(AUTH_ENDPOINT, Some(token)).await?;

        info!(
            "ユーザー情報を取得しました: role={:?}",
            response.users.role
        );
        Ok(response.users)
    }
}
