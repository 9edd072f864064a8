use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// セッションの有効期間（時間）
pub const SESSION_LIFETIME_HOURS: i64 = 72;

/// 保存済みセッション（ローカルストレージの`token`キーの値）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// Bearerトークン
    pub token: String,
    /// 有効期限（ISO-8601）
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    /// ログイン時刻からセッションを作成する（有効期限は72時間後）
    ///
    /// # 引数
    /// * `token` - APIサーバーが発行したトークン
    /// * `now` - ログイン時刻
    pub fn issue(token: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: now + Duration::hours(SESSION_LIFETIME_HOURS),
        }
    }

    /// 指定時刻の時点で期限切れかどうか
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// ユーザーの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 一般社員
    Employee,
    /// 管理者（申請の承認・編集が可能）
    Manager,
    /// 未知の役割（権限なしとして扱う）
    #[serde(other)]
    Unknown,
}

/// ユーザー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 表示名
    pub name: String,
    /// 役割
    pub role: Role,
}

/// 役割から導かれる画面上の操作権限
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// 申請の編集・承認ができるかどうか
    pub can_edit_requests: bool,
}

impl From<Role> for Capabilities {
    fn from(role: Role) -> Self {
        Self {
            can_edit_requests: role == Role::Manager,
        }
    }
}

/// 現在のユーザーと操作権限
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub user: User,
    pub capabilities: Capabilities,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        let capabilities = Capabilities::from(user.role);
        Self { user, capabilities }
    }
}

/// ログインフォームの入力
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub phone_number: String,
    pub password: String,
}

/// 登録フォームの入力
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub phone_number: String,
    pub password: String,
}

/// POST /auth/login のリクエストボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub phone_number: &'a str,
    pub password: &'a str,
}

/// POST /auth/login のレスポンス
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /auth のリクエストボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest<'a> {
    pub phone_number: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

/// GET /auth のレスポンス
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub users: User,
}
