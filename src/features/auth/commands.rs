/// 認証コマンド
///
/// ログイン・ユーザー登録・現在のユーザー取得・ログアウトを提供します。
/// 入力検証はネットワーク呼び出しの前に行います。
use crate::features::auth::models::{CurrentUser, LoginForm, RegisterForm, StoredSession};
use crate::features::auth::service::{AuthService, AUTH_ENDPOINT};
use crate::shared::errors::CommandResult;
use crate::shared::utils::{validate_credentials, validate_registration};
use crate::AppState;
use chrono::Utc;
use log::{info, warn};

/// ログイン失敗時の既定メッセージ
pub const LOGIN_FAILED_MESSAGE: &str = "ورود به سیستم با مشکل مواجه شد";

/// ユーザー登録失敗時の既定メッセージ
pub const REGISTER_FAILED_MESSAGE: &str = "خطا در ثبت نام";

/// ユーザー情報取得失敗時の既定メッセージ
pub const CURRENT_USER_FAILED_MESSAGE: &str = "مشکل در دریافت اطلاعات کاربر";

/// ログインする
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `form` - ログインフォームの入力
///
/// # 戻り値
/// 確立したセッション。失敗時はセッションを保存しない
pub async fn login(state: &AppState, form: LoginForm) -> CommandResult<StoredSession> {
    validate_credentials(&form.phone_number, &form.password)?;

    let token = AuthService::new(state.api_client.clone())
        .login(&form.phone_number, &form.password)
        .await
        .map_err(|e| {
            warn!("ログインに失敗しました: {}", e.details());
            e.with_server_fallback(LOGIN_FAILED_MESSAGE)
        })?;

    let session = state.session.establish(&token, Utc::now())?;
    Ok(session)
}

/// ユーザーを登録する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `form` - 登録フォームの入力
pub async fn register(state: &AppState, form: RegisterForm) -> CommandResult<()> {
    validate_registration(&form.name, &form.phone_number, &form.password)?;

    AuthService::new(state.api_client.clone())
        .register(&form.name, &form.phone_number, &form.password)
        .await
        .map_err(|e| {
            warn!("ユーザー登録に失敗しました: {}", e.details());
            e.with_server_fallback(REGISTER_FAILED_MESSAGE)
        })?;

    Ok(())
}

/// 現在のユーザーと操作権限を取得する
pub async fn current_user(state: &AppState) -> CommandResult<CurrentUser> {
    let token = state.auth_middleware.authenticate_request(AUTH_ENDPOINT)?;

    let user = AuthService::new(state.api_client.clone())
        .fetch_current_user(&token)
        .await
        .map_err(|e| e.with_server_fallback(CURRENT_USER_FAILED_MESSAGE))?;

    Ok(CurrentUser::from(user))
}

/// ログアウトする（保存済みセッションを破棄）
pub async fn logout(state: &AppState) -> CommandResult<()> {
    state.session.teardown()?;
    info!("ログアウトしました");
    Ok(())
}
