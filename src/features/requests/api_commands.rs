/// API Server経由での仮払い申請コマンド
///
/// 申請の作成・一覧取得・更新（管理者）を行います
use crate::features::auth::commands::CURRENT_USER_FAILED_MESSAGE;
use crate::features::auth::service::{AuthService, AUTH_ENDPOINT};
use crate::features::auth::Capabilities;
use crate::features::requests::models::*;
use crate::shared::errors::{AppError, CommandResult};
use crate::shared::utils::{current_epoch_millis, parse_amount_input, validate_required_fields};
use crate::AppState;
use log::{info, warn};

/// 申請のエンドポイント
pub const REQUEST_ENDPOINT: &str = "/request";

/// 未入力項目がある場合のメッセージ
pub const REQUIRED_FIELDS_MESSAGE: &str = "لطفا تمام فیلدها را پر کنید";

/// 金額が不正な場合のメッセージ
pub const INVALID_AMOUNT_MESSAGE: &str = "مبلغ وارد شده معتبر نیست";

/// 申請作成失敗時の既定メッセージ
pub const CREATE_REQUEST_FAILED_MESSAGE: &str = "خطا در ثبت درخواست";

/// 申請一覧取得失敗時の既定メッセージ
pub const FETCH_REQUESTS_FAILED_MESSAGE: &str = "مشکل در دریافت درخواست‌ها";

/// 申請更新失敗時の既定メッセージ
pub const UPDATE_REQUEST_FAILED_MESSAGE: &str = "مشکل در بروزرسانی درخواست";

/// 金額入力を検証して数値に変換する（0より大きい値のみ）
fn parse_positive_amount(input: &str) -> Result<f64, AppError> {
    parse_amount_input(input)
        .filter(|amount| *amount > 0.0)
        .ok_or_else(|| AppError::validation(INVALID_AMOUNT_MESSAGE))
}

/// 仮払い申請を作成する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `form` - 申請フォームの入力
///
/// # 戻り値
/// 成功時は()。申請日時は現在時刻、状態は審査待ちで送信する
pub async fn create_request(state: &AppState, form: RequestForm) -> CommandResult<()> {
    validate_required_fields(&[&form.amount, &form.description], REQUIRED_FIELDS_MESSAGE)?;
    let amount = parse_positive_amount(&form.amount)?;

    let token = state.auth_middleware.authenticate_request(REQUEST_ENDPOINT)?;

    let body = CreateRequestBody {
        amount,
        description: &form.description,
        date: current_epoch_millis(),
        status: RequestStatus::Pending,
    };

    state
        .api_client
        .post_unit(REQUEST_ENDPOINT, &body, Some(&token))
        .await
        .map_err(|e| {
            warn!("申請の作成に失敗しました: {}", e.details());
            e.with_server_fallback(CREATE_REQUEST_FAILED_MESSAGE)
        })?;

    info!("申請を作成しました: amount={amount}");
    Ok(())
}

/// 申請一覧を取得する
pub async fn get_requests(state: &AppState) -> CommandResult<Vec<CashRequest>> {
    let token = state.auth_middleware.authenticate_request(REQUEST_ENDPOINT)?;

    let response: RequestsResponse = state
        .api_client
        .get(REQUEST_ENDPOINT, Some(&token))
        .await
        .map_err(|e| e.with_server_fallback(FETCH_REQUESTS_FAILED_MESSAGE))?;

    info!("申請一覧取得成功: count={}", response.requests.len());
    Ok(response.requests)
}

/// 申請管理画面の内容を取得する
///
/// 申請一覧とユーザー情報を順に取得し、編集可否を判定する。
/// ユーザー情報を取得できない場合は一覧だけを編集不可で返す
pub async fn get_request_board(state: &AppState) -> CommandResult<RequestBoard> {
    let requests = get_requests(state).await?;

    let token = state.auth_middleware.authenticate_request(AUTH_ENDPOINT)?;
    let can_edit = match AuthService::new(state.api_client.clone())
        .fetch_current_user(&token)
        .await
    {
        Ok(user) => Capabilities::from(user.role).can_edit_requests,
        Err(e) => {
            let e = e.with_server_fallback(CURRENT_USER_FAILED_MESSAGE);
            warn!(
                "ユーザー情報の取得に失敗したため編集不可で表示します: {}",
                e.details()
            );
            false
        }
    };

    Ok(RequestBoard { requests, can_edit })
}

/// 申請を更新する（管理者）
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `request` - 更新対象の申請
/// * `form` - 編集フォームの入力
///
/// 申請日時は元の値を送り返す。権限はサーバー側で判定する
pub async fn update_request(
    state: &AppState,
    request: &CashRequest,
    form: RequestEditForm,
) -> CommandResult<()> {
    let amount = parse_amount_input(&form.amount)
        .filter(|amount| *amount >= 0.0)
        .ok_or_else(|| AppError::validation(INVALID_AMOUNT_MESSAGE))?;

    let token = state.auth_middleware.authenticate_request(REQUEST_ENDPOINT)?;

    let body = UpdateRequestBody {
        id: &request.id,
        amount,
        description: &form.description,
        status: form.status,
        date: &request.date,
    };

    state
        .api_client
        .patch_unit(REQUEST_ENDPOINT, &body, Some(&token))
        .await
        .map_err(|e| {
            warn!("申請の更新に失敗しました: id={}, {}", request.id, e.details());
            e.with_server_fallback(UPDATE_REQUEST_FAILED_MESSAGE)
        })?;

    info!(
        "申請を更新しました: id={}, status={:?}",
        request.id, form.status
    );
    Ok(())
}
