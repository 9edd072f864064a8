/// API Server経由での取引コマンド
///
/// 取引の登録と一覧取得を行います
use crate::features::transactions::models::*;
use crate::shared::errors::{AppError, CommandResult};
use crate::shared::utils::parse_amount_input;
use crate::AppState;
use chrono::{SecondsFormat, Utc};
use log::{debug, info, warn};

/// 取引のエンドポイント
pub const TRANSACTIONS_ENDPOINT: &str = "/transactions";

/// 金額またはカテゴリーが未入力の場合のメッセージ
pub const TRANSACTION_REQUIRED_FIELDS_MESSAGE: &str = "لطفا مبلغ و دسته‌بندی را وارد کنید";

/// 金額が数値として読めない場合のメッセージ
pub const INVALID_TRANSACTION_AMOUNT_MESSAGE: &str = "مبلغ وارد شده معتبر نیست";

/// 取引登録失敗時の既定メッセージ
pub const CREATE_TRANSACTION_FAILED_MESSAGE: &str = "خطا در ثبت تراکنش";

/// 取引一覧取得失敗時の既定メッセージ
pub const FETCH_TRANSACTIONS_FAILED_MESSAGE: &str = "خطا در دریافت تراکنش‌ها";

/// 取引を登録する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `form` - 取引登録フォームの入力
///
/// # 戻り値
/// 成功時は()
pub async fn create_transaction(state: &AppState, form: TransactionForm) -> CommandResult<()> {
    if form.amount.is_empty() || form.category_id.is_empty() {
        return Err(AppError::validation(TRANSACTION_REQUIRED_FIELDS_MESSAGE).into());
    }
    let amount = parse_amount_input(&form.amount)
        .ok_or_else(|| AppError::validation(INVALID_TRANSACTION_AMOUNT_MESSAGE))?;

    let token = state
        .auth_middleware
        .authenticate_request(TRANSACTIONS_ENDPOINT)?;

    let date = form.date.unwrap_or_else(Utc::now);
    let image = form
        .receipt
        .as_deref()
        .map(receipt_data_url)
        .unwrap_or_default();
    debug!("領収書画像: attached={}", !image.is_empty());

    let body = CreateTransactionBody {
        amount,
        description: &form.description,
        category: &form.category_id,
        date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
        image,
    };

    state
        .api_client
        .post_unit(TRANSACTIONS_ENDPOINT, &body, Some(&token))
        .await
        .map_err(|e| {
            warn!("取引の登録に失敗しました: {}", e.details());
            e.with_server_fallback(CREATE_TRANSACTION_FAILED_MESSAGE)
        })?;

    info!(
        "取引を登録しました: amount={amount}, category={}",
        form.category_id
    );
    Ok(())
}

/// 取引一覧を取得する
pub async fn get_transactions(state: &AppState) -> CommandResult<Vec<Transaction>> {
    let token = state
        .auth_middleware
        .authenticate_request(TRANSACTIONS_ENDPOINT)?;

    let response: TransactionsResponse = state
        .api_client
        .get(TRANSACTIONS_ENDPOINT, Some(&token))
        .await
        .map_err(|e| e.with_server_fallback(FETCH_TRANSACTIONS_FAILED_MESSAGE))?;

    let transactions = response.into_transactions();
    info!("取引一覧取得成功: count={}", transactions.len());
    Ok(transactions)
}
