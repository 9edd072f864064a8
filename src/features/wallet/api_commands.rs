/// API Server経由でのウォレット集計コマンド
use crate::features::wallet::models::WalletSummary;
use crate::shared::errors::CommandResult;
use crate::AppState;
use log::info;

/// ウォレット集計のエンドポイント（サーバー側のパス表記のまま）
pub const WALLET_ENDPOINT: &str = "/walet";

/// ウォレット集計取得失敗時の既定メッセージ
pub const FETCH_WALLET_FAILED_MESSAGE: &str = "خطا در دریافت اطلاعات کیف پول";

/// ウォレット集計を取得する
pub async fn get_wallet_summary(state: &AppState) -> CommandResult<WalletSummary> {
    let token = state.auth_middleware.authenticate_request(WALLET_ENDPOINT)?;

    let summary: WalletSummary = state
        .api_client
        .get(WALLET_ENDPOINT, Some(&token))
        .await
        .map_err(|e| e.with_server_fallback(FETCH_WALLET_FAILED_MESSAGE))?;

    info!("ウォレット集計取得成功");
    Ok(summary)
}
