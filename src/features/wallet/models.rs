use serde::{Deserialize, Serialize};

/// ウォレット集計（サーバー側で計算済み）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    /// 残高
    #[serde(default)]
    pub wallet_balance: f64,
    /// 月間の受取合計
    #[serde(default)]
    pub total_incomes: f64,
    /// 月間の支払合計
    #[serde(default)]
    pub total_outcomes: f64,
}
