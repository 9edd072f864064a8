/// ホーム画面の概要
///
/// 今日のジャラリ暦の日付とウォレット集計の3つの枠を組み立てます
use crate::features::calendar::JalaliDate;
use crate::features::wallet::{get_wallet_summary, WalletSummary};
use crate::shared::errors::CommandResult;
use crate::shared::utils::format_toman;
use crate::AppState;
use serde::Serialize;

/// 残高の枠の見出し
pub const BALANCE_TITLE: &str = "مانده وجه";

/// 月間受取の枠の見出し
pub const INCOMES_TITLE: &str = "خالص دریافت ماهانه";

/// 月間支払の枠の見出し
pub const OUTCOMES_TITLE: &str = "خالص پرداخت ماهانه";

/// 金額の枠
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinanceBox {
    pub title: &'static str,
    /// fa-IR形式の金額（単位付き）
    pub amount: String,
}

/// ホーム画面の表示内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeDashboard {
    /// 「日 月名 年」形式の日付
    pub date_label: String,
    pub boxes: Vec<FinanceBox>,
}

impl HomeDashboard {
    /// 日付とウォレット集計から表示内容を組み立てる
    pub fn new(today: JalaliDate, summary: &WalletSummary) -> Self {
        let boxes = [
            (BALANCE_TITLE, summary.wallet_balance),
            (INCOMES_TITLE, summary.total_incomes),
            (OUTCOMES_TITLE, summary.total_outcomes),
        ]
        .into_iter()
        .map(|(title, amount)| FinanceBox {
            title,
            amount: format_toman(amount),
        })
        .collect();

        Self {
            date_label: today.label(),
            boxes,
        }
    }

    /// 標準出力向けのテキスト
    pub fn render(&self) -> String {
        let mut lines = vec![self.date_label.clone()];
        lines.extend(
            self.boxes
                .iter()
                .map(|finance_box| format!("{}: {}", finance_box.title, finance_box.amount)),
        );
        lines.join("\n")
    }
}

/// ホーム画面の内容を取得する
///
/// # 戻り値
/// テヘラン時間での今日の日付とウォレット集計
pub async fn load_dashboard(state: &AppState) -> CommandResult<HomeDashboard> {
    let summary = get_wallet_summary(state).await?;
    Ok(HomeDashboard::new(JalaliDate::today(), &summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::calendar::gregorian_to_jalali;
    use crate::shared::errors::ErrorKind;
    use crate::shared::test_server::{FakeApiServer, FakeResponse};
    use serde_json::json;

    fn summary() -> WalletSummary {
        WalletSummary {
            wallet_balance: 1_500_000.0,
            total_incomes: 2_000_000.0,
            total_outcomes: 500_000.0,
        }
    }

    #[test]
    fn test_dashboard_boxes() {
        let home = HomeDashboard::new(gregorian_to_jalali(2024, 3, 20), &summary());

        assert_eq!(home.date_label, "1 فروردین 1403");
        assert_eq!(
            home.boxes,
            vec![
                FinanceBox {
                    title: BALANCE_TITLE,
                    amount: "۱٬۵۰۰٬۰۰۰ تومان".to_string()
                },
                FinanceBox {
                    title: INCOMES_TITLE,
                    amount: "۲٬۰۰۰٬۰۰۰ تومان".to_string()
                },
                FinanceBox {
                    title: OUTCOMES_TITLE,
                    amount: "۵۰۰٬۰۰۰ تومان".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_render() {
        let home = HomeDashboard::new(gregorian_to_jalali(2024, 3, 20), &WalletSummary::default());
        assert_eq!(
            home.render(),
            concat!(
                "1 فروردین 1403\n",
                "مانده وجه: ۰ تومان\n",
                "خالص دریافت ماهانه: ۰ تومان\n",
                "خالص پرداخت ماهانه: ۰ تومان"
            )
        );
    }

    #[tokio::test]
    async fn test_load_dashboard() {
        let server = FakeApiServer::start(|request| {
            if request.is("GET", "/walet") {
                FakeResponse::ok(json!({
                    "walletBalance": 1500000,
                    "totalIncomes": 2000000,
                    "totalOutcomes": 500000
                }))
            } else {
                FakeResponse::not_found()
            }
        })
        .await;
        let temp = tempfile::tempdir().unwrap();
        let state = server.logged_in_state(temp.path(), "tok");

        let home = load_dashboard(&state).await.unwrap();
        assert_eq!(home.date_label, JalaliDate::today().label());
        assert_eq!(home.boxes[0].amount, "۱٬۵۰۰٬۰۰۰ تومان");
    }

    #[tokio::test]
    async fn test_load_dashboard_requires_session() {
        let server = FakeApiServer::start(|_| FakeResponse::not_found()).await;
        let temp = tempfile::tempdir().unwrap();
        let state = server.app_state(temp.path());

        let error = load_dashboard(&state).await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Unauthenticated);
    }
}
