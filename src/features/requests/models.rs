use crate::features::calendar::format_jalali_date;
use crate::shared::utils::format_toman;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 申請の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// 審査待ち
    Pending,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
}

impl RequestStatus {
    /// すべての状態（編集画面の選択肢の順）
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
    ];

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "در انتظار",
            RequestStatus::Approved => "تایید شده",
            RequestStatus::Rejected => "رد شده",
        }
    }

    /// バッジの色
    pub fn color(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "#EAB308",
            RequestStatus::Approved => "#22C55E",
            RequestStatus::Rejected => "#EF4444",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 申請日時
///
/// 作成時はエポックミリ秒で送信するが、サーバーからはISO文字列で返ることもある。
/// 更新時は受け取った値をそのまま送り返す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestDate {
    /// エポックミリ秒
    Millis(i64),
    /// 日時文字列
    Text(String),
}

impl RequestDate {
    /// UTC日時に変換する（解析できない場合はNone）
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            RequestDate::Millis(millis) => DateTime::<Utc>::from_timestamp_millis(*millis),
            RequestDate::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    text.trim()
                        .parse::<i64>()
                        .ok()
                        .and_then(DateTime::<Utc>::from_timestamp_millis)
                }),
        }
    }
}

/// 仮払い申請
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "Date")]
    pub date: RequestDate,
    pub status: RequestStatus,
    /// 申請者（IDまたはユーザー情報）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

impl CashRequest {
    /// 金額の表示（例: ۱٬۰۰۰ تومان）
    pub fn amount_label(&self) -> String {
        format_toman(self.amount)
    }

    /// 申請日の表示（ジャラリ暦、解析できない場合は空文字）
    pub fn date_label(&self) -> String {
        self.date
            .to_utc()
            .map(|dt| format_jalali_date(&dt))
            .unwrap_or_default()
    }
}

/// 申請一覧画面の表示内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBoard {
    pub requests: Vec<CashRequest>,
    /// 編集ボタンを表示するかどうか（管理者のみ）
    pub can_edit: bool,
}

impl RequestBoard {
    /// 申請が一件もない場合の表示
    pub const EMPTY_TITLE: &'static str = "درخواستی موجود نیست";

    /// 申請が一件もないかどうか
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// 申請フォームの入力
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestForm {
    pub amount: String,
    pub description: String,
}

/// 申請編集フォームの入力（管理者用）
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEditForm {
    pub amount: String,
    pub description: String,
    pub status: RequestStatus,
}

impl RequestEditForm {
    /// 既存の申請から編集フォームの初期値を作る
    pub fn from_request(request: &CashRequest) -> Self {
        Self {
            amount: request.amount.to_string(),
            description: request.description.clone(),
            status: request.status,
        }
    }
}

/// GET /request のレスポンス
#[derive(Debug, Deserialize)]
pub struct RequestsResponse {
    #[serde(default)]
    pub requests: Vec<CashRequest>,
}

/// POST /request のリクエストボディ
#[derive(Debug, Serialize)]
pub struct CreateRequestBody<'a> {
    pub amount: f64,
    pub description: &'a str,
    #[serde(rename = "Date")]
    pub date: i64,
    pub status: RequestStatus,
}

/// PATCH /request のリクエストボディ
#[derive(Debug, Serialize)]
pub struct UpdateRequestBody<'a> {
    pub id: &'a str,
    pub amount: f64,
    pub description: &'a str,
    pub status: RequestStatus,
    #[serde(rename = "Date")]
    pub date: &'a RequestDate,
}
