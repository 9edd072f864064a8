use crate::features::calendar::format_jalali_date;
use crate::shared::utils::format_toman;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 領収書画像のデータURL接頭辞
pub const RECEIPT_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// 取引に紐づくカテゴリー（一覧取得時に展開済み）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// 取引データモデル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// ISO 8601形式の日時
    pub date: String,
    #[serde(default)]
    pub category: TransactionCategory,
}

impl Transaction {
    /// 取引日時をUTCとして解析する（解析できない場合はNone）
    ///
    /// オフセットの無い日時と日付のみの値はUTCとみなす（日付のみは0時）
    pub fn date_utc(&self) -> Option<DateTime<Utc>> {
        let text = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// 金額の表示（例: ۱۲۰٬۰۰۰ تومان）
    pub fn amount_label(&self) -> String {
        format_toman(self.amount)
    }

    /// 取引日の表示（ジャラリ暦、解析できない場合は空文字）
    pub fn date_label(&self) -> String {
        self.date_utc()
            .map(|dt| format_jalali_date(&dt))
            .unwrap_or_default()
    }

    /// 詳細画面の表示内容
    pub fn detail(&self) -> TransactionDetail {
        TransactionDetail {
            date: self.date_label(),
            amount: self.amount_label(),
            description: self.description.clone(),
        }
    }
}

/// 取引詳細画面の表示内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionDetail {
    pub date: String,
    pub amount: String,
    pub description: String,
}

/// GET /transactions のレスポンス
///
/// 通常は配列だが、`{transactions}`で包まれていても受け付ける
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TransactionsResponse {
    List(Vec<Transaction>),
    Envelope {
        #[serde(default)]
        transactions: Vec<Transaction>,
    },
}

impl TransactionsResponse {
    pub fn into_transactions(self) -> Vec<Transaction> {
        match self {
            TransactionsResponse::List(transactions) => transactions,
            TransactionsResponse::Envelope { transactions } => transactions,
        }
    }
}

/// 取引登録フォームの入力
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    /// 金額（桁区切りのカンマを含んでもよい）
    pub amount: String,
    pub description: String,
    /// 選択したカテゴリーのID
    pub category_id: String,
    /// 取引日時（未指定の場合は現在時刻）
    pub date: Option<DateTime<Utc>>,
    /// 領収書画像（JPEGのバイト列）
    pub receipt: Option<Vec<u8>>,
}

/// 領収書画像をデータURLに変換する
///
/// # 引数
/// * `jpeg_bytes` - JPEG画像のバイト列
///
/// # 戻り値
/// `data:image/jpeg;base64,`で始まる文字列
pub fn receipt_data_url(jpeg_bytes: &[u8]) -> String {
    format!(
        "{RECEIPT_DATA_URL_PREFIX}{}",
        general_purpose::STANDARD.encode(jpeg_bytes)
    )
}

/// POST /transactions のリクエストボディ
#[derive(Debug, Serialize)]
pub struct CreateTransactionBody<'a> {
    pub amount: f64,
    pub description: &'a str,
    /// カテゴリーID
    pub category: &'a str,
    /// ISO 8601形式（ミリ秒付きUTC）
    pub date: String,
    /// 領収書のデータURL（未添付の場合は空文字）
    pub image: String,
}
