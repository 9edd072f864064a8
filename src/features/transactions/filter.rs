/// 取引一覧の絞り込み
///
/// 取得済みの一覧に対してメモリ上で条件を適用する。絞り込みは常に元の一覧に対して行う。
use crate::features::transactions::models::Transaction;
use crate::shared::utils::parse_integer_prefix;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 絞り込み条件
///
/// 金額の上下限は入力欄の文字列のまま保持し、判定時に整数部分だけを読む
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub min_amount: String,
    #[serde(default)]
    pub max_amount: String,
    #[serde(default)]
    pub search_text: String,
}

/// 金額の境界値
#[derive(Debug, Clone, Copy, PartialEq)]
enum AmountBound {
    /// 未入力
    Default,
    /// 数値として読めた値
    Value(f64),
    /// 入力はあるが数値として読めない（判定をすべて通す）
    Unparsable,
}

impl AmountBound {
    fn parse(input: &str) -> Self {
        if input.is_empty() {
            return AmountBound::Default;
        }
        match parse_integer_prefix(input) {
            Some(value) => AmountBound::Value(value as f64),
            None => AmountBound::Unparsable,
        }
    }
}

impl TransactionFilter {
    /// 条件をすべて解除する
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 条件が一つも指定されていないかどうか
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 取引が条件をすべて満たすかどうか
    ///
    /// 日付を解析できない取引は日付条件を通過する
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(date) = transaction.date_utc() {
            if self.start_date.is_some_and(|start| date < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| date > end) {
                return false;
            }
        }

        let amount = transaction.amount;
        let below_min = match AmountBound::parse(&self.min_amount) {
            AmountBound::Default => amount < 0.0,
            AmountBound::Value(min) => amount < min,
            AmountBound::Unparsable => false,
        };
        let above_max = match AmountBound::parse(&self.max_amount) {
            AmountBound::Value(max) => amount > max,
            AmountBound::Default | AmountBound::Unparsable => false,
        };
        if below_min || above_max {
            return false;
        }

        if !self.search_text.is_empty() {
            let description = transaction.description.to_lowercase();
            if !description.contains(&self.search_text.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// 条件に一致する取引だけを取り出す
///
/// # 引数
/// * `transactions` - 取得済みの取引一覧（元の一覧）
/// * `filter` - 絞り込み条件
///
/// # 戻り値
/// 元の順序を保った一致した取引の一覧
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect()
}
