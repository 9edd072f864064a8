use crate::shared::utils::{now_in_tehran, to_persian_digits, to_tehran};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ジャラリ暦の月名（ファルヴァルディーン〜エスファンド）
pub const MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// グレゴリオ暦の各月の日数（平年）
const GREGORIAN_MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// 33年周期の日数
const DAYS_PER_33_YEARS: i64 = 12053;

/// 4年周期の日数
const DAYS_PER_4_YEARS: i64 = 1461;

/// ジャラリ暦の日付
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JalaliDate {
    /// 年
    pub year: i64,
    /// 月（1〜12）
    pub month: u32,
    /// 日（1〜31）
    pub day: u32,
}

/// グレゴリオ暦の日付をジャラリ暦に変換する
///
/// # 引数
/// * `gy` - 年
/// * `gm` - 月（1始まり）
/// * `gd` - 日
///
/// # 戻り値
/// ジャラリ暦の日付
///
/// 入力値の範囲は検証しない。範囲外の値でも決まった結果を返し、
/// 月は常に1〜12、日は常に1〜31に収まる。
pub fn gregorian_to_jalali(gy: i32, gm: i32, gd: i32) -> JalaliDate {
    let (mut jy, gy) = if gy > 1600 {
        (979, i64::from(gy) - 1600)
    } else {
        (0, i64::from(gy) - 621)
    };
    let gm = i64::from(gm);

    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let preceding_months = (gm - 1).clamp(0, 12) as usize;
    let mut days = 365 * gy + (gy2 + 3).div_euclid(4) - (gy2 + 99).div_euclid(100)
        + (gy2 + 399).div_euclid(400)
        - 80
        + i64::from(gd)
        + GREGORIAN_MONTH_DAYS[..preceding_months].iter().sum::<i64>();

    jy += 33 * days.div_euclid(DAYS_PER_33_YEARS);
    days = days.rem_euclid(DAYS_PER_33_YEARS);
    jy += 4 * days.div_euclid(DAYS_PER_4_YEARS);
    days = days.rem_euclid(DAYS_PER_4_YEARS);

    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    // 前半6か月は31日、後半は30日（最終月は29日または30日）
    let (month, day) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    JalaliDate {
        year: jy,
        month: month as u32,
        day: day as u32,
    }
}

impl JalaliDate {
    /// chronoの日付型から変換する
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        gregorian_to_jalali(date.year(), date.month() as i32, date.day() as i32)
    }

    /// UTC日時をテヘラン時間の日付として変換する
    pub fn from_utc(datetime: &DateTime<Utc>) -> Self {
        Self::from_date(&to_tehran(datetime))
    }

    /// テヘラン時間での今日の日付
    pub fn today() -> Self {
        Self::from_date(&now_in_tehran())
    }

    /// 月名を取得する
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// 「日 月名 年」形式のラベル（ホーム画面の日付表示）
    pub fn label(&self) -> String {
        format!("{} {} {}", self.day, self.month_name(), self.year)
    }

    /// 「年/月/日」形式のペルシア数字表記（一覧・詳細画面の日付表示）
    pub fn to_persian_string(&self) -> String {
        to_persian_digits(&self.to_string())
    }
}

/// 「年/月/日」形式（ゼロ埋めなし）
impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.month, self.day)
    }
}

/// UTC日時をジャラリ暦の日付文字列（ペルシア数字）にする
pub fn format_jalali_date(datetime: &DateTime<Utc>) -> String {
    JalaliDate::from_utc(datetime).to_persian_string()
}
