use crate::shared::errors::{AppError, AppResult, FormErrors};
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Tehran;
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

pub mod persian;

pub use persian::{format_number, format_toman, to_ascii_digits, to_persian_digits};

/// 携帯電話番号の形式（09で始まる11桁）
static PHONE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^09[0-9]{9}$").unwrap_or_else(|e| panic!("電話番号の正規表現が不正です: {e}"))
});

/// カテゴリー色の形式（#RRGGBB）
static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap_or_else(|e| panic!("色の正規表現が不正です: {e}"))
});

/// 電話番号エラーメッセージ
pub const PHONE_NUMBER_MESSAGE: &str = "شماره موبایل باید ۱۱ رقم و با ۰۹ شروع شود";

/// パスワードエラーメッセージ
pub const PASSWORD_MESSAGE: &str = "رمز عبور باید شامل حروف بزرگ، کوچک و اعداد باشد";

/// 名前エラーメッセージ
pub const NAME_MESSAGE: &str = "نام باید حداقل ۳ کاراکتر باشد";

/// パスワードの最小文字数
const PASSWORD_MIN_LENGTH: usize = 6;

/// 名前の最小文字数
const NAME_MIN_LENGTH: usize = 3;

/// 電話番号のバリデーション
///
/// # 引数
/// * `phone_number` - 電話番号
///
/// # 戻り値
/// 有効な場合はtrue
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_NUMBER_REGEX.is_match(phone_number)
}

/// パスワードのバリデーション
///
/// # バリデーション規則
/// - 英小文字・英大文字・数字をそれぞれ1文字以上含むこと
/// - 6文字以上であること
/// - 改行を含まないこと
pub fn is_valid_password(password: &str) -> bool {
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let single_line = !password
        .chars()
        .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'));

    has_lowercase
        && has_uppercase
        && has_digit
        && single_line
        && password.chars().count() >= PASSWORD_MIN_LENGTH
}

/// 名前のバリデーション（3文字以上）
pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() >= NAME_MIN_LENGTH
}

/// 色コードのバリデーション（#RRGGBB形式）
pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR_REGEX.is_match(color)
}

/// ログインフォームの項目別バリデーション
///
/// # 引数
/// * `phone_number` - 電話番号
/// * `password` - パスワード
///
/// # 戻り値
/// すべて有効な場合はOk(())、無効な項目があれば`AppError::InvalidForm`
pub fn validate_credentials(phone_number: &str, password: &str) -> AppResult<()> {
    credential_errors(phone_number, password).into_result()
}

/// 登録フォームの項目別バリデーション（名前・パスワード・電話番号）
pub fn validate_registration(name: &str, phone_number: &str, password: &str) -> AppResult<()> {
    let mut errors = credential_errors(phone_number, password);
    if !is_valid_name(name) {
        errors.name = Some(NAME_MESSAGE.to_string());
    }
    errors.into_result()
}

fn credential_errors(phone_number: &str, password: &str) -> FormErrors {
    FormErrors {
        phone_number: (!is_valid_phone_number(phone_number))
            .then(|| PHONE_NUMBER_MESSAGE.to_string()),
        password: (!is_valid_password(password)).then(|| PASSWORD_MESSAGE.to_string()),
        name: None,
    }
}

/// 必須フィールドのバリデーション
///
/// # 引数
/// * `values` - 検証対象の値
/// * `message` - いずれかが空の場合に返すメッセージ
///
/// # 戻り値
/// すべて空でない場合はOk(())、空の値があればエラー
pub fn validate_required_fields(values: &[&str], message: &str) -> AppResult<()> {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(AppError::validation(message));
    }
    Ok(())
}

/// 金額入力を数値に変換する
///
/// 桁区切りのカンマ（`,`と`٬`）を取り除き、ペルシア数字はASCII数字として扱う。
/// 数値として解析できない場合はNone
pub fn parse_amount_input(input: &str) -> Option<f64> {
    let normalized: String = to_ascii_digits(input)
        .chars()
        .filter(|c| !matches!(c, ',' | '٬'))
        .collect();

    normalized
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// 文字列先頭の整数部分を取り出す
///
/// 先頭の空白と符号を許容し、続く数字列だけを読み取る（"120abc" → 120）。
/// `0x`/`0X`で始まる場合は16進数として読む（"0x10" → 16）。
/// 数字が一つも無い場合はNone
pub fn parse_integer_prefix(input: &str) -> Option<i64> {
    let normalized = to_ascii_digits(input);
    let trimmed = normalized.trim_start();

    let (sign, rest) = match trimmed.chars().next() {
        Some('-') => (-1, &trimmed[1..]),
        Some('+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits: String = rest.chars().take_while(|c| c.is_digit(radix)).collect();
    if digits.is_empty() {
        return None;
    }

    // 桁あふれした場合は上限に丸める
    let value = i64::from_str_radix(&digits, radix).unwrap_or(i64::MAX);
    Some(sign * value)
}

/// 現在時刻をテヘラン時間で取得する
pub fn now_in_tehran() -> DateTime<Tz> {
    Utc::now().with_timezone(&Tehran)
}

/// UTC日時をテヘラン時間に変換する
pub fn to_tehran(datetime: &DateTime<Utc>) -> DateTime<Tz> {
    datetime.with_timezone(&Tehran)
}

/// 現在時刻をUNIXエポックからのミリ秒で取得する
pub fn current_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// トークンをログ出力用にマスクする
pub fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{prefix}***")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_phone_number_validation() {
        assert!(is_valid_phone_number("09123456789"));

        assert!(!is_valid_phone_number("9123456789"));
        assert!(!is_valid_phone_number("0912345678"));
        assert!(!is_valid_phone_number("08123456789"));
        assert!(!is_valid_phone_number("091234567890"));
        assert!(!is_valid_phone_number("0912345678a"));
    }

    #[test]
    fn test_password_validation() {
        assert!(is_valid_password("Abcde1"));
        assert!(is_valid_password("Pass word 99"));

        assert!(!is_valid_password("abcdef1")); // 大文字なし
        assert!(!is_valid_password("ABCDEF1")); // 小文字なし
        assert!(!is_valid_password("Abcdef")); // 数字なし
        assert!(!is_valid_password("Abc1")); // 短すぎる
        assert!(!is_valid_password("Abc\nde1")); // 改行を含む
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("علی"));
        assert!(is_valid_name("Sam"));
        assert!(!is_valid_name("ab"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_hex_color_validation() {
        assert!(is_valid_hex_color("#1a73e8"));
        assert!(is_valid_hex_color("#FBBC05"));
        assert!(!is_valid_hex_color("1a73e8"));
        assert!(!is_valid_hex_color("#fff"));
        assert!(!is_valid_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("09123456789", "Abcde1").is_ok());

        match validate_credentials("0912", "abc") {
            Err(AppError::InvalidForm(errors)) => {
                assert_eq!(errors.phone_number.as_deref(), Some(PHONE_NUMBER_MESSAGE));
                assert_eq!(errors.password.as_deref(), Some(PASSWORD_MESSAGE));
                assert!(errors.name.is_none());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("Sara", "09123456789", "Abcde1").is_ok());

        match validate_registration("ab", "09123456789", "Abcde1") {
            Err(AppError::InvalidForm(errors)) => {
                assert_eq!(errors.name.as_deref(), Some(NAME_MESSAGE));
                assert!(errors.phone_number.is_none());
                assert!(errors.password.is_none());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(validate_required_fields(&["1000", "ناهار"], "x").is_ok());

        let error = validate_required_fields(&["1000", "  "], "لطفا تمام فیلدها را پر کنید")
            .unwrap_err();
        assert_eq!(error.user_message(), "لطفا تمام فیلدها را پر کنید");
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input("1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_amount_input("۱۲٬۵۰۰"), Some(12_500.0));
        assert_eq!(parse_amount_input(" 99.5 "), Some(99.5));
        assert_eq!(parse_amount_input("abc"), None);
        assert_eq!(parse_amount_input(""), None);
    }

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(parse_integer_prefix("120"), Some(120));
        assert_eq!(parse_integer_prefix("  120abc"), Some(120));
        assert_eq!(parse_integer_prefix("-5"), Some(-5));
        assert_eq!(parse_integer_prefix("12.9"), Some(12));
        assert_eq!(parse_integer_prefix("۵۰۰"), Some(500));
        assert_eq!(parse_integer_prefix("abc"), None);
        assert_eq!(parse_integer_prefix("-"), None);
        assert_eq!(parse_integer_prefix("0x10"), Some(16));
        assert_eq!(parse_integer_prefix("-0XfFz"), Some(-255));
        assert_eq!(parse_integer_prefix("0x"), None);
        assert_eq!(parse_integer_prefix("010"), Some(10));
        assert_eq!(parse_integer_prefix(""), None);
    }

    #[test]
    fn test_to_tehran() {
        // テヘランはUTC+3:30（夏時間なし）
        let utc = Utc.with_ymd_and_hms(2024, 3, 19, 21, 0, 0).unwrap();
        let tehran = to_tehran(&utc);
        assert_eq!(tehran.hour(), 0);
        assert_eq!(tehran.minute(), 30);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijkl"), "abcdef***");
        assert_eq!(mask_token("abc"), "abc***");
    }
}
