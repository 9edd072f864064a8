//! ペルシア語表記の数値フォーマット
//!
//! 画面に表示する数値はすべてペルシア数字（۰-۹）で表記する。
//! 桁区切りは`٬`、小数点は`٫`を使用する（fa-IRロケール相当）。

/// ペルシア数字（0〜9の順）
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// アラビア文字圏で使われる東アラビア数字（0〜9の順）
const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// 桁区切り文字
pub const GROUP_SEPARATOR: char = '٬';

/// 小数点
pub const DECIMAL_SEPARATOR: char = '٫';

/// 金額の単位
pub const TOMAN: &str = "تومان";

/// 小数部の最大桁数
const MAX_FRACTION_DIGITS: usize = 3;

/// ASCII数字をペルシア数字に置き換える
///
/// 数字以外の文字はそのまま残す
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// ペルシア数字・東アラビア数字をASCII数字に戻す
///
/// 入力欄にペルシア語キーボードで入力された値を解析する前に使用する
pub fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .chain(ARABIC_INDIC_DIGITS.iter())
                .position(|&p| p == c)
                .map(|i| char::from(b'0' + (i % 10) as u8))
                .unwrap_or(c)
        })
        .collect()
}

/// 数値をfa-IRロケールの書式で文字列化する
///
/// # 引数
/// * `value` - 数値
///
/// # 戻り値
/// 桁区切り付きのペルシア数字（小数部は最大3桁、末尾の0は省略）
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "ناعدد".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (integer_part, fraction_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut formatted = String::new();
    let is_negative = value < 0.0 && (integer_part != "0" || !fraction_part.is_empty());
    if is_negative {
        formatted.push('-');
    }

    let digits: Vec<char> = integer_part.chars().collect();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(GROUP_SEPARATOR);
        }
        formatted.push(*digit);
    }

    if !fraction_part.is_empty() {
        formatted.push(DECIMAL_SEPARATOR);
        formatted.push_str(fraction_part);
    }

    to_persian_digits(&formatted)
}

/// 金額を「<金額> تومان」の形式で表示する
pub fn format_toman(amount: f64) -> String {
    format!("{} {TOMAN}", format_number(amount))
}
