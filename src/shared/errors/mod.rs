use serde::{Deserialize, Serialize};
use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー（単一メッセージ）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// フォーム項目ごとのバリデーションエラー
    #[error("フォーム入力エラー: {0}")]
    InvalidForm(FormErrors),

    /// 保存済みセッションが存在しない、または期限切れ
    #[error("認証が必要です")]
    Unauthenticated,

    /// 通信そのものに失敗した場合のエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// APIサーバーが2xx以外を返した場合のエラー
    #[error("APIサーバーエラー: status={status}, message={message:?}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// ローカルストレージ関連のエラー
    #[error("ストレージエラー: {0}")]
    Storage(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// ログイン・登録フォームの項目別エラー
///
/// 各項目はネットワーク呼び出し前に入力欄の横へ表示される
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FormErrors {
    /// エラーが一つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.password.is_none() && self.name.is_none()
    }

    /// エラーがあれば`AppError::InvalidForm`に変換する
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidForm(self))
        }
    }

    /// 表示順（名前、パスワード、電話番号）でメッセージを列挙する
    pub fn messages(&self) -> Vec<&str> {
        [&self.name, &self.password, &self.phone_number]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .collect()
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join(" / "))
    }
}

/// 画面側がエラーの出し分けに使う分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 入力エラー（ネットワーク呼び出し前）
    Validation,
    /// 通信エラー
    Network,
    /// サーバーが報告したエラー
    Server,
    /// 未ログイン
    Unauthenticated,
    /// 設定・ストレージなどクライアント内部のエラー
    Internal,
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（通信の一時的エラーなど）
    Medium,
    /// 高重要度（設定・ストレージの破損など）
    High,
}

impl AppError {
    /// ユーザーに表示するためのメッセージを取得（ペルシア語）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidForm(errors) => errors.to_string(),
            AppError::Unauthenticated => "لطفا دوباره وارد شوید".to_string(),
            AppError::Network(_) => "خطا در برقراری ارتباط با سرور".to_string(),
            AppError::Server { message, .. } => message
                .clone()
                .unwrap_or_else(|| "خطایی از سمت سرور رخ داد".to_string()),
            AppError::Configuration(_) => "تنظیمات برنامه نامعتبر است".to_string(),
            AppError::Storage(_) | AppError::Io(_) => {
                "دسترسی به حافظه دستگاه امکان پذیر نیست".to_string()
            }
            AppError::Json(_) => "پاسخ سرور قابل خواندن نیست".to_string(),
        }
    }

    /// エラーの分類を取得
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::InvalidForm(_) => ErrorKind::Validation,
            AppError::Unauthenticated => ErrorKind::Unauthenticated,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Server { .. } | AppError::Json(_) => ErrorKind::Server,
            AppError::Configuration(_) | AppError::Storage(_) | AppError::Io(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) | AppError::InvalidForm(_) | AppError::Unauthenticated => {
                ErrorSeverity::Low
            }
            AppError::Network(_) | AppError::Server { .. } | AppError::Json(_) => {
                ErrorSeverity::Medium
            }
            AppError::Configuration(_) | AppError::Storage(_) | AppError::Io(_) => {
                ErrorSeverity::High
            }
        }
    }

    /// サーバーメッセージが無い場合に操作ごとの既定文言へ差し替える
    ///
    /// # 引数
    /// * `fallback` - 操作ごとの既定メッセージ
    pub fn with_server_fallback(self, fallback: &str) -> Self {
        match self {
            AppError::Server {
                status,
                message: None,
            } => AppError::Server {
                status,
                message: Some(fallback.to_string()),
            },
            other => other,
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// 通信エラーを作成するヘルパー関数
    pub fn network<S: Into<String>>(message: S) -> Self {
        AppError::Network(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// ストレージエラーを作成するヘルパー関数
    pub fn storage<S: Into<String>>(message: S) -> Self {
        AppError::Storage(message.into())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Network(error.to_string())
    }
}

/// コマンド境界で返すエラー（分類＋表示用メッセージ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
    /// 項目別エラー（フォーム入力エラーの場合のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        let kind = error.kind();
        let message = error.user_message();
        let fields = match error {
            AppError::InvalidForm(fields) => Some(fields),
            _ => None,
        };
        Self {
            kind,
            message,
            fields,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CommandError {}

/// AppErrorからStringへの変換（表示層での使用のため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message()
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

/// コマンドの戻り値（`Ok(data) | Err(kind, message)`）
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(AppError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(AppError::Unauthenticated.kind(), ErrorKind::Unauthenticated);
        assert_eq!(AppError::network("timeout").kind(), ErrorKind::Network);
        assert_eq!(
            AppError::Server {
                status: 500,
                message: None
            }
            .kind(),
            ErrorKind::Server
        );
        assert_eq!(AppError::storage("broken").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_severity() {
        assert_eq!(AppError::validation("テスト").severity(), ErrorSeverity::Low);
        assert_eq!(AppError::network("接続失敗").severity(), ErrorSeverity::Medium);
        assert_eq!(
            AppError::configuration("設定不正").severity(),
            ErrorSeverity::High
        );
    }

    #[test]
    fn test_user_message() {
        let validation_error = AppError::validation("لطفا تمام فیلدها را پر کنید");
        assert_eq!(validation_error.user_message(), "لطفا تمام فیلدها را پر کنید");

        // 通信エラーは詳細を隠して汎用メッセージにする
        let network_error = AppError::network("connection refused");
        assert_eq!(network_error.user_message(), "خطا در برقراری ارتباط با سرور");

        // サーバーのメッセージはそのまま表示する
        let server_error = AppError::Server {
            status: 400,
            message: Some("کاربر یافت نشد".to_string()),
        };
        assert_eq!(server_error.user_message(), "کاربر یافت نشد");
    }

    #[test]
    fn test_with_server_fallback() {
        let error = AppError::Server {
            status: 500,
            message: None,
        }
        .with_server_fallback("خطا در ثبت درخواست");
        assert_eq!(error.user_message(), "خطا در ثبت درخواست");

        // サーバーメッセージがある場合は差し替えない
        let error = AppError::Server {
            status: 400,
            message: Some("مبلغ نامعتبر است".to_string()),
        }
        .with_server_fallback("خطا در ثبت درخواست");
        assert_eq!(error.user_message(), "مبلغ نامعتبر است");

        // サーバーエラー以外はそのまま
        let error = AppError::Unauthenticated.with_server_fallback("x");
        assert!(matches!(error, AppError::Unauthenticated));
    }

    #[test]
    fn test_form_errors() {
        let errors = FormErrors::default();
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());

        let errors = FormErrors {
            phone_number: Some("phone".to_string()),
            password: None,
            name: Some("name".to_string()),
        };
        assert_eq!(errors.messages(), vec!["name", "phone"]);
        assert!(matches!(
            errors.into_result(),
            Err(AppError::InvalidForm(_))
        ));
    }

    #[test]
    fn test_command_error_conversion() {
        let fields = FormErrors {
            password: Some("رمز".to_string()),
            ..Default::default()
        };
        let error: CommandError = AppError::InvalidForm(fields.clone()).into();
        assert_eq!(error.kind, ErrorKind::Validation);
        assert_eq!(error.message, "رمز");
        assert_eq!(error.fields, Some(fields));

        let error: CommandError = AppError::Unauthenticated.into();
        assert_eq!(error.kind, ErrorKind::Unauthenticated);
        assert!(error.fields.is_none());

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"kind\":\"unauthenticated\""));
        assert!(!json.contains("fields"));
    }

    #[test]
    fn test_string_conversion() {
        let error = AppError::validation("テストエラー");
        let error_string: String = error.into();
        assert_eq!(error_string, "テストエラー");
    }
}
