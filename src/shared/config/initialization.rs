use crate::shared::config::environment::{get_environment, Environment};
use crate::shared::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーションデータディレクトリ名
const APP_DIR_NAME: &str = "tankhah";

/// アプリケーション初期化の結果を表す構造体
#[derive(Debug)]
pub struct InitializationResult {
    /// 初回起動かどうか
    pub is_first_run: bool,
    /// アプリケーションデータディレクトリのパス
    pub app_data_dir: PathBuf,
    /// セッション保存ファイルのパス
    pub session_store_path: PathBuf,
    /// 実行環境
    pub environment: Environment,
}

/// 環境に応じたセッション保存ファイル名を取得する
///
/// - 開発環境: "dev_session.json"
/// - プロダクション環境: "session.json"
pub fn get_session_store_filename(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "dev_session.json",
        Environment::Production => "session.json",
    }
}

/// アプリケーションの初期化を実行する
///
/// # 処理内容
/// 1. アプリケーションデータディレクトリの決定（`TANKHAH_DATA_DIR` > OS標準）
/// 2. ディレクトリの作成
/// 3. 初回起動の判定（セッション保存ファイルの有無）
pub fn initialize_application() -> AppResult<InitializationResult> {
    let app_data_dir = resolve_app_data_dir()?;
    initialize_application_in(&app_data_dir)
}

/// 指定ディレクトリでアプリケーションの初期化を実行する
pub fn initialize_application_in(app_data_dir: &Path) -> AppResult<InitializationResult> {
    let environment = get_environment();

    ensure_app_data_directory(app_data_dir)?;

    let session_store_path = app_data_dir.join(get_session_store_filename(&environment));
    let is_first_run = !session_store_path.exists();

    if is_first_run {
        log_first_run_initialization(&environment, app_data_dir, &session_store_path);
    }

    Ok(InitializationResult {
        is_first_run,
        app_data_dir: app_data_dir.to_path_buf(),
        session_store_path,
        environment,
    })
}

/// アプリケーションデータディレクトリを決定する
fn resolve_app_data_dir() -> AppResult<PathBuf> {
    if let Some(dir) = crate::get_env_var_optional!("TANKHAH_DATA_DIR") {
        log::debug!("TANKHAH_DATA_DIR を使用します: {dir}");
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::configuration("アプリデータディレクトリの取得に失敗しました"))
}

/// アプリケーションデータディレクトリを確実に作成する
fn ensure_app_data_directory(app_data_dir: &Path) -> AppResult<()> {
    if !app_data_dir.exists() {
        fs::create_dir_all(app_data_dir).map_err(|e| {
            AppError::configuration(format!("アプリデータディレクトリの作成に失敗: {e}"))
        })?;

        log::info!("アプリケーションデータディレクトリを作成しました: {app_data_dir:?}");
    }

    Ok(())
}

fn log_first_run_initialization(environment: &Environment, app_data_dir: &Path, store: &Path) {
    log::info!("=== アプリケーション初回起動 ===");
    log::info!("実行環境: {environment:?}");
    log::info!("アプリデータディレクトリ: {app_data_dir:?}");
    log::info!("セッション保存ファイル: {store:?}");
}

/// 初期化完了ログを出力する
pub fn log_initialization_complete(result: &InitializationResult) {
    if result.is_first_run {
        log::info!("初回起動の初期化が正常に完了しました");
    } else {
        log::info!("アプリケーション起動完了（既存のセッション保存ファイルを使用）");
    }
    log::info!("環境: {:?}", result.environment);
    log::info!("セッション保存ファイル: {:?}", result.session_store_path);
}
