// 機能モジュール
pub mod features;
pub mod shared;

use features::auth::middleware::AuthMiddleware;
use features::auth::secure_storage::SecureStorage;
use features::auth::session::SessionContext;
use features::dashboard;
use log::{info, warn};
use shared::api_client::ApiClient;
use shared::config::{
    initialize_application, initialize_logging_system, load_environment_variables,
    log_initialization_complete,
};
use shared::errors::AppResult;
use std::sync::Arc;

/// アプリケーション状態（APIクライアントとセッションを保持）
///
/// すべてのコマンドはこの状態を受け取って実行する。
#[derive(Debug, Clone)]
pub struct AppState {
    pub api_client: ApiClient,
    pub session: Arc<SessionContext>,
    pub auth_middleware: AuthMiddleware,
}

impl AppState {
    /// 新しいAppStateを作成する
    ///
    /// # 引数
    /// * `api_client` - APIクライアント
    /// * `session` - 初期化済みのセッションコンテキスト
    pub fn new(api_client: ApiClient, session: SessionContext) -> Self {
        let session = Arc::new(session);
        let auth_middleware = AuthMiddleware::new(Arc::clone(&session));

        Self {
            api_client,
            session,
            auth_middleware,
        }
    }
}

/// アプリケーションを起動する
///
/// 設定の読み込み、ログ・セッションの初期化を行い、
/// ログイン済みであればホーム画面の概要を標準出力に表示する。
pub async fn run() -> AppResult<()> {
    load_environment_variables();
    initialize_logging_system();

    info!("アプリケーション初期化を開始します...");

    let init_result = initialize_application()?;
    log_initialization_complete(&init_result);

    let storage = SecureStorage::open(&init_result.session_store_path)?;
    let session = SessionContext::init(storage)?;
    let api_client = ApiClient::new()?;
    let state = AppState::new(api_client, session);

    if !state.session.is_authenticated() {
        info!("未ログインのためホーム画面を表示しません");
        println!("لطفا ابتدا وارد حساب کاربری خود شوید");
        return Ok(());
    }

    match dashboard::load_dashboard(&state).await {
        Ok(home) => println!("{}", home.render()),
        Err(e) => {
            warn!("ホーム画面の取得に失敗しました: {e}");
            eprintln!("{}", e.message);
        }
    }

    Ok(())
}
