/// 環境変数・ログ・API設定
pub mod environment;

/// 起動時のデータディレクトリ初期化
pub mod initialization;

pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig, DEFAULT_API_BASE_URL,
};
pub use initialization::{
    get_session_store_filename, initialize_application, initialize_application_in,
    log_initialization_complete, InitializationResult,
};
