use std::env;

fn main() {
    // ビルド時に環境変数を設定
    // .env が存在すればビルド時にも読み込み、実行時に上書きされなかった場合のデフォルト値として埋め込む
    dotenv::dotenv().ok();

    // 実行環境（未指定の場合はビルドプロファイルで判定するため埋め込まない）
    let environment = env::var("ENVIRONMENT").ok();
    if let Some(environment) = &environment {
        println!("cargo:rustc-env=ENVIRONMENT={}", environment);
    }

    // API設定
    let api_server_url = env::var("API_SERVER_URL")
        .unwrap_or_else(|_| "https://tankhah.vercel.app/api".to_string());
    let api_timeout = env::var("API_TIMEOUT_SECONDS").unwrap_or_else(|_| "30".to_string());
    let api_max_retries = env::var("API_MAX_RETRIES").unwrap_or_else(|_| "0".to_string());

    println!("cargo:rustc-env=API_SERVER_URL={}", api_server_url);
    println!("cargo:rustc-env=API_TIMEOUT_SECONDS={}", api_timeout);
    println!("cargo:rustc-env=API_MAX_RETRIES={}", api_max_retries);

    // ログレベル（未指定の場合は実行環境に応じたデフォルトを使うため埋め込まない）
    if let Ok(log_level) = env::var("LOG_LEVEL") {
        println!("cargo:rustc-env=LOG_LEVEL={}", log_level);
    }

    for var in [
        "ENVIRONMENT",
        "API_SERVER_URL",
        "API_TIMEOUT_SECONDS",
        "API_MAX_RETRIES",
        "LOG_LEVEL",
    ] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    println!(
        "cargo:warning=ビルド環境: {}",
        environment.as_deref().unwrap_or("(ビルドプロファイル依存)")
    );
    println!("cargo:warning=APIサーバーURL: {}", api_server_url);
}
