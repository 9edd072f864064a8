#[tokio::main]
async fn main() {
    if let Err(e) = tankhah_lib::run().await {
        eprintln!("{}", e.user_message());
        log::error!("アプリケーションの起動に失敗しました: {}", e.details());
        std::process::exit(1);
    }
}
