//! テスト用の疑似APIサーバー
//!
//! 127.0.0.1の空きポートでHTTPサーバーを起動し、受信したリクエストを記録する。
//! レスポンスはテストごとのハンドラーで決める。
use crate::features::auth::secure_storage::SecureStorage;
use crate::features::auth::session::SessionContext;
use crate::shared::api_client::ApiClient;
use crate::shared::config::environment::ApiConfig;
use crate::AppState;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::{TcpListener, TcpStream};

/// 受信したリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// ボディをJSONとして解析する（空の場合はNull）
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    /// メソッドとパスが一致するかどうか
    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

/// ハンドラーが返すレスポンス
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: u16,
    pub body: String,
}

impl FakeResponse {
    /// 200 OK（JSONボディ）
    pub fn ok(body: serde_json::Value) -> Self {
        Self::status(200, body)
    }

    /// 任意のステータス（JSONボディ）
    pub fn status(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// 任意のステータス（生のボディ）
    pub fn raw(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// 404 Not Found
    pub fn not_found() -> Self {
        Self::status(404, serde_json::json!({"message": "Not Found"}))
    }
}

type Handler = dyn Fn(&RecordedRequest) -> FakeResponse + Send + Sync;

/// 疑似APIサーバー
pub struct FakeApiServer {
    port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApiServer {
    /// サーバーを起動する
    ///
    /// # 引数
    /// * `handler` - リクエストごとにレスポンスを決めるハンドラー
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> FakeResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let handler = Arc::clone(&handler);
                tokio::spawn(handle_connection(stream, recorded, handler));
            }
        });

        Self { port, requests }
    }

    /// サーバーのベースURL
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// このサーバーに接続するAPIクライアントを作成する
    pub fn client(&self) -> ApiClient {
        ApiClient::new_with_config(ApiConfig::with_base_url(self.base_url())).unwrap()
    }

    /// このサーバーに接続するアプリケーション状態を作成する
    ///
    /// セッションは`data_dir`内のストアファイルから読み込む
    pub fn app_state(&self, data_dir: &Path) -> AppState {
        let storage = SecureStorage::open(data_dir.join("session.json")).unwrap();
        let session = SessionContext::init(storage).unwrap();
        AppState::new(self.client(), session)
    }

    /// ログイン済みのアプリケーション状態を作成する
    pub fn logged_in_state(&self, data_dir: &Path, token: &str) -> AppState {
        let state = self.app_state(data_dir);
        state.session.establish(token, chrono::Utc::now()).unwrap();
        state
    }

    /// 受信したリクエストの一覧
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle_connection(
    stream: TcpStream,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handler: Arc<Handler>,
) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req| {
        handle_request(req, Arc::clone(&recorded), Arc::clone(&handler))
    });

    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
        log::debug!("疑似APIサーバーの接続処理エラー: {err}");
    }
}

async fn handle_request(
    req: Request<Incoming>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handler: Arc<Handler>,
) -> Result<Response<String>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let body = match req.into_body().collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
        Err(_) => String::new(),
    };

    let request = RecordedRequest {
        method,
        path,
        authorization,
        body,
    };
    let response = handler(&request);
    recorded.lock().unwrap().push(request);

    Ok(Response::builder()
        .status(StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK))
        .header("Content-Type", "application/json")
        .body(response.body)
        .unwrap())
}
