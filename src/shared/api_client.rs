/// 汎用APIクライアント
///
/// tankhah APIサーバーとの通信を行うクライアント。
/// 認証・申請・取引・カテゴリー・ウォレットの各エンドポイントで共通して使用する。
/// レスポンス形状の違いは各機能のモデル側で吸収し、ここでは
/// 成功ステータスの判定とエラーメッセージの抽出のみを行う。
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::mask_token;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス
///
/// サーバーは`message`を返すことが多いが、カテゴリー系は`error`を返す
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 環境設定からAPIクライアントを作成
    pub fn new() -> AppResult<Self> {
        Self::new_with_config(ApiConfig::from_env())
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if config.is_localhost() {
            // ローカルのAPIサーバーにはプロキシを経由させない
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// ベースURLを取得
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        self.config.is_localhost()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    fn authorize(request: RequestBuilder, auth_token: Option<&str>) -> RequestBuilder {
        match auth_token {
            Some(token) => {
                debug!("Authorizationヘッダーを付与: token={}", mask_token(token));
                request.bearer_auth(token)
            }
            None => request,
        }
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let request = Self::authorize(self.client.get(self.url(endpoint)), auth_token);
        let response = self.send_request_with_retry(request, "GET", endpoint).await?;
        Self::parse_json(response, endpoint).await
    }

    /// POSTリクエストを送信し、レスポンスボディを解析する
    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let request = Self::authorize(self.client.post(self.url(endpoint)).json(body), auth_token);
        let response = self.send_request_with_retry(request, "POST", endpoint).await?;
        Self::parse_json(response, endpoint).await
    }

    /// POSTリクエストを送信する（レスポンスボディは使用しない）
    pub async fn post_unit<B>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> AppResult<()>
    where
        B: Serialize,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let request = Self::authorize(self.client.post(self.url(endpoint)).json(body), auth_token);
        self.send_request_with_retry(request, "POST", endpoint).await?;
        Ok(())
    }

    /// PATCHリクエストを送信する（レスポンスボディは使用しない）
    pub async fn patch_unit<B>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> AppResult<()>
    where
        B: Serialize,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let request = Self::authorize(self.client.patch(self.url(endpoint)).json(body), auth_token);
        self.send_request_with_retry(request, "PATCH", endpoint).await?;
        Ok(())
    }

    async fn parse_json<T>(response: Response, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("レスポンス解析エラー: endpoint={endpoint}, error={e}");
            AppError::Json(e)
        })
    }

    /// リトライ機能付きでリクエストを送信し、成功レスポンスのみを返す
    ///
    /// リトライは通信失敗時のみ。サーバーが返したエラーは即座に返す。
    async fn send_request_with_retry(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> AppResult<Response> {
        let mut attempts = 0;
        loop {
            let cloned_request = request
                .try_clone()
                .ok_or_else(|| AppError::network("リクエストのクローンに失敗しました"))?;

            match cloned_request.send().await {
                Ok(response) if response.status().is_success() => {
                    info!("{method}リクエスト成功: endpoint={endpoint}");
                    return Ok(response);
                }
                Ok(response) => {
                    return Err(Self::handle_error_response(response, method, endpoint).await);
                }
                Err(e) if attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = Duration::from_secs(2_u64.pow(attempts));
                    warn!(
                        "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}, error={e}",
                        self.config.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!("APIサーバーへの接続に失敗しました: {method} {endpoint}: {e}");
                    return Err(AppError::network(format!(
                        "APIサーバーへの接続に失敗しました: {e}"
                    )));
                }
            }
        }
    }

    /// エラーレスポンスからサーバーのメッセージを取り出す
    async fn handle_error_response(response: Response, method: &str, endpoint: &str) -> AppError {
        let status = response.status().as_u16();
        let response_text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&response_text)
            .ok()
            .and_then(ErrorBody::into_message);

        warn!(
            "APIサーバーエラー: {method} {endpoint}, status={status}, message={message:?}"
        );
        if message.is_none() {
            debug!("非構造化エラーレスポンス: body={response_text}");
        }

        AppError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_server::{FakeApiServer, FakeResponse};
    use serde_json::json;

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "a", "error": "b"}"#).unwrap();
        assert_eq!(body.into_message(), Some("a".to_string()));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "b"}"#).unwrap();
        assert_eq!(body.into_message(), Some("b".to_string()));

        let body: ErrorBody = serde_json::from_str(r#"{"message": "  "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ApiConfig::with_base_url("");
        assert!(matches!(
            ApiClient::new_with_config(config),
            Err(AppError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_token() {
        let server = FakeApiServer::start(|_| FakeResponse::ok(json!({"value": 1}))).await;
        let client = server.client();

        let value: serde_json::Value = client.get("/walet", Some("abc")).await.unwrap();
        assert_eq!(value["value"], 1);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/walet");
        assert_eq!(requests[0].authorization.as_deref(), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_post_without_token_has_no_authorization() {
        let server = FakeApiServer::start(|_| FakeResponse::ok(json!({}))).await;
        let client = server.client();

        client
            .post_unit("/auth", &json!({"name": "x"}), None)
            .await
            .unwrap();

        let requests = server.requests();
        assert!(requests[0].authorization.is_none());
        assert_eq!(requests[0].json()["name"], "x");
    }

    #[tokio::test]
    async fn test_server_error_message_is_extracted() {
        let server = FakeApiServer::start(|_| {
            FakeResponse::status(400, json!({"message": "شماره تکراری است"}))
        })
        .await;
        let client = server.client();

        let error = client
            .post_unit("/auth", &json!({}), None)
            .await
            .unwrap_err();
        match error {
            AppError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("شماره تکراری است"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unstructured_server_error_has_no_message() {
        let server =
            FakeApiServer::start(|_| FakeResponse::raw(502, "Bad Gateway".to_string())).await;
        let client = server.client();

        let error = client
            .patch_unit("/request", &json!({}), Some("t"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            AppError::Server {
                status: 502,
                message: None
            }
        ));
    }

    #[tokio::test]
    async fn test_invalid_success_body_is_json_error() {
        let server =
            FakeApiServer::start(|_| FakeResponse::raw(200, "<html></html>".to_string())).await;
        let client = server.client();

        let result: AppResult<serde_json::Value> = client.get("/auth", Some("t")).await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // 空きポートを確保してすぐに閉じる
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client =
            ApiClient::new_with_config(ApiConfig::with_base_url(format!("http://127.0.0.1:{port}")))
                .unwrap();
        let result: AppResult<serde_json::Value> = client.get("/walet", Some("t")).await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }
}
