use crate::features::auth::models::StoredSession;
use crate::features::auth::secure_storage::{SecureStorage, SecureStorageKeys};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::mask_token;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

/// プロセス全体で共有するセッションコンテキスト
///
/// 起動時に一度だけストレージから読み込み、以降はメモリ上の値を使う。
/// ロックはトークンの読み書きの間だけ保持し、`.await`をまたがない。
#[derive(Debug)]
pub struct SessionContext {
    /// 永続化先
    storage: SecureStorage,
    /// 現在のセッション
    current: Mutex<Option<StoredSession>>,
}

impl SessionContext {
    /// ストレージからセッションを読み込んで初期化する
    ///
    /// # 引数
    /// * `storage` - セッションの保存先
    ///
    /// # 戻り値
    /// SessionContextインスタンス（未保存・解析不能・期限切れの場合は未ログイン状態）
    pub fn init(storage: SecureStorage) -> AppResult<Self> {
        Self::init_at(storage, Utc::now())
    }

    /// 時刻を指定して初期化する
    pub fn init_at(storage: SecureStorage, now: DateTime<Utc>) -> AppResult<Self> {
        let current = match storage.load_session()? {
            Some(session) if session.is_expired_at(now) => {
                log::info!(
                    "保存済みセッションは期限切れのため破棄します: expires_at={}",
                    session.expires_at
                );
                storage.delete(SecureStorageKeys::TOKEN)?;
                None
            }
            Some(session) => {
                log::info!(
                    "保存済みセッションを読み込みました: token={}, expires_at={}",
                    mask_token(&session.token),
                    session.expires_at
                );
                Some(session)
            }
            None => {
                log::info!("保存済みセッションはありません");
                None
            }
        };

        Ok(Self {
            storage,
            current: Mutex::new(current),
        })
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Option<StoredSession>>> {
        self.current
            .lock()
            .map_err(|e| AppError::storage(format!("セッションのロック取得に失敗しました: {e}")))
    }

    /// ログイン成功時にセッションを確立する
    ///
    /// # 引数
    /// * `token` - APIサーバーが発行したトークン
    /// * `now` - ログイン時刻（有効期限は72時間後）
    ///
    /// # 戻り値
    /// 確立したセッション
    pub fn establish(&self, token: &str, now: DateTime<Utc>) -> AppResult<StoredSession> {
        let session = StoredSession::issue(token, now);

        let mut current = self.lock()?;
        self.storage.save_session(&session)?;
        *current = Some(session.clone());

        log::info!(
            "セッションを確立しました: token={}, expires_at={}",
            mask_token(token),
            session.expires_at
        );
        Ok(session)
    }

    /// 現在のセッションを取得する（期限は確認しない）
    pub fn current(&self) -> AppResult<Option<StoredSession>> {
        Ok(self.lock()?.clone())
    }

    /// ログイン済みかどうか
    pub fn is_authenticated(&self) -> bool {
        self.bearer_token().is_ok()
    }

    /// API呼び出しに付与するトークンを取得する
    ///
    /// # 戻り値
    /// トークン（未ログインまたは期限切れの場合は`AppError::Unauthenticated`）
    pub fn bearer_token(&self) -> AppResult<String> {
        self.bearer_token_at(Utc::now())
    }

    /// 時刻を指定してトークンを取得する
    pub fn bearer_token_at(&self, now: DateTime<Utc>) -> AppResult<String> {
        match self.lock()?.as_ref() {
            Some(session) if !session.is_expired_at(now) => Ok(session.token.clone()),
            Some(_) => {
                log::info!("セッションの有効期限が切れています");
                Err(AppError::Unauthenticated)
            }
            None => Err(AppError::Unauthenticated),
        }
    }

    /// セッションを破棄する（ログアウト）
    pub fn teardown(&self) -> AppResult<()> {
        let mut current = self.lock()?;
        self.storage.clear()?;
        *current = None;

        log::info!("セッションを破棄しました");
        Ok(())
    }
}
