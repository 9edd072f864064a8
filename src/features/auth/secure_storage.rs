/// セキュアストレージモジュール
///
/// アプリケーションデータディレクトリ内のJSONファイルにキー・値を保存する。
/// 書き込みのたびにファイルへ反映する。
use crate::features::auth::models::StoredSession;
use crate::shared::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// セキュアストレージのキー定義
pub struct SecureStorageKeys;

impl SecureStorageKeys {
    /// セッション（`{token, expiresAt}`のJSON文字列）のキー
    pub const TOKEN: &'static str = "token";
}

/// セキュアストレージサービス
#[derive(Debug, Clone)]
pub struct SecureStorage {
    /// ストアファイルのパス
    path: PathBuf,
    /// メモリ上のキー・値
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl SecureStorage {
    /// ストアファイルを開く
    ///
    /// # 引数
    /// * `path` - ストアファイルのパス（存在しない場合は空のストアになる）
    ///
    /// # 戻り値
    /// SecureStorageインスタンス
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("ストアファイルが破損しているため空のストアとして扱います: {e}");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        log::debug!(
            "ストアファイルを開きました: path={path:?}, entries={}",
            entries.len()
        );

        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    /// ストアファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| AppError::storage(format!("ストアのロック取得に失敗しました: {e}")))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)
            .map_err(|e| AppError::storage(format!("ストアの保存に失敗しました: {e}")))
    }

    /// 値を取得する
    ///
    /// # 戻り値
    /// 値（存在しない場合はNone）
    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// 値を保存する
    pub fn set(&self, key: &str, value: impl Into<String>) -> AppResult<()> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.into());
        self.save(&entries)?;

        log::debug!("ストアに値を保存しました: key={key}");
        Ok(())
    }

    /// 値を削除する
    pub fn delete(&self, key: &str) -> AppResult<()> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
            log::debug!("ストアから値を削除しました: key={key}");
        }
        Ok(())
    }

    /// すべての値を削除する
    pub fn clear(&self) -> AppResult<()> {
        let mut entries = self.lock()?;
        entries.clear();
        self.save(&entries)?;

        log::info!("ストアをクリアしました");
        Ok(())
    }

    /// セッションを保存する
    pub fn save_session(&self, session: &StoredSession) -> AppResult<()> {
        let blob = serde_json::to_string(session)?;
        self.set(SecureStorageKeys::TOKEN, blob)
    }

    /// セッションを読み込む
    ///
    /// # 戻り値
    /// 保存済みセッション（未保存または解析できない場合はNone）
    pub fn load_session(&self) -> AppResult<Option<StoredSession>> {
        let Some(blob) = self.get(SecureStorageKeys::TOKEN)? else {
            return Ok(None);
        };

        match serde_json::from_str::<StoredSession>(&blob) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                log::warn!("保存済みセッションの解析に失敗しました: {e}");
                Ok(None)
            }
        }
    }
}
