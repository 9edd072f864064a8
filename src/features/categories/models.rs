use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// カテゴリー作成時の既定色
pub const DEFAULT_CATEGORY_COLOR: &str = "#1a73e8";

/// カテゴリー作成画面の色の選択肢
pub const CATEGORY_COLORS: [&str; 8] = [
    "#1a73e8", "#34A853", "#FBBC05", "#EA4335", "#9C27B0", "#2196F3", "#4CAF50", "#FF9800",
];

/// カテゴリー一覧取得失敗時の既定メッセージ
pub const FETCH_CATEGORIES_FAILED_MESSAGE: &str = "خطا در دریافت دسته‌بندی‌ها";

/// カテゴリーデータモデル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub color: String,
}

/// カテゴリー一覧レスポンス
///
/// サーバーは`{categories}`、`{success, categories}`、配列のいずれかを返す
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoriesResponse {
    Envelope {
        #[serde(default)]
        success: Option<bool>,
        #[serde(default)]
        categories: Vec<Category>,
        #[serde(default)]
        error: Option<String>,
    },
    List(Vec<Category>),
}

impl CategoriesResponse {
    /// カテゴリー一覧に正規化する
    ///
    /// # 戻り値
    /// カテゴリー一覧（`success: false`の場合はサーバーのエラーメッセージ）
    pub fn into_categories(self) -> AppResult<Vec<Category>> {
        match self {
            CategoriesResponse::Envelope {
                success: Some(false),
                error,
                ..
            } => Err(AppError::Server {
                status: 200,
                message: Some(error.unwrap_or_else(|| FETCH_CATEGORIES_FAILED_MESSAGE.to_string())),
            }),
            CategoriesResponse::Envelope { categories, .. } => Ok(categories),
            CategoriesResponse::List(categories) => Ok(categories),
        }
    }
}

/// カテゴリー作成フォームの入力
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    /// 未選択の場合は既定色
    pub color: Option<String>,
}

/// POST /categories のリクエストボディ
#[derive(Debug, Serialize)]
pub struct CreateCategoryBody<'a> {
    pub name: &'a str,
    pub color: &'a str,
}
