/// API Server経由でのカテゴリーコマンド
use crate::features::categories::models::*;
use crate::shared::errors::{AppError, CommandResult};
use crate::shared::utils::{is_valid_hex_color, validate_required_fields};
use crate::AppState;
use log::{info, warn};

/// カテゴリーのエンドポイント
pub const CATEGORIES_ENDPOINT: &str = "/categories";

/// カテゴリー名が未入力の場合のメッセージ
pub const CATEGORY_NAME_REQUIRED_MESSAGE: &str = "لطفا نام دسته‌بندی را وارد کنید";

/// 色の形式が不正な場合のメッセージ
pub const INVALID_COLOR_MESSAGE: &str = "رنگ انتخاب شده معتبر نیست";

/// カテゴリー作成失敗時の既定メッセージ
pub const CREATE_CATEGORY_FAILED_MESSAGE: &str = "مشکلی در افزودن دسته‌بندی پیش آمد";

/// カテゴリー一覧を取得する
///
/// # 戻り値
/// カテゴリー一覧。`success: false`の場合はサーバーのエラーメッセージを返す
pub async fn get_categories(state: &AppState) -> CommandResult<Vec<Category>> {
    let token = state
        .auth_middleware
        .authenticate_request(CATEGORIES_ENDPOINT)?;

    let response: CategoriesResponse = state
        .api_client
        .get(CATEGORIES_ENDPOINT, Some(&token))
        .await
        .map_err(|e| e.with_server_fallback(FETCH_CATEGORIES_FAILED_MESSAGE))?;

    let categories = response.into_categories().map_err(|e| {
        warn!("カテゴリー一覧の取得に失敗しました: {}", e.details());
        e
    })?;

    info!("カテゴリー一覧取得成功: count={}", categories.len());
    Ok(categories)
}

/// カテゴリーを作成する
///
/// # 引数
/// * `state` - アプリケーション状態
/// * `form` - カテゴリー作成フォームの入力
///
/// # 戻り値
/// 作成されたカテゴリー
pub async fn create_category(state: &AppState, form: CategoryForm) -> CommandResult<Category> {
    validate_required_fields(&[&form.name], CATEGORY_NAME_REQUIRED_MESSAGE)?;

    let color = form.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR);
    if !is_valid_hex_color(color) {
        return Err(AppError::validation(INVALID_COLOR_MESSAGE).into());
    }

    let token = state
        .auth_middleware
        .authenticate_request(CATEGORIES_ENDPOINT)?;

    let body = CreateCategoryBody {
        name: form.name.trim(),
        color,
    };

    let category: Category = state
        .api_client
        .post(CATEGORIES_ENDPOINT, &body, Some(&token))
        .await
        .map_err(|e| {
            warn!("カテゴリーの作成に失敗しました: {}", e.details());
            e.with_server_fallback(CREATE_CATEGORY_FAILED_MESSAGE)
        })?;

    info!("カテゴリーを作成しました: id={}", category.id);
    Ok(category)
}
