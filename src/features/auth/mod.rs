/// 認証機能のモジュール
pub mod commands;
pub mod middleware;
pub mod models;
pub mod secure_storage;
pub mod service;
pub mod session;


pub use middleware::*;
pub use models::*;
pub use secure_storage::*;
pub use service::*;
pub use session::*;
