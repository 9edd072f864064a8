// 機能別モジュール
pub mod auth;
pub mod calendar;
pub mod categories;
pub mod dashboard;
pub mod requests;
pub mod transactions;
pub mod wallet;
