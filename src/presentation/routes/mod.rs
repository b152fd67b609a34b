// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::services::lookup_matcher::LookupMatcher;
use crate::presentation::handlers::phishing_sites_handler;

/// 创建应用路由
///
/// # 参数
///
/// * `matcher` - 钓鱼域名查询匹配器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(matcher: Arc<LookupMatcher>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/working", get(working))
        .route("/v1/version", get(version));

    let browserext_routes = Router::new().route(
        "/browserext/phishing_sites/check",
        post(phishing_sites_handler::check_sites),
    );

    Router::new()
        .merge(public_routes)
        .merge(browserext_routes)
        .layer(Extension(matcher))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 运行状态端点，返回服务当前时间戳（秒）
pub async fn working() -> Json<Value> {
    Json(json!({ "date": Utc::now().timestamp() }))
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
