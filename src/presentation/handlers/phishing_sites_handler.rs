// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::domain::services::lookup_matcher::LookupMatcher;
use crate::presentation::errors::AppError;

/// 检查一批域名是否为已知钓鱼网站
///
/// # 参数
///
/// * `matcher` - 查询匹配器
/// * `payload` - 域名字符串数组
///
/// # 返回值
///
/// 命中结果数组 `[{query, domain, source}]`，保持请求中的顺序；
/// 请求体不是字符串数组时返回 400
pub async fn check_sites(
    Extension(matcher): Extension<Arc<LookupMatcher>>,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(queries) = payload?;
    Ok(Json(matcher.check(&queries)))
}
