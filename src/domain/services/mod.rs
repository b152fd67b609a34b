// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 缓存刷新（cache_refresher）：从固定配置和对象存储重建域名缓存
/// - 导入服务（import_service）：从远端数据源拉取域名并上传到对象存储
/// - 查询匹配（lookup_matcher）：按回退规则在缓存中匹配查询域名
pub mod cache_refresher;
pub mod import_service;
pub mod lookup_matcher;
