// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::models::phishing_site::SiteCheckResult;

/// 上报结果码：成功
pub const OP_RES_OK: i32 = 0;
/// 钓鱼网站检测事件编号
pub const OP_OBJ_TYPE_PHISHING: i32 = 31;

/// 匹配上报的默认路径
pub const MATCH_REPORT_PATH: &str = "/conf";

/// 上报公共头部
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHead {
    pub user_id: i64,
}

/// 单条上报记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportItem {
    pub op_res: i32,
    pub op_obj_type: i32,
    pub op_obj_value: serde_json::Value,
    #[serde(rename = "user_timestamp_")]
    pub user_timestamp: i64,
    #[serde(rename = "timestamp_")]
    pub timestamp: i64,
}

impl ReportItem {
    /// 由一次命中结果生成上报记录
    pub fn from_match(result: &SiteCheckResult, now_millis: i64) -> Self {
        Self {
            op_res: OP_RES_OK,
            op_obj_type: OP_OBJ_TYPE_PHISHING,
            op_obj_value: json!({ "url": result.query, "source": result.source }),
            user_timestamp: now_millis,
            timestamp: now_millis,
        }
    }
}

/// 待发送的上报请求
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEnvelope {
    pub path: String,
    pub head: ReportHead,
    pub items: Vec<ReportItem>,
}

/// 上报请求体
#[derive(Debug, Serialize)]
pub struct ReportBody<'a> {
    pub comm: &'a ReportHead,
    pub list: &'a [ReportItem],
}

impl ReportEnvelope {
    pub fn body(&self) -> ReportBody<'_> {
        ReportBody {
            comm: &self.head,
            list: &self.items,
        }
    }
}
