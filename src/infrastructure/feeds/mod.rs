// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 远程钓鱼域名数据源
pub mod scam_sniffer;

pub use scam_sniffer::ScamSnifferFeed;
