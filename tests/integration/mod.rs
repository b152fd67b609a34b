// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod feed_test;
pub mod health_check;
pub mod phishing_sites_api_test;
pub mod refresh_flow_test;
pub mod report_test;
pub mod scheduler_test;
