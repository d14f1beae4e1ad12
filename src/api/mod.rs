// SPDX-License-Identifier: MPL-2.0

//! HTTP client for the recruitment service.

mod recruit;

pub use recruit::{ApiError, Application, JobPosting, RecruitClient, Stage};
