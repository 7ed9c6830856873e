//! Naver search relay gateway library crate.
//!
//! Issues per-user relay tokens bound to Naver API credentials and forwards
//! search queries made with those tokens to the Naver search API.

pub mod config;
pub mod errors;
pub mod http;
pub mod registration;
pub mod search;
pub mod storage;
