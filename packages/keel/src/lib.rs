#![allow(unused_doc_comments)]
pub mod debt_token;
pub mod engine;
pub mod helpers;
pub mod math;
pub mod price_feed;
