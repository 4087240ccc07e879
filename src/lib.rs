//! Series performance statistics scraped from [VLR.gg](https://www.vlr.gg).
//!
//! The entry point is [`VlrClient::get_series_performance`], which reads the
//! performance tab of a series and returns kill matrices and per-player
//! multi-kill, clutch and economy stats for every played map.

pub use client::{VlrClient, DEFAULT_TIMEOUT};
pub use error::{Result, VlrError};
pub use model::*;

pub mod util;

mod client;
mod error;
mod model;
mod vlr_scraper;
