//! Upstream catalog clients and their field-mapping adapters.
//!
//! Each platform module pairs a thin client (which upstream paths to call,
//! with which header profile) with raw serde types whose `into_*` methods
//! map them onto the canonical shapes in [`nonton_core::models`].

pub mod consumer;
pub mod error;
pub mod fallback;
pub mod headers;
pub mod lenient;
pub mod platform;
pub mod upstream;

pub mod anime;
pub mod dramabox;
pub mod flickreels;
pub mod freereels;
pub mod komik;
pub mod melolo;
pub mod netshort;
pub mod reelshort;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::UpstreamError;
pub use fallback::{Served, Stage};
pub use platform::Platform;
pub use upstream::{HttpUpstream, Upstream, UpstreamRequest};
