// ABOUTME: Composable capability traits for container runtimes.
// ABOUTME: Defines ImageOps and RuntimeInfo.

mod image;
mod runtime_info;
mod shared_types;

pub use image::{ImageError, ImageOps};
pub use runtime_info::RuntimeInfo;
pub use shared_types::*;

/// All capabilities the transfer pipeline needs.
pub trait FullRuntime: ImageOps + RuntimeInfo {}

impl<T: ImageOps + RuntimeInfo> FullRuntime for T {}
