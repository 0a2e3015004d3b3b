// ABOUTME: Validated domain types for image transfers.
// ABOUTME: Service names, service lists, and image references.

mod image_ref;
mod service_list;
mod service_name;

pub use image_ref::{DEFAULT_TAG, ImageRef, ParseImageRefError};
pub use service_list::{DEFAULT_SERVICES, ServiceList, ServiceListError};
pub use service_name::{ServiceName, ServiceNameError};
