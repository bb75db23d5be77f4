mod device_handle;
mod incubator_handle;

pub use device_handle::*;
pub use incubator_handle::*;
