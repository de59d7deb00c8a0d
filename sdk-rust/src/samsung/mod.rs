mod art_api;
mod tv;

pub use art_api::{DeviceDetails, DeviceInfo};
pub use tv::{SamsungTv, SamsungTvOptions};
