mod device;
mod incubator;
mod sensor_log;

pub use device::{DEFAULT_DEVICE_TYPE, DEFAULT_ICON, Device, DeviceTable};
pub use incubator::{Incubator, IncubatorTable};
pub use sensor_log::{SensorLog, SensorLogTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
