mod device;
mod incubator;
mod sensor_log;

pub use device::DeviceRepository;
pub use incubator::IncubatorRepository;
pub use sensor_log::SensorLogRepository;
