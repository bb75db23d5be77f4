mod actuator_service;
mod emulator_service;
mod recorder_service;

pub use actuator_service::*;
pub use emulator_service::*;
pub use recorder_service::*;
