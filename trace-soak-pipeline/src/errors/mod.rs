mod bootstrap;
mod delivery;
mod driver;
mod source;

pub use bootstrap::BootstrapError;
pub use delivery::DeliveryError;
pub use driver::DriverError;
pub use source::SourceError;
