pub mod bootstrap;
pub mod driver;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;
pub mod status;
pub mod trace;

pub use bootstrap::WebDriverBridge;
pub use driver::{DriverError, LocalSessionDriver, SessionDriver};
pub use errors::{BridgeError, BridgeResult};
pub use model::WireResponse;
pub use status::WdStatus;
