pub mod pad;
pub mod status;
pub mod ws;

pub use pad::{PadState, pad_routes};
pub use status::status_routes;
pub use ws::{GateState, sync_routes};
