pub mod codec;
pub mod session;

pub use session::{DeviceEndpoint, SessionError, TcpTransport, Transport};
