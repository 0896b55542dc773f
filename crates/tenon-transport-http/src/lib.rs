//! HTTP/JSON-RPC transport adapter for tenon.
//! Exposes the dispatcher over `POST /rpc`; response bytes pass through
//! unchanged.

mod error;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::RpcServer;
