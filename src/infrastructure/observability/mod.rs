mod init_tracing;
mod request_id;

pub use init_tracing::init_tracing;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
