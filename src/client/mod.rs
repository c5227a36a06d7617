//! Ghost Inspector API client
//!
//! One thin method per remote operation, a shared request/response layer,
//! and two conveniences: the overall pass/fail reduction for execute
//! calls and artifact download to disk.

pub mod callback;
pub mod ghost;
pub mod outcome;
pub mod params;

pub use callback::deliver;
pub use ghost::GhostInspectorClient;
pub use outcome::overall_outcome;
pub use params::{ParamValue, Params};
