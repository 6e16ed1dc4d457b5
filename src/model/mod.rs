pub mod common;
pub mod document;
pub mod filter;
pub mod policy;
pub mod record;
pub mod user;

pub use common::*;
pub use document::*;
pub use filter::*;
pub use policy::*;
pub use record::*;
pub use user::*;
