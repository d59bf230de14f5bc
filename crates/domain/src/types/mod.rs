//! Domain types and models

pub mod punch;
pub mod query;
pub mod session;
pub mod storage;

pub use punch::{PunchMode, PunchReceipt, PunchRecord};
pub use query::{Field, Operator, Query, Term, Value};
pub use session::{Session, SessionState};
pub use storage::{NewObject, StoredObject};
