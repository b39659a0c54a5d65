// =============================================================================
// STATE MODULE
// =============================================================================
// Account structures and the value types stored inside them.
//

mod account;
mod disclosure;
mod encrypted;
mod key_record;
mod operator;
mod pending;
mod pool;

pub use account::*;
pub use disclosure::*;
pub use encrypted::*;
pub use key_record::*;
pub use operator::*;
pub use pending::{OperationKind, PendingComputation};
pub use pool::*;
