pub mod dispatcher;
pub mod error;
pub mod operation;
pub mod output;

pub use dispatcher::{Dispatcher, Shaped};
pub use error::{DispatchError, DispatchResult};
pub use operation::Operation;
pub use output::{DispatchOutput, OutputMode};
