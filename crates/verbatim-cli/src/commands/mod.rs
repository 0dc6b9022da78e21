//! Command implementations.

pub mod analyze;
pub mod check;
pub mod chunks;

pub use self::analyze::execute_analyze;
pub use self::check::execute_check;
pub use self::chunks::execute_chunks;
