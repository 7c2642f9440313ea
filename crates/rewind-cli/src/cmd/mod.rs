//! One module per subcommand. Handlers take the resolved [`Context`] and an
//! output mode; mutations persist the session before returning.
//!
//! [`Context`]: crate::context::Context

pub mod add;
pub mod check;
pub mod edit;
pub mod log;
pub mod ls;
pub mod rm;
pub mod travel;
