mod builder;
mod session;
mod step;

pub use builder::SessionBuilder;
pub use session::{InitError, Session};
pub use step::{ParseError, Step};
