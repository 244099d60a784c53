pub use ctx::*;
pub use err::*;
pub use main::*;
pub use sess::*;

mod ctx;
mod diagnostic;
mod err;
mod interp;
mod io;
mod sess;

mod main;
