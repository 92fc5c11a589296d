pub mod make;
pub mod refund;
mod release;
pub mod take;

pub use make::*;
pub use refund::*;
pub use take::*;
