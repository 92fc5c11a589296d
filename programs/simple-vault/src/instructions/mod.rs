pub mod close;
pub mod deposit;
pub mod initialize_vault;
pub mod withdraw;

pub use close::*;
pub use deposit::*;
pub use initialize_vault::*;
pub use withdraw::*;
