mod task;
mod user;

pub use task::*;
pub use user::*;
