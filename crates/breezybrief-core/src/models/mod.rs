pub mod airport;
pub mod forecast;

pub use airport::*;
pub use forecast::*;
