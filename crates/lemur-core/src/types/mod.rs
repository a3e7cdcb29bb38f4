mod auth;
mod authority;
mod certificate;
mod export;
mod request;
mod search;

pub use auth::*;
pub use authority::*;
pub use certificate::*;
pub use export::*;
pub use request::*;
pub use search::*;
