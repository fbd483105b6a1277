#![doc = include_str!("../README.md")]

pub mod cache;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod hooks;
pub mod navigation;
pub mod notify;
pub mod resources;
pub mod routes;
pub mod template;
pub mod timer;
pub mod view;

mod router;
mod router_cfg;

pub use router::{Platform, Router};
pub use router_cfg::RouterConfig;

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::cache::*;
    pub use crate::error::*;
    pub use crate::extract::*;
    pub use crate::fetch::*;
    pub use crate::history::*;
    pub use crate::hooks::*;
    pub use crate::navigation::*;
    pub use crate::notify::*;
    pub use crate::resources::*;
    pub use crate::routes::*;
    pub use crate::template::*;
    pub use crate::timer::*;
    pub use crate::view::*;
    pub use crate::{Platform, Router, RouterConfig};
}
