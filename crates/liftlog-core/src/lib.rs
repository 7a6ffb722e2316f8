//! Domain services for liftlog: workout plans, session materialization,
//! set logging, and explicit referential-integrity propagation.
//!
//! Every operation takes the acting user's id and authorizes ownership on
//! the way in; rows owned by other users are reported as not found.
//! Multi-step mutations commit fully or roll back fully.

pub mod catalog;
pub mod error;
pub mod integrity;
pub mod plan;
pub mod profile;
pub mod session;
pub mod setlog;
pub mod user;

pub use error::{Error, Result};
