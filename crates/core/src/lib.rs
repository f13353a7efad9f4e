//! Alcove is a geometry and interaction engine for plotting semistandard
//! Young tableaux onto the A₂ affine alcove tessellation. This crate contains
//! the tessellation geometry, the data model, the interactive session state
//! machine, and the SVG/HTML presentation. Front ends live elsewhere.
//!
//! ```
//! use alcove::{Command, Session, SessionConfig, Viewport};
//!
//! let (mut session, ticket) =
//!     Session::new(SessionConfig::default(), Viewport::new(800.0, 600.0))
//!         .unwrap();
//! // Fetch the data however you like, then hand it back with the ticket
//! session
//!     .dispatch(Command::DataLoaded { ticket, records: vec![] })
//!     .unwrap();
//! println!("{} triangles", session.tessellation().len());
//! ```
//!
//! See [SessionConfig] for details on how the tessellation and rendering can
//! be customized.

mod config;
pub mod data;
pub mod render;
pub mod session;
pub mod tessellation;
mod util;

pub use crate::{
    config::{SessionConfig, TessellationConfig},
    data::{ClassId, TableauRecord},
    render::{config::RenderConfig, unit::Color3, SessionRenderer},
    session::{Command, Effect, LoadTicket, Session},
    tessellation::{AlcoveCoordinate, Tessellation, TriangleId, Viewport},
    util::unit::{Point2, Vector2},
};
