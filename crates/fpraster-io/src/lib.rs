//! # fpraster I/O
//!
//! Adapters around the renderer: the parsed footprint model and render
//! profiles as JSON, and PNG output.

pub mod error;
pub mod footprint;
pub mod png;
pub mod profile;

pub use error::IoError;
pub use footprint::{footprint_from_json, load_footprint};
pub use png::{encode_png, render_to_file, render_with_profile, write_png};
pub use profile::RenderProfile;
