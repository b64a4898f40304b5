//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Header and footer
//! - `modals`: The body editor modal
//! - `panels`: Endpoints list, request form and response panels
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header};
pub use modals::render_body_editor_modal;
pub use panels::{render_endpoints_panel, render_request_panel, render_response_panel};
