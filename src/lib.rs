// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// GPU / graphics allowances — casts are intentional and safe
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
// Float comparison: graphics math frequently compares against 0.0, 1.0, etc.
#![allow(clippy::float_cmp)]
// Pedantic allowances
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::items_after_statements)]

//! Interactive twisted-prism wireframe demo built on wgpu.
//!
//! Generates a watertight quad-strip mesh of a rectangular prism whose
//! cross-section rotates along its long axis, renders it with a
//! derivative-based wireframe overlay, and drives a trackball orbit camera
//! from pointer input. Rendering is gated on surface visibility so an
//! occluded window costs no GPU work.
//!
//! # Key entry points
//!
//! - [`engine::PrismRenderEngine`] — setup / per-frame step / teardown
//!   lifecycle
//! - [`geometry::prism::build_twisted_prism`] — procedural mesh construction
//! - [`camera::TrackballCamera`] — pointer-driven orbit camera
//! - [`config::DemoConfig`] — the host embedding contract

pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod renderer;
pub mod visibility;
