//! slotgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the slotgraph
//! extraction, layout, and rendering stages. It includes:
//!
//! - **Model**: Registries, graph nodes, and positioned entities ([`model`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod model;
