//! Success Plan - Customer Success Plan Authoring Core
//!
//! This crate implements the document model, state store, and interchange
//! mappers behind a customer success plan editor. Rendering is left to the
//! host application; the core owns the plan aggregate, persistence, and
//! conversion to workbook and print representations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
