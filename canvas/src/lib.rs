//! Canvas rendering and input engine for the image annotation editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and natively
//! for the host tooling and tests. It owns the interactive part of annotating
//! a single image: translating raw pointer and keyboard input into shape
//! mutations, mapping between screen pixels and normalized image coordinates,
//! hit-testing shapes and resize handles, and painting the scene. The host is
//! responsible only for wiring input to the engine, persisting the resulting
//! [`engine::Action`]s to its annotation store, and feeding the updated shape
//! list back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shapes, labels, partial updates, and the read-only shape list |
//! | [`camera`] | Pan/zoom camera, image bounds, and coordinate conversions |
//! | [`transform`] | Rotation, flip, and color filters for the base image |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against shapes and resize handles |
//! | [`render`] | Display-list construction and 2D canvas painting |
//! | [`config`] | Tunable engine parameters |
//! | [`consts`] | Shared numeric constants and defaults |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod transform;
