//! RayTrace Core - layer-masked trace queries
//!
//! This crate is the engine-agnostic core of the RayTrace query
//! system: a 64-bit interaction-layer algebra, the trace request /
//! filter / result contract, and the [`TraceService`] facade that
//! delegates geometric intersection to an external
//! [`WorldQueryEngine`].
//!
//! # Architecture
//!
//! ```text
//! caller ── TraceRequest ──► TraceService ── TraceFilter ──► WorldQueryEngine
//!                                 ▲                                │
//!                                 └────── TraceResult ◄── RawCast ─┘
//! ```
//!
//! The engine and the entity directory are trait seams; production
//! code plugs in `raytrace_world` (rapier3d-backed), tests plug in
//! scripted fakes. The service itself is stateless between calls.
//!
//! # Example
//!
//! ```ignore
//! use raytrace_core::prelude::*;
//!
//! let service = Arc::new(TraceService::new(engine, directory));
//! let mut registry = InterfaceRegistry::new();
//! registry.register(Arc::clone(&service));
//!
//! let iface = registry.lookup(TRACE_INTERFACE_V2)?;
//! let result = iface.trace_end_shape(start, end, None, None);
//! ```

pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod filter;
pub mod interface;
pub mod layers;
pub mod math;
pub mod request;
pub mod result;
pub mod service;

pub mod prelude {
    //! Common imports for trace queries
    pub use crate::config::TraceConfig;
    pub use crate::engine::{RawCast, RawHit, TraceShape, WorldQueryEngine};
    pub use crate::entity::{EntityDirectory, EntityId, EntityInfo, HierarchyId};
    pub use crate::error::{Result, TraceError};
    pub use crate::filter::{Candidate, TraceFilter};
    pub use crate::interface::{
        InterfaceRegistry, TraceInterface, TRACE_INTERFACE_V1, TRACE_INTERFACE_V2,
    };
    pub use crate::layers::InteractionLayers;
    pub use crate::math::ViewAngles;
    pub use crate::request::{HullExtents, TraceOptions, TracePath, TraceRequest};
    pub use crate::result::TraceResult;
    pub use crate::service::TraceService;
}

pub use prelude::*;
