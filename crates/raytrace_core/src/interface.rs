//! Versioned interface lookup
//!
//! Callers negotiate a version tag before issuing any query; an
//! unknown tag fails at lookup time, never as a half-usable handle.
//! Two revisions exist: revision 2 adds the swept-hull operation.

use crate::engine::TraceShape;
use crate::entity::EntityId;
use crate::error::{Result, TraceError};
use crate::filter::TraceFilter;
use crate::math::ViewAngles;
use crate::request::TraceOptions;
use crate::result::TraceResult;
use crate::service::TraceService;
use glam::Vec3;
use std::collections::HashMap;
use std::sync::Arc;

/// Version tag for interface revision 1
pub const TRACE_INTERFACE_V1: &str = "RayTraceInterface001";
/// Version tag for interface revision 2 (adds `trace_hull_shape`)
pub const TRACE_INTERFACE_V2: &str = "RayTraceInterface002";

/// A negotiated, version-tagged handle to the trace service.
///
/// The variant records which method set the caller asked for; calling
/// an operation the revision does not carry is an
/// [`TraceError::UnsupportedOperation`], not a silent upgrade.
#[derive(Clone)]
pub enum TraceInterface {
    /// Revision 1: trace_shape, trace_end_shape, trace_shape_ex
    V1(Arc<TraceService>),
    /// Revision 2: revision 1 plus trace_hull_shape
    V2(Arc<TraceService>),
}

impl std::fmt::Debug for TraceInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceInterface::V1(_) => f.write_str("TraceInterface::V1"),
            TraceInterface::V2(_) => f.write_str("TraceInterface::V2"),
        }
    }
}

impl TraceInterface {
    /// The version tag this handle was negotiated under
    pub fn tag(&self) -> &'static str {
        match self {
            Self::V1(_) => TRACE_INTERFACE_V1,
            Self::V2(_) => TRACE_INTERFACE_V2,
        }
    }

    /// Whether this revision carries the swept-hull operation
    pub fn supports_hull_trace(&self) -> bool {
        matches!(self, Self::V2(_))
    }

    fn service(&self) -> &TraceService {
        match self {
            Self::V1(s) | Self::V2(s) => s,
        }
    }

    /// Forward-projected trace (all revisions)
    pub fn trace_shape(
        &self,
        origin: Vec3,
        angles: ViewAngles,
        ignore: Option<EntityId>,
        options: Option<TraceOptions>,
    ) -> Option<TraceResult> {
        self.service().trace_shape(origin, angles, ignore, options)
    }

    /// Explicit start-to-end trace (all revisions)
    pub fn trace_end_shape(
        &self,
        origin: Vec3,
        end_origin: Vec3,
        ignore: Option<EntityId>,
        options: Option<TraceOptions>,
    ) -> Option<TraceResult> {
        self.service()
            .trace_end_shape(origin, end_origin, ignore, options)
    }

    /// Swept-hull trace (revision 2 only)
    pub fn trace_hull_shape(
        &self,
        start: Vec3,
        end: Vec3,
        hull_min: Vec3,
        hull_max: Vec3,
        ignore: Option<EntityId>,
        options: Option<TraceOptions>,
    ) -> Result<Option<TraceResult>> {
        match self {
            Self::V1(_) => Err(TraceError::UnsupportedOperation {
                tag: TRACE_INTERFACE_V1,
                operation: "trace_hull_shape",
            }),
            Self::V2(service) => {
                Ok(service.trace_hull_shape(start, end, hull_min, hull_max, ignore, options))
            }
        }
    }

    /// Caller-supplied filter and shape (all revisions)
    pub fn trace_shape_ex(
        &self,
        start: Vec3,
        end: Vec3,
        filter: &TraceFilter,
        shape: &TraceShape,
    ) -> Option<TraceResult> {
        self.service().trace_shape_ex(start, end, filter, shape)
    }
}

/// Registry mapping version tags to negotiated interface handles
pub struct InterfaceRegistry {
    entries: HashMap<&'static str, TraceInterface>,
}

impl InterfaceRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Expose a service under both supported revisions
    pub fn register(&mut self, service: Arc<TraceService>) {
        self.entries
            .insert(TRACE_INTERFACE_V1, TraceInterface::V1(Arc::clone(&service)));
        self.entries
            .insert(TRACE_INTERFACE_V2, TraceInterface::V2(service));
        log::info!(
            "trace interface registered: {}, {}",
            TRACE_INTERFACE_V1,
            TRACE_INTERFACE_V2
        );
    }

    /// Negotiate a handle for a version tag.
    ///
    /// Fails fast with [`TraceError::InterfaceNotFound`] before any
    /// query is attempted.
    pub fn lookup(&self, tag: &str) -> Result<TraceInterface> {
        match self.entries.get(tag) {
            Some(interface) => {
                log::debug!("{} accessed", tag);
                Ok(interface.clone())
            }
            None => {
                log::warn!("trace interface lookup failed for tag '{}'", tag);
                Err(TraceError::InterfaceNotFound(tag.to_string()))
            }
        }
    }

    /// Tags currently registered
    pub fn tags(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
