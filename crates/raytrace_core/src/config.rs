//! Trace service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the trace service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    /// Travel distance for forward-projected (directed) traces
    pub max_trace_distance: f32,

    /// Master toggle for diagnostic beams; per-query requests are
    /// ignored while this is off
    pub debug_beams_enabled: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_trace_distance: 8192.0,
            debug_beams_enabled: true,
        }
    }
}

impl TraceConfig {
    /// Configuration for close-quarters queries
    pub fn short_range() -> Self {
        Self {
            max_trace_distance: 512.0,
            ..Default::default()
        }
    }

    /// Set the directed-trace travel distance
    pub fn with_max_trace_distance(mut self, distance: f32) -> Self {
        self.max_trace_distance = distance;
        self
    }

    /// Enable or disable diagnostic beams
    pub fn with_debug_beams(mut self, enabled: bool) -> Self {
        self.debug_beams_enabled = enabled;
        self
    }
}
