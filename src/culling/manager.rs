//! Keeps the current visibility graph fresh and answers renderer queries

use std::sync::Arc;

use glam::IVec3;

use crate::core::config::OcclusionConfig;
use crate::culling::graph::OcclusionGraph;
use crate::culling::tracer::OcclusionTracer;
use crate::math::aabb::Aabb;
use crate::math::frustum::SectionFrustum;
use crate::world::events::{EventBus, EventReceiver};
use crate::world::manager::ChunkManager;
use crate::world::position::SectionPosition;
use crate::world::update::WorldUpdate;

/// Sent after a new graph replaced the previous one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityGraphChanged {
    pub origin: SectionPosition,
    pub visible_sections: usize,
}

pub struct WorldOcclusionManager {
    config: OcclusionConfig,
    updates: EventReceiver<WorldUpdate>,
    events: EventBus<VisibilityGraphChanged>,
    graph: Option<Arc<OcclusionGraph>>,
    invalid: bool,
    camera_section: Option<SectionPosition>,
    frustum_revision: Option<u64>,
    occlusion_revision: Option<u64>,
}

impl std::fmt::Debug for WorldOcclusionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldOcclusionManager")
            .field("config", &self.config)
            .field("invalid", &self.invalid)
            .field("camera_section", &self.camera_section)
            .field("visible_sections", &self.graph.as_ref().map(|graph| graph.visible_count()))
            .finish()
    }
}

impl WorldOcclusionManager {
    /// Subscribes to `chunks` for structural updates
    pub fn new(chunks: &mut ChunkManager, config: OcclusionConfig) -> Self {
        Self {
            config,
            updates: chunks.subscribe(),
            events: EventBus::new(),
            graph: None,
            invalid: true,
            camera_section: None,
            frustum_revision: None,
            occlusion_revision: None,
        }
    }

    pub fn config(&self) -> &OcclusionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: OcclusionConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        if !config.enabled {
            self.graph = None;
        }
        self.invalidate();
    }

    pub fn subscribe(&mut self) -> EventReceiver<VisibilityGraphChanged> {
        self.events.subscribe()
    }

    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Current snapshot, shareable with other threads
    pub fn graph(&self) -> Option<Arc<OcclusionGraph>> {
        self.graph.clone()
    }

    fn poll_updates(&mut self) {
        for update in self.updates.try_iter() {
            if update.is_structural() {
                self.invalid = true;
            }
        }
    }

    /// Re-trace when anything the graph depends on changed.
    ///
    /// Keeps the previous graph while the camera column is not loaded.
    /// Returns whether a new graph was built.
    pub fn draw(&mut self, chunks: &ChunkManager, camera: SectionPosition, frustum: &dyn SectionFrustum) -> bool {
        self.poll_updates();
        if !self.config.enabled {
            return false;
        }

        if self.occlusion_revision != Some(chunks.occlusion_revision()) {
            self.occlusion_revision = Some(chunks.occlusion_revision());
            self.invalid = true;
        }
        if self.camera_section != Some(camera) {
            self.camera_section = Some(camera);
            self.invalid = true;
        }
        if self.frustum_revision != Some(frustum.revision()) {
            self.frustum_revision = Some(frustum.revision());
            self.invalid = true;
        }
        if !self.invalid {
            return false;
        }

        if !chunks.contains(camera.chunk_position()) {
            log::trace!("Camera chunk {} not loaded, keeping previous graph", camera.chunk_position());
            return false;
        }

        let graph = OcclusionTracer::new(chunks, camera, frustum, self.config.trace_distance()).trace();
        let event = VisibilityGraphChanged {
            origin: graph.origin(),
            visible_sections: graph.visible_count(),
        };
        self.graph = Some(Arc::new(graph));
        self.invalid = false;
        self.events.send(event);
        true
    }

    /// False while no graph exists or occlusion is disabled
    pub fn is_section_occluded(&self, position: SectionPosition) -> bool {
        if !self.config.enabled {
            return false;
        }
        match &self.graph {
            Some(graph) => graph.is_occluded(position),
            None => false,
        }
    }

    /// Occluded only if every section the box touches is occluded
    pub fn is_aabb_occluded(&self, aabb: &Aabb) -> bool {
        if !self.config.enabled {
            return false;
        }
        let Some(graph) = &self.graph else {
            return false;
        };
        // Sections outside the traced box are never visible
        let bounds = graph.visible();
        let (min, max) = aabb.section_range();
        let min = min.as_ivec3().max(bounds.offset().as_ivec3());
        let max = max.as_ivec3().min(bounds.offset().as_ivec3() + bounds.size() - IVec3::ONE);
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    if !graph.is_occluded(SectionPosition::new(x, y, z)) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
