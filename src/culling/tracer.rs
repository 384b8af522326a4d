//! Directional flood fill from the camera section.
//!
//! The walk starts at the origin section and expands through the chunk
//! neighbour graph. Every step adds the step direction to an accumulated
//! vector, and a branch never expands against that vector. This keeps each
//! branch inside an octant-like cone, so the walk terminates without a full
//! visited search. It is a heuristic: a section reachable only by doubling
//! back is reported occluded even if it is geometrically visible.

use std::time::Instant;

use glam::IVec3;

use crate::core::config::MAX_VIEW_DISTANCE;
use crate::culling::graph::OcclusionGraph;
use crate::culling::position_set::SectionPositionSet;
use crate::math::frustum::SectionFrustum;
use crate::world::chunk::Chunk;
use crate::world::direction::Direction;
use crate::world::manager::ChunkManager;
use crate::world::position::{SectionHeight, SectionPosition};

pub struct OcclusionTracer<'a> {
    chunks: &'a ChunkManager,
    frustum: &'a dyn SectionFrustum,
    origin: SectionPosition,
    view_distance: i32,
    min_section: SectionHeight,
    max_section: SectionHeight,
    /// Sections outside the frustum, never expanded
    skip: SectionPositionSet,
    visible: SectionPositionSet,
}

impl<'a> OcclusionTracer<'a> {
    /// Tracer over the columns within `view_distance` of `origin`.
    ///
    /// `view_distance` is clamped to `0..=MAX_VIEW_DISTANCE`. Heights one
    /// section beyond the dimension on either end are included, and an
    /// origin above or below the world is clamped into that range.
    pub fn new(
        chunks: &'a ChunkManager,
        origin: SectionPosition,
        frustum: &'a dyn SectionFrustum,
        view_distance: i32,
    ) -> Self {
        let view_distance = view_distance.clamp(0, MAX_VIEW_DISTANCE);
        let dimension = chunks.dimension();
        let min_section = dimension.min_section() - 1;
        let max_section = dimension.max_section() + 1;
        let origin = SectionPosition::new(origin.x, origin.y.clamp(min_section, max_section), origin.z);
        let sections = max_section - min_section + 1;
        let center = origin.chunk_position();

        Self {
            chunks,
            frustum,
            origin,
            view_distance,
            min_section,
            max_section,
            skip: SectionPositionSet::new(center, view_distance, min_section, sections),
            visible: SectionPositionSet::new(center, view_distance, min_section, sections),
        }
    }

    /// Origin after clamping
    pub fn origin(&self) -> SectionPosition {
        self.origin
    }

    pub fn trace(mut self) -> OcclusionGraph {
        let start = Instant::now();
        self.visible.insert(self.origin);

        let chunks = self.chunks;
        match chunks.get(self.origin.chunk_position()) {
            Some(chunk) => self.expand(chunk, self.origin.y, None, IVec3::ZERO),
            None => log::trace!("Origin chunk {} is not loaded", self.origin.chunk_position()),
        }

        log::trace!(
            "Traced {} visible sections from {} in {:?}",
            self.visible.len(),
            self.origin,
            start.elapsed()
        );
        OcclusionGraph::new(self.origin, self.visible)
    }

    fn visit(&mut self, chunk: &'a Chunk, height: SectionHeight, direction: Direction, vector: IVec3) {
        if !chunk.position.is_in_view_distance(self.view_distance, self.origin.chunk_position()) {
            return;
        }
        if height < self.min_section || height > self.max_section {
            return;
        }
        let position = SectionPosition::of(chunk.position, height);
        if self.visible.contains(position) || self.skip.contains(position) {
            return;
        }
        if !self.frustum.contains_section(position) {
            self.skip.insert(position);
            return;
        }
        self.visible.insert(position);
        self.expand(chunk, height, Some(direction), vector);
    }

    /// Continue into every neighbour that does not point against `vector`
    /// and is not hidden behind this section's occlusion
    fn expand(&mut self, chunk: &'a Chunk, height: SectionHeight, incoming: Option<Direction>, vector: IVec3) {
        let occlusion = chunk.section(height).map(|section| section.occlusion);
        let chunks = self.chunks;

        for destination in Direction::ALL {
            if destination.vector().dot(vector) < 0 {
                continue;
            }
            if let (Some(occlusion), Some(incoming)) = (occlusion, incoming) {
                if occlusion.is_occluded(incoming.inverted(), destination) {
                    continue;
                }
            }

            let next = vector + destination.vector();
            if destination.is_vertical() {
                self.visit(chunk, height + destination.vector().y, destination, next);
            } else if let Some(neighbour) = chunks.neighbour(chunk, destination) {
                self.visit(neighbour, height, destination, next);
            }
        }
    }
}
