use criterion::{criterion_group, criterion_main, Criterion, black_box};

use terracull::culling::OcclusionTracer;
use terracull::math::OpenFrustum;
use terracull::world::{
    BlockSectionData, BlockState, ChunkData, ChunkManager, ChunkPosition, DimensionProperties,
    InSectionPosition, SectionOcclusion, SectionPosition,
};

const STONE: BlockState = BlockState::opaque(1);

/// Stone below y=64 with a hollow tunnel along x through every column
fn create_world(radius: i32) -> ChunkManager {
    let mut chunks = ChunkManager::new(DimensionProperties::default());
    for x in -radius..=radius {
        for z in -radius..=radius {
            let mut data = ChunkData::new();
            for height in -4..4 {
                data = data.with_section(height, BlockSectionData::filled(STONE));
            }
            let mut tunnel = BlockSectionData::filled(STONE);
            tunnel.fill(InSectionPosition::new(0, 4, 6), InSectionPosition::new(15, 8, 9), None);
            data = data.with_section(2, tunnel);
            chunks.update(ChunkPosition::new(x, z), data, true).unwrap();
        }
    }
    chunks
}

fn bench_trace_surface(c: &mut Criterion) {
    let chunks = create_world(12);
    let frustum = OpenFrustum::default();

    c.bench_function("trace_surface_vd10", |b| {
        b.iter(|| {
            OcclusionTracer::new(&chunks, black_box(SectionPosition::new(0, 5, 0)), &frustum, 10).trace()
        });
    });
}

fn bench_trace_tunnel(c: &mut Criterion) {
    let chunks = create_world(12);
    let frustum = OpenFrustum::default();

    c.bench_function("trace_tunnel_vd10", |b| {
        b.iter(|| {
            OcclusionTracer::new(&chunks, black_box(SectionPosition::new(0, 2, 0)), &frustum, 10).trace()
        });
    });
}

fn bench_section_occlusion(c: &mut Criterion) {
    let mut blocks = BlockSectionData::filled(STONE);
    blocks.fill(InSectionPosition::new(0, 4, 6), InSectionPosition::new(15, 8, 9), None);
    blocks.fill(InSectionPosition::new(6, 0, 6), InSectionPosition::new(9, 15, 9), None);

    c.bench_function("section_occlusion_compute", |b| {
        b.iter(|| SectionOcclusion::compute(black_box(&blocks)));
    });
}

fn bench_chunk_update(c: &mut Criterion) {
    c.bench_function("chunk_manager_load_9x9", |b| {
        b.iter(|| create_world(black_box(4)));
    });
}

criterion_group!(
    benches,
    bench_trace_surface,
    bench_trace_tunnel,
    bench_section_occlusion,
    bench_chunk_update,
);
criterion_main!(benches);
