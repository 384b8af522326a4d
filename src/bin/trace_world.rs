//! Headless visibility tracer over a synthetic world.
//!
//! Usage: cargo run --release --bin trace_world -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>    World config JSON (default: built-in defaults)
//!   --radius <N>       Loaded chunk radius around the origin (default: view distance + 2)
//!   --surface <Y>      Terrain surface height in blocks (default: 64)
//!   --camera <X,Y,Z>   Camera position in blocks (default: 8,72,8)
//!   --yaw <DEG>        Camera yaw in degrees (default: 0)
//!   --pitch <DEG>      Camera pitch in degrees (default: 0)
//!   --open             Ignore the camera frustum, only occlusion prunes
//!   --save-config <PATH>  Write the effective config and exit

use std::time::Instant;

use glam::Vec3;

use terracull::core::{logging, Camera, WorldConfig};
use terracull::math::{OpenFrustum, SectionFrustum};
use terracull::world::{
    BlockSectionData, BlockState, ChunkData, ChunkPosition, InSectionPosition, World, SECTION_SIZE,
};

const STONE: BlockState = BlockState::opaque(1);

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };

    if let Some(path) = parse_str_arg(&args, "--save-config") {
        if let Err(e) = config.save(&path) {
            log::error!("Failed to save {}: {}", path, e);
            std::process::exit(1);
        }
        log::info!("Wrote config to {}", path);
        return;
    }

    let radius = parse_i32_arg(&args, "--radius").unwrap_or(config.occlusion.trace_distance() + 2);
    let surface = parse_i32_arg(&args, "--surface").unwrap_or(64);
    let camera_position = parse_vec3_arg(&args, "--camera").unwrap_or(Vec3::new(8.0, 72.0, 8.0));
    let yaw = parse_f32_arg(&args, "--yaw").unwrap_or(0.0);
    let pitch = parse_f32_arg(&args, "--pitch").unwrap_or(0.0);
    let open = args.iter().any(|a| a == "--open");

    let mut world = match World::from_config(&config) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Dimension {}..{}, {} chunk radius, surface at y={}",
        world.dimension().min_y,
        world.dimension().max_y(),
        radius,
        surface
    );

    let start = Instant::now();
    for x in -radius..=radius {
        for z in -radius..=radius {
            let data = terrain(&world, surface);
            if let Err(e) = world.chunks.update(ChunkPosition::new(x, z), data, true) {
                log::error!("Failed to load chunk ({}, {}): {}", x, z, e);
                std::process::exit(1);
            }
        }
    }
    log::info!(
        "Loaded {} chunks ({} x {}) in {:.1}ms",
        world.chunks.len(),
        world.chunks.size().size().x,
        world.chunks.size().size().y,
        start.elapsed().as_secs_f64() * 1000.0
    );

    let mut camera = Camera::default();
    camera.set_position(camera_position);
    camera.set_rotation_euler(yaw.to_radians(), pitch.to_radians());

    let camera_frustum = camera.frustum();
    let open_frustum = OpenFrustum::default();
    let frustum: &dyn SectionFrustum = if open { &open_frustum } else { &camera_frustum };

    let events = world.occlusion.subscribe();

    let start = Instant::now();
    world.draw(camera.section_position(), frustum);
    let elapsed = start.elapsed();

    let Some(graph) = world.occlusion.graph() else {
        log::warn!("No graph built (camera chunk not loaded or occlusion disabled)");
        return;
    };

    let box_size = graph.visible().size();
    let total = box_size.x * box_size.y * box_size.z;
    log::info!(
        "Traced from {} in {:.2}ms: {} of {} sections visible ({:.1}%)",
        graph.origin(),
        elapsed.as_secs_f64() * 1000.0,
        graph.visible_count(),
        total,
        graph.visible_count() as f64 * 100.0 / total.max(1) as f64
    );
    for event in events.drain() {
        log::debug!("{:?}", event);
    }
}

/// Solid stone up to `surface`, air above
fn terrain(world: &World, surface: i32) -> ChunkData {
    let dimension = world.dimension();
    let mut data = ChunkData::new();
    for height in dimension.min_section()..=dimension.max_section() {
        let bottom = height * SECTION_SIZE;
        if bottom >= surface {
            break;
        }
        let top = (surface - bottom).min(SECTION_SIZE) - 1;
        let blocks = if top == SECTION_SIZE - 1 {
            BlockSectionData::filled(STONE)
        } else {
            let mut blocks = BlockSectionData::new();
            blocks.fill(InSectionPosition::new(0, 0, 0), InSectionPosition::new(15, top as u8, 15), Some(STONE));
            blocks
        };
        data = data.with_section(height, blocks);
    }
    data
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_vec3_arg(args: &[String], flag: &str) -> Option<Vec3> {
    let value = parse_str_arg(args, flag)?;
    let parts: Vec<f32> = value.split(',').filter_map(|s| s.trim().parse().ok()).collect();
    match parts.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}
