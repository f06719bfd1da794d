//! Kinematic body tests: gravity, landing, jumping, walls, ceilings and input.

use blockyard_engine::body::{BodyConfig, KinematicBody};
use blockyard_engine::world::VoxelWorld;
use blockyard_engine::world::block::{Block, TextureId};
use blockyard_engine::world::position::BlockPos;
use glam::Vec3;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 20 Hz: large enough that a resting body re-contacts the floor every tick.
/// At 60 Hz it does not; see `rest_alternates_at_sixty_hertz`.
const DT: f32 = 0.05;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn world_with(cells: impl IntoIterator<Item = (i32, i32, i32)>) -> VoxelWorld {
    let mut world = VoxelWorld::new();
    for (x, y, z) in cells {
        world
            .add_block(Block::new(BlockPos::new(x, y, z), TextureId(0)))
            .unwrap();
    }
    world
}

/// Floor slab at y = 0 covering x, z in -4..=4.
fn floor() -> impl Iterator<Item = (i32, i32, i32)> {
    (-4..=4).flat_map(|x| (-4..=4).map(move |z| (x, 0, z)))
}

fn run(body: &mut KinematicBody, world: &VoxelWorld, ticks: usize) {
    for _ in 0..ticks {
        body.update(DT, world);
    }
}

fn rest_height() -> f32 {
    1.0 + BodyConfig::default().epsilon
}

// ---------------------------------------------------------------------------
// Gravity and landing
// ---------------------------------------------------------------------------

#[test]
fn settles_on_single_floor_block() {
    let world = world_with([(0, 0, 0)]);
    let mut body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0));

    run(&mut body, &world, 40);

    assert!(approx(body.position().y, rest_height()), "y = {}", body.position().y);
    assert_eq!(body.velocity().y, 0.0);
    assert!(body.is_grounded());
}

/// At 1/60 s one tick of gravity moves the body less than the contact
/// epsilon, so it only touches the floor every other tick: resting
/// alternates between grounded at 1 + epsilon and a short airborne dip.
#[test]
fn rest_alternates_at_sixty_hertz() {
    let dt = 1.0 / 60.0;
    let world = world_with([(0, 0, 0)]);
    let mut body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0));
    let dip = rest_height() + BodyConfig::default().gravity * dt * dt;

    for tick in 1..=30 {
        body.update(dt, &world);
        let y = body.position().y;
        if tick % 2 == 1 {
            assert!(body.is_grounded(), "tick {tick}");
            assert!(approx(y, rest_height()), "tick {tick}: y = {y}");
            assert_eq!(body.velocity().y, 0.0);
        } else {
            assert!(!body.is_grounded(), "tick {tick}");
            assert!(approx(y, dip), "tick {tick}: y = {y}");
            assert!(approx(body.velocity().y, -20.0 * dt));
        }
    }
}

#[test]
fn falls_freely_without_floor() {
    let world = VoxelWorld::new();
    let mut body = KinematicBody::new(Vec3::new(0.5, 10.0, 0.5));

    body.update(DT, &world);
    assert!(!body.is_grounded());
    assert!(approx(body.velocity().y, -20.0 * DT));
    assert!(body.position().y < 10.0);
}

#[test]
fn fall_speed_is_clamped_to_terminal_velocity() {
    let world = VoxelWorld::new();
    let mut body = KinematicBody::new(Vec3::new(0.5, 1000.0, 0.5));

    run(&mut body, &world, 200);
    assert_eq!(body.velocity().y, BodyConfig::default().terminal_velocity);
}

#[test]
fn lands_after_a_drop() {
    let world = world_with(floor());
    let mut body = KinematicBody::new(Vec3::new(0.5, 4.0, 0.5));

    run(&mut body, &world, 60);
    assert!(approx(body.position().y, rest_height()));
    assert!(body.is_grounded());
}

// ---------------------------------------------------------------------------
// Jumping
// ---------------------------------------------------------------------------

#[test]
fn jump_requires_ground() {
    let world = VoxelWorld::new();
    let mut body = KinematicBody::new(Vec3::new(0.5, 5.0, 0.5));
    body.jump();
    assert_eq!(body.velocity().y, 0.0);

    body.update(DT, &world);
    let vy = body.velocity().y;
    body.jump();
    assert_eq!(body.velocity().y, vy);
}

#[test]
fn jump_and_fall_back_to_rest() {
    let world = world_with([(0, 0, 0)]);
    let mut body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0));
    run(&mut body, &world, 10);
    assert!(body.is_grounded());

    body.jump();
    assert!(!body.is_grounded());
    assert_eq!(body.velocity().y, BodyConfig::default().jump_speed);

    let mut peak = body.position().y;
    for _ in 0..60 {
        body.update(DT, &world);
        peak = peak.max(body.position().y);
    }

    assert!(peak > rest_height() + 1.0, "peak {peak}");
    assert!(approx(body.position().y, rest_height()));
    assert!(body.is_grounded());
}

#[test]
fn ceiling_stops_ascent_without_grounding() {
    let world = world_with([(0, 0, 0), (0, 3, 0)]);
    let mut body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0));
    run(&mut body, &world, 10);
    body.jump();

    let cfg = BodyConfig::default();
    let ceiling_limit = 3.0 - cfg.height - cfg.epsilon;
    let mut peak = body.position().y;
    let mut bonked = false;
    for _ in 0..10 {
        body.update(DT, &world);
        peak = peak.max(body.position().y);
        if approx(body.position().y, ceiling_limit) {
            bonked = true;
            assert_eq!(body.velocity().y, 0.0);
            assert!(!body.is_grounded());
        }
    }

    assert!(bonked);
    assert!(peak <= ceiling_limit + 1e-4, "peak {peak}");
}

// ---------------------------------------------------------------------------
// Horizontal movement
// ---------------------------------------------------------------------------

#[test]
fn wall_blocks_horizontal_movement() {
    let world = world_with(floor().chain([(2, 1, 0)]));
    let mut body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0));
    run(&mut body, &world, 5);

    for _ in 0..40 {
        body.walk(1.0, 0.0, 0.0, DT);
        body.update(DT, &world);
    }

    let cfg = BodyConfig::default();
    assert!(approx(body.position().x, 2.0 - cfg.half_width - cfg.epsilon));
    assert_eq!(body.velocity().x, 0.0);
    assert!(body.is_grounded());
}

#[test]
fn walk_sets_velocity_from_yaw() {
    let mut body = KinematicBody::new(Vec3::ZERO);
    let speed = BodyConfig::default().move_speed;

    body.walk(1.0, 0.0, 0.0, DT);
    assert!(approx(body.velocity().x, speed));
    assert!(approx(body.velocity().z, 0.0));

    body.walk(1.0, 0.0, 90.0, DT);
    assert!(approx(body.velocity().x, 0.0));
    assert!(approx(body.velocity().z, speed));

    // Strafing right while facing +X moves toward +Z.
    body.walk(0.0, 1.0, 0.0, DT);
    assert!(approx(body.velocity().z, speed));
}

#[test]
fn diagonal_input_is_normalized() {
    let mut body = KinematicBody::new(Vec3::ZERO);
    body.walk(1.0, 1.0, 0.0, DT);
    let horizontal = Vec3::new(body.velocity().x, 0.0, body.velocity().z).length();
    assert!(approx(horizontal, BodyConfig::default().move_speed));
}

#[test]
fn no_input_stops_horizontal_motion() {
    let mut body = KinematicBody::new(Vec3::ZERO);
    body.walk(1.0, 0.0, 0.0, DT);
    body.walk(0.0, 0.0, 0.0, DT);
    assert_eq!(body.velocity().x, 0.0);
    assert_eq!(body.velocity().z, 0.0);
}

#[test]
fn ground_damping_is_per_tick() {
    let world = world_with(floor());
    let mut body = KinematicBody::new(Vec3::new(0.5, 1.0, 0.5));
    run(&mut body, &world, 5);

    body.walk(1.0, 0.0, 0.0, DT);
    body.update(DT, &world);
    let cfg = BodyConfig::default();
    assert!(approx(body.velocity().x, cfg.move_speed * cfg.ground_damping));

    body.update(DT, &world);
    assert!(approx(
        body.velocity().x,
        cfg.move_speed * cfg.ground_damping * cfg.ground_damping
    ));
}

// ---------------------------------------------------------------------------
// Reset and geometry
// ---------------------------------------------------------------------------

#[test]
fn reset_teleports_and_clears_state() {
    let world = world_with([(0, 0, 0)]);
    let mut body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0));
    run(&mut body, &world, 10);
    body.walk(1.0, 0.0, 0.0, DT);

    body.reset(Vec3::new(7.0, 20.0, -3.0));
    assert_eq!(body.position(), Vec3::new(7.0, 20.0, -3.0));
    assert_eq!(body.velocity(), Vec3::ZERO);
    assert!(!body.is_grounded());
}

#[test]
fn eye_sits_above_feet() {
    let body = KinematicBody::new(Vec3::new(1.0, 2.0, 3.0));
    let eye = body.eye_position();
    assert_eq!(eye.x, 1.0);
    assert!(approx(eye.y, 2.0 + BodyConfig::default().eye_height));
    assert_eq!(eye.z, 3.0);
}

#[test]
fn intersects_overlapping_cells_only() {
    let body = KinematicBody::new(Vec3::new(0.5, 1.0, 0.5));
    assert!(body.intersects_cell(BlockPos::new(0, 1, 0)));
    assert!(!body.intersects_cell(BlockPos::new(0, 0, 0)), "floor only touches");
    assert!(!body.intersects_cell(BlockPos::new(1, 1, 0)));
    assert!(!body.intersects_cell(BlockPos::new(0, 2, 0)));
}
