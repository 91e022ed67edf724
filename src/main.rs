//! Headless demo: a scene with a primary camera, a few drifting sprites,
//! and physics-backed crates, run for a handful of frames against logging
//! backends.

use meridian::prelude::*;
use rustc_hash::FxHashMap;

/// Moves every sprite along +X
struct DriftSystem;

impl System for DriftSystem {
    fn name(&self) -> &str {
        "drift"
    }

    fn update(&mut self, ctx: &mut Context, dt: f32) -> Result<(), EcsError> {
        let group = ctx.get_group(&[
            ComponentKind::of::<Transform>(),
            ComponentKind::of::<Sprite>(),
        ]);
        for id in group {
            if let Some(entity) = ctx.entity_mut(id) {
                entity.component_mut::<Transform>()?.translate(Vec3::X * dt);
            }
        }
        Ok(())
    }
}

/// Spins every sprite around Y
struct SpinSystem {
    speed: f32,
}

impl System for SpinSystem {
    fn name(&self) -> &str {
        "spin"
    }

    fn update(&mut self, ctx: &mut Context, dt: f32) -> Result<(), EcsError> {
        let group = ctx.get_group(&[
            ComponentKind::of::<Transform>(),
            ComponentKind::of::<Sprite>(),
        ]);
        for id in group {
            if let Some(entity) = ctx.entity_mut(id) {
                entity
                    .component_mut::<Transform>()?
                    .rotate_euler(Vec3::new(0.0, self.speed * dt, 0.0));
            }
        }
        Ok(())
    }
}

/// Render backend that narrates submissions to the log
#[derive(Default)]
struct ConsoleRenderer {
    submitted: usize,
}

impl RenderBackend for ConsoleRenderer {
    fn begin_scene(&mut self, camera: &Camera, transform: Mat4) {
        self.submitted = 0;
        log::info!(
            "begin scene: {:?} camera at {:?}",
            camera.projection,
            transform.w_axis.truncate()
        );
    }

    fn submit_sprite(&mut self, transform: Mat4, sprite: &Sprite) {
        self.submitted += 1;
        log::debug!(
            "  sprite at {:?} tint {:?}",
            transform.w_axis.truncate(),
            sprite.color
        );
    }

    fn end_scene(&mut self) {
        log::info!("end scene: {} sprites", self.submitted);
    }
}

/// Gravity-only physics stub
#[derive(Default)]
struct FallingPhysics {
    next: u64,
    bodies: FxHashMap<u64, (Vec3, Quat, BodyType)>,
}

impl PhysicsBackend for FallingPhysics {
    fn create_body(&mut self, transform: &Transform, body: &RigidBody) -> BodyHandle {
        self.next += 1;
        self.bodies.insert(
            self.next,
            (transform.position, transform.rotation, body.body_type),
        );
        BodyHandle(self.next)
    }

    fn destroy_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle.0);
    }

    fn step(&mut self, dt: f32) {
        for (position, _, body_type) in self.bodies.values_mut() {
            if *body_type == BodyType::Dynamic {
                position.y -= 9.81 * dt;
            }
        }
    }

    fn body_transform(&self, handle: BodyHandle) -> Option<(Vec3, Quat)> {
        self.bodies
            .get(&handle.0)
            .map(|(position, rotation, _)| (*position, *rotation))
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new("demo");

    let camera = scene.create_entity("main camera");
    if let Some(entity) = scene.context_mut().entity_mut(camera) {
        entity.add_component(Transform::from_position(Vec3::new(0.0, 2.0, 8.0)));
        entity.add_component(
            Camera::perspective(std::f32::consts::FRAC_PI_4, 0.1, 1000.0).with_primary(true),
        );
    }

    for i in 0..3 {
        let id = scene.create_entity(format!("crate {i}"));
        if let Some(entity) = scene.context_mut().entity_mut(id) {
            entity.add_component(Transform::from_position(Vec3::new(
                i as f32 * 2.0 - 2.0,
                5.0,
                0.0,
            )));
            entity.add_component(Sprite::new(Vec4::new(0.8, 0.4, 0.2, 1.0)));
            entity.add_component(RigidBody::new(BodyType::Dynamic));
        }
    }

    scene.register_system(0, DriftSystem);
    scene.register_system(10, SpinSystem { speed: 1.5 });

    let mut physics = FallingPhysics::default();
    scene.start_runtime(&mut physics);

    let mut renderer = ConsoleRenderer::default();
    let mut time = Time::new();

    for _ in 0..5 {
        time.update();
        // headless run: frames take almost no wall time, so step at 60 Hz
        let dt = time.delta_seconds().max(1.0 / 60.0);

        physics.step(dt);
        scene.sync_physics(&physics);

        if let Err(e) = scene.on_update(dt) {
            log::error!("frame aborted: {e}");
            break;
        }
        scene.render(&mut renderer);
    }

    scene.stop_runtime(&mut physics);
    log::info!(
        "ran {} frames with {} camera cache refreshes",
        time.frame(),
        scene.camera_cache().refreshes()
    );
}
