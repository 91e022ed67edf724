//! Scene lifecycle
//!
//! A scene owns the authoritative entity set (through its [`Context`]), the
//! system scheduler, the structural event queue, and the primary-camera
//! cache built on top of the context. All mutation of the live set flows
//! through the scene; collaborating backends are driven through the narrow
//! contracts in [`crate::renderer`] and [`crate::physics`].

mod camera;

pub use camera::PrimaryCameraCache;

use glam::Mat4;

use crate::ecs::{
    Camera, ComponentKind, Context, EcsError, Entity, EntityId, EventSink, RigidBody, Scheduler,
    Sprite, StructuralEvent, System, Transform,
};
use crate::physics::PhysicsBackend;
use crate::renderer::RenderBackend;

/// Owns entity lifecycle, per-frame dispatch, and derived camera state.
pub struct Scene {
    name: String,
    context: Context,
    scheduler: Scheduler,
    events: EventSink,
    camera_cache: PrimaryCameraCache,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        log::info!("creating scene '{name}'");
        Self {
            name,
            context: Context::new(),
            scheduler: Scheduler::new(),
            events: EventSink::new(),
            camera_cache: PrimaryCameraCache::new(),
        }
    }

    /// Scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The live entity registry.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The live entity registry, for component mutation.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    // -------------------------------------------------------------------------
    // Entity lifecycle
    // -------------------------------------------------------------------------

    /// Create a named entity and register it with the live set.
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let entity = Entity::new(name, self.events.clone());
        let id = entity.id();
        log::debug!("scene '{}': create entity {id} '{}'", self.name, entity.name());
        self.context.register(entity);
        id
    }

    /// Destroy an entity, removing it from all future query results.
    ///
    /// Returns `false` when the id is not registered. Held ids stop
    /// resolving after this call; they are never recycled.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        match self.context.unregister(id) {
            Some(entity) => {
                log::debug!("scene '{}': destroy entity {id} '{}'", self.name, entity.name());
                self.events.push(StructuralEvent::EntityDestroyed { entity: id });
                true
            }
            None => false,
        }
    }

    /// Deep-copy an entity under a fresh id, keeping its name.
    ///
    /// Component values are independent copies; runtime-only state (a live
    /// physics handle) resets on the copy.
    pub fn duplicate_entity(&mut self, id: EntityId) -> Result<EntityId, EcsError> {
        let source = self.context.entity(id).ok_or(EcsError::UnknownEntity(id))?;
        let copy = source.duplicate(source.name().to_string());
        let copy_id = copy.id();
        log::debug!("scene '{}': duplicate entity {id} -> {copy_id}", self.name);
        self.context.register(copy);
        Ok(copy_id)
    }

    /// First entity whose display name matches, scanning in registration
    /// order. Names are not unique; the scan is O(n).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.context
            .iter()
            .find(|entity| entity.name() == name)
            .map(Entity::id)
    }

    /// Remove every entity and reset derived state. Used on scene load.
    pub fn clear(&mut self) {
        log::info!("scene '{}': clearing {} entities", self.name, self.context.len());
        self.context.clear();
        self.events.clear();
        self.camera_cache.invalidate();
    }

    // -------------------------------------------------------------------------
    // Frame dispatch
    // -------------------------------------------------------------------------

    /// Register a per-frame system (lower priority runs earlier; ties keep
    /// registration order).
    pub fn register_system<S: System + 'static>(&mut self, priority: i32, system: S) {
        self.scheduler.register(priority, system);
    }

    /// Advance one frame: apply pending structural events to derived state,
    /// then dispatch every system in priority order.
    ///
    /// A system error aborts the rest of the frame and propagates; the
    /// embedding loop decides whether that is fatal.
    pub fn on_update(&mut self, dt: f32) -> Result<(), EcsError> {
        self.pump_events();
        self.scheduler.update(&mut self.context, dt)
    }

    // -------------------------------------------------------------------------
    // Primary camera
    // -------------------------------------------------------------------------

    /// Camera data and world transform of the primary camera.
    ///
    /// Read-through: between structural changes every call is a cache hit,
    /// no matter how many render passes ask per frame. Returns
    /// `(None, Mat4::IDENTITY)` when no camera is flagged primary — a valid
    /// state, not an error.
    pub fn primary_camera(&mut self) -> (Option<Camera>, Mat4) {
        self.pump_events();
        self.camera_cache.resolve(&self.context)
    }

    /// Cache diagnostics (cached entity, scan count).
    #[must_use]
    pub fn camera_cache(&self) -> &PrimaryCameraCache {
        &self.camera_cache
    }

    /// Apply queued structural events to derived state.
    ///
    /// Coarse policy: any camera add or remove anywhere dirties the cache,
    /// as does destruction of the entity it currently points at.
    fn pump_events(&mut self) {
        let camera_kind = ComponentKind::of::<Camera>();
        for event in self.events.drain() {
            match event {
                StructuralEvent::ComponentAdded { kind, .. }
                | StructuralEvent::ComponentRemoved { kind, .. } => {
                    if kind == camera_kind {
                        self.camera_cache.invalidate();
                    }
                }
                StructuralEvent::EntityDestroyed { entity } => {
                    if self.camera_cache.entity() == Some(entity) {
                        self.camera_cache.invalidate();
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Render pass
    // -------------------------------------------------------------------------

    /// Submit the sprite entities through the rendering contract, driven by
    /// the primary camera. Does nothing when no primary camera exists.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) {
        let (camera, camera_transform) = self.primary_camera();
        let Some(camera) = camera else {
            return;
        };

        backend.begin_scene(&camera, camera_transform);
        let group = self.context.get_group(&[
            ComponentKind::of::<Transform>(),
            ComponentKind::of::<Sprite>(),
        ]);
        for id in group {
            let Some(entity) = self.context.entity(id) else {
                continue;
            };
            if let (Some(transform), Some(sprite)) = (
                entity.try_component::<Transform>(),
                entity.try_component::<Sprite>(),
            ) {
                backend.submit_sprite(transform.matrix(), sprite);
            }
        }
        backend.end_scene();
    }

    // -------------------------------------------------------------------------
    // Physics runtime
    // -------------------------------------------------------------------------

    /// Hand every rigid-body entity to the physics backend, storing the
    /// opaque handles it returns.
    pub fn start_runtime(&mut self, physics: &mut dyn PhysicsBackend) {
        log::info!("scene '{}': runtime start", self.name);
        let ids = self.context.get_group(&[ComponentKind::of::<RigidBody>()]);
        for id in ids {
            let Some(entity) = self.context.entity(id) else {
                continue;
            };
            let transform = entity.try_component::<Transform>().cloned().unwrap_or_default();
            let Some(body) = entity.try_component::<RigidBody>().cloned() else {
                continue;
            };
            let handle = physics.create_body(&transform, &body);
            if let Some(entity) = self.context.entity_mut(id) {
                if let Some(body) = entity.try_component_mut::<RigidBody>() {
                    body.runtime_body = Some(handle);
                }
            }
        }
    }

    /// Release every stored body handle. Components keep their
    /// configuration; only runtime state clears.
    pub fn stop_runtime(&mut self, physics: &mut dyn PhysicsBackend) {
        log::info!("scene '{}': runtime stop", self.name);
        for (_, body) in self.context.view_mut::<RigidBody>() {
            if let Some(handle) = body.runtime_body.take() {
                physics.destroy_body(handle);
            }
        }
    }

    /// Copy simulated poses back into `Transform` components.
    pub fn sync_physics(&mut self, physics: &dyn PhysicsBackend) {
        let bodies: Vec<(EntityId, crate::physics::BodyHandle)> = self
            .context
            .view::<RigidBody>()
            .into_iter()
            .filter_map(|(id, body)| body.runtime_body.map(|handle| (id, handle)))
            .collect();
        for (id, handle) in bodies {
            let Some((position, rotation)) = physics.body_transform(handle) else {
                continue;
            };
            if let Some(entity) = self.context.entity_mut(id) {
                if let Some(transform) = entity.try_component_mut::<Transform>() {
                    transform.position = position;
                    transform.rotation = rotation;
                }
            }
        }
    }
}
