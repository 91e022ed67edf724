//! Primary-camera lookup cache
//!
//! Every render pass asks "which camera drives this frame" — historically
//! several times per frame. Scanning the world on each read is wasteful, so
//! the answer is cached behind a dirty flag: reads refresh at most once
//! between invalidations, and the scene invalidates on the structural
//! changes that can move the answer.
//!
//! Invalidation is deliberately coarse: any camera add or remove anywhere
//! dirties the cache, whether or not it touched the cached entity.

use glam::Mat4;

use crate::ecs::{Camera, Context, EntityId, Transform};

/// Read-through cache of the entity whose camera is flagged primary.
///
/// | Operation        | Cost                          |
/// |------------------|-------------------------------|
/// | Read (clean)     | O(1) - returns cached         |
/// | Read (dirty)     | O(n) - one scan, then cached  |
/// | Invalidate       | O(1) - marks dirty            |
#[derive(Debug)]
pub struct PrimaryCameraCache {
    /// Entity currently cached as primary
    entity: Option<EntityId>,
    /// Its camera data at refresh time
    camera: Option<Camera>,
    /// Its world transform at refresh time; identity when absent
    transform: Mat4,
    /// Whether the cached fields are stale
    dirty: bool,
    /// Full scans performed so far
    refreshes: u64,
}

impl PrimaryCameraCache {
    /// Create a cache that refreshes on first read.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entity: None,
            camera: None,
            transform: Mat4::IDENTITY,
            dirty: true,
            refreshes: 0,
        }
    }

    /// Entity currently cached as primary, if any.
    #[must_use]
    #[inline]
    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    /// Check if the next read will re-scan.
    #[must_use]
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of full scans performed so far.
    #[must_use]
    #[inline]
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Drop cached state and force a scan on the next read.
    pub fn invalidate(&mut self) {
        self.entity = None;
        self.camera = None;
        self.transform = Mat4::IDENTITY;
        self.dirty = true;
    }

    /// Cached camera data and world transform, refreshing if dirty.
    ///
    /// Returns `(None, Mat4::IDENTITY)` when no camera is flagged primary —
    /// a valid, frequent state (a scene mid-load, for instance), never an
    /// error.
    pub fn resolve(&mut self, ctx: &Context) -> (Option<Camera>, Mat4) {
        if self.dirty {
            self.refresh(ctx);
            self.dirty = false;
        }
        (self.camera.clone(), self.transform)
    }

    /// One O(n) scan for the primary-flagged camera.
    ///
    /// When several entities are flagged, the lowest entity id wins — ids
    /// are monotone, so this is the oldest surviving primary camera, and the
    /// choice is stable across runs regardless of iteration order.
    fn refresh(&mut self, ctx: &Context) {
        self.refreshes += 1;
        self.entity = None;
        self.camera = None;
        self.transform = Mat4::IDENTITY;

        let mut primary: Option<(EntityId, &Camera)> = None;
        for (id, camera) in ctx.view::<Camera>() {
            if camera.primary && primary.is_none_or(|(best, _)| id < best) {
                primary = Some((id, camera));
            }
        }

        if let Some((id, camera)) = primary {
            self.entity = Some(id);
            self.camera = Some(camera.clone());
            self.transform = ctx
                .entity(id)
                .and_then(|entity| entity.try_component::<Transform>())
                .map(Transform::matrix)
                .unwrap_or(Mat4::IDENTITY);
            log::trace!("primary camera cache refreshed: entity {id}");
        } else {
            log::trace!("primary camera cache refreshed: no primary camera");
        }
    }
}

impl Default for PrimaryCameraCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Entity, EventSink};
    use glam::Vec3;

    fn spawn_camera(ctx: &mut Context, sink: &EventSink, primary: bool) -> EntityId {
        let mut entity = Entity::new("camera", sink.clone());
        entity.add_component(Camera::perspective(1.0, 0.1, 100.0).with_primary(primary));
        let id = entity.id();
        ctx.register(entity);
        id
    }

    #[test]
    fn test_no_primary_camera_yields_identity() {
        let mut ctx = Context::new();
        let sink = EventSink::new();
        spawn_camera(&mut ctx, &sink, false);

        let mut cache = PrimaryCameraCache::new();
        let (camera, transform) = cache.resolve(&ctx);
        assert!(camera.is_none());
        assert_eq!(transform, Mat4::IDENTITY);
        assert!(cache.entity().is_none());
    }

    #[test]
    fn test_resolve_finds_primary_and_its_transform() {
        let mut ctx = Context::new();
        let sink = EventSink::new();
        let id = spawn_camera(&mut ctx, &sink, true);
        ctx.entity_mut(id)
            .unwrap()
            .add_component(Transform::from_position(Vec3::new(0.0, 5.0, 10.0)));

        let mut cache = PrimaryCameraCache::new();
        let (camera, transform) = cache.resolve(&ctx);
        assert!(camera.is_some_and(|c| c.primary));
        assert_eq!(transform.w_axis.truncate(), Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(cache.entity(), Some(id));
    }

    #[test]
    fn test_second_read_hits_the_cache() {
        let mut ctx = Context::new();
        let sink = EventSink::new();
        spawn_camera(&mut ctx, &sink, true);

        let mut cache = PrimaryCameraCache::new();
        let first = cache.resolve(&ctx);
        let second = cache.resolve(&ctx);

        assert_eq!(cache.refreshes(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_lowest_id_wins_among_multiple_primaries() {
        let mut ctx = Context::new();
        let sink = EventSink::new();
        let first = spawn_camera(&mut ctx, &sink, true);
        let _second = spawn_camera(&mut ctx, &sink, true);

        let mut cache = PrimaryCameraCache::new();
        cache.resolve(&ctx);
        assert_eq!(cache.entity(), Some(first));
    }

    #[test]
    fn test_invalidate_forces_a_rescan() {
        let mut ctx = Context::new();
        let sink = EventSink::new();
        spawn_camera(&mut ctx, &sink, true);

        let mut cache = PrimaryCameraCache::new();
        cache.resolve(&ctx);
        assert!(!cache.is_dirty());

        cache.invalidate();
        assert!(cache.is_dirty());
        assert!(cache.entity().is_none());

        cache.resolve(&ctx);
        assert_eq!(cache.refreshes(), 2);
    }
}
