//! Per-frame logic units and their scheduler
//!
//! Systems do not own entities; they query the context each update. The
//! scheduler dispatches them in ascending priority order, with registration
//! order breaking ties, so a fixed registration set produces the same
//! dispatch order on every frame of every run.

use super::context::Context;
use super::error::EcsError;

/// A named, priority-ordered unit of per-frame logic.
pub trait System {
    /// Name used in logs and error reports.
    fn name(&self) -> &str;

    /// Run one frame of logic. `dt` is the elapsed time in seconds since
    /// the previous frame. An error aborts the rest of the frame dispatch
    /// and propagates to the embedding loop.
    fn update(&mut self, ctx: &mut Context, dt: f32) -> Result<(), EcsError>;
}

/// A registered system with its dispatch key.
struct Slot {
    /// Captured once at registration; lower runs earlier.
    priority: i32,
    /// Registration sequence, breaks priority ties.
    order: usize,
    system: Box<dyn System>,
}

/// Invokes registered systems in ascending priority order each frame.
#[derive(Default)]
pub struct Scheduler {
    slots: Vec<Slot>,
    registered: usize,
    frames: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system with a fixed priority (lower runs earlier).
    ///
    /// The priority is copied into the dispatch slot here and never read
    /// from the system again, so later mutation cannot reorder dispatch.
    /// Equal priorities dispatch in registration order.
    pub fn register<S: System + 'static>(&mut self, priority: i32, system: S) {
        log::debug!(
            "register system '{}' at priority {}",
            system.name(),
            priority
        );
        let order = self.registered;
        self.registered += 1;
        self.slots.push(Slot {
            priority,
            order,
            system: Box::new(system),
        });
        self.slots.sort_by_key(|slot| (slot.priority, slot.order));
    }

    /// Dispatch one frame to every system in order.
    ///
    /// Stops at the first failing system and returns its error; the
    /// remaining systems do not run this frame.
    pub fn update(&mut self, ctx: &mut Context, dt: f32) -> Result<(), EcsError> {
        self.frames += 1;
        for slot in &mut self.slots {
            slot.system.update(ctx, dt)?;
        }
        Ok(())
    }

    /// Number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Frames dispatched so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Trace = Rc<RefCell<Vec<&'static str>>>;

    struct Recorder {
        name: &'static str,
        trace: Trace,
    }

    impl System for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn update(&mut self, _ctx: &mut Context, _dt: f32) -> Result<(), EcsError> {
            self.trace.borrow_mut().push(self.name);
            Ok(())
        }
    }

    struct Failing;

    impl System for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn update(&mut self, _ctx: &mut Context, _dt: f32) -> Result<(), EcsError> {
            Err(EcsError::system("failing", "boom"))
        }
    }

    fn recorder(name: &'static str, trace: &Trace) -> Recorder {
        Recorder {
            name,
            trace: trace.clone(),
        }
    }

    #[test]
    fn test_dispatch_in_ascending_priority() {
        let trace: Trace = Rc::default();
        let mut scheduler = Scheduler::new();
        let mut ctx = Context::new();

        scheduler.register(10, recorder("late", &trace));
        scheduler.register(-5, recorder("early", &trace));
        scheduler.register(0, recorder("middle", &trace));

        scheduler.update(&mut ctx, 0.016).unwrap();
        assert_eq!(*trace.borrow(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_ties_dispatch_in_registration_order() {
        let trace: Trace = Rc::default();
        let mut scheduler = Scheduler::new();
        let mut ctx = Context::new();

        scheduler.register(1, recorder("first", &trace));
        scheduler.register(1, recorder("second", &trace));
        scheduler.register(1, recorder("third", &trace));

        scheduler.update(&mut ctx, 0.016).unwrap();
        assert_eq!(*trace.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_dispatch_order_is_stable_across_frames() {
        let trace: Trace = Rc::default();
        let mut scheduler = Scheduler::new();
        let mut ctx = Context::new();

        scheduler.register(2, recorder("b", &trace));
        scheduler.register(1, recorder("a", &trace));

        scheduler.update(&mut ctx, 0.016).unwrap();
        scheduler.update(&mut ctx, 0.016).unwrap();

        assert_eq!(*trace.borrow(), vec!["a", "b", "a", "b"]);
        assert_eq!(scheduler.frames(), 2);
    }

    #[test]
    fn test_error_aborts_the_frame() {
        let trace: Trace = Rc::default();
        let mut scheduler = Scheduler::new();
        let mut ctx = Context::new();

        scheduler.register(0, recorder("before", &trace));
        scheduler.register(1, Failing);
        scheduler.register(2, recorder("after", &trace));

        let err = scheduler.update(&mut ctx, 0.016).unwrap_err();
        assert!(matches!(err, EcsError::System { .. }));
        // the system after the failure never ran
        assert_eq!(*trace.borrow(), vec!["before"]);
    }
}
