//! The scene owns every body in a simulation and advances them in fixed timesteps.

use crate::{
    gizmo::Gizmo,
    math as m,
    physics::{
        collision::{collide, BroadPhase, BruteForce, Contact},
        solver, Body,
    },
};

use thunderdome as td;

/// Handle to a body owned by a [`Scene`][self::Scene].
///
/// Handles stay valid until the body is removed
/// and are never reused for a different body afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorHandle(td::Index);

/// A contact that was detected and resolved during the most recent fixed step.
#[derive(Clone, Copy, Debug)]
pub struct ContactEvent {
    /// The two bodies in contact, in the order they were tested.
    pub actors: [ActorHandle; 2],
    /// The contact as it was before resolution, normal pointing towards `actors[0]`.
    pub contact: Contact,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SceneError {
    #[error("Time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("Accumulated time limit must be at least one time step, got {0}")]
    InvalidAccumulatorLimit(f64),
}

/// Configuration for a [`Scene`][self::Scene].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct SceneParams {
    pub gravity: [f64; 2],
    /// Length of one fixed physics step in seconds.
    pub time_step: f64,
    /// Upper limit for time banked between updates.
    /// Anything above it is thrown away to avoid a spiral of death
    /// where physics can never catch up with real time.
    pub max_accumulated_time: Option<f64>,
}

impl Default for SceneParams {
    fn default() -> Self {
        SceneParams {
            gravity: [0.0, 0.0],
            time_step: 0.01,
            max_accumulated_time: None,
        }
    }
}

impl SceneParams {
    pub fn new() -> Self {
        Self::default()
    }
    #[inline]
    pub fn with_gravity(mut self, gravity: impl Into<[f64; 2]>) -> Self {
        self.gravity = gravity.into();
        self
    }
    #[inline]
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }
    #[inline]
    pub fn with_max_accumulated_time(mut self, max: f64) -> Self {
        self.max_accumulated_time = Some(max);
        self
    }
}

/// A collection of bodies simulated together.
///
/// Every call to [`update`][Self::update] banks the elapsed time and runs as many
/// fixed steps as fit in it. Each step first moves every body and then tests every pair
/// of bodies for contacts, resolving them immediately as they're found.
pub struct Scene {
    bodies: td::Arena<Body>,
    // insertion order, which decides the order of bodies within each tested pair
    order: Vec<td::Index>,
    gravity: m::Vec2,
    time_step: f64,
    max_accumulated_time: Option<f64>,
    accumulator: f64,
    contacts: Vec<ContactEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        let params = SceneParams::default();
        Scene {
            bodies: td::Arena::new(),
            order: Vec::new(),
            gravity: m::Vec2::from(params.gravity),
            time_step: params.time_step,
            max_accumulated_time: params.max_accumulated_time,
            accumulator: 0.0,
            contacts: Vec::new(),
        }
    }
}

impl Scene {
    pub fn new(params: SceneParams) -> Result<Self, SceneError> {
        let mut scene = Scene::default();
        scene.set_gravity(m::Vec2::from(params.gravity));
        scene.set_time_step(params.time_step)?;
        if let Some(max) = params.max_accumulated_time {
            scene.set_max_accumulated_time(Some(max))?;
        }
        Ok(scene)
    }

    //
    // actors
    //

    /// Add a body to the scene. The scene takes ownership of it.
    pub fn add_actor(&mut self, body: impl Into<Body>) -> ActorHandle {
        let body = body.into();
        let kind = body.kind();
        let idx = self.bodies.insert(body);
        self.order.push(idx);
        log::debug!("Added {:?} actor, {} in scene", kind, self.order.len());
        ActorHandle(idx)
    }

    /// Remove a body from the scene, giving it back if it still existed.
    ///
    /// The remaining bodies keep their relative order.
    pub fn remove_actor(&mut self, handle: ActorHandle) -> Option<Body> {
        let body = self.bodies.remove(handle.0)?;
        self.order.retain(|idx| *idx != handle.0);
        log::debug!("Removed {:?} actor, {} in scene", body.kind(), self.order.len());
        Some(body)
    }

    /// Remove all bodies.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.order.clear();
        self.contacts.clear();
    }

    pub fn get(&self, handle: ActorHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    /// Mutably access a body between updates.
    pub fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over all bodies in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (ActorHandle, &Body)> + '_ {
        self.order
            .iter()
            .filter_map(|idx| Some((ActorHandle(*idx), self.bodies.get(*idx)?)))
    }

    /// Call a function on every body in the order they were added.
    pub fn for_each_actor(&self, mut visitor: impl FnMut(ActorHandle, &Body)) {
        for (handle, body) in self.iter() {
            visitor(handle, body);
        }
    }

    /// Current drawable shapes of every body, in the order they were added.
    pub fn gizmos(&self) -> impl Iterator<Item = Gizmo> + '_ {
        self.iter().map(|(_, body)| body.gizmo())
    }

    /// Log a line describing every body.
    pub fn debug_scene(&self) {
        for (count, (_, body)) in self.iter().enumerate() {
            log::info!("{} : {}", count, body);
        }
    }

    /// Find the first body that contains the given point.
    pub fn query_point(&self, point: m::Vec2) -> Option<ActorHandle> {
        self.iter()
            .find(|(_, body)| body.contains_point(point))
            .map(|(handle, _)| handle)
    }

    /// Queue a force on a dynamic body to be applied during the next step.
    /// Returns false if the body doesn't exist or is static.
    pub fn apply_force(&mut self, handle: ActorHandle, force: m::Vec2) -> bool {
        match self.get_mut(handle).and_then(Body::as_rigidbody_mut) {
            Some(rb) => {
                rb.apply_force(force);
                true
            }
            None => false,
        }
    }

    /// Contacts resolved during the most recent fixed step.
    pub fn last_contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    //
    // configuration
    //

    pub fn gravity(&self) -> m::Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: m::Vec2) {
        self.gravity = gravity;
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn set_time_step(&mut self, time_step: f64) -> Result<(), SceneError> {
        if !(time_step > 0.0 && time_step.is_finite()) {
            return Err(SceneError::InvalidTimeStep(time_step));
        }
        if let Some(max) = self.max_accumulated_time {
            if max < time_step {
                return Err(SceneError::InvalidAccumulatorLimit(max));
            }
        }
        self.time_step = time_step;
        Ok(())
    }

    pub fn max_accumulated_time(&self) -> Option<f64> {
        self.max_accumulated_time
    }

    pub fn set_max_accumulated_time(&mut self, max: Option<f64>) -> Result<(), SceneError> {
        if let Some(max) = max {
            if !(max >= self.time_step && max.is_finite()) {
                return Err(SceneError::InvalidAccumulatorLimit(max));
            }
        }
        self.max_accumulated_time = max;
        Ok(())
    }

    /// Time banked for steps that haven't been run yet.
    pub fn accumulated_time(&self) -> f64 {
        self.accumulator
    }

    //
    // simulation
    //

    /// Advance the simulation by the given amount of time.
    ///
    /// Runs as many fixed steps as fit in the time banked so far
    /// and keeps the remainder for the next call.
    /// Returns the number of steps that were run.
    pub fn update(&mut self, dt: f64) -> usize {
        if !(dt >= 0.0 && dt.is_finite()) {
            log::warn!("Ignoring invalid frame time {}", dt);
            return 0;
        }

        self.accumulator += dt;
        if let Some(max) = self.max_accumulated_time {
            if self.accumulator > max {
                log::warn!(
                    "Physics fell behind, dropping {:.4}s of simulation",
                    self.accumulator - max
                );
                self.accumulator = max;
            }
        }

        let mut steps = 0;
        while self.accumulator >= self.time_step {
            self.step();
            self.accumulator -= self.time_step;
            steps += 1;
        }
        log::trace!("Ran {} physics steps", steps);
        steps
    }

    /// Run a single fixed step right away, ignoring the time accumulator.
    pub fn step(&mut self) {
        self.integrate();
        self.check_for_collisions();
    }

    fn integrate(&mut self) {
        let _span = tracy_span!("integrate", "integrate");

        for idx in &self.order {
            if let Some(body) = self.bodies.get_mut(*idx) {
                body.advance(self.gravity, self.time_step);
            }
        }
    }

    fn check_for_collisions(&mut self) {
        let _span = tracy_span!("check for collisions", "check_for_collisions");

        self.contacts.clear();
        for [i, j] in BruteForce::pairs(self.order.len()) {
            let (idx1, idx2) = (self.order[i], self.order[j]);
            let (Some(obj1), Some(obj2)) = self.bodies.get2_mut(idx1, idx2) else {
                continue;
            };
            if let Some(contact) = collide(obj1, obj2) {
                log::trace!(
                    "{:?}-{:?} contact, depth {:.4}",
                    obj1.kind(),
                    obj2.kind(),
                    contact.depth
                );
                solver::resolve_contact(obj1, obj2, &contact);
                self.contacts.push(ContactEvent {
                    actors: [ActorHandle(idx1), ActorHandle(idx2)],
                    contact,
                });
            }
        }
    }
}
