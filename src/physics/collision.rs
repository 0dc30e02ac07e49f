pub mod broadphase;
pub use broadphase::{BroadPhase, BruteForce};

pub mod dispatch;
pub use dispatch::{collide, NarrowPhaseFn, DISPATCH_TABLE};

pub mod shape_shape;
pub use shape_shape::Contact;
