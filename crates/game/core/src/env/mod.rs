//! Traits describing read-only rule data.
//!
//! Oracles expose data the engine consumes but does not own. The [`Env`]
//! aggregate bundles them so the engine can reach everything it needs without
//! hard coupling to concrete implementations.
mod movement;

pub use movement::{MovementOracle, UniformMovement};

/// Aggregates read-only oracles required by the action pipeline.
pub struct Env<'a, M>
where
    M: MovementOracle + ?Sized,
{
    movement: &'a M,
}

pub type GameEnv<'a> = Env<'a, dyn MovementOracle + 'a>;

// `M` may be unsized, so these cannot be derived.
impl<M: MovementOracle + ?Sized> Clone for Env<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MovementOracle + ?Sized> Copy for Env<'_, M> {}

impl<'a, M> Env<'a, M>
where
    M: MovementOracle + ?Sized,
{
    pub fn new(movement: &'a M) -> Self {
        Self { movement }
    }

    pub fn movement(&self) -> &'a M {
        self.movement
    }
}
