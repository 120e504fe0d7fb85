use dot_engine::monitor::{Monitored, OperationObserver};
use dot_engine::{Result, Vector2D};
use rand::Rng;

/// Largest speed component drawn for a random sample, in m/s.
const MAX_COMPONENT: f64 = 2.0;

/// Velocity of the flow at one point of the field.
#[derive(Debug, Clone, Copy)]
pub struct FlowSample {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl FlowSample {
    pub fn new(position: [f64; 2], velocity: [f64; 2]) -> Result<FlowSample> {
        Ok(FlowSample {
            position: Vector2D::try_from(position)?,
            velocity: Vector2D::try_from(velocity)?,
        })
    }

    /// A sample at a random point of the unit square.
    pub fn random<R: Rng>(rng: &mut R) -> Result<FlowSample> {
        let position = [rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)];
        let velocity = [
            rng.random_range(-MAX_COMPONENT..MAX_COMPONENT),
            rng.random_range(-MAX_COMPONENT..MAX_COMPONENT),
        ];
        FlowSample::new(position, velocity)
    }

    pub fn speed<O: OperationObserver>(&self, math: &Monitored<O>) -> Result<f64> {
        math.magnitude(self.velocity)
    }

    /// Kinetic energy per unit mass, `0.5 * |v|^2`.
    pub fn kinetic_energy<O: OperationObserver>(&self, math: &Monitored<O>) -> Result<f64> {
        let speed = self.speed(math)?;
        Ok(0.5 * speed * speed)
    }
}

/// The fixed four-point field used by the flow analysis section.
pub fn default_field() -> Result<Vec<FlowSample>> {
    [
        ([0.0, 0.0], [1.0, 0.5]),
        ([1.0, 0.0], [0.8, 0.7]),
        ([0.0, 1.0], [0.6, 0.9]),
        ([1.0, 1.0], [0.4, 1.1]),
    ]
    .into_iter()
    .map(|(position, velocity)| FlowSample::new(position, velocity))
    .collect()
}

pub fn random_field<R: Rng>(rng: &mut R, samples: usize) -> Result<Vec<FlowSample>> {
    (0..samples).map(|_| FlowSample::random(rng)).collect()
}

/// Pressure force per unit area on a surface with the given normal.
pub fn force_component<O: OperationObserver>(
    math: &Monitored<O>,
    pressure_gradient: Vector2D,
    normal: Vector2D,
) -> Result<f64> {
    math.dot(pressure_gradient, normal)
}
