//! Sources of motor commands.

/// Maps sensor readings to a pair of motor activations.
///
/// Implemented by the neural networks under evaluation, but any controller
/// can drive a [Simulation](crate::Simulation). Activations are multiplied by
/// the vehicle's max speed to get the left and right wheel speeds.
pub trait Controller {
    /// Computes `[left, right]` motor activations from the current sensor readings.
    fn compute(&mut self, readings: &[f64]) -> [f64; 2];
}

impl<F: FnMut(&[f64]) -> [f64; 2]> Controller for F {
    fn compute(&mut self, readings: &[f64]) -> [f64; 2] {
        self(readings)
    }
}

/// A controller that ignores its inputs and always issues the same command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantController(pub [f64; 2]);

impl Controller for ConstantController {
    fn compute(&mut self, _readings: &[f64]) -> [f64; 2] {
        self.0
    }
}
