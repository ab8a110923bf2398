use crate::controller::Controller;
use crate::environment::Environment;
use crate::simulation::{EvaluationParams, Simulation};
use crate::vehicle::VehicleAttributes;
use crate::Result;
use log::debug;
use rayon::prelude::*;

/// Evaluates a population of controllers in parallel, one simulation per controller.
///
/// Every run shares `environment` read-only and gets its own vehicle and
/// coverage grid, so results do not depend on scheduling. Fitness values are
/// returned in the same order as `controllers`.
pub fn evaluate_population<C>(
    environment: &Environment,
    attributes: &VehicleAttributes,
    params: &EvaluationParams,
    controllers: Vec<C>,
) -> Result<Vec<f64>>
where
    C: Controller + Send,
{
    debug!("evaluating {} individuals", controllers.len());
    controllers
        .into_par_iter()
        .map(|controller| Simulation::new(environment, attributes, controller)?.evaluate(params))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::controller::ConstantController;
    use crate::environment::EnvironmentAttributes;
    use crate::pose::Pose;
    use crate::Error;

    fn environment() -> Environment {
        Environment::with_boundary(
            vec![],
            &EnvironmentAttributes {
                width: 4.0,
                height: 4.0,
                subdivision_size: 0.25,
            },
        )
        .unwrap()
    }

    #[test]
    fn matches_sequential_evaluation() {
        let env = environment();
        let attributes = VehicleAttributes::default();
        let params = EvaluationParams::new(Pose::new(2.0, 2.0, 0.6), 20.0);
        let commands = [[1.0, 1.0], [0.3, 1.0], [-1.0, 1.0], [1.0, 0.0], [0.8, 0.7]];

        let parallel = evaluate_population(
            &env,
            &attributes,
            &params,
            commands.iter().copied().map(ConstantController).collect(),
        )
        .unwrap();

        let sequential = commands
            .iter()
            .map(|&command| {
                Simulation::new(&env, &attributes, ConstantController(command))
                    .and_then(|mut sim| sim.evaluate(&params))
                    .unwrap()
            })
            .collect::<Vec<_>>();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn propagates_config_errors() {
        let env = environment();
        let attributes = VehicleAttributes {
            sensor_count: 0,
            ..Default::default()
        };
        let params = EvaluationParams::new(Pose::new(2.0, 2.0, 0.0), 1.0);
        let result = evaluate_population(&env, &attributes, &params, vec![ConstantController([1.0; 2])]);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
