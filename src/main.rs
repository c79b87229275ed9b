use lbwake::prelude::*;

fn main() {
    let parameters = momentum::Parameters {
        width: 400,
        height: 100,
        tau: 0.6,
        reference_density: 100.0,
        seed: 42,
        obstacle: Obstacle::Disk {
            center: [100.0, 50.0],
            radius: 25.0,
        },
        boundary_conditions: vec![
            (West, BoundaryCondition::ZeroGradient),
            (East, BoundaryCondition::ZeroGradient),
            (South, BoundaryCondition::Periodic),
            (North, BoundaryCondition::Periodic),
        ],
        post_functions: Some(vec![
            momentum::PostFunction::new("mass.csv", 10, momentum::post::compute_total_mass),
            momentum::PostFunction::new("max_speed.csv", 10, momentum::post::compute_max_speed),
        ]),
        ..Default::default()
    };

    momentum::load(parameters);
}
