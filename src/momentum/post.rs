use super::Lattice;
use crate::prelude_crate::*;
use rayon::prelude::*;

pub type PostComputation = fn(&Lattice) -> Vec<PostResult>;

#[derive(Debug, Clone, PartialEq)]
pub struct PostResult {
    pub name: String,
    pub label: String,
    pub value: Float,
}

impl PostResult {
    pub fn new(name: &str, label: &str, value: Float) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// Reduction evaluated every `interval` time steps and appended to `file_name`.
#[derive(Debug, Clone)]
pub struct PostFunction {
    pub file_name: String,
    pub interval: usize,
    pub function: PostComputation,
}

impl PostFunction {
    pub fn new(file_name: &str, interval: usize, function: PostComputation) -> Self {
        Self {
            file_name: file_name.to_string(),
            interval: interval.max(1),
            function,
        }
    }
}

pub fn compute_total_mass(lattice: &Lattice) -> Vec<PostResult> {
    let field = lattice.get_population_field();
    vec![
        PostResult::new("total_mass", "total mass", field.get_total_mass()),
        PostResult::new("fluid_mass", "fluid mass", field.get_fluid_mass()),
    ]
}

pub fn compute_mean_density(lattice: &Lattice) -> Vec<PostResult> {
    let field = lattice.get_population_field();
    let number_of_fluid_cells =
        field.get_number_of_cells() - lattice.get_geometry().get_solid_cells().len();
    let rho_mean = field.get_fluid_mass() / number_of_fluid_cells as Float;
    vec![PostResult::new("mean_density", "mean density", rho_mean)]
}

pub fn compute_max_speed(lattice: &Lattice) -> Vec<PostResult> {
    let macroscopic = lattice.macroscopic();
    let max_speed = macroscopic
        .velocity_x
        .par_iter()
        .zip(macroscopic.velocity_y.par_iter())
        .map(|(u_x, u_y)| (u_x * u_x + u_y * u_y).sqrt())
        .reduce(|| 0.0, Float::max);
    vec![PostResult::new("max_speed", "maximum speed", max_speed)]
}
