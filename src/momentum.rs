// ------------------------------------------------------------------------------- MODULES

pub mod bc;
mod field;
mod geometry;
mod io;
mod lattice;
pub mod post;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude_crate::*;
use colored::*;
use rayon::prelude::*;
use std::path::Path;

pub use bc::BoundaryCondition;
pub use field::{InitialCondition, MacroscopicFields, PopulationField};
pub use geometry::{Geometry, Obstacle};
pub use io::Checkpoint;
pub use lattice::{DriverState, Lattice};
pub use post::{PostFunction, PostResult};

// -------------------------------------------------------------------- STRUCT: Parameters

/// Immutable description of one run.
pub struct Parameters {
    pub width: usize,
    pub height: usize,
    pub tau: Float,
    pub reference_density: Float,
    pub noise_amplitude: Float,
    pub bias: Float,
    pub bias_direction: usize,
    pub seed: u64,
    pub obstacle: Obstacle,
    pub boundary_conditions: Vec<(BoundaryFace, BoundaryCondition)>,
    pub post_functions: Option<Vec<PostFunction>>,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            width: 400,
            height: 100,
            tau: 0.6,
            reference_density: 100.0,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            bias: DEFAULT_BIAS,
            bias_direction: DEFAULT_BIAS_DIRECTION,
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
            post_functions: None,
        }
    }
}

#[cfg(test)]
impl Parameters {
    pub(crate) fn test_default() -> Self {
        Parameters {
            width: 40,
            height: 20,
            obstacle: Obstacle::Disk {
                center: [10.0, 10.0],
                radius: 4.0,
            },
            ..Default::default()
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> LbResult<()> {
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(LbError::InvalidRelaxationTime(self.tau));
        }
        self.get_initial_condition().validate()
    }

    pub fn get_geometry(&self) -> LbResult<Geometry> {
        Geometry::from_obstacle(self.width, self.height, &self.obstacle)?
            .with_boundary_conditions(&self.boundary_conditions)
    }

    pub fn get_initial_condition(&self) -> InitialCondition {
        InitialCondition {
            reference_density: self.reference_density,
            noise_amplitude: self.noise_amplitude,
            bias: self.bias,
            bias_direction: self.bias_direction,
            seed: self.seed,
        }
    }

    /// Kinematic viscosity in lattice units, `cs^2 (tau - 1/2)`.
    ///
    /// # Examples
    /// ```
    /// # use lbwake::momentum::Parameters;
    /// let params = Parameters { tau: 0.8, ..Default::default() };
    ///
    /// assert!((params.get_viscosity() - 0.1).abs() < 1e-12);
    /// ```
    pub fn get_viscosity(&self) -> Float {
        CS_2 * (self.tau - TAU_STABILITY_LIMIT)
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// Builds the geometry of an open channel and its initial population field.
///
/// # Examples
/// ```
/// # use lbwake::momentum;
/// let (geometry, field) =
///     momentum::initialize(10, 10, |x, y| x == 5 && y == 5, 1.0, 0).unwrap();
///
/// assert_eq!(geometry.get_solid_cells().len(), 1);
/// assert_eq!(field.get_density(5, 5), 0.0);
/// assert!((field.get_density(0, 0) - 1.0).abs() < 1e-12);
/// ```
pub fn initialize<P>(
    width: usize,
    height: usize,
    obstacle_predicate: P,
    reference_density: Float,
    seed: u64,
) -> LbResult<(Geometry, PopulationField)>
where
    P: Fn(usize, usize) -> bool,
{
    let geometry = Geometry::new(width, height, obstacle_predicate)?;
    let initial_condition = InitialCondition::new(reference_density, seed);
    let field = PopulationField::initialize(&geometry, &initial_condition)?;
    Ok((geometry, field))
}

/// Advances `field` by `n_iterations` full time steps and returns it.
pub fn step(
    field: PopulationField,
    descriptor: &LatticeDescriptor,
    geometry: &Geometry,
    tau: Float,
    n_iterations: usize,
) -> LbResult<PopulationField> {
    let mut lattice = Lattice::new(
        Arc::new(descriptor.clone()),
        Arc::new(geometry.clone()),
        tau,
        field,
    )?;
    lattice.run(n_iterations);
    Ok(lattice.into_population_field())
}

pub fn macroscopic(field: &PopulationField, descriptor: &LatticeDescriptor) -> MacroscopicFields {
    field.macroscopic(descriptor)
}

/// Fails on the first fluid cell whose density is not finite and positive.
pub fn check_stability(field: &PopulationField) -> LbResult<()> {
    let width = field.get_width();
    let unstable = field
        .get_values()
        .par_chunks(Q)
        .zip(field.get_node_types().par_iter())
        .enumerate()
        .filter(|(_, (_, node_type))| matches!(node_type, Fluid))
        .map(|(cell, (f, _))| (cell, kernel::density(f)))
        .find_first(|(_, density)| !density.is_finite() || *density <= 0.0);
    match unstable {
        Some((cell, density)) => Err(LbError::InstabilityDetected {
            x: cell % width,
            y: cell / width,
            density,
        }),
        None => Ok(()),
    }
}

fn case_setup(params: &Parameters) -> LbResult<()> {
    crate::io::create_case_directories()?;
    println!(
        "Domain: {} x {} cells, tau = {}, reference density = {}\n",
        params.width.to_string().yellow().bold(),
        params.height.to_string().yellow().bold(),
        params.tau.to_string().yellow().bold(),
        params.reference_density.to_string().yellow().bold(),
    );
    println!("Obstacle: {:?}\n", params.obstacle);
    println!("Lattice viscosity: {:.6e}\n", params.get_viscosity());
    if params.tau <= TAU_STABILITY_LIMIT {
        println!(
            "{}\n",
            format!(
                "Warning: tau = {} is not above {TAU_STABILITY_LIMIT}; BGK is expected to diverge.",
                params.tau
            )
            .yellow()
            .bold()
        );
    }
    Ok(())
}

fn next_stop(time_step: usize, end: usize, config: &Config, params: &Parameters) -> usize {
    let mut stop = end;
    if let Some(step) = config.write_data.next_write_step(time_step) {
        stop = stop.min(step);
    }
    if let Some(post_functions) = &params.post_functions {
        post_functions.iter().for_each(|post_function| {
            let interval = post_function.interval;
            stop = stop.min((time_step / interval + 1) * interval);
        });
    }
    stop
}

fn export(lattice: &Lattice, config: &Config, params: &Parameters) -> LbResult<()> {
    if config.write_data.is_write_step(lattice.get_time_step()) {
        println!(
            "\nWriting {} for time step {}.\n",
            "snapshot".yellow().bold(),
            lattice.get_time_step().to_string().yellow().bold()
        );
        lattice.write_snapshot(crate::io::DATA_PATH)?;
    }
    if let Some(post_functions) = &params.post_functions {
        for post_function in post_functions {
            lattice.write_post_processing(post_function, crate::io::POST_PROCESSING_PATH)?;
        }
    }
    if config.check_stability {
        lattice.check_stability()?;
    }
    Ok(())
}

pub(crate) fn run(config: Config, params: Parameters) -> LbResult<()> {
    params.validate()?;
    case_setup(&params)?;
    let mut lattice = match &config.restart {
        Some(path) => {
            println!("Restarting from {}.\n", path.display().to_string().yellow().bold());
            Checkpoint::read_file(path)?.into_lattice(&params)?
        }
        None => Lattice::from_parameters(&params)?,
    };
    println!(
        "Writing {}.\n",
        crate::io::COORDINATES_FILE.yellow().bold()
    );
    lattice.write_coordinates(crate::io::DATA_PATH)?;

    let start = lattice.get_time_step();
    let end = start + config.iterations;
    export(&lattice, &config, &params)?;
    while lattice.get_time_step() < end {
        let stop = next_stop(lattice.get_time_step(), end, &config, &params);
        lattice.run(stop - lattice.get_time_step());
        crate::io::progress_bar(lattice.get_time_step() - start - 1, config.iterations);
        export(&lattice, &config, &params)?;
    }

    let path = Path::new(crate::io::DATA_PATH).join(crate::io::CHECKPOINT_FILE);
    println!(
        "Writing {} at time step {}.\n",
        crate::io::CHECKPOINT_FILE.yellow().bold(),
        lattice.get_time_step().to_string().yellow().bold()
    );
    lattice.write_checkpoint_file(path, params.reference_density)?;
    Ok(())
}

fn info(params: &Parameters) -> LbResult<()> {
    let lattice = Lattice::from_parameters(params)?;
    let geometry = lattice.get_geometry();
    let results = post::compute_max_speed(&lattice);
    let characteristic_length = match params.obstacle {
        Obstacle::Disk { radius, .. } => 2.0 * radius,
        Obstacle::Rectangle { min, max } => (max[1] + 1 - min[1]) as Float,
        Obstacle::None => params.height as Float,
    };
    let reynolds_number = results[0].value * characteristic_length / params.get_viscosity();
    println!("{:>24} {}", "cells".cyan().bold(), geometry.get_number_of_cells());
    println!("{:>24} {}", "solid cells".cyan().bold(), geometry.get_solid_cells().len());
    println!("{:>24} {:.6e}", "viscosity".cyan().bold(), params.get_viscosity());
    println!("{:>24} {:.6e}", "initial max speed".cyan().bold(), results[0].value);
    println!("{:>24} {:.2}", "Reynolds number".cyan().bold(), reynolds_number);
    Ok(())
}

pub fn load(params: Parameters) {
    let config = match cli::get_args().and_then(|matches| cli::parse_matches(&matches)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let number_of_threads = usize::from(config.number_of_threads);
    if let Err(e) = cli::init_global_pool(number_of_threads, config.core_affinity) {
        eprintln!("Error while creating the thread pool: {e}");
        std::process::exit(1);
    }

    let result = match config.mode {
        cli::Mode::Run => run(config, params),
        cli::Mode::Info => info(&params),
    };
    if let Err(e) = result {
        eprintln!("{}", format!("Error: {e}").red().bold());
        std::process::exit(1);
    }
}
