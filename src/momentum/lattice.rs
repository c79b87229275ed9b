use super::bc::BoundaryCondition::*;
use super::{Geometry, MacroscopicFields, Parameters, PopulationField};
use crate::FACES_2D;
use crate::prelude_crate::*;
use rayon::prelude::*;

// ----------------------------------------------------------------------- ENUM: DriverState

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initialized,
    Stepping,
    Completed,
}

// ----------------------------------------------------------------------- STRUCT: Lattice

/// Simulation driver. Owns the population field, the streaming scratch
/// buffer and the bounce-back snapshot of the solid cells.
#[derive(Debug)]
pub struct Lattice {
    descriptor: Arc<LatticeDescriptor>,
    geometry: Arc<Geometry>,
    tau: Float,
    f: PopulationField,
    f_scratch: Vec<Float>,
    bounced: Vec<Float>,
    time_step: usize,
    state: DriverState,
}

impl Lattice {
    pub fn new(
        descriptor: Arc<LatticeDescriptor>,
        geometry: Arc<Geometry>,
        tau: Float,
        f: PopulationField,
    ) -> LbResult<Self> {
        if !tau.is_finite() || tau <= 0.0 {
            return Err(LbError::InvalidRelaxationTime(tau));
        }
        if !f.has_shape_of(&geometry) {
            return Err(LbError::invalid_domain(
                f.get_width(),
                f.get_height(),
                format!(
                    "population field does not match the {}x{} geometry",
                    geometry.get_width(),
                    geometry.get_height()
                ),
            ));
        }
        let f_scratch = vec![0.0; f.get_values().len()];
        let bounced = vec![0.0; geometry.get_solid_cells().len() * Q];
        Ok(Lattice {
            descriptor,
            geometry,
            tau,
            f,
            f_scratch,
            bounced,
            time_step: 0,
            state: DriverState::Initialized,
        })
    }

    pub fn from_parameters(params: &Parameters) -> LbResult<Self> {
        params.validate()?;
        let geometry = params.get_geometry()?;
        let f = PopulationField::initialize(&geometry, &params.get_initial_condition())?;
        Lattice::new(
            Arc::new(LatticeDescriptor::d2q9()),
            Arc::new(geometry),
            params.tau,
            f,
        )
    }
}

#[cfg(test)]
impl Lattice {
    pub(crate) fn test_default() -> Self {
        let params = Parameters::test_default();
        Lattice::from_parameters(&params).expect("test parameters are valid")
    }
}

impl Lattice {
    pub fn get_descriptor(&self) -> &Arc<LatticeDescriptor> {
        &self.descriptor
    }

    pub fn get_geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    pub fn get_tau(&self) -> Float {
        self.tau
    }

    pub fn get_population_field(&self) -> &PopulationField {
        &self.f
    }

    pub fn into_population_field(self) -> PopulationField {
        self.f
    }

    pub fn get_time_step(&self) -> usize {
        self.time_step
    }

    pub(crate) fn set_time_step(&mut self, time_step: usize) {
        self.time_step = time_step;
    }

    pub fn get_state(&self) -> DriverState {
        self.state
    }

    pub fn get_nx(&self) -> usize {
        self.geometry.get_width()
    }

    pub fn get_ny(&self) -> usize {
        self.geometry.get_height()
    }

    /// Consistent snapshot of the macroscopic fields after the last full step.
    pub fn macroscopic(&self) -> MacroscopicFields {
        self.f.macroscopic(&self.descriptor)
    }

    pub fn check_stability(&self) -> LbResult<()> {
        super::check_stability(&self.f)
    }
}

impl Lattice {
    pub fn boundary_conditions_step(&mut self) {
        FACES_2D.iter().for_each(|boundary_face| {
            match self.geometry.get_boundary_condition(boundary_face) {
                ZeroGradient => {
                    self.f
                        .compute_zero_gradient_bc(boundary_face, &self.geometry, &self.descriptor);
                }
                Periodic => {}
            }
        });
    }

    /// Pulls every population from its upstream cell, wrapping around both
    /// axes, into the scratch buffer and then swaps the buffers.
    pub fn streaming_step(&mut self) {
        let width = self.geometry.get_width();
        let height = self.geometry.get_height();
        let c = self.descriptor.get_c();
        let f = self.f.get_values();
        self.f_scratch
            .par_chunks_mut(width * Q)
            .enumerate()
            .for_each(|(y, row)| {
                row.chunks_mut(Q).enumerate().for_each(|(x, f_new)| {
                    f_new.iter_mut().enumerate().for_each(|(i, f_new_i)| {
                        let x_source = (x as i32 - c[i][0]).rem_euclid(width as i32) as usize;
                        let y_source = (y as i32 - c[i][1]).rem_euclid(height as i32) as usize;
                        *f_new_i = f[(x_source + y_source * width) * Q + i];
                    });
                });
            });
        std::mem::swap(self.f.get_values_mut(), &mut self.f_scratch);
    }

    pub fn bounce_back_snapshot_step(&mut self) {
        self.f
            .compute_bounce_back_snapshot(&self.geometry, &self.descriptor, &mut self.bounced);
    }

    pub fn collision_step(&mut self) {
        let tau = self.tau;
        let descriptor = &self.descriptor;
        self.f
            .get_values_mut()
            .par_chunks_mut(Q)
            .for_each(|f| kernel::bgk_collision(f, tau, descriptor));
    }

    pub fn bounce_back_restore_step(&mut self) {
        self.f
            .restore_bounce_back_snapshot(&self.geometry, &self.bounced);
    }

    pub fn main_steps(&mut self) {
        self.boundary_conditions_step();
        self.streaming_step();
        self.bounce_back_snapshot_step();
        self.collision_step();
        self.bounce_back_restore_step();
        self.time_step += 1;
    }

    /// Runs a fixed number of full time steps.
    ///
    /// # Examples
    /// ```
    /// # use lbwake::momentum::{DriverState, Lattice, Obstacle, Parameters};
    /// let params = Parameters {
    ///     width: 40,
    ///     height: 20,
    ///     obstacle: Obstacle::Disk { center: [10.0, 10.0], radius: 4.0 },
    ///     ..Default::default()
    /// };
    /// let mut lattice = Lattice::from_parameters(&params).unwrap();
    /// assert_eq!(lattice.get_state(), DriverState::Initialized);
    ///
    /// lattice.run(5);
    ///
    /// assert_eq!(lattice.get_state(), DriverState::Completed);
    /// assert_eq!(lattice.get_time_step(), 5);
    /// assert!(lattice.check_stability().is_ok());
    /// ```
    pub fn run(&mut self, n_iterations: usize) {
        self.state = DriverState::Stepping;
        (0..n_iterations).for_each(|_| self.main_steps());
        self.state = DriverState::Completed;
    }
}
