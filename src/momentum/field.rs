use super::Geometry;
use crate::prelude_crate::*;
use crate::velocity_set::D;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

// ---------------------------------------------------------------- STRUCT: InitialCondition

/// Noisy near-uniform start with a bias on one direction, rescaled per cell
/// to the reference density.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialCondition {
    pub reference_density: Float,
    pub noise_amplitude: Float,
    pub bias: Float,
    pub bias_direction: usize,
    pub seed: u64,
}

impl InitialCondition {
    pub fn new(reference_density: Float, seed: u64) -> Self {
        InitialCondition {
            reference_density,
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            bias: DEFAULT_BIAS,
            bias_direction: DEFAULT_BIAS_DIRECTION,
            seed,
        }
    }

    pub fn validate(&self) -> LbResult<()> {
        if !self.reference_density.is_finite() || self.reference_density <= 0.0 {
            return Err(LbError::InvalidReferenceDensity(self.reference_density));
        }
        if self.bias_direction >= Q {
            return Err(LbError::InvalidDirection(self.bias_direction));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(LbError::InvalidInitialCondition(format!(
                "noise amplitude {} must be finite and non-negative",
                self.noise_amplitude
            )));
        }
        if !self.bias.is_finite() || self.bias <= -INITIAL_POPULATION {
            return Err(LbError::InvalidInitialCondition(format!(
                "bias {} would make the biased population non-positive",
                self.bias
            )));
        }
        Ok(())
    }
}

// ----------------------------------------------------------------- STRUCT: PopulationField

/// Populations of every cell in one flat buffer, `Q` values per cell,
/// cells in row-major order (`cell = x + y * width`).
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationField {
    width: usize,
    height: usize,
    node_types: Arc<Vec<NodeType>>,
    f: Vec<Float>,
}

impl PopulationField {
    pub fn new(geometry: &Geometry) -> Self {
        PopulationField {
            width: geometry.get_width(),
            height: geometry.get_height(),
            node_types: Arc::clone(geometry.get_node_types()),
            f: vec![0.0; geometry.get_number_of_cells() * Q],
        }
    }

    /// Same populations in every fluid cell, zero in the solid ones.
    pub fn uniform(geometry: &Geometry, populations: [Float; Q]) -> Self {
        let mut field = PopulationField::new(geometry);
        field
            .f
            .par_chunks_mut(Q)
            .zip(geometry.get_node_types().par_iter())
            .filter(|(_, node_type)| matches!(node_type, Fluid))
            .for_each(|(f, _)| f.copy_from_slice(&populations));
        field
    }

    pub fn from_values(geometry: &Geometry, values: Vec<Float>) -> LbResult<Self> {
        if values.len() != geometry.get_number_of_cells() * Q {
            return Err(LbError::invalid_domain(
                geometry.get_width(),
                geometry.get_height(),
                format!(
                    "expected {} populations, got {}",
                    geometry.get_number_of_cells() * Q,
                    values.len()
                ),
            ));
        }
        Ok(PopulationField {
            f: values,
            ..PopulationField::new(geometry)
        })
    }

    /// # Examples
    /// ```
    /// # use lbwake::momentum::{Geometry, InitialCondition, PopulationField};
    /// let geometry = Geometry::new(8, 4, |x, y| x == 3 && y == 2).unwrap();
    /// let initial_condition = InitialCondition::new(100.0, 42);
    ///
    /// let field = PopulationField::initialize(&geometry, &initial_condition).unwrap();
    ///
    /// assert!((field.get_density(0, 0) - 100.0).abs() < 1e-10);
    /// assert_eq!(field.get_density(3, 2), 0.0);
    /// ```
    pub fn initialize(geometry: &Geometry, initial_condition: &InitialCondition) -> LbResult<Self> {
        initial_condition.validate()?;
        let InitialCondition {
            reference_density,
            noise_amplitude,
            bias,
            bias_direction,
            seed,
        } = *initial_condition;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut field = PopulationField::new(geometry);
        // Noise is drawn for every cell so the pattern does not depend on the obstacle.
        field
            .f
            .chunks_mut(Q)
            .zip(geometry.get_node_types().iter())
            .for_each(|(f, node_type)| {
                f.iter_mut().for_each(|f_i| {
                    *f_i = INITIAL_POPULATION;
                    if noise_amplitude > 0.0 {
                        *f_i += rng.gen_range(0.0..noise_amplitude);
                    }
                });
                f[bias_direction] += bias;
                match node_type {
                    Fluid => {
                        let scale = reference_density / kernel::density(f);
                        f.iter_mut().for_each(|f_i| *f_i *= scale);
                    }
                    Solid => f.fill(0.0),
                }
            });
        Ok(field)
    }
}

impl PopulationField {
    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get_number_of_cells(&self) -> usize {
        self.width * self.height
    }

    pub fn get_node_types(&self) -> &Arc<Vec<NodeType>> {
        &self.node_types
    }

    pub fn get_node_type(&self, x: usize, y: usize) -> &NodeType {
        &self.node_types[x + y * self.width]
    }

    pub fn get_f(&self, x: usize, y: usize) -> &[Float] {
        let cell = x + y * self.width;
        &self.f[cell * Q..(cell + 1) * Q]
    }

    pub fn set_f(&mut self, x: usize, y: usize, f: [Float; Q]) {
        let cell = x + y * self.width;
        self.f[cell * Q..(cell + 1) * Q].copy_from_slice(&f);
    }

    /// Flat view, `Q` values per cell.
    pub fn get_values(&self) -> &[Float] {
        &self.f
    }

    pub(crate) fn get_values_mut(&mut self) -> &mut Vec<Float> {
        &mut self.f
    }

    /// Density of a cell as reported to consumers: zero for solid cells.
    pub fn get_density(&self, x: usize, y: usize) -> Float {
        match self.get_node_type(x, y) {
            Fluid => kernel::density(self.get_f(x, y)),
            Solid => 0.0,
        }
    }

    /// Sum of every population, including those parked in solid cells.
    pub fn get_total_mass(&self) -> Float {
        self.f.par_iter().sum::<Float>()
    }

    pub fn get_fluid_mass(&self) -> Float {
        self.f
            .par_chunks(Q)
            .zip(self.node_types.par_iter())
            .filter(|(_, node_type)| matches!(node_type, Fluid))
            .map(|(f, _)| kernel::density(f))
            .sum::<Float>()
    }

    pub(crate) fn has_shape_of(&self, geometry: &Geometry) -> bool {
        self.width == geometry.get_width()
            && self.height == geometry.get_height()
            && (Arc::ptr_eq(&self.node_types, geometry.get_node_types())
                || *self.node_types == **geometry.get_node_types())
    }

    pub fn macroscopic(&self, descriptor: &LatticeDescriptor) -> MacroscopicFields {
        let moments = self
            .f
            .par_chunks(Q)
            .zip(self.node_types.par_iter())
            .map(|(f, node_type)| match node_type {
                Fluid => kernel::moments(f, descriptor),
                Solid => (0.0, [0.0; D]),
            })
            .collect::<Vec<(Float, [Float; D])>>();
        let mut density = Vec::with_capacity(moments.len());
        let mut velocity_x = Vec::with_capacity(moments.len());
        let mut velocity_y = Vec::with_capacity(moments.len());
        moments.iter().for_each(|(rho, u)| {
            density.push(*rho);
            velocity_x.push(u[0]);
            velocity_y.push(u[1]);
        });
        MacroscopicFields {
            width: self.width,
            height: self.height,
            node_types: Arc::clone(&self.node_types),
            density,
            velocity_x,
            velocity_y,
        }
    }
}

// ---------------------------------------------------------------- STRUCT: MacroscopicFields

/// Density and velocity grids, row-major like the population field.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroscopicFields {
    width: usize,
    height: usize,
    node_types: Arc<Vec<NodeType>>,
    pub density: Vec<Float>,
    pub velocity_x: Vec<Float>,
    pub velocity_y: Vec<Float>,
}

impl MacroscopicFields {
    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get_density(&self, x: usize, y: usize) -> Float {
        self.density[x + y * self.width]
    }

    pub fn get_velocity(&self, x: usize, y: usize) -> [Float; D] {
        let cell = x + y * self.width;
        [self.velocity_x[cell], self.velocity_y[cell]]
    }

    pub fn get_speed(&self, x: usize, y: usize) -> Float {
        let [u_x, u_y] = self.get_velocity(x, y);
        (u_x * u_x + u_y * u_y).sqrt()
    }

    /// `du_y/dx - du_x/dy` by central differences with periodic wrap; zero in solids.
    pub fn get_vorticity(&self, x: usize, y: usize) -> Float {
        if matches!(self.node_types[x + y * self.width], Solid) {
            return 0.0;
        }
        let east = (x + 1) % self.width;
        let west = (x + self.width - 1) % self.width;
        let north = (y + 1) % self.height;
        let south = (y + self.height - 1) % self.height;
        0.5 * (self.get_velocity(east, y)[1] - self.get_velocity(west, y)[1])
            - 0.5 * (self.get_velocity(x, north)[0] - self.get_velocity(x, south)[0])
    }
}
