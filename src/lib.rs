mod cli;
pub mod constants;
pub mod error;
pub mod io;
pub mod kernel;
pub mod momentum;
mod prelude_crate;
pub mod velocity_set;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BoundaryFace {
    West = 0,
    East = 1,
    South = 2,
    North = 3,
}

pub(crate) const FACES_2D: [BoundaryFace; 4] = [
    BoundaryFace::West,
    BoundaryFace::East,
    BoundaryFace::South,
    BoundaryFace::North,
];

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeType {
    Fluid = 0,
    Solid = 1,
}

pub mod prelude {
    pub use crate::BoundaryFace::{self, *};
    pub use crate::NodeType::{self, *};
    pub use crate::constants::Float;
    pub use crate::error::{LbError, LbResult};
    pub use crate::momentum::{
        self, BoundaryCondition, Geometry, Lattice, MacroscopicFields, Obstacle, PopulationField,
    };
    pub use crate::velocity_set::LatticeDescriptor;
}
