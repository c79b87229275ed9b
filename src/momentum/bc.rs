use super::{Geometry, PopulationField};
use crate::prelude_crate::*;

pub use BoundaryCondition::*;

/// Treatment of the populations at one face of the domain. Streaming itself
/// always wraps around; `ZeroGradient` patches the face line beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryCondition {
    Periodic,
    /// The populations leaving through the face are copied from the
    /// adjacent interior line.
    ZeroGradient,
}

impl PopulationField {
    pub(crate) fn compute_zero_gradient_bc(
        &mut self,
        boundary_face: &BoundaryFace,
        geometry: &Geometry,
        descriptor: &LatticeDescriptor,
    ) {
        let width = geometry.get_width();
        let height = geometry.get_height();
        let pairs = match boundary_face {
            West => (0..height)
                .map(|y| (geometry.get_cell(0, y), geometry.get_cell(1, y)))
                .collect::<Vec<(usize, usize)>>(),
            East => (0..height)
                .map(|y| {
                    (
                        geometry.get_cell(width - 1, y),
                        geometry.get_cell(width - 2, y),
                    )
                })
                .collect(),
            South => (0..width)
                .map(|x| (geometry.get_cell(x, 0), geometry.get_cell(x, 1)))
                .collect(),
            North => (0..width)
                .map(|x| {
                    (
                        geometry.get_cell(x, height - 1),
                        geometry.get_cell(x, height - 2),
                    )
                })
                .collect(),
        };
        let node_types = Arc::clone(self.get_node_types());
        let q_faces = descriptor.get_q_faces(boundary_face);
        let f = self.get_values_mut();
        pairs
            .iter()
            .filter(|&&(cell, interior)| {
                matches!(node_types[cell], Fluid) && matches!(node_types[interior], Fluid)
            })
            .for_each(|&(cell, interior)| {
                q_faces.iter().for_each(|&i| {
                    f[cell * Q + i] = f[interior * Q + i];
                });
            });
    }

    /// Copies the populations that just streamed into the solid cells,
    /// reversed through the opposite directions, into `bounced`.
    pub(crate) fn compute_bounce_back_snapshot(
        &self,
        geometry: &Geometry,
        descriptor: &LatticeDescriptor,
        bounced: &mut [Float],
    ) {
        let f = self.get_values();
        geometry
            .get_solid_cells()
            .iter()
            .zip(bounced.chunks_mut(Q))
            .for_each(|(&cell, bounced_cell)| {
                (0..Q).for_each(|i| {
                    let i_bar = descriptor.get_opposite_direction(i);
                    bounced_cell[i] = f[cell * Q + i_bar];
                });
            });
    }

    pub(crate) fn restore_bounce_back_snapshot(&mut self, geometry: &Geometry, bounced: &[Float]) {
        let f = self.get_values_mut();
        geometry
            .get_solid_cells()
            .iter()
            .zip(bounced.chunks(Q))
            .for_each(|(&cell, bounced_cell)| {
                f[cell * Q..(cell + 1) * Q].copy_from_slice(bounced_cell);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_field(geometry: &Geometry) -> PopulationField {
        let values = (0..geometry.get_number_of_cells() * Q)
            .map(|k| k as Float)
            .collect::<Vec<Float>>();
        PopulationField::from_values(geometry, values).unwrap()
    }

    #[test]
    fn test_compute_zero_gradient_bc_d2q9_west_face() {
        let geometry = Geometry::new(4, 3, |_, _| false).unwrap();
        let descriptor = LatticeDescriptor::default();
        let mut field = numbered_field(&geometry);
        let before = field.clone();

        field.compute_zero_gradient_bc(&West, &geometry, &descriptor);

        (0..3).for_each(|y| {
            let f = field.get_f(0, y);
            let interior = before.get_f(1, y);
            let untouched = before.get_f(0, y);
            (0..Q).for_each(|i| match i {
                3 | 6 | 7 => assert_eq!(f[i], interior[i]),
                _ => assert_eq!(f[i], untouched[i]),
            });
        });
        assert_eq!(field.get_f(2, 1), before.get_f(2, 1));
    }

    #[test]
    fn test_compute_zero_gradient_bc_d2q9_east_face() {
        let geometry = Geometry::new(4, 3, |_, _| false).unwrap();
        let descriptor = LatticeDescriptor::default();
        let mut field = numbered_field(&geometry);
        let before = field.clone();

        field.compute_zero_gradient_bc(&East, &geometry, &descriptor);

        (0..3).for_each(|y| {
            let f = field.get_f(3, y);
            let interior = before.get_f(2, y);
            let untouched = before.get_f(3, y);
            (0..Q).for_each(|i| match i {
                1 | 5 | 8 => assert_eq!(f[i], interior[i]),
                _ => assert_eq!(f[i], untouched[i]),
            });
        });
    }

    #[test]
    fn test_compute_zero_gradient_bc_d2q9_north_face() {
        let geometry = Geometry::new(3, 4, |_, _| false).unwrap();
        let descriptor = LatticeDescriptor::default();
        let mut field = numbered_field(&geometry);
        let before = field.clone();

        field.compute_zero_gradient_bc(&North, &geometry, &descriptor);

        (0..3).for_each(|x| {
            let f = field.get_f(x, 3);
            let interior = before.get_f(x, 2);
            let untouched = before.get_f(x, 3);
            (0..Q).for_each(|i| match i {
                2 | 5 | 6 => assert_eq!(f[i], interior[i]),
                _ => assert_eq!(f[i], untouched[i]),
            });
        });
    }

    #[test]
    fn test_zero_gradient_bc_skips_solid_cells() {
        let geometry = Geometry::new(4, 3, |x, y| x == 1 && y == 1).unwrap();
        let descriptor = LatticeDescriptor::default();
        let mut field = numbered_field(&geometry);
        let before = field.clone();

        field.compute_zero_gradient_bc(&West, &geometry, &descriptor);

        assert_eq!(field.get_f(0, 1), before.get_f(0, 1));
        assert_ne!(field.get_f(0, 0), before.get_f(0, 0));
    }

    #[test]
    fn test_bounce_back_snapshot_reverses_populations() {
        let geometry = Geometry::new(3, 3, |x, y| x == 1 && y == 1).unwrap();
        let descriptor = LatticeDescriptor::default();
        let mut field = PopulationField::new(&geometry);
        field.set_f(1, 1, [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]);
        let mut bounced = vec![0.0; Q];

        field.compute_bounce_back_snapshot(&geometry, &descriptor, &mut bounced);
        field.set_f(1, 1, [5.0; Q]);
        field.restore_bounce_back_snapshot(&geometry, &bounced);

        assert_eq!(
            field.get_f(1, 1),
            &[0.1, 0.4, 0.5, 0.2, 0.3, 0.8, 0.9, 0.6, 0.7]
        );
        assert!(field.get_f(0, 0).iter().all(|&f_i| f_i == 0.0));
    }
}
