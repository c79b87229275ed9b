// ------------------------------------------------------------------------------- MODULES

mod d2q9;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude::*;

pub const D: usize = d2q9::D;

pub const Q: usize = d2q9::Q;

// ------------------------------------------------------------ STRUCT: LatticeDescriptor

/// Fixed D2Q9 constants shared read-only by every stage of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeDescriptor {
    c: [[i32; D]; Q],
    w: [Float; Q],
    q_bar: [usize; Q],
    q_faces: [[usize; 3]; 4],
}

impl LatticeDescriptor {
    pub fn d2q9() -> Self {
        LatticeDescriptor {
            c: d2q9::C,
            w: d2q9::W,
            q_bar: d2q9::Q_BAR,
            q_faces: d2q9::Q_FACES,
        }
    }
}

impl Default for LatticeDescriptor {
    fn default() -> Self {
        LatticeDescriptor::d2q9()
    }
}

impl LatticeDescriptor {
    pub fn get_d(&self) -> usize {
        D
    }

    pub fn get_q(&self) -> usize {
        Q
    }

    /// # Examples
    /// ```
    /// # use lbwake::velocity_set::LatticeDescriptor;
    /// let descriptor = LatticeDescriptor::d2q9();
    ///
    /// let c = descriptor.get_c();
    /// assert_eq!(c[0], [0, 0]);
    /// assert_eq!(c[1], [1, 0]);
    /// assert_eq!(c[5], [1, 1]);
    /// ```
    pub fn get_c(&self) -> &[[i32; D]; Q] {
        &self.c
    }

    pub fn get_w(&self) -> &[Float; Q] {
        &self.w
    }

    pub fn get_q_bar(&self) -> &[usize; Q] {
        &self.q_bar
    }

    /// # Examples
    /// ```
    /// # use lbwake::velocity_set::LatticeDescriptor;
    /// let descriptor = LatticeDescriptor::d2q9();
    ///
    /// assert_eq!(descriptor.get_opposite_direction(0), 0);
    /// assert_eq!(descriptor.get_opposite_direction(1), 3);
    /// assert_eq!(descriptor.get_opposite_direction(5), 7);
    /// ```
    pub fn get_opposite_direction(&self, direction: usize) -> usize {
        self.q_bar[direction]
    }

    /// Directions whose velocity leaves the domain through `boundary_face`.
    pub fn get_q_faces(&self, boundary_face: &BoundaryFace) -> &[usize; 3] {
        &self.q_faces[*boundary_face as usize]
    }

    pub(crate) fn velocity(&self, density: Float, f: &[Float]) -> [Float; D] {
        d2q9::velocity_computation(density, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_d_and_q() {
        let descriptor = LatticeDescriptor::default();

        assert_eq!(descriptor.get_d(), 2);
        assert_eq!(descriptor.get_q(), 9);
    }

    #[test]
    fn test_rest_direction_comes_first() {
        let descriptor = LatticeDescriptor::default();

        assert_eq!(descriptor.get_c()[0], [0, 0]);
    }

    #[test]
    fn test_canonical_direction_set() {
        let c = LatticeDescriptor::default().get_c().to_vec();

        let axis = c.iter().filter(|c_i| c_i[0].abs() + c_i[1].abs() == 1).count();
        let diagonal = c.iter().filter(|c_i| c_i[0].abs() == 1 && c_i[1].abs() == 1).count();
        assert_eq!(axis, 4);
        assert_eq!(diagonal, 4);
        for c_i in c.iter() {
            assert_eq!(c.iter().filter(|c_j| *c_j == c_i).count(), 1);
        }
    }

    #[test]
    fn test_weights_are_normalized() {
        let w = LatticeDescriptor::default().get_w().to_owned();

        assert!(w.iter().all(|&w_i| w_i > 0.0));
        assert!((w.iter().sum::<Float>() - 1.0).abs() < 1e-15);
        assert!((w[0] - 4.0 / 9.0).abs() < 1e-12);
        assert!((w[1] - 1.0 / 9.0).abs() < 1e-12);
        assert!((w[5] - 1.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn test_opposite_direction_is_an_involution() {
        let descriptor = LatticeDescriptor::default();
        let c = descriptor.get_c();

        (0..Q).for_each(|i| {
            let i_bar = descriptor.get_opposite_direction(i);
            assert_eq!(descriptor.get_opposite_direction(i_bar), i);
            assert_eq!(c[i_bar], [-c[i][0], -c[i][1]]);
        });
    }

    #[test]
    fn test_get_q_faces() {
        let descriptor = LatticeDescriptor::default();

        assert_eq!(descriptor.get_q_faces(&West), &[3, 6, 7]);
        assert_eq!(descriptor.get_q_faces(&East), &[1, 5, 8]);
        assert_eq!(descriptor.get_q_faces(&South), &[4, 7, 8]);
        assert_eq!(descriptor.get_q_faces(&North), &[2, 5, 6]);
    }
}
