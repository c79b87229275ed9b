use crate::prelude_crate::*;
use crate::velocity_set::D;

/// Zeroth moment of the populations of one cell.
pub fn density(f: &[Float]) -> Float {
    f.iter().sum::<Float>()
}

/// Density and velocity of one cell. An empty cell has zero velocity.
///
/// # Examples
/// ```
/// # use lbwake::kernel;
/// # use lbwake::velocity_set::LatticeDescriptor;
/// let descriptor = LatticeDescriptor::d2q9();
/// let f = [0.0, 0.2, 0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0];
///
/// let (density, velocity) = kernel::moments(&f, &descriptor);
///
/// assert!((density - 0.3).abs() < 1e-12);
/// assert!((velocity[0] - 1.0 / 3.0).abs() < 1e-12);
/// assert_eq!(velocity[1], 0.0);
/// ```
pub fn moments(f: &[Float], descriptor: &LatticeDescriptor) -> (Float, [Float; D]) {
    let density = density(f);
    if density == 0.0 {
        return (density, [0.0; D]);
    }
    (density, descriptor.velocity(density, f))
}

pub fn equilibrium(
    density: Float,
    velocity: &[Float; D],
    descriptor: &LatticeDescriptor,
) -> [Float; Q] {
    let c = descriptor.get_c();
    let w = descriptor.get_w();
    let mut f_eq = [0.0; Q];
    let u_dot_u = velocity.iter().map(|u_x| u_x * u_x).sum::<Float>();
    (0..Q).for_each(|i| {
        let u_dot_c = velocity
            .iter()
            .zip(c[i].iter())
            .map(|(u_x, c_x)| u_x * (*c_x as Float))
            .sum::<Float>();
        f_eq[i] = w[i]
            * density
            * (1.0 + u_dot_c * CS_2_INV + 0.5 * u_dot_c * u_dot_c * CS_4_INV
                - 0.5 * u_dot_u * CS_2_INV);
    });
    f_eq
}

/// Relaxes the populations of one cell towards their local equilibrium.
pub fn bgk_collision(f: &mut [Float], tau: Float, descriptor: &LatticeDescriptor) {
    let (density, velocity) = moments(f, descriptor);
    let f_eq = equilibrium(density, &velocity, descriptor);
    let omega = DELTA_T / tau;
    let omega_prime = 1.0 - omega;
    f.iter_mut().zip(f_eq.iter()).for_each(|(f_i, f_eq_i)| {
        *f_i = omega_prime * *f_i + omega * f_eq_i;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equilibrium_at_rest_is_weighted_density() {
        let descriptor = LatticeDescriptor::default();
        let w = descriptor.get_w();

        for density in [0.5, 1.0, 100.0] {
            let f_eq = equilibrium(density, &[0.0, 0.0], &descriptor);
            for i in 0..Q {
                assert!((f_eq[i] - w[i] * density).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_equilibrium_recovers_its_moments() {
        let descriptor = LatticeDescriptor::default();
        let density = 1.2;
        let velocity = [0.05, -0.02];

        let f_eq = equilibrium(density, &velocity, &descriptor);
        let (actual_density, actual_velocity) = moments(&f_eq, &descriptor);

        assert!((actual_density - density).abs() < 1e-12);
        for (a, b) in actual_velocity.iter().zip(velocity.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_moments_of_empty_cell() {
        let descriptor = LatticeDescriptor::default();

        let (density, velocity) = moments(&[0.0; Q], &descriptor);

        assert_eq!(density, 0.0);
        assert_eq!(velocity, [0.0, 0.0]);
    }

    #[test]
    fn test_bgk_collision_fixed_point() {
        let descriptor = LatticeDescriptor::default();
        let f_eq = equilibrium(1.0, &[0.08, 0.03], &descriptor);
        let mut f = f_eq;

        for _ in 0..10 {
            bgk_collision(&mut f, 0.6, &descriptor);
        }

        for (a, b) in f.iter().zip(f_eq.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bgk_collision_conserves_mass_and_momentum() {
        let descriptor = LatticeDescriptor::default();
        let mut f = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let (density, velocity) = moments(&f, &descriptor);

        bgk_collision(&mut f, 0.8, &descriptor);

        let (actual_density, actual_velocity) = moments(&f, &descriptor);
        assert!((actual_density - density).abs() < 1e-12);
        for (a, b) in actual_velocity.iter().zip(velocity.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bgk_collision_with_unit_tau_reaches_equilibrium() {
        let descriptor = LatticeDescriptor::default();
        let mut f = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let (density, velocity) = moments(&f, &descriptor);
        let f_eq = equilibrium(density, &velocity, &descriptor);

        bgk_collision(&mut f, 1.0, &descriptor);

        for (a, b) in f.iter().zip(f_eq.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
