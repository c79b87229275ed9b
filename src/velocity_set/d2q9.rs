use crate::constants::Float;

pub(super) const D: usize = 2;

pub(super) const Q: usize = 9;

pub(super) const C: [[i32; D]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

pub(super) const W: [Float; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

pub(super) const Q_BAR: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

// Directions leaving the domain through each face.
const Q_WEST: [usize; 3] = [3, 6, 7];

const Q_EAST: [usize; 3] = [1, 5, 8];

const Q_SOUTH: [usize; 3] = [4, 7, 8];

const Q_NORTH: [usize; 3] = [2, 5, 6];

pub(super) const Q_FACES: [[usize; 3]; 4] = [Q_WEST, Q_EAST, Q_SOUTH, Q_NORTH];

pub(super) fn velocity_computation(density: Float, f: &[Float]) -> [Float; D] {
    [
        (1.0 / density) * (f[1] - f[3] + f[5] - f[6] - f[7] + f[8]),
        (1.0 / density) * (f[2] - f[4] + f[5] + f[6] - f[7] - f[8]),
    ]
}
