use super::bc::BoundaryCondition::{self, *};
use crate::FACES_2D;
use crate::prelude_crate::*;

// ------------------------------------------------------------------------ ENUM: Obstacle

/// Parametric solid shapes. Cell `(x, y)` is tested at its lattice coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    None,
    Disk { center: [Float; 2], radius: Float },
    /// Inclusive cell bounds.
    Rectangle { min: [usize; 2], max: [usize; 2] },
}

impl Obstacle {
    /// # Examples
    /// ```
    /// # use lbwake::momentum::Obstacle;
    /// let disk = Obstacle::Disk { center: [5.0, 5.0], radius: 2.0 };
    ///
    /// assert!(disk.contains(5, 5));
    /// assert!(disk.contains(6, 6));
    /// assert!(!disk.contains(7, 5));
    /// assert!(!Obstacle::None.contains(5, 5));
    /// ```
    pub fn contains(&self, x: usize, y: usize) -> bool {
        match self {
            Obstacle::None => false,
            Obstacle::Disk { center, radius } => {
                let dx = x as Float - center[0];
                let dy = y as Float - center[1];
                dx * dx + dy * dy < radius * radius
            }
            Obstacle::Rectangle { min, max } => {
                (min[0]..=max[0]).contains(&x) && (min[1]..=max[1]).contains(&y)
            }
        }
    }
}

// ------------------------------------------------------------------------ STRUCT: Geometry

/// Domain size, static obstacle mask and the boundary condition of each face.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    width: usize,
    height: usize,
    node_types: Arc<Vec<NodeType>>,
    solid_cells: Vec<usize>,
    boundary_conditions: [BoundaryCondition; 4],
}

impl Geometry {
    /// Builds the mask of a `width` x `height` open channel: zero-gradient
    /// West and East faces, periodic South and North faces.
    pub fn new<P>(width: usize, height: usize, obstacle_predicate: P) -> LbResult<Self>
    where
        P: Fn(usize, usize) -> bool,
    {
        if width == 0 || height == 0 {
            return Err(LbError::invalid_domain(
                width,
                height,
                "width and height must be positive",
            ));
        }
        let node_types = (0..width * height)
            .map(|cell| match obstacle_predicate(cell % width, cell / width) {
                true => Solid,
                false => Fluid,
            })
            .collect::<Vec<NodeType>>();
        Geometry::from_node_types(width, height, node_types)
    }

    pub fn from_obstacle(width: usize, height: usize, obstacle: &Obstacle) -> LbResult<Self> {
        Geometry::new(width, height, |x, y| obstacle.contains(x, y))
    }

    pub fn from_node_types(
        width: usize,
        height: usize,
        node_types: Vec<NodeType>,
    ) -> LbResult<Self> {
        if width == 0 || height == 0 {
            return Err(LbError::invalid_domain(
                width,
                height,
                "width and height must be positive",
            ));
        }
        if node_types.len() != width * height {
            return Err(LbError::invalid_domain(
                width,
                height,
                format!("expected {} node types, got {}", width * height, node_types.len()),
            ));
        }
        let solid_cells = node_types
            .iter()
            .enumerate()
            .filter(|(_, node_type)| matches!(node_type, Solid))
            .map(|(cell, _)| cell)
            .collect::<Vec<usize>>();
        if solid_cells.len() == node_types.len() {
            return Err(LbError::invalid_domain(
                width,
                height,
                "the obstacle covers every cell",
            ));
        }
        let geometry = Geometry {
            width,
            height,
            node_types: Arc::new(node_types),
            solid_cells,
            boundary_conditions: [ZeroGradient, ZeroGradient, Periodic, Periodic],
        };
        geometry.check_boundary_conditions()?;
        Ok(geometry)
    }

    pub fn with_boundary_condition(
        mut self,
        boundary_face: BoundaryFace,
        boundary_condition: BoundaryCondition,
    ) -> LbResult<Self> {
        self.boundary_conditions[boundary_face as usize] = boundary_condition;
        self.check_boundary_conditions()?;
        Ok(self)
    }

    pub fn with_boundary_conditions(
        self,
        boundary_conditions: &[(BoundaryFace, BoundaryCondition)],
    ) -> LbResult<Self> {
        boundary_conditions
            .iter()
            .try_fold(self, |geometry, &(face, condition)| {
                geometry.with_boundary_condition(face, condition)
            })
    }

    /// Every face periodic.
    pub fn into_periodic(self) -> LbResult<Self> {
        self.with_boundary_conditions(&FACES_2D.map(|face| (face, Periodic)))
    }

    fn check_boundary_conditions(&self) -> LbResult<()> {
        FACES_2D.iter().try_for_each(|face| {
            let extent = match face {
                West | East => self.width,
                South | North => self.height,
            };
            match (self.get_boundary_condition(face), extent) {
                (ZeroGradient, 0..=1) => Err(LbError::invalid_domain(
                    self.width,
                    self.height,
                    format!("a zero-gradient {face:?} face needs at least two cells across"),
                )),
                _ => Ok(()),
            }
        })
    }
}

impl Geometry {
    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get_number_of_cells(&self) -> usize {
        self.width * self.height
    }

    /// # Examples
    /// ```
    /// # use lbwake::momentum::Geometry;
    /// let geometry = Geometry::new(10, 4, |_, _| false).unwrap();
    ///
    /// assert_eq!(geometry.get_cell(0, 0), 0);
    /// assert_eq!(geometry.get_cell(3, 2), 23);
    /// assert_eq!(geometry.get_index(23), (3, 2));
    /// ```
    pub fn get_cell(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    pub fn get_index(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    pub fn get_node_type(&self, x: usize, y: usize) -> &NodeType {
        &self.node_types[self.get_cell(x, y)]
    }

    pub fn get_node_types(&self) -> &Arc<Vec<NodeType>> {
        &self.node_types
    }

    pub fn get_solid_cells(&self) -> &Vec<usize> {
        &self.solid_cells
    }

    pub fn get_boundary_condition(&self, boundary_face: &BoundaryFace) -> &BoundaryCondition {
        &self.boundary_conditions[*boundary_face as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(
            Geometry::new(0, 10, |_, _| false),
            Err(LbError::InvalidDomain { .. })
        ));
        assert!(matches!(
            Geometry::new(10, 0, |_, _| false),
            Err(LbError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_fully_covered_domain_is_rejected() {
        assert!(matches!(
            Geometry::new(4, 4, |_, _| true),
            Err(LbError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_domain_without_obstacle_is_valid() {
        let geometry = Geometry::from_obstacle(4, 4, &Obstacle::None).unwrap();

        assert!(geometry.get_solid_cells().is_empty());
        assert_eq!(geometry.get_number_of_cells(), 16);
    }

    #[test]
    fn test_zero_gradient_needs_two_cells() {
        assert!(Geometry::new(1, 5, |_, _| false).is_err());
        assert!(
            Geometry::new(1, 5, |_, _| false)
                .and_then(Geometry::into_periodic)
                .is_err()
        );

        let geometry = Geometry::new(5, 1, |_, _| false).unwrap();
        assert!(
            geometry
                .with_boundary_condition(North, ZeroGradient)
                .is_err()
        );
    }

    #[test]
    fn test_default_boundary_conditions() {
        let geometry = Geometry::new(10, 10, |_, _| false).unwrap();

        assert_eq!(geometry.get_boundary_condition(&West), &ZeroGradient);
        assert_eq!(geometry.get_boundary_condition(&East), &ZeroGradient);
        assert_eq!(geometry.get_boundary_condition(&South), &Periodic);
        assert_eq!(geometry.get_boundary_condition(&North), &Periodic);

        let geometry = geometry.into_periodic().unwrap();
        assert_eq!(geometry.get_boundary_condition(&West), &Periodic);
        assert_eq!(geometry.get_boundary_condition(&East), &Periodic);
    }

    #[test]
    fn test_disk_mask() {
        let obstacle = Obstacle::Disk {
            center: [5.0, 5.0],
            radius: 2.0,
        };
        let geometry = Geometry::from_obstacle(10, 10, &obstacle).unwrap();

        assert_eq!(geometry.get_solid_cells().len(), 9);
        assert_eq!(geometry.get_node_type(5, 5), &Solid);
        assert_eq!(geometry.get_node_type(4, 6), &Solid);
        assert_eq!(geometry.get_node_type(3, 5), &Fluid);
        assert_eq!(geometry.get_node_type(0, 0), &Fluid);
    }

    #[test]
    fn test_rectangle_mask() {
        let obstacle = Obstacle::Rectangle {
            min: [2, 1],
            max: [3, 2],
        };
        let geometry = Geometry::from_obstacle(6, 4, &obstacle).unwrap();

        let solids = geometry
            .get_solid_cells()
            .iter()
            .map(|&cell| geometry.get_index(cell))
            .collect::<Vec<(usize, usize)>>();
        assert_eq!(solids, vec![(2, 1), (3, 1), (2, 2), (3, 2)]);
    }
}
