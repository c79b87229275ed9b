// ------------------------------------------------------------------------------- IMPORTS

use super::post::PostFunction;
use super::{Geometry, Lattice, Parameters, PopulationField};
use crate::io::format_csv_line;
use crate::prelude_crate::*;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

const CHECKPOINT_HEADER: &str = "width,height,tau,reference_density,time_step";

impl Lattice {
    pub fn write_coordinates<P>(&self, data_path: P) -> LbResult<()>
    where
        P: AsRef<Path>,
    {
        let path = data_path.as_ref().join(crate::io::COORDINATES_FILE);
        let mut file = BufWriter::new(File::create(path)?);
        writeln!(file, "i,j,node_type")?;
        let geometry = self.get_geometry();
        for cell in 0..geometry.get_number_of_cells() {
            let (x, y) = geometry.get_index(cell);
            let node_type = match geometry.get_node_type(x, y) {
                Fluid => "fluid",
                Solid => "solid",
            };
            writeln!(file, "{x},{y},{node_type}")?;
        }
        Ok(())
    }

    /// Writes density, velocity and vorticity under `data_path/<time_step>/`.
    pub fn write_snapshot<P>(&self, data_path: P) -> LbResult<()>
    where
        P: AsRef<Path>,
    {
        let step_path = data_path.as_ref().join(self.get_time_step().to_string());
        fs::create_dir_all(&step_path)?;
        let macroscopic = self.macroscopic();

        let mut file = BufWriter::new(File::create(step_path.join(crate::io::DENSITY_FILE))?);
        writeln!(file, "density")?;
        for rho in macroscopic.density.iter() {
            writeln!(file, "{}", format_csv_line([rho]))?;
        }

        let mut file = BufWriter::new(File::create(step_path.join(crate::io::VELOCITY_FILE))?);
        writeln!(file, "velocity_x,velocity_y")?;
        for (u_x, u_y) in macroscopic
            .velocity_x
            .iter()
            .zip(macroscopic.velocity_y.iter())
        {
            writeln!(file, "{}", format_csv_line([u_x, u_y]))?;
        }

        let mut file = BufWriter::new(File::create(step_path.join(crate::io::VORTICITY_FILE))?);
        writeln!(file, "vorticity")?;
        for y in 0..macroscopic.get_height() {
            for x in 0..macroscopic.get_width() {
                writeln!(file, "{}", format_csv_line([&macroscopic.get_vorticity(x, y)]))?;
            }
        }
        Ok(())
    }

    pub fn write_post_processing<P>(
        &self,
        post_function: &PostFunction,
        post_processing_path: P,
    ) -> LbResult<()>
    where
        P: AsRef<Path>,
    {
        if self.get_time_step() % post_function.interval != 0 {
            return Ok(());
        }
        let post_results = (post_function.function)(self);
        let path = post_processing_path.as_ref().join(&post_function.file_name);
        let write_header = !path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if write_header {
            write!(file, "time_step")?;
            for post_result in post_results.iter() {
                write!(file, ",{}", post_result.name)?;
            }
            writeln!(file)?;
        }
        write!(file, "{}", self.get_time_step())?;
        for post_result in post_results.iter() {
            write!(file, ",{:.8e}", post_result.value)?;
        }
        writeln!(file)?;
        Ok(())
    }

    /// Full-precision dump of the population field and the scalars needed
    /// to resume the run.
    pub fn write_checkpoint<W>(&self, writer: W, reference_density: Float) -> LbResult<()>
    where
        W: Write,
    {
        let mut writer = BufWriter::new(writer);
        writeln!(writer, "{CHECKPOINT_HEADER}")?;
        writeln!(
            writer,
            "{},{},{:e},{:e},{}",
            self.get_nx(),
            self.get_ny(),
            self.get_tau(),
            reference_density,
            self.get_time_step()
        )?;
        let field = self.get_population_field();
        for (f, node_type) in field
            .get_values()
            .chunks(Q)
            .zip(field.get_node_types().iter())
        {
            write!(writer, "{}", *node_type as u8)?;
            for f_i in f {
                write!(writer, ",{f_i:e}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_checkpoint_file<P>(&self, path: P, reference_density: Float) -> LbResult<()>
    where
        P: AsRef<Path>,
    {
        self.write_checkpoint(File::create(path)?, reference_density)
    }
}

// ---------------------------------------------------------------------- STRUCT: Checkpoint

#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub width: usize,
    pub height: usize,
    pub tau: Float,
    pub reference_density: Float,
    pub time_step: usize,
    pub node_types: Vec<NodeType>,
    pub values: Vec<Float>,
}

impl Checkpoint {
    pub fn read<R>(reader: R) -> LbResult<Self>
    where
        R: BufRead,
    {
        let mut lines = reader.lines();
        let mut next_line = |what: &str| -> LbResult<String> {
            lines
                .next()
                .transpose()?
                .ok_or_else(|| LbError::Checkpoint(format!("missing {what}")))
        };
        if next_line("header")?.trim() != CHECKPOINT_HEADER {
            return Err(LbError::Checkpoint("unexpected header".to_string()));
        }
        let scalars = next_line("scalars")?;
        let scalars = scalars.trim().split(',').collect::<Vec<&str>>();
        if scalars.len() != 5 {
            return Err(LbError::Checkpoint(format!(
                "expected 5 scalars, got {}",
                scalars.len()
            )));
        }
        let width = parse_value::<usize>(scalars[0])?;
        let height = parse_value::<usize>(scalars[1])?;
        let tau = parse_value::<Float>(scalars[2])?;
        let reference_density = parse_value::<Float>(scalars[3])?;
        let time_step = parse_value::<usize>(scalars[4])?;

        if width == 0 || height == 0 {
            return Err(LbError::Checkpoint(format!("invalid dimensions {width}x{height}")));
        }
        let number_of_cells = width
            .checked_mul(height)
            .filter(|cells| cells.checked_mul(Q).is_some())
            .ok_or_else(|| LbError::Checkpoint("dimensions overflow".to_string()))?;
        // Grown line by line: the header is not trusted for allocation.
        let mut node_types = Vec::new();
        let mut values = Vec::new();
        for cell in 0..number_of_cells {
            let line = next_line(&format!("cell {cell}"))?;
            let items = line.trim().split(',').collect::<Vec<&str>>();
            if items.len() != Q + 1 {
                return Err(LbError::Checkpoint(format!(
                    "cell {cell}: expected {} values, got {}",
                    Q + 1,
                    items.len()
                )));
            }
            node_types.push(match items[0] {
                "0" => Fluid,
                "1" => Solid,
                other => {
                    return Err(LbError::Checkpoint(format!(
                        "cell {cell}: invalid node type {other}"
                    )));
                }
            });
            for item in &items[1..] {
                values.push(parse_value::<Float>(item)?);
            }
        }
        Ok(Checkpoint {
            width,
            height,
            tau,
            reference_density,
            time_step,
            node_types,
            values,
        })
    }

    pub fn read_file<P>(path: P) -> LbResult<Self>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Checkpoint::read(std::io::BufReader::new(file))
    }

    /// Rebuilds the driver with the boundary conditions of `params`.
    pub fn into_lattice(self, params: &Parameters) -> LbResult<Lattice> {
        let geometry = Geometry::from_node_types(self.width, self.height, self.node_types)?
            .with_boundary_conditions(&params.boundary_conditions)?;
        let f = PopulationField::from_values(&geometry, self.values)?;
        let mut lattice = Lattice::new(
            Arc::new(LatticeDescriptor::d2q9()),
            Arc::new(geometry),
            self.tau,
            f,
        )?;
        lattice.set_time_step(self.time_step);
        Ok(lattice)
    }
}

fn parse_value<T>(item: &str) -> LbResult<T>
where
    T: std::str::FromStr,
{
    item.trim()
        .parse::<T>()
        .map_err(|_| LbError::Checkpoint(format!("cannot parse value '{item}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_restores_the_run_exactly() {
        let params = Parameters::test_default();
        let mut lattice = Lattice::from_parameters(&params).unwrap();
        lattice.run(7);
        let mut buffer = Vec::new();

        lattice
            .write_checkpoint(&mut buffer, params.reference_density)
            .unwrap();
        let checkpoint = Checkpoint::read(buffer.as_slice()).unwrap();

        assert_eq!(checkpoint.width, params.width);
        assert_eq!(checkpoint.height, params.height);
        assert_eq!(checkpoint.tau, params.tau);
        assert_eq!(checkpoint.reference_density, params.reference_density);
        assert_eq!(checkpoint.time_step, 7);

        let mut restored = checkpoint.into_lattice(&params).unwrap();
        assert_eq!(restored.get_population_field(), lattice.get_population_field());
        assert_eq!(restored.get_time_step(), 7);

        lattice.run(3);
        restored.run(3);
        assert_eq!(restored.get_population_field(), lattice.get_population_field());
    }

    #[test]
    fn test_truncated_checkpoint_is_rejected() {
        let lattice = Lattice::test_default();
        let mut buffer = Vec::new();
        lattice.write_checkpoint(&mut buffer, 1.0).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let truncated = text.lines().take(10).collect::<Vec<&str>>().join("\n");

        assert!(matches!(
            Checkpoint::read(truncated.as_bytes()),
            Err(LbError::Checkpoint(_))
        ));
    }

    #[test]
    fn test_checkpoint_with_oversized_or_empty_dimensions_is_rejected() {
        let overflowing = format!("{CHECKPOINT_HEADER}\n4294967296,4294967296,6e-1,1e0,0\n");
        let huge = format!("{CHECKPOINT_HEADER}\n100000,100000,6e-1,1e0,0\n0,1,1,1,1,1,1,1,1,1\n");
        let empty = format!("{CHECKPOINT_HEADER}\n0,4,6e-1,1e0,0\n");

        for text in [overflowing, huge, empty] {
            assert!(matches!(
                Checkpoint::read(text.as_bytes()),
                Err(LbError::Checkpoint(_))
            ));
        }
    }

    #[test]
    fn test_checkpoint_with_bad_header_is_rejected() {
        let text = "width,height\n4,4\n";

        assert!(matches!(
            Checkpoint::read(text.as_bytes()),
            Err(LbError::Checkpoint(_))
        ));
    }
}
