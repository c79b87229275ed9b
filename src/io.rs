use colored::*;
use std::fs;
use std::io;
use std::path::Path;

pub const DATA_PATH: &str = "./data";
pub const POST_PROCESSING_PATH: &str = "./post_processing";
pub const COORDINATES_FILE: &str = "coordinates.csv";
pub const DENSITY_FILE: &str = "density.csv";
pub const VELOCITY_FILE: &str = "velocity.csv";
pub const VORTICITY_FILE: &str = "vorticity.csv";
pub const CHECKPOINT_FILE: &str = "checkpoint.csv";

#[derive(Debug, Clone, PartialEq)]
pub enum WriteDataMode {
    Frequency(usize),
    ListOfSteps(Vec<usize>),
}

impl WriteDataMode {
    pub fn is_write_step(&self, time_step: usize) -> bool {
        match self {
            WriteDataMode::Frequency(n) => *n > 0 && time_step % n == 0,
            WriteDataMode::ListOfSteps(list) => list.contains(&time_step),
        }
    }

    /// First write step strictly after `time_step`, if any.
    ///
    /// # Examples
    /// ```
    /// # use lbwake::io::WriteDataMode;
    /// assert_eq!(WriteDataMode::Frequency(100).next_write_step(0), Some(100));
    /// assert_eq!(WriteDataMode::Frequency(100).next_write_step(250), Some(300));
    /// assert_eq!(WriteDataMode::ListOfSteps(vec![5, 50]).next_write_step(5), Some(50));
    /// assert_eq!(WriteDataMode::ListOfSteps(vec![5, 50]).next_write_step(50), None);
    /// ```
    pub fn next_write_step(&self, time_step: usize) -> Option<usize> {
        match self {
            WriteDataMode::Frequency(0) => None,
            WriteDataMode::Frequency(n) => Some((time_step / n + 1) * n),
            WriteDataMode::ListOfSteps(list) => {
                list.iter().filter(|&&step| step > time_step).min().copied()
            }
        }
    }
}

pub fn create_case_directories() -> io::Result<()> {
    let list_of_paths = [DATA_PATH, POST_PROCESSING_PATH];
    for path_str in list_of_paths {
        let path = Path::new(path_str);
        if !path.exists() {
            println!("Creating the {} path.\n", path_str.yellow().bold());
            fs::create_dir_all(path)?;
        } else {
            println!("The {} path already exists.\n", path_str.yellow().bold());
        }
    }
    Ok(())
}

pub fn progress_bar(current: usize, total: usize) {
    let current = current + 1;
    let percentage = current as f64 / total.max(1) as f64;
    let bar_length = 50;
    let filled_length = ((bar_length as f64 * percentage) as usize).min(bar_length);
    let completed = "█".repeat(filled_length);
    let remaining = "░".repeat(bar_length - filled_length);
    let bar = completed + &remaining;
    let percentage = percentage * 100.0;
    print!("\r{}", format!("{bar} {percentage:.2}%").green().bold());
    let _ = io::Write::flush(&mut io::stdout());
    if current >= total {
        println!();
        println!();
    }
}

pub(crate) fn format_csv_line<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .map(|value| format!("{value:.8e}"))
        .collect::<Vec<String>>()
        .join(",")
}
