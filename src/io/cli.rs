//! Command-line interface for deciding strip tileability from a tile file

use crate::algorithm::equivalence::Folding;
use crate::algorithm::pruning::PatternPruner;
use crate::algorithm::reconstruct::Tiling;
use crate::algorithm::search::{Outcome, Progress, SearchOptions, StopReason, Tiler};
use crate::io::configuration::{
    DEFAULT_SEED, DEFAULT_WIDTH, PLACEMENT_LABELS, PROGRESS_REFRESH_INTERVAL,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::SearchProgress;
use crate::io::shapes::{load_patterns, load_tiles};
use crate::spatial::TileShape;
use crate::spatial::transform::expand_all;
use clap::Parser;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "striptile")]
#[command(
    author,
    version,
    about = "Decide whether polyomino tiles can cover an infinite strip of fixed width"
)]
/// Command-line arguments for the strip tiling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tile file: '#' grids separated by blank lines
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Strip width in columns
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Also try every rotation of each tile (90°, 180°, 270°)
    #[arg(short = 'r', long)]
    pub rotate: bool,

    /// Also try the mirror image of each tile
    #[arg(short = 'm', long)]
    pub mirror: bool,

    /// Treat a frontier and its mirror image as the same search state (implies --mirror)
    #[arg(short = 'f', long)]
    pub fold_mirror: bool,

    /// Pattern file of forbidden local configurations used for pruning
    #[arg(long, value_name = "PATTERNS")]
    pub forbid: Option<PathBuf>,

    /// Give up after expanding this many frontiers
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Give up after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Shuffle candidate tile order (the verdict does not depend on it)
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for --shuffle
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Search limits requested on the command line
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            record_links: true,
            max_nodes: self.max_nodes,
            time_limit: self.timeout.map(Duration::from_secs),
        }
    }
}

/// Runs one search as described by the command line
pub struct Runner {
    cli: Cli,
    progress: Option<SearchProgress>,
}

impl Runner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(SearchProgress::new);
        Self { cli, progress }
    }

    /// Build the tiler: load, orient, order and pack the tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the tile file cannot be loaded or a tile does not fit the strip
    pub fn build_tiler(&self) -> Result<Tiler> {
        if self.cli.width == 0 {
            return Err(invalid_parameter(
                "width",
                &self.cli.width,
                &"strip must be at least one column wide",
            ));
        }

        // Wider strips are refused by Tiler::new below
        let limit = u32::try_from(self.cli.width).unwrap_or(u32::MAX);
        let raw = load_tiles(&self.cli.tiles, limit)?;
        // Folding is only sound when every tile's mirror image is available
        let reflect = self.cli.mirror || self.cli.fold_mirror;
        let mut tiles = expand_all(&raw, self.cli.rotate, reflect);
        if self.cli.shuffle {
            let mut rng = StdRng::seed_from_u64(self.cli.seed);
            tiles.shuffle(&mut rng);
        }

        info!(
            tiles = raw.len(),
            orientations = tiles.len(),
            width = self.cli.width,
            "loaded tiles"
        );
        Tiler::new(self.cli.width, &tiles)
    }

    /// Build the pruner from the optional pattern file
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file cannot be loaded
    pub fn build_pruner(&self) -> Result<PatternPruner> {
        match &self.cli.forbid {
            Some(path) => Ok(PatternPruner::new(load_patterns(path)?)),
            None => Ok(PatternPruner::default()),
        }
    }

    /// Run the search and return the outcome together with its report
    ///
    /// # Errors
    ///
    /// Returns an error if the tiles or patterns cannot be loaded
    pub fn run(&mut self) -> Result<(Outcome, String)> {
        let tiler = self.build_tiler()?;
        let pruner = self.build_pruner()?;
        let folding = Folding::from_flag(self.cli.fold_mirror);

        let mut search = tiler.search(folding, pruner, self.cli.search_options());
        let outcome = loop {
            if let Progress::Finished(outcome) = search.step() {
                break outcome;
            }
            if search.stats().expanded % PROGRESS_REFRESH_INTERVAL == 0 {
                if let Some(progress) = &self.progress {
                    progress.update(search.stats());
                }
            }
        };

        if let Some(progress) = &self.progress {
            progress.finish(&outcome, search.stats());
        }

        let report = report(&outcome, tiler.tiles(), self.cli.width);
        Ok((outcome, report))
    }

    /// Run and print the report to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if the tiles or patterns cannot be loaded
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<()> {
        let (_, report) = self.run()?;
        print!("{report}");
        Ok(())
    }
}

/// Human-readable verdict, with the witness tiling drawn when there is one
pub fn report(outcome: &Outcome, tiles: &[TileShape], width: usize) -> String {
    match outcome {
        Outcome::Tileable(Some(tiling)) => {
            let mut text = format!(
                "Tileable: width {width}, {} rows, {} placements\n",
                tiling.height,
                tiling.len()
            );
            text.push_str(&draw(tiling, tiles));
            text
        }
        Outcome::Tileable(None) => format!("Tileable: width {width}\n"),
        Outcome::Untileable => format!("Not tileable: width {width}\n"),
        Outcome::Unknown(StopReason::NodeBudget) => {
            format!("Unknown: node budget exhausted at width {width}\n")
        }
        Outcome::Unknown(StopReason::TimeLimit) => {
            format!("Unknown: time limit reached at width {width}\n")
        }
    }
}

/// Draw a tiling top row first, one label per placement
pub fn draw(tiling: &Tiling, tiles: &[TileShape]) -> String {
    let labels: Vec<char> = PLACEMENT_LABELS.chars().collect();
    let grid = tiling.label_grid(tiles);
    let mut text = String::new();
    for row in grid.outer_iter().rev() {
        for &number in row {
            let label = match number.checked_sub(1) {
                Some(index) => labels.get(index % labels.len()).copied().unwrap_or('?'),
                None => ' ',
            };
            text.push(label);
        }
        text.push('\n');
    }
    text
}
