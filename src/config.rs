use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 30)]
    pub grid_size: usize,

    /// Fraction of cells turned into walls at startup.
    #[arg(long, default_value_t = 0.25)]
    pub wall_density: f64,

    /// bfs, dfs, ucs, dls, iddfs, bidir, or all
    #[arg(long, default_value = "bfs")]
    pub algorithm: String,

    /// Depth bound for dls.
    #[arg(long, default_value_t = 20)]
    pub depth_limit: usize,

    /// Maximum sweep depth for iddfs.
    #[arg(long, default_value_t = 100)]
    pub max_depth: usize,

    /// Chance per tick that a dynamic obstacle appears.
    #[arg(long, default_value_t = 0.03)]
    pub obstacle_probability: f64,

    #[arg(long, default_value_t = 50)]
    pub max_obstacles: usize,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Fixed RNG seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
