use clap::{Args, Parser, Subcommand};
use ctree_reduce::Strategy;
use std::path::PathBuf;

/// Compressor Tree Generator - Reduction trees for multi-operand arithmetic
#[derive(Parser, Debug)]
#[command(name = "treegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reduce a multi-operand sum into a compressor tree
    Sum(SumCommand),
    /// Reduce a multiplier's partial products into a compressor tree
    Mul(MulCommand),
}

#[derive(Parser, Debug)]
pub struct SumCommand {
    /// Number of operands in the sum
    #[arg(
        short = 'n',
        long = "operands",
        default_value_t = 4,
        value_name = "COUNT",
        help = "Number of equal-width operands to add"
    )]
    pub operands: usize,

    /// Width of each operand
    #[arg(
        short = 'w',
        long = "width",
        default_value_t = 8,
        value_name = "BITS",
        help = "Width of each operand in bits"
    )]
    pub width: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
pub struct MulCommand {
    /// Width of each factor
    #[arg(
        short = 'w',
        long = "width",
        default_value_t = 8,
        value_name = "BITS",
        help = "Width of each multiplier factor in bits"
    )]
    pub width: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Reduction schedule to run
    #[arg(
        short = 's',
        long = "strategy",
        default_value_t = Strategy::Dadda,
        value_name = "STRATEGY",
        help = "Reduction strategy: wallace or dadda"
    )]
    pub strategy: Strategy,

    /// Output netlist file path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the reduced netlist as a .bench file"
    )]
    pub output: Option<PathBuf>,

    /// Number of random assignments to simulate
    #[arg(
        long = "verify",
        value_name = "RUNS",
        help = "Simulate N random input assignments and check the arithmetic"
    )]
    pub verify: Option<usize>,

    /// Seed for the verification RNG
    #[arg(
        long = "seed",
        default_value_t = 0,
        value_name = "SEED",
        help = "RNG seed for the verification runs"
    )]
    pub seed: u64,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
