//! CLI tool for building compressor trees over multi-operand arithmetic.
//!
//! Decomposes a multi-operand sum or a multiplication into a rank matrix,
//! reduces it with the selected strategy, and optionally simulates random
//! assignments and writes the result as a `.bench` netlist.

mod cli;
mod decompose;
mod writer;

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result, anyhow, ensure};
use cli::{Cli, Command, CommonArgs};
use ctree_netlist::{Netlist, NodeId, PassMark, SignalId, evaluate_netlist_direct, logic_depth};
use ctree_reduce::reduce;
use decompose::Instance;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = Cli::parse_args();

    match args.command {
        Command::Sum(sum_args) => run_sum(sum_args),
        Command::Mul(mul_args) => run_mul(mul_args),
    }
}

/// A standalone run has a single consumer node and a single traversal pass,
/// so every synthesized cell carries the same tags.
fn tool_tags() -> (NodeId, PassMark) {
    (NodeId::from(0), PassMark::from(1))
}

fn run_sum(args: cli::SumCommand) -> Result<()> {
    ensure!(args.operands >= 1, "operand count must be at least 1");
    ensure!(args.operands <= 4096, "operand count too large (max 4096)");
    ensure!(args.width >= 1, "operand width must be at least 1");
    ensure!(args.width <= 64, "operand width too large (max 64 bits)");

    println!("Compressor Tree Generator - Multi-Operand Sum");
    println!("=============================================");
    println!("Operands: {} x {} bits", args.operands, args.width);
    println!("Strategy: {}", args.common.strategy);
    println!();

    let instance = decompose::sum_instance(args.operands, args.width);
    run_common(&args.common, instance, |words| words.iter().sum())
}

fn run_mul(args: cli::MulCommand) -> Result<()> {
    ensure!(args.width >= 1, "factor width must be at least 1");
    ensure!(args.width <= 63, "factor width too large (max 63 bits)");

    println!("Compressor Tree Generator - Multiplier");
    println!("======================================");
    println!("Factors:  {0} x {0} bits", args.width);
    println!("Strategy: {}", args.common.strategy);
    println!();

    let (origin, mark) = tool_tags();
    let instance = decompose::mul_instance(args.width, origin, mark);
    run_common(&args.common, instance, |words| words[0] * words[1])
}

fn run_common(
    common: &CommonArgs,
    instance: Instance,
    expected: impl Fn(&[u128]) -> u128,
) -> Result<()> {
    let Instance {
        mut netlist,
        ranks,
        operands,
    } = instance;

    let num_ranks = ranks.len();
    let max_height = ranks.max_height();
    let (origin, mark) = tool_tags();

    let outputs = reduce(common.strategy, origin, mark, &mut netlist, ranks);

    netlist
        .validate()
        .map_err(|e| anyhow!("netlist validation failed: {e}"))?;

    let counts = netlist.gate_counts();
    println!("Rank matrix:");
    println!("  Ranks:           {}", num_ranks);
    println!("  Max height:      {}", max_height);
    println!();
    println!("Netlist statistics:");
    println!("  Primary inputs:  {}", netlist.num_inputs());
    println!("  Outputs:         {}", outputs.len());
    println!("  Total gates:     {}", netlist.num_gates());
    println!("  AND gates:       {}", counts.and);
    println!("  XOR gates:       {}", counts.xor);
    println!("  OR gates:        {}", counts.or);
    println!("  Adders:          {}", netlist.num_adders());
    println!("  Logic depth:     {}", logic_depth(&netlist));

    if let Some(runs) = common.verify {
        println!();
        println!("Verifying {} random assignments...", runs);
        verify(&netlist, &operands, &outputs, runs, common.seed, expected)?;
        println!("Verification passed");
    }

    if let Some(path) = &common.output {
        println!();
        println!("Writing to {}...", path.display());
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        writer::write_bench(&netlist, &outputs, &mut out)
            .with_context(|| format!("writing {}", path.display()))?;
        out.flush().context("flushing output file")?;
        println!("Done! Netlist written to {}", path.display());
    }

    Ok(())
}

/// Simulates `runs` random assignments and checks that the weighted value of
/// the outputs matches `expected` applied to the operand word values.
fn verify(
    netlist: &Netlist,
    operands: &[Vec<SignalId>],
    outputs: &[SignalId],
    runs: usize,
    seed: u64,
    expected: impl Fn(&[u128]) -> u128,
) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for run in 0..runs {
        let values = evaluate_netlist_direct(
            netlist,
            (0..netlist.num_inputs()).map(|_| rng.random_bool(0.5)),
        );
        let words: Vec<u128> = operands
            .iter()
            .map(|word| values.weighted_value(word))
            .collect();
        let want = expected(&words);
        let got = values.weighted_value(outputs);
        ensure!(
            got == want,
            "run {run}: outputs evaluate to {got}, expected {want}"
        );
    }
    Ok(())
}
