//! End-to-end demo for the directed k-multicast pipeline.
//!
//! Generates a graph, samples terminals, and runs the pipeline once per
//! coverage-selection strategy, printing per-stage timings and round
//! counts. Example:
//!
//! ```text
//! kmtm-demo --graph ER --n 500 --p 0.005 --t-ratio 0.2 --k-ratio 0.6 \
//!           --depth 3 --iters 20 --samples 20
//! ```

use std::collections::BTreeSet;
use std::process::ExitCode;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use kmtm::broadcast::BroadcastLimits;
use kmtm::core::generators::{complete_digraph, erdos_renyi_digraph};
use kmtm::core::types::{Digraph, NodeId};
use kmtm::pipeline::{CoverVariant, PipelineReport, run};

#[derive(Debug, Clone)]
struct DemoArgs {
    graph: String,
    n: usize,
    p: f64,
    t_ratio: f64,
    k_ratio: f64,
    depth: usize,
    iters: usize,
    samples: usize,
    seed: u64,
    json: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            graph: "ER".to_string(),
            n: 200,
            p: 0.02,
            t_ratio: 0.2,
            k_ratio: 0.5,
            depth: 3,
            iters: 20,
            samples: 20,
            seed: 42,
            json: false,
        }
    }
}

fn parse_flag<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let raw = value.ok_or_else(|| format!("{flag} expects a value"))?;
    raw.parse()
        .map_err(|_| format!("{flag}: cannot parse {raw:?}"))
}

fn parse_args() -> Result<DemoArgs, String> {
    let mut args = DemoArgs::default();
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--graph" => args.graph = parse_flag(&flag, iter.next())?,
            "--n" => args.n = parse_flag(&flag, iter.next())?,
            "--p" => args.p = parse_flag(&flag, iter.next())?,
            "--t-ratio" => args.t_ratio = parse_flag(&flag, iter.next())?,
            "--k-ratio" => args.k_ratio = parse_flag(&flag, iter.next())?,
            "--depth" => args.depth = parse_flag(&flag, iter.next())?,
            "--iters" => args.iters = parse_flag(&flag, iter.next())?,
            "--samples" => args.samples = parse_flag(&flag, iter.next())?,
            "--seed" => args.seed = parse_flag(&flag, iter.next())?,
            "--json" => args.json = true,
            "--help" | "-h" => {
                println!(
                    "usage: kmtm-demo [--graph ER|clique] [--n N] [--p P] \
                     [--t-ratio R] [--k-ratio R] [--depth D] [--iters I] \
                     [--samples S] [--seed SEED] [--json]"
                );
                std::process::exit(0);
            }
            other => return Err(format!("unknown flag {other:?}")),
        }
    }
    if args.graph != "ER" && args.graph != "clique" {
        return Err(format!("--graph must be ER or clique, got {:?}", args.graph));
    }
    Ok(args)
}

/// Samples `t_ratio * n` terminals, never including the root.
fn sample_terminals(
    graph: &Digraph<u32, f32>,
    root: NodeId,
    t_ratio: f64,
    seed: u64,
) -> BTreeSet<NodeId> {
    let mut ids: Vec<NodeId> = graph.node_ids().filter(|&v| v != root).collect();
    if ids.is_empty() {
        return BTreeSet::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    ids.shuffle(&mut rng);
    let t = ((t_ratio * graph.node_count() as f64) as usize).clamp(1, ids.len());
    ids.truncate(t);
    ids.into_iter().collect()
}

fn print_report(report: &PipelineReport) {
    println!(
        "{:<11} -> {} packs ({} terminals), residual {}, {} cover edges, \
         committed {}, {} rounds",
        report.variant,
        report.pack_count,
        report.packed_terminals,
        report.residual_demand,
        report.selected_edges,
        report.committed_terminals,
        report.rounds,
    );
    println!(
        "{:<11}    timings: packing {:.3?}, cover build {:.3?}, selection {:.3?}, \
         completion {:.3?}, simulation {:.3?}",
        "",
        report.timings.packing,
        report.timings.cover_build,
        report.timings.selection,
        report.timings.completion,
        report.timings.simulation,
    );
}

fn demo(args: &DemoArgs) -> Result<Vec<PipelineReport>, String> {
    let graph = if args.graph == "ER" {
        erdos_renyi_digraph(args.n, args.p, args.seed)
    } else {
        complete_digraph(args.n)
    }
    .map_err(|e| e.to_string())?;

    let root = graph
        .node_ids()
        .next()
        .ok_or_else(|| "graph has no nodes".to_string())?;
    let terminals = sample_terminals(&graph, root, args.t_ratio, args.seed);
    if terminals.is_empty() {
        return Err("the graph is too small to sample any terminal".to_string());
    }
    let k = ((args.k_ratio * terminals.len() as f64) as usize).clamp(1, terminals.len());

    if !args.json {
        println!(
            "Graph: {}(n={}, p={}), terminals={}, k={}, depth cap={}\n",
            args.graph,
            args.n,
            args.p,
            terminals.len(),
            k,
            args.depth
        );
    }

    let variants = [
        CoverVariant::Half,
        CoverVariant::Lazy,
        CoverVariant::Continuous {
            iters: args.iters,
            samples: args.samples,
            seed: args.seed,
        },
    ];

    let limits = BroadcastLimits::default();
    let mut reports = Vec::new();
    for variant in &variants {
        let report = run(&graph, root, &terminals, k, args.depth, variant, &limits)
            .map_err(|e| format!("{} variant failed: {e}", variant.name()))?;
        if !args.json {
            print_report(&report);
        }
        reports.push(report);
    }
    Ok(reports)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("kmtm-demo: {msg}");
            return ExitCode::FAILURE;
        }
    };

    match demo(&args) {
        Ok(reports) => {
            if args.json {
                match serde_json::to_string_pretty(&reports) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(e) => {
                        eprintln!("kmtm-demo: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(msg) => {
            eprintln!("kmtm-demo: {msg}");
            ExitCode::FAILURE
        }
    }
}
