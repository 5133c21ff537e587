//! Memory Reference Model CLI.
//!
//! Builds a reference model from a TOML configuration, drives a stimulus
//! program through the scoreboard and reports the outcome.
//!
//! # Usage
//!
//! The driver can run in two modes:
//! 1. **Built-in Mode**: runs the bring-up scenario with its known responses.
//! 2. **Stimulus Mode**: runs a JSON stimulus file (`--stimulus`), checking any
//!    responses recorded in it.

use clap::Parser;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use memory_refmodel::config::{Config, ModelConfig};
use memory_refmodel::sim::{self, Stimulus};

const DEFAULT_CONFIG_PATH: &str = "configs/default.toml";

/// Command-line arguments for the memory reference model.
#[derive(Parser, Debug)]
#[command(author, version, about = "Memory Unit Reference Model")]
struct Args {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(short, long)]
    stimulus: Option<String>,

    /// Log every transaction.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();

    let config = if args.config == DEFAULT_CONFIG_PATH && !Path::new(&args.config).exists() {
        Config::default()
    } else {
        Config::from_file(&args.config).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        })
    };

    init_logging(&config, args.trace);

    let model = &config.model;
    println!("Model Configuration");
    println!("--------------------");
    println!("  Virtual Address:    {} bits", model.virt_addr_width);
    println!("  Physical Address:   {} bits", model.phys_addr_width);
    println!("  Page Size:          {} bytes", model.page_size);
    println!("  Data Width:         {} bits", model.data_width);
    println!("  Memory Depth:       {} words", model.mem_depth);
    println!("  TLB Entries:        {}", model.tlb_entries);
    println!("--------------------");

    let stimulus = match args.stimulus {
        Some(path) => {
            println!("[*] Stimulus Mode: {}", path);
            Stimulus::from_file(&path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: {}", e);
                process::exit(1);
            })
        }
        None => {
            println!("[*] Built-in Mode");
            if *model != ModelConfig::default() {
                println!("    note: built-in responses assume the default configuration");
            }
            Stimulus::builtin()
        }
    };

    let stats = match sim::run(*model, &stimulus) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };

    stats.print();
    process::exit(if stats.passed() { 0 } else { 1 });
}

fn init_logging(config: &Config, trace_flag: bool) {
    let force_trace =
        trace_flag || config.general.trace_transactions || cfg!(feature = "always-trace");
    let filter = if force_trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.general.log_filter))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
