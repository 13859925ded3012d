// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokergen command line tool.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, Subcommand};

use pokergen_ga::{Config, Hand, Rates};

pub mod runner;
use runner::Wrapper;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evolve populations of hands and print the best hands.
    Run {
        /// The number of independent runs.
        #[clap(long, short = 'n', default_value_t = 1)]
        runs: usize,
        /// The crossover rate.
        #[clap(long, short = 'c', default_value_t = 0.7)]
        crossover: f64,
        /// The mutation rate.
        #[clap(long, short = 'm', default_value_t = 0.1)]
        mutation: f64,
        /// The suit mutation rate.
        #[clap(long, short = 's', default_value_t = 0.1)]
        suit_mutation: f64,
        /// The elitism rate.
        #[clap(long, short = 'e', default_value_t = 0.1)]
        elitism: f64,
        /// The population size.
        #[clap(long, default_value_t = 50)]
        size: usize,
        /// The maximum number of generations for each run.
        #[clap(long, default_value_t = 100)]
        generations: usize,
        /// Stop when a hand with a category score above this value is found.
        #[clap(long, default_value_t = 7)]
        threshold: u32,
        /// The function applied to a category score to get the fitness.
        #[clap(long, value_enum, default_value_t = Wrapper::PlusOne)]
        wrapper: Wrapper,
        /// Seed for reproducible runs.
        #[clap(long)]
        seed: Option<u64>,
        /// Print the statistics of each generation.
        #[clap(long, short = 'v')]
        verbose: bool,
    },
    /// Print the category of a hand, e.g. "KS 3D QS 6H TH".
    Eval {
        /// The five cards of the hand.
        hand: String,
    },
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            runs,
            crossover,
            mutation,
            suit_mutation,
            elitism,
            size,
            generations,
            threshold,
            wrapper,
            seed,
            verbose,
        } => {
            let config = Config {
                size,
                threshold,
                generations,
                rates: Rates::new(crossover, mutation, suit_mutation, elitism)?,
            };

            let tally = runner::run_trials(&config, wrapper, runs, seed, verbose)?;
            println!();
            print!("{tally}");
        }
        Command::Eval { hand } => {
            let hand = hand.parse::<Hand>()?;
            println!(
                "{hand}: {} (score {})",
                hand.hand_kind_label(),
                hand.category_score()
            );
        }
    }

    Ok(())
}
