use std::fmt::Display;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use lazy_streams::{count_from, cycle, fibonacci, primes, Stream};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Generator {
  Fib,
  Primes,
  Nats,
  Cycle,
}

/// Print a prefix of one of the built-in streams, one element per line.
#[derive(Parser, Debug)]
#[command(name = "streams", version, about)]
struct Args {
  /// Which stream to print.
  #[arg(value_enum)]
  generator: Generator,

  /// The values to repeat (`cycle` only).
  values: Vec<String>,

  /// How many elements to print.
  #[arg(short = 'n', long, default_value_t = 10)]
  count: usize,

  /// How many elements to skip first.
  #[arg(short, long, default_value_t = 0)]
  skip: usize,
}

fn print_prefix<T>(s: Stream<T>, args: &Args) -> Result<()>
  where T: Clone + Display + 'static {
  for x in s.drop(args.skip)?.take(args.count)? {
    println!("{}", x)
  }
  Ok(())
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  if args.generator != Generator::Cycle && !args.values.is_empty() {
    bail!("only `cycle` takes values")
  }

  match args.generator {
    Generator::Fib    => print_prefix(fibonacci::<num::BigUint>(), &args),
    Generator::Primes => print_prefix(primes::<u64>(), &args),
    Generator::Nats   => print_prefix(count_from(0_u64), &args),
    Generator::Cycle  => print_prefix(cycle(args.values.clone())?, &args),
  }
}
