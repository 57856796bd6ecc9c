//! Evaluates `LHS OP RHS` over range sets.
//!
//! ```bash
//! cargo run --example range_calc -- "0..10, 20" "*" "-3..2" --ty i8
//! cargo run --example range_calc -- "0..200" "<" 100 --ty u8
//! ```

use clap::Parser;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use range_set_rs::condition::Condition;
use range_set_rs::eval::Evaluator;
use range_set_rs::ops::BinOp;
use range_set_rs::set::RangeSet;
use range_set_rs::types::IntTy;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Left operand: an integer literal or a range set such as "0..10, 20".
    #[arg(value_name = "LHS", allow_hyphen_values = true)]
    lhs: String,

    /// Operator: + - * / % (optionally followed by =), or a comparison.
    #[arg(value_name = "OP", allow_hyphen_values = true)]
    op: String,

    /// Right operand.
    #[arg(value_name = "RHS", allow_hyphen_values = true)]
    rhs: String,

    /// Integer type of unsuffixed operands.
    #[clap(long, value_name = "TY", default_value = "i64")]
    ty: IntTy,

    /// Increase log verbosity (`-v` for debug, `-vv` for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn operand(text: &str, ty: IntTy) -> range_set_rs::error::Result<RangeSet> {
    RangeSet::from_literal(text, ty).or_else(|_| RangeSet::parse_in(text, ty))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    info!("args = {:?}", args);

    let lhs = operand(&args.lhs, args.ty)?;
    let op: BinOp = args.op.parse()?;
    let rhs = operand(&args.rhs, args.ty)?;

    let eval = Evaluator::default();
    let res = eval.binop(&lhs, op, &rhs);
    println!("{} {} {} = {}", lhs, op, rhs, res);

    if res.is_overflow() {
        println!("warning: the operation always overflows");
    }
    if res.has_division_by_zero() {
        println!("warning: the divisor is always zero");
    }

    if let BinOp::Cmp(cmp) = op {
        let cond = Condition::evaluate(cmp, &lhs, &rhs);
        println!("truth: {}", cond.truth);
        println!("on true:  lhs = {}, rhs = {}", cond.on_true.0, cond.on_true.1);
        println!("on false: lhs = {}, rhs = {}", cond.on_false.0, cond.on_false.1);
    }

    info!("eval = {:?}", eval);

    Ok(())
}
