//! Command-line driver.
//!
//! Reads `n k omega maxit epsilon` (or `n omega maxit epsilon`, k = 7) from
//! standard input, runs the pipeline and prints:
//!
//! ```text
//! n
//! x_0 x_1 ... x_{n-1}
//! convergence norm
//! residual norm
//! preconditioner time (ms) or "Nao calculado"
//! average time per iteration (ms)
//! residual time (ms)
//! ```
//!
//! Log output goes to stderr; its level comes from `BANDPCG_LOG`.

use std::io;
use std::process::ExitCode;

use bandpcg::{millis, BenchContext, SolveResult, SolverConfig};
use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn log_level() -> LevelFilter {
    match std::env::var("BANDPCG_LOG").as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("info") => LevelFilter::Info,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

/// C `%.<precision>g`.
fn format_g(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".into() } else { "0".into() };
    }
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let p = precision.max(1);
    let sci = format!("{:.*e}", p - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (p as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn render(result: &SolveResult) -> String {
    let mut out = format!("{}\n", result.n);
    for &xi in &result.x {
        out.push_str(&format_g(xi, 16));
        out.push(' ');
    }
    out.push('\n');
    out.push_str(&format!("{}\n", format_g(result.stats.final_residual, 8)));
    out.push_str(&format!("{}\n", format_g(result.residual_norm, 16)));
    match result.times.preconditioner {
        Some(t) => out.push_str(&format!("{}\n", format_g(millis(t), 8))),
        None => out.push_str("Nao calculado\n"),
    }
    out.push_str(&format!("{}\n", format_g(millis(result.times.iteration_avg), 8)));
    out.push_str(&format!("{}\n", format_g(millis(result.times.residual), 8)));
    out
}

fn main() -> ExitCode {
    let _ = TermLogger::init(log_level(), Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    let input = match io::read_to_string(io::stdin()) {
        Ok(s) => s,
        Err(e) => {
            error!("could not read standard input: {e}");
            eprintln!("error: could not read standard input: {e}");
            return ExitCode::FAILURE;
        }
    };
    let result = SolverConfig::parse(&input).and_then(|cfg| BenchContext::new(cfg).run());
    match result {
        Ok(result) => {
            print!("{}", render(&result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_g_matches_c() {
        assert_eq!(format_g(0.0, 8), "0");
        assert_eq!(format_g(1.0, 16), "1");
        assert_eq!(format_g(0.5, 8), "0.5");
        assert_eq!(format_g(123.456, 8), "123.456");
        assert_eq!(format_g(1.5e-9, 8), "1.5e-09");
        assert_eq!(format_g(0.0001, 8), "0.0001");
        assert_eq!(format_g(0.00001234, 8), "1.234e-05");
        assert_eq!(format_g(123456789.0, 8), "1.2345679e+08");
        assert_eq!(format_g(-2.25, 16), "-2.25");
    }

    #[test]
    fn report_has_seven_lines() {
        let cfg = SolverConfig::new(12, 3, -1.0, 100, 1e-8).unwrap();
        let result = BenchContext::new(cfg).run().unwrap();
        let text = render(&result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "12");
        assert_eq!(lines[1].split_whitespace().count(), 12);
        assert_eq!(lines[4], "Nao calculado");
    }
}
