//! The `run` command: evaluate a built-in demo.

use tether_eval::{
    silent_handler, stdout_handler, EvalResult, InterpreterBuilder, SharedPrintHandler,
    DEFAULT_MAX_CALL_DEPTH,
};
use tether_ir::SharedInterner;

use crate::demos::Demo;

/// Options accepted after `tether run <demo>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// `--max-depth=N`
    pub max_call_depth: usize,
    /// `--quiet`: discard program output.
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            quiet: false,
        }
    }
}

impl RunOptions {
    /// Print destination these options ask for.
    pub fn print_handler(&self) -> SharedPrintHandler {
        if self.quiet {
            silent_handler()
        } else {
            stdout_handler()
        }
    }
}

/// Parse the arguments following `run`: one demo name plus options, in any
/// order.
pub fn parse_run_args(args: &[String]) -> Result<(String, RunOptions), String> {
    let mut options = RunOptions::default();
    let mut demo = None;

    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = depth
                .parse()
                .map_err(|_| format!("invalid --max-depth value `{depth}`"))?;
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option `{arg}`"));
        } else if demo.is_none() {
            demo = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }

    let demo = demo.ok_or_else(|| "missing demo name".to_string())?;
    Ok((demo, options))
}

/// Build and evaluate `demo`, printing through `handler`.
pub fn run_demo(demo: &Demo, options: &RunOptions, handler: SharedPrintHandler) -> EvalResult {
    tracing::debug!(
        demo = demo.name,
        max_call_depth = options.max_call_depth,
        "running demo"
    );
    let interner = SharedInterner::default();
    let (arena, root) = demo.program(&interner);
    let mut interp = InterpreterBuilder::new(&interner, &arena)
        .print_handler(handler)
        .max_call_depth(options.max_call_depth)
        .build();
    interp.eval(root)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use crate::demos::find_demo;
    use pretty_assertions::assert_eq;
    use tether_eval::{buffer_handler, EvalErrorKind};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_demo_and_options() {
        let (demo, options) = parse_run_args(&args(&["--quiet", "shared", "--max-depth=8"])).unwrap();
        assert_eq!(demo, "shared");
        assert_eq!(
            options,
            RunOptions {
                max_call_depth: 8,
                quiet: true
            }
        );
    }

    #[test]
    fn defaults_without_options() {
        let (demo, options) = parse_run_args(&args(&["closures"])).unwrap();
        assert_eq!(demo, "closures");
        assert_eq!(options, RunOptions::default());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            parse_run_args(&args(&[])).unwrap_err(),
            "missing demo name"
        );
        assert_eq!(
            parse_run_args(&args(&["closures", "--max-depth=lots"])).unwrap_err(),
            "invalid --max-depth value `lots`"
        );
        assert_eq!(
            parse_run_args(&args(&["closures", "--verbose"])).unwrap_err(),
            "unknown option `--verbose`"
        );
        assert_eq!(
            parse_run_args(&args(&["closures", "shared"])).unwrap_err(),
            "unexpected argument `shared`"
        );
    }

    #[test]
    fn depth_limit_applies_to_demo() {
        // A limit of zero rejects the first call
        let demo = find_demo("counter").unwrap();
        let options = RunOptions {
            max_call_depth: 0,
            quiet: true,
        };
        let err = run_demo(demo, &options, buffer_handler()).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 0 });
    }

    #[test]
    fn quiet_discards_output() {
        let options = RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            quiet: true,
        };
        assert_eq!(options.print_handler().output(), "");
    }
}
