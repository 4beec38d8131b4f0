use ptree_core::app;
use ptree_core::facility::SyscallFacility;
use ptree_core::logging::init_logging;
use std::io::{self, Write};

fn main() {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let cli = match app::parse_args(std::env::args_os(), &mut out, &mut err) {
        Ok(cli) => cli,
        Err(code) => {
            let _ = out.flush();
            std::process::exit(code.as_i32());
        }
    };

    init_logging(cli.verbose, cli.quiet, cli.log_json);

    let facility = SyscallFacility::new(cli.syscall_nr);
    let code = app::run(&cli, &facility, &mut out, &mut err);
    std::process::exit(code.as_i32());
}
