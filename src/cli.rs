use std::path::PathBuf;
use std::process;

use getopts::Options;

pub struct Args {
    pub config_path: Option<PathBuf>,
    pub schedule_only: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "c",
        "config",
        "Path to the config file [Default: config.json in the platform data directory]",
        "PATH",
    );
    opts.optflag(
        "s",
        "schedule-only",
        "Apply the sample schedule and exit without watching connectivity",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    Args {
        config_path: matches.opt_str("config").map(PathBuf::from),
        schedule_only: matches.opt_present("schedule-only"),
    }
}
