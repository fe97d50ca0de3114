use anyhow::Result;
use dummyfiles::logging::init::flush_logs;

fn main() -> Result<()> {
    let status = dummyfiles::run(std::env::args_os());
    // process::exit skips destructors, so flush the file appender first
    flush_logs();
    std::process::exit(status?)
}
