use clap::Parser;

use ccr::driver::{cli::Cli, driver};

fn main() {
    env_logger::init();

    // Deeply nested C expressions recurse in both the descent parser and
    // the lowerer. Spawn the real work on a thread with a larger stack.
    const STACK_SIZE: usize = 64 * 1024 * 1024; // 64 MB
    let builder = std::thread::Builder::new().stack_size(STACK_SIZE);
    let handler = builder.spawn(real_main).expect("failed to spawn main thread");
    match handler.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("ccr: {:#}", e);
            std::process::exit(1);
        }
        Err(e) => {
            // Thread panicked (e.g., stack overflow). Print any available
            // panic message so the failure isn't silent.
            if let Some(s) = e.downcast_ref::<&str>() {
                eprintln!("ccr: internal error: {}", s);
            } else if let Some(s) = e.downcast_ref::<String>() {
                eprintln!("ccr: internal error: {}", s);
            } else {
                eprintln!("ccr: internal error (thread panicked)");
            }
            std::process::exit(1);
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    driver::run(&cli)
}
