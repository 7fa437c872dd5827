use clap::Parser;
use smallsh::flags::Flags;
use smallsh::shell::Shell;

fn main() {
    let flags = Flags::parse();
    init_logging(&flags);

    let result = Shell::new(flags).and_then(|mut shell| shell.run());
    if let Err(e) = result {
        println!("smallsh: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(flags: &Flags) {
    let default_filter = if flags.debug { "debug" } else { "warn" };
    let env = env_logger::Env::default().filter_or("SMALLSH_LOG", default_filter);
    env_logger::Builder::from_env(env).init();
}
