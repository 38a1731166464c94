use clap::Parser;
use tumble::App;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Ignored; the scene takes no parameters
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    passthrough: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !args.passthrough.is_empty() {
        log::debug!("Ignoring arguments: {:?}", args.passthrough);
    }

    log::info!("Starting Tumble");

    pollster::block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let (app, event_loop) = App::new().await?;
    App::run(event_loop, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_ignored() {
        let args = Args::try_parse_from(["tumble", "foo", "--bar", "-x"]).unwrap();
        assert_eq!(args.passthrough, vec!["foo", "--bar", "-x"]);

        let args = Args::try_parse_from(["tumble"]).unwrap();
        assert!(args.passthrough.is_empty());
    }

    #[test]
    fn test_help_and_version_flags_ignored() {
        let args = Args::try_parse_from(["tumble", "--help", "-V"]).unwrap();
        assert_eq!(args.passthrough, vec!["--help", "-V"]);

        let args = Args::try_parse_from(["tumble", "-h", "--version"]).unwrap();
        assert_eq!(args.passthrough, vec!["-h", "--version"]);
    }
}
