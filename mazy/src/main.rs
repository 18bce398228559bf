use clap::Parser;
use cmazy::{report::Summary, Maze};
use log::LevelFilter;
use mazy::{cli::Args, logging, settings::Settings, AppError};

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    logging::init(LevelFilter::Warn)?;
    let config_path = args.config_path();

    if args.reset_config {
        Settings::reset_config(config_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = config_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", config_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(config_path)?);
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(config_path)?;
    let config = args.resolve(&settings)?;
    logging::get_logger().set_min_level(config.log_level);
    log::debug!("{config:?}");

    let maze = Maze::generate(&config.spec)?;
    let summary = Summary::collect(&maze, &config.runners, config.parallel)?;
    println!("{summary}");

    Ok(())
}
