use clap::Parser;
use lengauers_bistro::{Config, MenuParser, logging, source};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "parse_menu")]
#[command(about = "Print the dishes of a daily menu PDF")]
struct Args {
    /// Menu PDF to parse
    #[arg(default_value = "Tageskarte.pdf")]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logger();

    let config = Config::from_env()?;
    let parser = MenuParser::new(config.noise_filter());

    tracing::info!("Parsing menu from: {}", args.path.display());
    let bytes = fs::read(&args.path)?;
    let menu = source::parse_pdf(&bytes, &parser)?;

    if menu.is_empty() {
        println!("No dishes found in the PDF.");
        return Ok(());
    }

    let date = menu
        .date
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| "Date not found".to_string());
    for dish in &menu.dishes {
        println!("{date} | {} | € {:.2}", dish.name, dish.price);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_defaults_to_daily_menu() {
        let args = Args::try_parse_from(["parse_menu"]).unwrap();
        assert_eq!(args.path, PathBuf::from("Tageskarte.pdf"));
    }

    #[test]
    fn explicit_path() {
        let args = Args::try_parse_from(["parse_menu", "/tmp/menu.pdf"]).unwrap();
        assert_eq!(args.path, PathBuf::from("/tmp/menu.pdf"));
        assert!(Args::try_parse_from(["parse_menu", "a.pdf", "b.pdf"]).is_err());
    }
}
