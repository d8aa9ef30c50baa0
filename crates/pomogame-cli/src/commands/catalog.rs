use clap::Args;
use pomogame_core::Catalog;

#[derive(Args)]
pub struct CatalogArgs {
    /// Point balance used to mark affordable characters
    #[arg(long, default_value = "0")]
    points: u64,
}

pub fn run(args: CatalogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let view = Catalog::standard().view(args.points);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
