use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = fiche::Args::parse();

	fiche::run(args).await
}
