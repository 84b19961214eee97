use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = legis_api::Args::parse();

	legis_api::run(args).await
}
