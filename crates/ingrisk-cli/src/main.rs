mod analyze;
mod display;

use clap::Parser;

const DEFAULT_EXAMPLE: &str = "refined wheat flour, sugar, edible vegetable oil (palmolein), \
                               emulsifier (322), synthetic food colour (INS 133)";

/// Terminal client for the ingredient risk classifier.
#[derive(Parser, Debug)]
#[command(name = "ingrisk", version, about)]
struct Args {
    /// Ingredient list to analyze; defaults to a sample label.
    text: Option<String>,

    /// Base URL of the classification service.
    #[arg(long, env = "INGRISK_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Skip the LLM explanation step.
    #[arg(long)]
    no_explain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let args = Args::parse();
    let text = args.text.unwrap_or_else(|| DEFAULT_EXAMPLE.to_string());

    display::print_intro();
    analyze::run(&args.api_url, &text, args.no_explain).await
}
