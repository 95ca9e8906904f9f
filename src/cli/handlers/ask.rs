//! One-shot question handler

use crate::cli::output::print_info;
use crate::RehabRag;
use crate::Result;

pub async fn handle_ask(app: &RehabRag, question: &str, sources: bool) -> Result<()> {
    print_info(&format!("🤖 Question: \"{question}\""));
    println!("\n🔍 Building index over {}...", app.config().document.path.display());
    app.initialize().await?;

    println!("💭 Generating answer...\n");
    let response = app.assistant().pipeline()?.query(question).await?;
    println!("{}", response.format(sources));

    Ok(())
}
