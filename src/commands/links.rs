use crate::pdf::links::extract_links;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let links = extract_links(&path)?;

    if links.is_empty() {
        println!("No links found.");
        return Ok(());
    }

    for link in &links {
        let [llx, lly, urx, ury] = link.rect;
        let target = link
            .target
            .map(|p| format!("p. {}", p))
            .unwrap_or_else(|| "unresolved".to_string());
        println!(
            "p{}: [{:.2} {:.2} {:.2} {:.2}] -> {}",
            link.page, llx, lly, urx, ury, target
        );
    }

    println!("\n{} link(s) found.", links.len());

    Ok(())
}
