use crate::types::gem::GemsDocument;

pub fn to_markdown(document: &GemsDocument) -> String {
    let mut output = String::new();
    output.push_str("# Hidden Gems\n\n");
    output.push_str(&format!(
        "Mined at {}: {} gems ({} hype)\n\n",
        document.last_mined,
        document.count,
        document.hype_count()
    ));

    if document.gems.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| # | Repository | Score | Trend | Language | Stars | Hype |\n");
    output.push_str("|---|------------|-------|-------|----------|-------|------|\n");
    for (rank, gem) in document.gems.iter().enumerate() {
        output.push_str(&format!(
            "| {} | [{}]({}) | {:.2} | {:.2} | {} | {} | {} |\n",
            rank + 1,
            gem.full_name,
            gem.url,
            gem.gem_score,
            gem.momentum_trend,
            gem.language,
            gem.stars,
            if gem.is_hype { "yes" } else { "" }
        ));
    }

    output
}
