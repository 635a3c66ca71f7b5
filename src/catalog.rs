use crate::classify;
use crate::taxonomy::{self, ALL_CATEGORIES};

/// List the fixed taxonomy and the classifiers that apply it
pub fn list_categories() {
    println!();
    println!("📊 sonar-summary — Quality Categories");
    println!("{}", "━".repeat(55));
    println!();

    for category in ALL_CATEGORIES {
        println!("  📋 {}", category);

        let keywords = category.keywords();
        if taxonomy::KEYWORD_SCAN.contains(&category) {
            if keywords.is_empty() {
                println!("     keywords: (none)");
            } else {
                println!("     keywords: {}", keywords.join(", "));
            }
        }

        match category.scale() {
            Some(scale) => {
                println!(
                    "     CRITICAL/BLOCKER → {}, MAJOR → {}, otherwise → {}",
                    scale.severe, scale.major, scale.fallback
                );
            }
            None => println!("     severity passed through unchanged"),
        }
        println!();
    }

    println!("{}", "━".repeat(55));
    for classifier in classify::all_classifiers() {
        println!(
            "  {:<10} {} (columns: {})",
            classifier.name(),
            classifier.description(),
            classifier.required_columns().join(", ")
        );
    }
    println!();
    println!("  Run `sonar-summary` to summarize ./input");
    println!();
}
