//! Rules command implementation

use marklint_core::RuleId;
use miette::Result;

pub fn run_rules() -> Result<()> {
    println!("{:<24} {:<8} {:<8} Description", "Rule", "Severity", "Fixable");
    for rule in RuleId::ALL {
        println!(
            "{:<24} {:<8} {:<8} {}",
            rule.as_str(),
            rule.severity().as_str(),
            if rule.fixable() { "yes" } else { "no" },
            rule.description()
        );
    }
    Ok(())
}
