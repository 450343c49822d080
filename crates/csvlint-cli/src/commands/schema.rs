//! Schema command - load a schema and describe its columns.

use colored::Colorize;
use csvlint::Schema;

pub fn run(uri: &str, json_output: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let schema = Schema::fetch(uri)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&schema.to_document())?);
        return Ok(true);
    }

    println!("{} {}", "Schema".cyan().bold(), schema.uri().white());
    if let Some(title) = schema.title() {
        println!("Title: {}", title);
    }
    if let Some(description) = schema.description() {
        println!("Description: {}", description);
    }
    println!();

    if schema.fields().is_empty() {
        println!("{}", "No columns declared.".yellow());
        return Ok(true);
    }

    for (idx, field) in schema.fields().iter().enumerate() {
        let constraints = field.constraints();
        let mut rules = Vec::new();
        if constraints.required {
            rules.push("required".to_string());
        }
        if constraints.unique {
            rules.push("unique".to_string());
        }
        if let Some(min) = constraints.min_length {
            rules.push(format!("minLength={}", min));
        }
        if let Some(max) = constraints.max_length {
            rules.push(format!("maxLength={}", max));
        }
        if let Some(ref pattern) = constraints.pattern {
            rules.push(format!("pattern={}", pattern));
        }
        match (field.field_type(), constraints.type_uri.as_deref()) {
            (Some(t), _) => rules.push(format!("type={}", t.local_name())),
            (None, Some(uri)) => rules.push(format!("type={} (unrecognized)", uri)),
            (None, None) => {}
        }

        println!(
            "  {:>3}  {:20} {}",
            idx + 1,
            field.name().white().bold(),
            rules.join(", ").dimmed()
        );
    }

    Ok(true)
}
