use crate::commands::base_commands::OutputArgs;
use crate::commands::context::{AppContext, CommandError};
use crate::commands::output::write_report;
use crate::services::catalog_overview::{equipment_master_list, gmp_risk_matrix, process_summary};

pub fn categories_command(context: &AppContext, output: &OutputArgs) -> Result<(), CommandError> {
    let categories = context.catalog.categories();
    write_report(&categories, output, |names| Some(names.join("\n")))
}

pub fn products_command(
    context: &AppContext,
    category: &str,
    output: &OutputArgs,
) -> Result<(), CommandError> {
    let products = context.catalog.products(category);
    if products.is_empty() {
        return Err(CommandError::UnknownCategory(category.to_string()));
    }
    write_report(&products, output, |names| Some(names.join("\n")))
}

pub fn summary_command(context: &AppContext, output: &OutputArgs) -> Result<(), CommandError> {
    write_report(&process_summary(&context.catalog), output, |_| None)
}

pub fn risk_matrix_command(context: &AppContext, output: &OutputArgs) -> Result<(), CommandError> {
    write_report(&gmp_risk_matrix(&context.catalog), output, |rows| {
        let mut lines = vec![
            "Category | Product | Classification | Score".to_string(),
            "---------|---------|----------------|------".to_string(),
        ];
        lines.extend(rows.iter().map(|row| {
            format!(
                "{} | {} | {} | {}",
                row.category, row.product, row.gmp_classification, row.risk_score
            )
        }));
        Some(lines.join("\n"))
    })
}

pub fn equipment_command(context: &AppContext, output: &OutputArgs) -> Result<(), CommandError> {
    write_report(&equipment_master_list(&context.catalog), output, |list| {
        let lines: Vec<String> = list
            .iter()
            .map(|(equipment, users)| format!("{equipment}: {}", users.join("; ")))
            .collect();
        Some(lines.join("\n"))
    })
}
