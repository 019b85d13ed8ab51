//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use portcullis::{Effect, Principal, RouteCatalog};

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(text: &str) -> Cell {
    if super::no_color() {
        Cell::new(text)
    } else {
        Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
    }
}

fn effect_cell(effect: Effect) -> Cell {
    let cell = Cell::new(effect);
    if super::no_color() {
        return cell;
    }
    match effect {
        Effect::Allow => cell.fg(Color::Green),
        Effect::Deny => cell.fg(Color::DarkGrey),
    }
}

/// Creates a table of route paths and their rule text.
pub fn routes_table(catalog: &RouteCatalog) -> Table {
    let mut table = base_table();
    table.set_header(vec![header_cell("Route"), header_cell("Policy")]);

    for route in catalog.routes() {
        table.add_row(vec![Cell::new(&route.path), Cell::new(&route.policy)]);
    }

    table
}

/// Prints the route catalogue.
pub fn print_routes_table(catalog: &RouteCatalog) {
    println!("{}", routes_table(catalog));
}

/// Creates a principal × route decision table.
pub fn matrix_table(principals: &[Principal], catalog: &RouteCatalog) -> Table {
    let mut table = base_table();

    let mut header = vec![header_cell("User"), header_cell("Role"), header_cell("Department")];
    header.extend(catalog.routes().map(|route| header_cell(&route.path)));
    table.set_header(header);

    for principal in principals {
        let mut row = vec![
            Cell::new(&principal.username),
            Cell::new(principal.role),
            Cell::new(&principal.department),
        ];
        row.extend(
            catalog
                .routes()
                .map(|route| effect_cell(route.policy.evaluate(principal))),
        );
        table.add_row(row);
    }

    table
}

/// Prints the decision matrix.
pub fn print_matrix_table(principals: &[Principal], catalog: &RouteCatalog) {
    println!("{}", matrix_table(principals, catalog));
}

#[cfg(test)]
mod tests {
    use super::*;
    use portcullis::Role;

    #[test]
    fn test_routes_table_lists_every_route() {
        let rendered = routes_table(&RouteCatalog::standard()).to_string();
        assert!(rendered.contains("/admin"));
        assert!(rendered.contains("role in {admin}"));
        assert!(rendered.contains("/exec-clearance-3"));
    }

    #[test]
    fn test_matrix_table_has_row_per_principal() {
        let principals = vec![
            Principal::new("user1", Role::Admin, "HR", 3, 5),
            Principal::new("user4", Role::Staff, "hr", 1, 3),
        ];
        let table = matrix_table(&principals, &RouteCatalog::standard());
        assert_eq!(table.row_count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("user1"));
        assert!(rendered.contains("allow"));
        assert!(rendered.contains("deny"));
    }
}
