//! Matrix command - every built-in user against every route.

use portcullis::RouteCatalog;

use super::roster;
use crate::style::print_matrix_table;

pub fn run() {
    print_matrix_table(&roster(), &RouteCatalog::standard());
}
