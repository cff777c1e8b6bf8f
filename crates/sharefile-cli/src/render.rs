//! Console rendering of API results

use sharefile_client::{ClientUser, Item};

/// `id creation-date name` for the item, then one line per child
pub fn item_lines(item: &Item) -> Vec<String> {
    std::iter::once(format!("{} {} {}", item.id, item.creation_date, item.name))
        .chain(
            item.children
                .iter()
                .map(|c| format!("{} {} {}", c.id, c.creation_date, c.name)),
        )
        .collect()
}

/// `id email` per client user
pub fn client_lines(clients: &[ClientUser]) -> Vec<String> {
    clients
        .iter()
        .map(|c| format!("{} {}", c.id, c.email))
        .collect()
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
