//! Marketplace view.

use service::{domain::Package, read::package::list::Page};

/// Renders the provided [`Package`] as a single line.
#[must_use]
pub fn render_package(package: &Package) -> String {
    format!(
        "#{:<5} {:<24} {} -> {}  {}  {}  {}",
        package.id,
        package.title,
        package.pickup_location,
        package.drop_location,
        package.weight,
        package.price_expectation,
        package.status,
    )
}

/// Renders the provided [`Page`] of [`Package`]s along with its position.
#[must_use]
pub fn render(page: &Page) -> String {
    if page.total_count == 0 {
        return "No packages found".into();
    }

    let mut lines = page.items.iter().map(render_package).collect::<Vec<_>>();
    lines.push(format!(
        "page {} of {} ({} packages)",
        page.number,
        page.total_pages,
        page.total_count,
    ));
    lines.join("\n")
}
