use crate::api::models::TrackInfo;
use crate::utils::text::{fmt_percent, join_or_dash};
use comfy_table::{Cell, Table, presets};

/// Render a track's releases as a table for `status` and verbose output
pub fn releases_table(track: &TrackInfo) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec![
        Cell::new("Release"),
        Cell::new("Status"),
        Cell::new("User fraction"),
        Cell::new("Version codes"),
    ]);

    for release in &track.releases {
        let fraction = release
            .user_fraction
            .map(fmt_percent)
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(release.name.as_deref().unwrap_or("-")),
            Cell::new(release.status.to_string()),
            Cell::new(fraction),
            Cell::new(join_or_dash(&release.version_codes)),
        ]);
    }

    table
}
