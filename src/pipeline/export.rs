// src/pipeline/export.rs

//! Export stage: rank, truncate, and write the CSV.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::config::{Credentials, RunOptions, TimeRange};
use crate::error::Result;
use crate::models::ResolvedRestaurant;
use crate::storage::SnapshotStore;
use crate::utils::csv::CsvWriter;

/// Column labels, fixed across runs.
const HEADER: [&str; 7] = [
    "Name",
    "Type",
    "Map URL",
    "Rating",
    "Source URL",
    "Latitude",
    "Longitude",
];

/// Run the full pipeline and write the ranked CSV. Returns the output path.
pub async fn run_export(
    credentials: &Credentials,
    options: &RunOptions,
    store: &SnapshotStore,
) -> Result<PathBuf> {
    let mut restaurants = super::run_resolve(credentials, options, store).await?;
    rank(&mut restaurants, options.output_limit);

    let filename = output_filename(
        &options.community,
        Local::now().date_naive(),
        options.time_range,
    );
    let path = write_rows(&options.out_dir, &filename, &restaurants)?;

    log::info!(
        "Exported {} restaurants to {}",
        restaurants.len(),
        path.display()
    );
    Ok(path)
}

/// Sort by upvotes descending and truncate to the configured row limit.
fn rank(restaurants: &mut Vec<ResolvedRestaurant>, limit: Option<usize>) {
    restaurants.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    if let Some(limit) = limit {
        restaurants.truncate(limit);
    }
}

/// Output filename carrying the community, run date, and time window.
fn output_filename(community: &str, date: NaiveDate, time_range: TimeRange) -> String {
    format!("{}_{}_{}.csv", community, date.format("%Y%m%d"), time_range)
}

/// Write header and rows; rank and upvotes are folded into the Name column.
fn write_rows(dir: &Path, filename: &str, restaurants: &[ResolvedRestaurant]) -> Result<PathBuf> {
    let mut writer = CsvWriter::create(dir, filename)?;
    writer.write_row(HEADER)?;

    for (i, r) in restaurants.iter().enumerate() {
        writer.write_row([
            format!("{} (#{}, {} upvotes)", r.name, i + 1, r.upvotes),
            r.category.clone(),
            r.map_url.clone(),
            format!("{:.1} ({} reviews)", r.rating, r.rating_count),
            r.source_url.clone(),
            format!("{:.6}", r.latitude),
            format!("{:.6}", r.longitude),
        ])?;
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn restaurant(name: &str, upvotes: i64) -> ResolvedRestaurant {
        ResolvedRestaurant {
            name: name.to_string(),
            upvotes,
            source_url: format!("https://www.reddit.com/r/FoodNYC/{upvotes}/"),
            neighborhood: None,
            place_id: "ChIJabc123".to_string(),
            map_url: "https://www.google.com/maps/place/?q=place_id:ChIJabc123".to_string(),
            latitude: 40.730599,
            longitude: -74.002791,
            rating: 4.5,
            rating_count: 120,
            category: "Pizza restaurant".to_string(),
        }
    }

    #[test]
    fn rank_orders_by_upvotes_and_truncates() {
        let mut rows = vec![
            restaurant("Low", 10),
            restaurant("High", 900),
            restaurant("Mid", 500),
        ];

        rank(&mut rows, Some(2));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "High");
        assert_eq!(rows[1].name, "Mid");
    }

    #[test]
    fn rank_with_limit_beyond_len_keeps_everything() {
        let mut rows = vec![restaurant("A", 10), restaurant("B", 20)];
        rank(&mut rows, Some(5));
        assert_eq!(rows.len(), 2);

        let mut rows = vec![restaurant("A", 10), restaurant("B", 20)];
        rank(&mut rows, None);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn filename_carries_community_date_and_window() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(
            output_filename("FoodNYC", date, TimeRange::Month),
            "FoodNYC_20260805_month.csv"
        );
    }

    #[test]
    fn export_writes_header_plus_one_row_per_restaurant() {
        let tmp = TempDir::new().unwrap();
        let rows = vec![restaurant("Joe's Pizza", 512), restaurant("Han Dynasty", 87)];

        let path = write_rows(tmp.path(), "FoodNYC.csv", &rows).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,Type,Map URL,Rating,Source URL,Latitude,Longitude"
        );
        assert!(lines[1].starts_with("\"Joe's Pizza (#1, 512 upvotes)\""));
        assert!(lines[1].contains(",4.5 (120 reviews),"));
        assert!(lines[1].ends_with("40.730599,-74.002791"));
        assert!(lines[2].starts_with("\"Han Dynasty (#2, 87 upvotes)\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn export_of_empty_batch_writes_header_only() {
        let tmp = TempDir::new().unwrap();
        let path = write_rows(tmp.path(), "FoodNYC.csv", &[]).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
