use zone_cli::{OutputFormat, ascii_rows, key_rows, render};
use zone_core::{MazeConfig, Zone, ZoneRng};

fn generated() -> (Zone, zone_core::MazeStats) {
    let mut zone = Zone::new(41, 21);
    let stats = zone.create_maze(&MazeConfig::default(), &mut ZoneRng::from_seed_str("zone"));
    (zone, stats)
}

#[test]
fn test_ascii_shape() {
    let (zone, _) = generated();
    let rows = ascii_rows(&zone);
    assert_eq!(rows.len(), 21);
    assert!(rows.iter().all(|r| r.chars().count() == 41));
    assert_eq!(rows[0], "#".repeat(41));
}

#[test]
fn test_key_rows_have_one_token_per_cell() {
    let (zone, _) = generated();
    for row in key_rows(&zone) {
        assert_eq!(row.split(' ').count(), 41);
    }
}

#[test]
fn test_same_seed_same_output() {
    let (a, sa) = generated();
    let (b, sb) = generated();
    assert_eq!(
        render(&a, OutputFormat::Json, "zone", sa).unwrap(),
        render(&b, OutputFormat::Json, "zone", sb).unwrap()
    );
}
