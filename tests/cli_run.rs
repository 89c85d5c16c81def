use clap::Parser;
use pcbpanel::cli::{run, CliArgs};
use pcbpanel::{
    DesignDatabase, Layer, MemoryBoard, PanelSettings, Point, Primitive, SeparationMethod, Shape,
};
use std::path::Path;
use tempfile::tempdir;

const MM: i64 = 1_000_000;

fn write_board(path: &Path) {
    let mut board = MemoryBoard::new();
    let corners = [
        Point::new(0, 0),
        Point::new(50 * MM, 0),
        Point::new(50 * MM, 30 * MM),
        Point::new(0, 30 * MM),
    ];
    for i in 0..4 {
        board.add(Primitive::Shape(Shape::segment(
            corners[i],
            corners[(i + 1) % 4],
            Layer::EdgeCuts,
            0,
        )));
    }
    board.save_to_file(path).unwrap();
}

fn parse(args: &[&str]) -> CliArgs {
    let mut argv = vec!["pcbpanel"];
    argv.extend_from_slice(args);
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn test_cli_panelizes_board_file() {
    let dir = tempdir().unwrap();
    let board_path = dir.path().join("unit.json");
    let output = dir.path().join("panel.json");
    let settings_path = dir.path().join("panel.toml");
    write_board(&board_path);

    let args = parse(&[
        "--board",
        board_path.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--panel-width",
        "105",
        "--panel-height",
        "65",
        "--write-settings",
        settings_path.to_str().unwrap(),
    ]);
    let report = run(&args).unwrap();
    assert_eq!(report.board_copies(), 4);

    let panel = MemoryBoard::load_from_file(&output).unwrap();
    assert_eq!(panel.boundary_drawings().len(), 4);
    // 4 frame segments, 18 cuts, 6 labels; the outline itself is removed
    assert_eq!(panel.len(), 28);

    let saved = PanelSettings::load_from_file(&settings_path).unwrap();
    assert_eq!(saved.panel_width_mm, 105.0);
    assert_eq!(saved.method, SeparationMethod::VScore);
}

#[test]
fn test_cli_reports_panel_too_small() {
    let dir = tempdir().unwrap();
    let board_path = dir.path().join("unit.json");
    let output = dir.path().join("panel.json");
    write_board(&board_path);

    let args = parse(&[
        "--board",
        board_path.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--panel-height",
        "65",
    ]);
    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("Panel size is too small!"));
    assert!(!output.exists());
}

#[test]
fn test_cli_settings_file_is_base_for_overrides() {
    let dir = tempdir().unwrap();
    let board_path = dir.path().join("unit.json");
    let settings_path = dir.path().join("base.json");
    write_board(&board_path);

    let base = PanelSettings {
        columns: 3,
        rows: 1,
        gap_mm: 1.0,
        method: SeparationMethod::Mousebites,
        panel_width_mm: 160.0,
        panel_height_mm: 40.0,
    };
    base.save_to_file(&settings_path).unwrap();

    let args = parse(&[
        "--board",
        board_path.to_str().unwrap(),
        "--settings",
        settings_path.to_str().unwrap(),
        "--rows",
        "2",
        "--panel-height",
        "70",
    ]);
    let settings = args.effective_settings().unwrap();
    assert_eq!(settings.columns, 3);
    assert_eq!(settings.rows, 2);
    assert_eq!(settings.method, SeparationMethod::Mousebites);

    let report = run(&args).unwrap();
    assert_eq!(report.board_copies(), 6);
    assert!(dir.path().join("unit_panel.json").exists());
}

#[test]
fn test_cli_missing_board_file() {
    let dir = tempdir().unwrap();
    let args = parse(&[
        "--board",
        dir.path().join("absent.json").to_str().unwrap(),
    ]);
    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("Failed to load board"));
}
