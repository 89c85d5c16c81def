use pcbpanel_core::{DesignDatabase, GraphicShape, Layer, MemoryBoard, Point, Primitive, Shape};
use pcbpanel_panelizer::{
    ActionInfo, ActionOutcome, ActionRegistry, ActionTable, HostNotifier, PanelAction,
    PanelError, RegistrationError,
};
use pcbpanel_settings::{PanelForm, PanelSettings};

#[derive(Default)]
struct RecordingNotifier {
    shown: Vec<(String, String)>,
}

impl HostNotifier for RecordingNotifier {
    fn show_error(&mut self, title: &str, message: &str) {
        self.shown.push((title.to_string(), message.to_string()));
    }
}

fn rect_board() -> MemoryBoard {
    let mut board = MemoryBoard::new();
    board.add(Primitive::Shape(Shape {
        geometry: GraphicShape::Rect {
            start: Point::new(0, 0),
            end: Point::new(50_000_000, 30_000_000),
        },
        layer: Layer::EdgeCuts,
        width: 0,
        filled: false,
    }));
    board
}

fn form(width: &str) -> PanelForm {
    PanelForm {
        panel_width_mm: width.to_string(),
        panel_height_mm: "65".to_string(),
        ..PanelForm::default()
    }
}

#[test]
fn test_registration_then_run() {
    let action = PanelAction::new();
    let mut table = ActionTable::new();
    action.register(&mut table).unwrap();
    assert_eq!(table.actions().len(), 1);
    assert!(table.actions()[0].show_toolbar_button);

    let mut board = rect_board();
    let mut notifier = RecordingNotifier::default();
    let mut source = form("105").parse();
    assert!(source.is_some());

    match action.run(&mut board, &mut notifier, &mut source) {
        ActionOutcome::Completed(report) => assert_eq!(report.board_copies(), 4),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(notifier.shown.is_empty());
    assert_eq!(board.refresh_count(), 1);
}

#[test]
fn test_too_small_is_reported_to_the_user() {
    let mut board = rect_board();
    let mut notifier = RecordingNotifier::default();
    let mut source = form("100").parse();

    let outcome = PanelAction::new().run(&mut board, &mut notifier, &mut source);
    assert!(matches!(
        outcome,
        ActionOutcome::Failed(PanelError::PanelTooSmall { .. })
    ));
    assert_eq!(notifier.shown.len(), 1);
    assert_eq!(notifier.shown[0].0, "Panel Too Small");
    assert!(notifier.shown[0].1.contains("Required: 102.00 mm x 62.00 mm"));
    assert_eq!(board.len(), 1);
}

#[test]
fn test_missing_outline_is_reported_to_the_user() {
    let mut board = MemoryBoard::new();
    let mut notifier = RecordingNotifier::default();
    let mut source = Some(PanelSettings::default());

    let outcome = PanelAction::new().run(&mut board, &mut notifier, &mut source);
    assert!(matches!(outcome, ActionOutcome::Failed(PanelError::MissingBoundary)));
    assert_eq!(
        notifier.shown,
        vec![("Error".to_string(), "No Edge.Cuts found!".to_string())]
    );
}

#[test]
fn test_invalid_form_cancels_the_run() {
    let mut board = rect_board();
    let mut notifier = RecordingNotifier::default();
    let mut source = form("wide").parse();
    assert!(source.is_none());

    let outcome = PanelAction::new().run(&mut board, &mut notifier, &mut source);
    assert!(matches!(outcome, ActionOutcome::Cancelled));
    assert!(notifier.shown.is_empty());
    assert_eq!(board.boundary_drawings().len(), 1);
    assert_eq!(board.refresh_count(), 0);
}

#[test]
fn test_invalid_settings_are_logged_not_shown() {
    let mut board = rect_board();
    let mut notifier = RecordingNotifier::default();
    let mut source = Some(PanelSettings {
        columns: 0,
        ..PanelSettings::default()
    });

    let outcome = PanelAction::new().run(&mut board, &mut notifier, &mut source);
    assert!(matches!(outcome, ActionOutcome::Failed(PanelError::Settings(_))));
    assert!(notifier.shown.is_empty());
}

#[test]
fn test_custom_registry_sees_action_metadata() {
    struct Names(Vec<String>);
    impl ActionRegistry for Names {
        fn register(&mut self, info: &ActionInfo) -> Result<(), RegistrationError> {
            self.0.push(format!("{}/{}", info.category, info.name));
            Ok(())
        }
    }

    let mut names = Names(Vec::new());
    PanelAction::new().register(&mut names).unwrap();
    assert_eq!(names.0, vec!["Panelize/PCB Panelizer".to_string()]);
}
