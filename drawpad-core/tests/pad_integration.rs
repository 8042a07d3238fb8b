//! Drawing pad integration tests
//!
//! Drives a full `DrawPad` against recording fakes:
//! - Generation and its one-time guard
//! - Zoom, pan and recentering
//! - Layer selection, swapping and opacity
//! - Keyboard shortcuts and tool overrides
//! - Engine callbacks and cross-frame messages

mod common;

use common::{generated_pad, pad_with, FakeEngine, FakeView};
use drawpad_core::{
    ActionData, DrawPad, EngineEvent, IncomingMessage, KeyTarget, LayerId, LineShape,
    OutgoingMessage, PadConfig, PadError, Point, PointerAction, Tool,
};

fn action(action: PointerAction, canvas: Point, real: Point) -> EngineEvent {
    EngineEvent::Action(ActionData {
        action,
        canvas,
        real,
    })
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generation_syncs_view_with_engine() {
    let pad = generated_pad();
    let view = pad.view();
    let engine = pad.engine();

    assert!(pad.is_generated());
    assert_eq!(view.tool_marks, vec![Tool::Freehand]);
    assert_eq!(view.shape_marks, vec![LineShape::HardCircle]);
    assert_eq!(engine.tool, Tool::Freehand);
    assert_eq!(engine.line_shape, Some(LineShape::HardCircle));

    assert_eq!(view.selected_layers(), vec![1]);
    assert_eq!(engine.current_layer, 1);
    assert_eq!(view.opacity, Some(1.0));

    assert!(!view.undo_enabled);
    assert!(!view.redo_enabled);
    assert_eq!(view.color.as_deref(), Some("#000000"));
    assert_eq!(view.line_width, Some(2));
    assert_eq!(view.info_visible, Some(true));
    assert_eq!(view.last_placement().scale, 1);
    assert!(view.styling_refreshes >= 1);
    assert!(engine.redraws >= 1);
}

#[test]
fn test_second_generation_fails() {
    let mut pad = generated_pad();
    assert!(matches!(pad.generate(), Err(PadError::AlreadyGenerated)));
}

#[test]
fn test_engine_layer_mismatch_rejected() {
    let result = DrawPad::new(PadConfig::default(), FakeEngine::new(2), FakeView::new(2));
    assert!(matches!(result, Err(PadError::InvalidConfig(_))));
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_zoom_in_once_scales_by_two() {
    let mut pad = generated_pad();
    assert!(pad.update_zoom(1, None));
    assert_eq!(pad.navigation().zoom(), 1);
    assert_eq!(pad.view().last_placement().scale, 2);
}

#[test]
fn test_zoom_clamps_by_rejection() {
    let mut pad = generated_pad();
    let applied: Vec<bool> = (0..8).map(|_| pad.update_zoom(1, None)).collect();
    assert_eq!(applied, [true, true, true, true, true, true, true, false]);
    assert_eq!(pad.navigation().zoom(), 7);
    assert!(!pad.update_zoom(-8, None));
    assert_eq!(pad.navigation().zoom(), 7);
}

#[test]
fn test_every_navigation_change_refreshes_styling() {
    let mut pad = generated_pad();
    let before = pad.view().styling_refreshes;
    pad.update_zoom(1, None);
    pad.reset_navigation();
    pad.refresh_location();
    assert_eq!(pad.view().styling_refreshes, before + 3);

    // A rejected zoom changes nothing
    pad.update_zoom(-1, None);
    assert_eq!(pad.view().styling_refreshes, before + 3);

    // Starting a pan only records the anchor; the drag moves the canvas
    pad.handle_engine_event(action(
        PointerAction::PanStart,
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
    ));
    assert_eq!(pad.view().styling_refreshes, before + 3);
    pad.handle_engine_event(action(
        PointerAction::Pan,
        Point::new(0.0, 0.0),
        Point::new(40.0, 40.0),
    ));
    assert_eq!(pad.navigation().offset(), Point::new(30.0, 30.0));
    assert_eq!(pad.view().styling_refreshes, before + 4);
}

#[test]
fn test_wheel_zoom_keeps_pointer_anchor() {
    let mut pad = generated_pad();
    let easel = pad.view().easel;
    let anchor = Point::new(300.0, 80.0);
    let before = pad.navigation().canvas_point_at(anchor, easel);

    pad.handle_engine_event(action(
        PointerAction::Zoom { delta: 2 },
        Point::new(0.0, 0.0),
        anchor,
    ));

    assert_eq!(pad.navigation().zoom(), 2);
    let after = pad.navigation().canvas_point_at(anchor, easel);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_pan_drag_moves_container() {
    let mut pad = generated_pad();
    pad.handle_engine_event(action(
        PointerAction::PanStart,
        Point::default(),
        Point::new(10.0, 10.0),
    ));
    pad.handle_engine_event(action(
        PointerAction::Pan,
        Point::default(),
        Point::new(30.0, 25.0),
    ));

    assert_eq!(pad.navigation().offset(), Point::new(20.0, 15.0));
    let placement = pad.view().last_placement();
    assert!((placement.left - 120.0).abs() < f64::EPSILON);
    assert!((placement.top - 65.0).abs() < f64::EPSILON);
}

#[test]
fn test_recenter_message_resets_view() {
    let mut pad = generated_pad();
    pad.update_zoom(3, Some(Point::new(0.0, 0.0)));
    assert!(pad.handle_message(IncomingMessage::Recenter).is_none());
    assert_eq!(pad.navigation().zoom(), 0);
    assert_eq!(pad.navigation().offset(), Point::default());
    assert_eq!(pad.view().last_placement().scale, 1);
}

// ============================================================================
// Layers
// ============================================================================

#[test]
fn test_select_layer_by_tag() {
    let mut pad = generated_pad();
    pad.engine_mut().buffers[2].opacity = 0.25;
    pad.select_layer(Some("2")).expect("valid tag");

    assert_eq!(pad.engine().current_layer, 2);
    assert_eq!(pad.view().selected_layers(), vec![2]);
    assert_eq!(pad.view().opacity, Some(0.25));
}

#[test]
fn test_bad_layer_tags_abort_quietly() {
    let mut pad = generated_pad();

    assert!(matches!(pad.select_layer(None), Err(PadError::MissingLayerTag)));
    assert!(matches!(
        pad.select_layer(Some("top")),
        Err(PadError::InvalidLayerTag(_))
    ));
    assert!(matches!(
        pad.select_layer(Some("9")),
        Err(PadError::LayerOutOfRange { index: 9, count: 4 })
    ));

    assert_eq!(pad.engine().current_layer, 1);
    assert_eq!(pad.view().selected_layers(), vec![1]);
}

#[test]
fn test_swap_twice_is_identity() {
    let mut pad = generated_pad();
    pad.engine_mut().buffers[0].opacity = 0.5;
    let buffers = pad.engine().buffers.clone();
    let dom = pad.view().dom_order.clone();

    pad.swap_layers(0, 3).expect("in range");
    assert_eq!(pad.engine().buffer_tags(), vec![3, 1, 2, 0]);
    assert_eq!(pad.view().dom_order, vec![3, 1, 2, 0]);

    pad.swap_layers(0, 3).expect("in range");
    assert_eq!(pad.engine().buffers, buffers);
    assert_eq!(pad.view().dom_order, dom);
}

#[test]
fn test_swap_keeps_buffers_and_dom_paired() {
    let mut pad = generated_pad();
    pad.swap_layers(1, 2).expect("in range");
    pad.swap_layers(0, 1).expect("in range");

    assert_eq!(pad.engine().buffer_tags(), pad.view().dom_order);
    let order: Vec<usize> = pad.layers().order().iter().map(|LayerId(id)| *id).collect();
    assert_eq!(order, pad.view().dom_order);
    assert_eq!(pad.engine().buffers.len(), 4);
}

#[test]
fn test_swap_out_of_range_changes_nothing() {
    let mut pad = generated_pad();
    let redraws = pad.engine().redraws;
    assert!(pad.swap_layers(1, 4).is_err());
    assert_eq!(pad.engine().buffer_tags(), vec![0, 1, 2, 3]);
    assert_eq!(pad.engine().redraws, redraws);
}

#[test]
fn test_shift_left_moves_current_layer() {
    let mut pad = generated_pad();
    pad.engine_mut().buffers[1].opacity = 0.4;

    pad.shift_layer_left().expect("in range");

    assert_eq!(pad.engine().buffer_tags(), vec![1, 0, 2, 3]);
    assert_eq!(pad.engine().current_layer, 0);
    assert_eq!(pad.view().selected_layers(), vec![0]);
    assert!((pad.engine().buffers[0].opacity - 0.4).abs() < f64::EPSILON);
}

#[test]
fn test_shift_right_wraps_from_last_layer() {
    let mut pad = generated_pad();
    pad.select_layer_at(3).expect("in range");

    pad.shift_layer_right().expect("in range");

    assert_eq!(pad.engine().buffer_tags(), vec![3, 1, 2, 0]);
    assert_eq!(pad.engine().current_layer, 0);
    assert_eq!(pad.view().selected_layers(), vec![0]);
}

#[test]
fn test_exactly_one_layer_selected_throughout() {
    let mut pad = generated_pad();
    pad.select_layer_at(2).expect("in range");
    pad.shift_layer_left().expect("in range");
    pad.shift_layer_right().expect("in range");
    pad.swap_layers(0, 3).expect("in range");
    pad.handle_engine_event(EngineEvent::LayerChanged { layer: 3 });
    assert_eq!(pad.view().selected_layers().len(), 1);
    assert_eq!(pad.view().selected_layers(), vec![pad.layers().selected()]);
    assert_eq!(pad.engine().current_layer, pad.layers().selected());
}

#[test]
fn test_opacity_is_clamped_and_redrawn() {
    let mut pad = generated_pad();
    let redraws = pad.engine().redraws;

    pad.set_layer_opacity(0.3);
    assert!((pad.engine().buffers[1].opacity - 0.3).abs() < f64::EPSILON);

    pad.set_layer_opacity(7.0);
    assert!((pad.engine().buffers[1].opacity - 1.0).abs() < f64::EPSILON);

    pad.set_layer_opacity(f64::NAN);
    assert!((pad.engine().buffers[1].opacity - 1.0).abs() < f64::EPSILON);
    assert_eq!(pad.engine().redraws, redraws + 2);
}

// ============================================================================
// Tools and shortcuts
// ============================================================================

const CANVAS: KeyTarget = KeyTarget {
    inside_controls: false,
    is_input: false,
};

#[test]
fn test_tool_selection_is_exclusive() {
    let mut pad = generated_pad();
    for tool in Tool::ALL {
        pad.select_tool(tool);
        assert_eq!(pad.view().tool_marks, vec![tool]);
        assert_eq!(pad.engine().tool, tool);
        assert_eq!(pad.selected_tool(), tool);
    }
}

#[test]
fn test_ctrl_hold_uses_dropper_then_restores() {
    let mut pad = generated_pad();
    pad.select_tool(Tool::Spray);

    pad.handle_key_down(true);
    assert_eq!(pad.engine().tool, Tool::Dropper);
    pad.handle_key_down(true);
    assert_eq!(pad.engine().tool, Tool::Dropper);

    pad.handle_key_up();
    assert_eq!(pad.engine().tool, Tool::Spray);
}

#[test]
fn test_ctrl_hold_from_eraser_restores_freehand() {
    let mut pad = generated_pad();
    pad.select_tool(Tool::Eraser);
    pad.handle_key_down(true);
    pad.handle_key_up();
    assert_eq!(pad.engine().tool, Tool::Freehand);
    assert_eq!(pad.view().tool_marks, vec![Tool::Freehand]);
}

#[test]
fn test_eraser_shortcut_toggles() {
    let mut pad = generated_pad();
    pad.select_tool(Tool::Line);

    assert!(pad.handle_shortcut("e", CANVAS));
    assert_eq!(pad.engine().tool, Tool::Eraser);
    assert!(pad.handle_shortcut("e", CANVAS));
    assert_eq!(pad.engine().tool, Tool::Line);
}

#[test]
fn test_shortcuts_ignored_while_typing_elsewhere() {
    let mut pad = generated_pad();
    let typing = KeyTarget {
        inside_controls: false,
        is_input: true,
    };
    assert!(!pad.handle_shortcut("+", typing));
    assert_eq!(pad.navigation().zoom(), 0);

    let width_box = KeyTarget {
        inside_controls: true,
        is_input: true,
    };
    assert!(pad.handle_shortcut("+", width_box));
    assert_eq!(pad.navigation().zoom(), 1);
}

#[test]
fn test_unknown_key_is_not_handled() {
    let mut pad = generated_pad();
    assert!(!pad.handle_shortcut("q", CANVAS));
}

#[test]
fn test_zoom_shortcuts() {
    let mut pad = generated_pad();
    assert!(pad.handle_shortcut("+", CANVAS));
    assert!(pad.handle_shortcut("+", CANVAS));
    assert!(pad.handle_shortcut("-", CANVAS));
    assert_eq!(pad.navigation().zoom(), 1);
    // Handled even when the zoom is rejected at the bound
    assert!(pad.handle_shortcut("-", CANVAS));
    assert!(pad.handle_shortcut("-", CANVAS));
    assert_eq!(pad.navigation().zoom(), 0);
}

#[test]
fn test_width_shortcuts_respect_bounds() {
    let mut pad = generated_pad();
    assert!(pad.handle_shortcut("m", CANVAS));
    assert_eq!(pad.engine().line_width, 3);
    assert_eq!(pad.view().line_width, Some(3));

    for _ in 0..10 {
        pad.handle_shortcut("n", CANVAS);
    }
    assert_eq!(pad.engine().line_width, 1);

    pad.set_line_width(98);
    pad.handle_shortcut("m", CANVAS);
    pad.handle_shortcut("m", CANVAS);
    assert_eq!(pad.engine().line_width, 99);
}

#[test]
fn test_undo_redo_buttons_follow_engine() {
    let mut pad = generated_pad();
    pad.clear_layer();
    assert_eq!(pad.engine().clears, 1);
    assert!(pad.view().undo_enabled);
    assert!(!pad.view().redo_enabled);

    assert!(pad.handle_shortcut("z", CANVAS));
    assert!(!pad.view().undo_enabled);
    assert!(pad.view().redo_enabled);

    assert!(pad.handle_shortcut("y", CANVAS));
    assert!(pad.view().undo_enabled);
    assert!(!pad.view().redo_enabled);
}

#[test]
fn test_shape_selection() {
    let mut pad = generated_pad();
    pad.select_shape(LineShape::NormalSquare);
    assert_eq!(pad.engine().line_shape, Some(LineShape::NormalSquare));
    assert_eq!(pad.view().shape_marks, vec![LineShape::NormalSquare]);
    assert_eq!(pad.selected_shape(), LineShape::NormalSquare);
}

// ============================================================================
// Engine callbacks
// ============================================================================

#[test]
fn test_engine_color_change_updates_input() {
    let mut pad = generated_pad();
    pad.handle_engine_event(EngineEvent::ColorChanged {
        color: "rgb(255, 0, 0)".to_string(),
    });
    assert_eq!(pad.view().color.as_deref(), Some("#ff0000"));

    pad.handle_engine_event(EngineEvent::ColorChanged {
        color: "not a color".to_string(),
    });
    assert_eq!(pad.view().color.as_deref(), Some("#ff0000"));
}

#[test]
fn test_engine_layer_change_moves_highlight() {
    let mut pad = generated_pad();
    pad.handle_engine_event(EngineEvent::LayerChanged { layer: 3 });
    assert_eq!(pad.view().selected_layers(), vec![3]);

    pad.handle_engine_event(EngineEvent::LayerChanged { layer: 12 });
    assert_eq!(pad.view().selected_layers(), vec![3]);
}

#[test]
fn test_undo_state_event_refreshes_buttons() {
    let mut pad = generated_pad();
    pad.engine_mut().undo_steps = 2;
    pad.handle_engine_event(EngineEvent::UndoStateChanged);
    assert!(pad.view().undo_enabled);
}

#[test]
fn test_cursor_position_shown_only_with_info() {
    let mut pad = generated_pad();
    pad.handle_engine_event(action(
        PointerAction::Other,
        Point::new(12.7, 3.2),
        Point::default(),
    ));
    assert_eq!(pad.view().cursor, Some((12, 3)));

    pad.set_info_displayed(false);
    assert_eq!(pad.view().info_visible, Some(false));
    pad.handle_engine_event(action(
        PointerAction::Other,
        Point::new(50.0, 50.0),
        Point::default(),
    ));
    assert_eq!(pad.view().cursor, Some((12, 3)));
}

#[test]
fn test_color_input_normalises() {
    let mut pad = generated_pad();
    pad.set_color("#ABC").expect("valid color");
    assert_eq!(pad.engine().color, "#aabbcc");
    assert!(matches!(
        pad.set_color("mauve"),
        Err(PadError::InvalidColor(_))
    ));
    assert_eq!(pad.engine().color, "#aabbcc");
}

// ============================================================================
// Messages
// ============================================================================

#[test]
fn test_get_image_replies_with_png() {
    let mut pad = generated_pad();
    let reply = pad.handle_message(IncomingMessage::GetImage);
    assert_eq!(
        reply,
        Some(OutgoingMessage::Image {
            image: "data:image/png;base64,iVBORw0KGgo=".to_string()
        })
    );
}

#[test]
fn test_get_image_without_canvas_data() {
    let mut pad = generated_pad();
    pad.engine_mut().image = None;
    assert_eq!(pad.handle_message(IncomingMessage::GetImage), None);
}

#[test]
fn test_custom_config_initial_state() {
    let pad = pad_with(PadConfig {
        layer_count: 2,
        min_zoom: 1,
        max_zoom: 3,
        show_info: false,
        ..PadConfig::default()
    });
    assert_eq!(pad.navigation().zoom(), 1);
    assert_eq!(pad.view().last_placement().scale, 2);
    assert_eq!(pad.view().info_visible, Some(false));
    assert_eq!(pad.view().selected_layers(), vec![1]);
}
