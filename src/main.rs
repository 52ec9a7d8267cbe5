use drawcore::config::EditorConfig;
use drawcore::editor::{Editor, EditorError, Placement};
use drawcore::shape::ShapeKind;
use serde_json::json;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();

    let config = match EditorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let mut editor = match Editor::with_config(config) {
        Ok(editor) => editor,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    if let Err(e) = build_demo_scene(&mut editor) {
        error!(error = %e, "failed to build demo scene");
        std::process::exit(1);
    }
    info!(shapes = editor.current_page_shapes().len(), "demo scene built");

    match serde_json::to_string_pretty(&editor.render_list()) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            error!(error = %e, "failed to serialize render list");
            std::process::exit(1);
        }
    }
}

fn build_demo_scene(editor: &mut Editor) -> Result<(), EditorError> {
    editor.batch(|editor| {
        editor.create_shape(ShapeKind::Circle, &json!({ "radius": 50 }), Placement::at(200.0, 200.0))?;
        editor.create_shape(ShapeKind::Rect, &json!({ "width": 100, "height": 80 }), Placement::at(400.0, 200.0))?;
        editor.create_shape(ShapeKind::Text, &json!({ "text": "Hello TSDraw!" }), Placement::at(200.0, 400.0))?;
        let stroke = json!({
            "points": [
                { "x": 600, "y": 200 },
                { "x": 620, "y": 220 },
                { "x": 640, "y": 210 },
                { "x": 660, "y": 230 },
                { "x": 680, "y": 220 },
                { "x": 700, "y": 240 },
            ],
            "size": 3,
        });
        editor.create_shape(ShapeKind::Draw, &stroke, Placement::default())?;
        Ok(())
    })
}
