//! Builds a small scene and writes it as an ASCII STL file.
//!
//! Usage:
//! ```text
//! cargo run --example export                                   # writes to the temp dir
//! cargo run --example export -- ./out                          # writes to ./out
//! cargo run --example export -- ./out '{"type":"torus","params":{"radius":8}}'
//! ```
//!
//! The optional JSON argument stands in for an interpretation service reply.

use std::path::PathBuf;

use simpaad::error::InterpretError;
use simpaad::export::{ExportConfig, ExportFile, MeshExporter};
use simpaad::interpret::{ImagePayload, ShapeInterpreter, ShapeRequest};
use simpaad::math::Point3;
use simpaad::scene::Scene;

/// Replies with a fixed JSON body, whatever the prompt.
struct JsonReply(String);

impl ShapeInterpreter for JsonReply {
    fn interpret(
        &self,
        _prompt: &str,
        _image: Option<&ImagePayload>,
    ) -> Result<ShapeRequest, InterpretError> {
        ShapeRequest::from_json(&self.0)
    }
}

fn main() -> simpaad::Result<()> {
    // Default: WARN for everything, INFO for simpaad.
    // Override with RUST_LOG env var (e.g. RUST_LOG=simpaad=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("simpaad=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map_or_else(std::env::temp_dir, PathBuf::from);
    let reply = args
        .next()
        .unwrap_or_else(|| r#"{"type":"sphere","params":{"radius":4},"label":"Ball"}"#.into());

    let mut scene = Scene::with_workpiece();
    let part = scene.add_part();
    scene.set_position(part, Point3::new(15.0, 5.0, 0.0))?;
    scene.interpret_and_add(&JsonReply(reply), "a ball on the plate", None)?;

    let config = ExportConfig::default();
    let outcome = MeshExporter::new(config.clone()).execute(&scene.render_solids())?;
    if !outcome.is_complete() {
        for rejected in &outcome.rejected {
            eprintln!("skipped {:?}: {}", rejected.id, rejected.error);
        }
    }

    let file = ExportFile::new(&config.model_name, outcome.document);
    let path = file.save(&out_dir)?;
    println!(
        "{} facets from {} solids -> {}",
        outcome.facet_count,
        scene.len(),
        path.display()
    );
    Ok(())
}
