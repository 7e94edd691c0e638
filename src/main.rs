mod args;

use args::Args;
use hashmatch::annotate::save_annotated;
use hashmatch::config::create_default_config;
use hashmatch::input::{FrameEvent, FrameSource, SequenceSource, StillImageSource};
use hashmatch::recognizer::{RecognitionEvent, spawn_recognition};
use hashmatch::{
    HashingAlgorithm, HashingBackend, HashingConfig, RecognitionError, RecognitionResult, Recognizer,
    ReferenceModel, Result,
};
use std::sync::Arc;

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    let default_filter = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(&args) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => HashingConfig::from_json_file(path)?,
        None => create_default_config(),
    };

    let model = match (&args.load_model, &args.model) {
        (Some(path), _) => ReferenceModel::load(path)?,
        (None, Some(path)) => ReferenceModel::from_path(path, &config)?,
        (None, None) => {
            return Err(RecognitionError::InvalidConfig {
                description: "no reference model given".to_string(),
            });
        }
    };
    println!("📦 Model '{}' with {} fingerprint(s)", model.id(), model.len());

    if let Some(path) = &args.save_model {
        model.save(path)?;
        println!("💾 Model saved to {}", path.display());
    }

    let backend = HashingBackend::select_with_fallback(args.backend, config)?;
    println!("⚙️  Hashing backend: {}", backend.name());
    let mut recognizer = Recognizer::new(backend);
    recognizer.add_model(Arc::new(model));

    if let Some(path) = &args.query {
        let mut source = StillImageSource::open(path)?;
        let frame = match source.next_frame()? {
            FrameEvent::Frame(frame) => frame,
            _ => {
                return Err(RecognitionError::InvalidFrameSource {
                    location: path.clone(),
                    description: "image holds no pixels".to_string(),
                });
            }
        };
        let results = recognizer.recognize(&frame, args.roi.as_ref())?;
        if results.is_empty() {
            println!("🚫 No match in {}", path.display());
        }
        results.iter().for_each(print_result);
        if let Some(out) = &args.annotate {
            save_annotated(&frame, &results, out)?;
            println!("🖼️  Annotated image saved to {}", out.display());
        }
    } else if let Some(dir) = &args.frames {
        let source = SequenceSource::open(dir)?;
        run_sequence(Arc::new(recognizer), source, args)?;
    } else {
        println!("ℹ️  No --query or --frames given, nothing to recognize");
    }
    Ok(())
}

fn run_sequence(recognizer: Arc<Recognizer>, source: SequenceSource, args: &Args) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_cmd_tx, mut events) = spawn_recognition(recognizer, source, args.roi);
        while let Some(event) = events.recv().await {
            match event {
                RecognitionEvent::Matched(result) => print_result(&result),
                RecognitionEvent::NoMatch { frame_id } => println!("🚫 Frame {frame_id}: no match"),
                RecognitionEvent::EmptyFrame { index } => println!("⚠️  Frame {index} is empty, stopping"),
                RecognitionEvent::Finished(summary) => println!(
                    "✅ {} frame(s), {} match(es), stopped on {:?}",
                    summary.frames, summary.matches, summary.stop_reason
                ),
                RecognitionEvent::Error(e) => {
                    return Err(RecognitionError::InvalidFrame { description: e });
                }
            }
        }
        Ok(())
    })
}

fn print_result(result: &RecognitionResult) {
    let (cx, cy) = result.center();
    let corners = result.corners().corners();
    println!(
        "🎯 Frame {}: '{}' at ({:.1}, {:.1}) rank {:.3} corners [{}]",
        result.frame_id(),
        result.model_id(),
        cx,
        cy,
        result.rank(),
        corners
            .iter()
            .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
            .collect::<Vec<_>>()
            .join(", ")
    );
}
