#![warn(clippy::pedantic)]
//! Replays a recorded host session into the ink overlay, and writes what it would have shown.
//!
//! `inkboard <session.toml> [out.png] [--mesh]`

pub mod actions;
pub mod global;
pub mod overlay;
pub mod raster;
pub mod session;
pub mod tessellate;

use anyhow::Result as AnyResult;

struct Args {
    session: std::path::PathBuf,
    output: std::path::PathBuf,
    /// Also tessellate the session, reporting mesh sizes.
    mesh: bool,
}
impl Args {
    fn parse() -> AnyResult<Self> {
        let mut mesh = false;
        let mut paths = Vec::new();
        // Paths are OSStrings, let the system handle character encoding restrictions.
        for arg in std::env::args_os().skip(1) {
            if arg == "--mesh" {
                mesh = true;
            } else {
                paths.push(std::path::PathBuf::from(arg));
            }
        }
        let mut paths = paths.into_iter();
        let Some(session) = paths.next() else {
            anyhow::bail!("usage: inkboard <session.toml> [out.png] [--mesh]");
        };
        let output = paths
            .next()
            .unwrap_or_else(|| session.with_extension("png"));
        if let Some(extra) = paths.next() {
            anyhow::bail!("unexpected argument {}", extra.display());
        }
        Ok(Self {
            session,
            output,
            mesh,
        })
    }
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let args = Args::parse()?;

    let hotkeys = global::hotkeys::Hotkeys::get();
    if let Err(e) = hotkeys.save() {
        log::warn!("Failed to save hotkey config:\n{e:?}");
    };
    let settings = global::settings::Settings::read_clone();

    let session = session::Session::load(&args.session)
        .map_err(|e| e.context(format!("loading {}", args.session.display())))?;
    log::info!(
        "replaying {} events from {}",
        session.events.len(),
        args.session.display()
    );

    let surface = raster::RasterSurface::new(session.content.canvas_size(), 1.0);
    let overlay = session::Replay::start(
        &session,
        surface,
        settings.pen,
        settings.enabled,
        &hotkeys.keys_to_actions,
    )
    .run(&session.events);

    let opacity = if overlay.is_composited() {
        overlay.opacity()
    } else {
        0.0
    };
    let image = overlay.surface().composite(session.background, opacity);
    image.save_png(&args.output)?;

    // Pen changes made during the session carry over to the next one.
    let pen = *overlay.pipeline().settings();
    if let Some(changed) = global::settings::Settings::modify(|settings| settings.pen = pen) {
        if let Err(e) = changed.save() {
            log::warn!("Failed to save settings:\n{e:?}");
        }
    }
    log::info!(
        "{} strokes, wrote {}",
        overlay.pipeline().history().len(),
        args.output.display()
    );

    if args.mesh {
        let overlay = session::Replay::start(
            &session,
            tessellate::MeshSurface::default(),
            settings.pen,
            settings.enabled,
            &hotkeys.keys_to_actions,
        )
        .run(&session.events);
        let mesh = &overlay.surface().main;
        log::info!(
            "mesh: {} vertices ({} bytes), {} triangles",
            mesh.vertices().len(),
            bytemuck::cast_slice::<_, u8>(mesh.vertices()).len(),
            mesh.indices().len() / 3,
        );
    }
    Ok(())
}
