//! Flip Runner entry point
//!
//! Native builds run a headless session (optionally with a simple
//! autopilot) and report how the run ended. Browser hosts drive the library
//! directly from their animation-frame callback.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use flip_runner::sim::{ChunkLibrary, Difficulty, World};
    use flip_runner::{ConfigError, GameConfig, LoopControl, Session};

    /// Headless gravity-flip runner
    #[derive(Debug, Parser)]
    #[command(name = "flip-runner", version, about)]
    struct Cli {
        /// easy, medium or hard
        #[arg(short, long, default_value = "medium", value_parser = parse_difficulty)]
        difficulty: Difficulty,

        /// Stop after this many frames even if the run hasn't ended
        #[arg(short, long, default_value_t = 20_000)]
        frames: u64,

        /// JSON config (viewport, seed)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON chunk library replacing the built-in levels
        #[arg(long)]
        chunks: Option<PathBuf>,

        /// Layout seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Flip automatically to stay on platforms and dodge obstacles
        #[arg(short, long)]
        autopilot: bool,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        let cli = Cli::parse();

        match run(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("{err}");
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        }
    }

    fn run(cli: &Cli) -> Result<(), ConfigError> {
        let mut config = match &cli.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = cli.seed {
            config.seed = Some(seed);
        }
        let library = match &cli.chunks {
            Some(path) => ChunkLibrary::load(path)?,
            None => ChunkLibrary::builtin(),
        };

        let mut session = Session::with_library(config, library)?;
        session.start_game(cli.difficulty);

        let mut flips = 0u32;
        while session.world().frame < cli.frames {
            if cli.autopilot && wants_flip(session.world()) && session.flip() {
                flips += 1;
            }
            if session.advance_frame() == LoopControl::Halt {
                break;
            }
        }

        println!(
            "{} | {:?} after {} frames | score {} | {} flips",
            session.difficulty().as_str(),
            session.phase(),
            session.world().frame,
            session.score(),
            flips
        );
        Ok(())
    }

    /// Distance ahead the autopilot looks for support and obstacles
    const LOOKAHEAD: f32 = 60.0;

    /// Flip when grounded and the current rail runs out (or is blocked) just
    /// ahead while the other rail continues.
    fn wants_flip(world: &World) -> bool {
        let player = &world.player;
        if player.velocity_y != 0.0 {
            return false;
        }

        let falling_down = player.gravity > 0.0;
        let probe_start = player.pos.x;
        let probe_end = player.right() + LOOKAHEAD;
        let covers = |falling_down: bool| {
            world.platforms.iter().any(|p| {
                let on_side = if falling_down {
                    p.pos.y >= player.bottom()
                } else {
                    p.bottom() <= player.top()
                };
                on_side && p.pos.x <= probe_start && p.right() >= probe_end
            })
        };
        let blocked = world.obstacles.iter().any(|o| {
            o.pos.x < probe_end
                && o.right() > probe_start
                && o.pos.y < player.bottom()
                && o.pos.y + o.size.y > player.top()
        });

        (blocked || !covers(falling_down)) && covers(!falling_down)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive flip_runner::Session from their own frame loop
}
