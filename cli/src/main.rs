use std::io::{self, BufRead, Write};

use clap::Parser;
use mineclear_core as game;
use web_time::Instant;

use command::Command;
use settings::Settings;

mod command;
mod render;
mod settings;

/// Runs one command against the session and returns a line to show for it.
fn apply(session: &mut game::Session, command: Command) -> game::Result<Option<String>> {
    Ok(match command {
        Command::Open(coords) => Some(render::summary(&session.open(coords)?)),
        Command::Chord(coords) => Some(render::summary(&session.chord(coords)?)),
        Command::Flag(coords) => match session.toggle_flag(coords)? {
            game::MarkOutcome::NoChange => Some("cannot flag that cell".to_owned()),
            _ => None,
        },
        Command::Reset => {
            session.reset();
            None
        }
        Command::NewGame(preset) => {
            let config = game::Difficulty::from(preset).config();
            log::info!(
                "new {}x{} board with {} mines",
                config.width(),
                config.height(),
                config.mines()
            );
            session.new_game(config);
            None
        }
        Command::TogglePause => {
            if !session.pause() && !session.resume() {
                Some("only a running game can be paused".to_owned())
            } else {
                None
            }
        }
        Command::Quit => None,
    })
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    tracing_subscriber::fmt()
        .with_max_level(settings.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = settings.game_config()?;
    let seed = settings.seed();
    log::info!(
        "new {}x{} board with {} mines, seed {}",
        config.width(),
        config.height(),
        config.mines(),
        seed
    );

    let mut session = game::Session::new(config, seed);
    let mut out = io::stdout().lock();
    let mut last_frame = Instant::now();
    render::board(&mut out, &session.snapshot())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let now = Instant::now();
        session.advance(now - last_frame);
        last_frame = now;

        if line.trim().is_empty() {
            continue;
        }
        let message = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => match apply(&mut session, command) {
                Ok(message) => message,
                Err(err) => Some(format!("error: {err}")),
            },
            Err(err) => Some(format!("{err:#}")),
        };

        if let Some(message) = message {
            writeln!(out, "{message}")?;
        }
        render::board(&mut out, &session.snapshot())?;
        out.flush()?;
    }

    log::info!(
        "finished {:?} after {:?}",
        session.state(),
        session.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_toggles_between_states() {
        let mut session = game::Session::with_layout((5, 1), &[(2, 0)]).unwrap();

        assert!(apply(&mut session, Command::TogglePause).unwrap().is_some());
        apply(&mut session, Command::Open((4, 0))).unwrap();
        assert_eq!(apply(&mut session, Command::TogglePause).unwrap(), None);
        assert_eq!(session.state(), game::GameState::Paused);
        apply(&mut session, Command::TogglePause).unwrap();
        assert_eq!(session.state(), game::GameState::Playing);
    }

    #[test]
    fn new_game_command_switches_preset() {
        let mut session = game::Session::with_layout((5, 1), &[(2, 0)]).unwrap();
        apply(&mut session, Command::Open((4, 0))).unwrap();

        apply(&mut session, Command::NewGame(settings::Preset::Expert)).unwrap();

        assert_eq!(session.size(), (30, 16));
        assert_eq!(session.total_mines(), 100);
        assert_eq!(session.state(), game::GameState::NotStarted);
        assert!(!session.is_seeded());
    }

    #[test]
    fn out_of_bounds_surfaces_as_error() {
        let mut session = game::Session::new(game::Difficulty::Beginner.config(), 1);

        assert!(apply(&mut session, Command::Open((9, 0))).is_err());
    }
}
