use anyhow::Context;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineclear_core as game;
use web_time::{SystemTime, UNIX_EPOCH};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 9x9, 10 mines
    Beginner,
    /// 16x16, 40 mines
    Intermediate,
    /// 30x16, 100 mines
    Expert,
}

impl From<Preset> for game::Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Self::Beginner,
            Preset::Intermediate => Self::Intermediate,
            Preset::Expert => Self::Expert,
        }
    }
}

/// Play mineclear in the terminal.
///
/// Commands, one per line: `o X Y` open, `f X Y` flag, `c X Y` chord,
/// `r` reset, `n PRESET` new board, `p` pause or resume, `q` quit.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Settings {
    /// Board preset, individual values below override it
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    pub difficulty: Preset,

    #[arg(long)]
    pub width: Option<game::Coord>,

    #[arg(long)]
    pub height: Option<game::Coord>,

    #[arg(long)]
    pub mines: Option<game::CellCount>,

    /// Seed for mine placement, defaults to the current time
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl Settings {
    pub fn game_config(&self) -> anyhow::Result<game::GameConfig> {
        let preset = game::Difficulty::from(self.difficulty).config();
        let size = (
            self.width.unwrap_or(preset.width()),
            self.height.unwrap_or(preset.height()),
        );
        let mines = self.mines.unwrap_or(preset.mines());

        game::GameConfig::new(size, mines)
            .with_context(|| format!("invalid board {}x{} with {} mines", size.0, size.1, mines))
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        Settings::try_parse_from(std::iter::once("mineclear").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn preset_is_the_default() {
        let config = parse(&[]).game_config().unwrap();

        assert_eq!(config, game::Difficulty::Beginner.config());
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = parse(&["-d", "expert", "--height", "20", "--mines", "120"])
            .game_config()
            .unwrap();

        assert_eq!(config.size(), (30, 20));
        assert_eq!(config.mines(), 120);
    }

    #[test]
    fn overfull_board_is_rejected_before_play() {
        let settings = parse(&["--width", "3", "--height", "3", "--mines", "1"]);

        assert!(settings.game_config().is_err());
    }

    #[test]
    fn explicit_seed_wins() {
        assert_eq!(parse(&["--seed", "99"]).seed(), 99);
    }
}
