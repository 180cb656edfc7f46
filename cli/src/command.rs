use core::str::FromStr;

use anyhow::{Context, bail};
use clap::ValueEnum;
use mineclear_core as game;

use crate::settings::Preset;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(game::Coord2),
    Flag(game::Coord2),
    Chord(game::Coord2),
    Reset,
    NewGame(Preset),
    TogglePause,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb {
            "o" | "open" => Self::Open(coords(&mut words)?),
            "f" | "flag" => Self::Flag(coords(&mut words)?),
            "c" | "chord" => Self::Chord(coords(&mut words)?),
            "r" | "reset" => Self::Reset,
            "n" | "new" => Self::NewGame(preset(&mut words)?),
            "p" | "pause" => Self::TogglePause,
            "q" | "quit" => Self::Quit,
            other => bail!("unknown command {other:?}, expected o/f/c X Y, r, n PRESET, p or q"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected {extra:?} after {verb:?}");
        }
        Ok(command)
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<game::Coord2> {
    let mut axis = |name: &str| -> anyhow::Result<game::Coord> {
        let word = words.next().with_context(|| format!("missing {name} coordinate"))?;
        word.parse::<game::Coord>()
            .with_context(|| format!("{name} coordinate {word:?} is not a number in 0..=255"))
    };
    Ok((axis("x")?, axis("y")?))
}

fn preset<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Preset> {
    let word = words
        .next()
        .context("missing preset, expected beginner, intermediate or expert")?;
    <Preset as ValueEnum>::from_str(word, true).map_err(anyhow::Error::msg)
}
