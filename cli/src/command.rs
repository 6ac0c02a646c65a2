use sweeper_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Commands: r <row> <col>, f <row> <col>, n (new game), q (quit)")]
    Empty,
    #[error("Unknown command {0:?}")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("{0:?} is not a valid row or column")]
    BadCoord(String),
    #[error("Unexpected input {0:?}")]
    Trailing(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            None => return Err(CommandError::Empty),
            Some("r" | "reveal") => Self::Reveal(parse_coords(&mut words)?),
            Some("f" | "flag") => Self::Flag(parse_coords(&mut words)?),
            Some("n" | "new") => Self::NewGame,
            Some("q" | "quit") => Self::Quit,
            Some(other) => return Err(CommandError::Unknown(other.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let word = words.next().ok_or(CommandError::MissingCoords)?;
        word.parse()
            .map_err(|_| CommandError::BadCoord(word.to_owned()))
    };
    Ok((next()?, next()?))
}
