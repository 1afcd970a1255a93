use crate::{Grid, Pos2, error::PatternError};
use regex::Regex;
use std::sync::OnceLock;

/// Longest single run accepted when decoding, no field is wider than this
pub const MAX_RUN: i32 = crate::config::MAX_FIELD_SIZE;

/// Turns sets of live cells into text and back
pub trait PositionEncoder {
    /// `cells` must be sorted row-major
    fn encode(&self, cells: &[Pos2]) -> String;
    fn decode(&self, value: &str) -> Result<Vec<Pos2>, PatternError>;

    fn encode_grid(&self, grid: &Grid) -> String {
        let alive: Vec<_> = grid.alive().collect();
        self.encode(&alive)
    }
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i32, tag: char) {
        let append = match run {
            0 => return,
            1 => tag.to_string(),
            n => format!("{n}{tag}"),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

/// The Life RLE format: `o` alive, `b` dead, `$` end of row, `!` end
#[derive(Debug, Clone, Default)]
pub struct RunLengthEncoded {
    name: Option<String>,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    fn encode_header(&self, cells: &[Pos2]) -> String {
        let mut header = String::new();
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {name}\n"));
        }
        let (width, height) = match bounds(cells) {
            Some((tl, br)) => (br.x - tl.x + 1, br.y - tl.y + 1),
            None => (0, 0),
        };
        header.push_str(&format!("x = {width}, y = {height}, rule = B3/S23"));
        header
    }

    fn encode_cells(&self, cells: &[Pos2]) -> String {
        let tl = bounds(cells).map(|(tl, _)| tl).unwrap_or_default();

        let mut last = tl - Pos2 { x: 1, y: 0 };
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for &pos in cells {
            // extend the run while cells are adjacent on the same row
            if last.y == pos.y && last.x + 1 == pos.x {
                alive_run += 1;
                last = pos;
                continue;
            }

            let lines_run = pos.y - last.y;
            let dead_run = match lines_run {
                0 => pos.x - last.x - 1,
                _ => pos.x - tl.x,
            };
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            last = pos;
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }
}

/// Top-left and bottom-right corners of a set of cells
fn bounds(cells: &[Pos2]) -> Option<(Pos2, Pos2)> {
    let first = *cells.first()?;
    Some(cells.iter().fold((first, first), |(tl, br), p| {
        (
            Pos2::new(tl.x.min(p.x), tl.y.min(p.y)),
            Pos2::new(br.x.max(p.x), br.y.max(p.y)),
        )
    }))
}

fn run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid run pattern"))
}

impl PositionEncoder for RunLengthEncoded {
    fn encode(&self, cells: &[Pos2]) -> String {
        format!("{}\n{}\n", self.encode_header(cells), self.encode_cells(cells))
    }

    fn decode(&self, value: &str) -> Result<Vec<Pos2>, PatternError> {
        let mut alive = Vec::new();
        let mut cursor = Pos2::zero();
        for (line, text) in (1..).zip(value.lines()) {
            let body = text.split('#').next().unwrap_or_default();
            if body.trim_start().starts_with('x') {
                continue;
            }

            for (_, [count, tag]) in run_regex().captures_iter(body).map(|c| c.extract()) {
                let run = run_length(count, line)?;
                let advance = |from: i32| {
                    from.checked_add(run)
                        .ok_or(PatternError::OutOfRange { line })
                };
                match tag {
                    "!" => return Ok(alive),
                    "o" => {
                        let end = advance(cursor.x)?;
                        alive.extend((cursor.x..end).map(|x| Pos2::new(x, cursor.y)));
                        cursor.x = end;
                    }
                    "b" => cursor.x = advance(cursor.x)?,
                    "$" => cursor = Pos2::new(0, advance(cursor.y)?),
                    _ => unreachable!(),
                }
            }
        }

        Ok(alive)
    }
}

/// A missing count means a single cell
fn run_length(count: &str, line: usize) -> Result<i32, PatternError> {
    if count.is_empty() {
        return Ok(1);
    }
    count
        .parse::<i32>()
        .ok()
        .filter(|run| *run <= MAX_RUN)
        .ok_or_else(|| PatternError::RunTooLong {
            line,
            run: count.to_owned(),
        })
}
