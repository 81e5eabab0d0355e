use crate::error::{KeySweepError, KsResult};
use crate::geometry::{Finger, Hand, Position, COLS, ROWS, THUMB_ROW};
use crate::layouts::KnownLayout;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

pub const SPACE: char = ' ';

/// Marker between the layout name and its rows.
const NAME_DELIMITER: char = ':';
/// Marker between the left and right half of a row.
const HALF_SEPARATOR: char = '|';

/// A 4x10 key grid plus its character -> position index.
///
/// Space is synthesized on both thumb slots and is the only character that occupies
/// two positions, so it lives in the grid and in `valid_keys` but not in the index.
/// Every other character maps to exactly one slot and that slot maps back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: String,
    grid: [[Option<char>; COLS]; ROWS],
    char_to_pos: HashMap<char, Position>,
    valid_keys: HashSet<char>,
}

impl Layout {
    /// A layout holding nothing but the two thumb spaces.
    pub fn empty(name: &str) -> Self {
        let mut layout = Layout {
            name: name.to_string(),
            grid: [[None; COLS]; ROWS],
            char_to_pos: HashMap::new(),
            valid_keys: HashSet::new(),
        };
        for thumb in [Position::LEFT_THUMB, Position::RIGHT_THUMB] {
            layout.grid[thumb.row as usize][thumb.col as usize] = Some(SPACE);
        }
        layout.valid_keys.insert(SPACE);
        layout
    }

    /// Parses a layout definition:
    ///
    /// ```text
    /// semimak:
    /// f l h v z | q w u o y
    /// s r n t k | c d e a i
    /// x ' b m j | p g , . /
    /// ```
    ///
    /// Whitespace only separates characters. Rows without a `|` put the first five
    /// characters on the left hand and the rest on the right.
    pub fn parse(text: &str) -> KsResult<Layout> {
        let (name, body) = text.split_once(NAME_DELIMITER).ok_or_else(|| {
            KeySweepError::Validation(format!(
                "Layout definition has no '{}' after its name",
                NAME_DELIMITER
            ))
        })?;

        let mut layout = Layout::empty(name.trim());
        let mut row = 0u8;

        for line in body.lines() {
            if row as usize >= ROWS {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let left_slots = half_slots(row, 0..5);
            let right_slots = half_slots(row, 5..10);

            let (left, right): (Vec<char>, Vec<char>) = match line.split_once(HALF_SEPARATOR) {
                Some((l, r)) => (keys_of(l), keys_of(r)),
                None => {
                    let mut all = keys_of(line);
                    let rest = all.split_off(all.len().min(left_slots.len()));
                    (all, rest)
                }
            };

            layout.fill(&left, &left_slots)?;
            layout.fill(&right, &right_slots)?;
            row += 1;
        }

        debug!(
            "Parsed layout '{}' with {} keys",
            layout.name,
            layout.char_to_pos.len()
        );
        Ok(layout)
    }

    fn fill(&mut self, keys: &[char], slots: &[Position]) -> KsResult<()> {
        if keys.len() > slots.len() {
            warn!(
                "Layout '{}': dropping {:?}, row half only has {} slots",
                self.name,
                &keys[slots.len()..],
                slots.len()
            );
        }
        for (&c, &pos) in keys.iter().zip(slots) {
            self.place(c, pos)?;
        }
        Ok(())
    }

    fn place(&mut self, c: char, pos: Position) -> KsResult<()> {
        if self.valid_keys.contains(&c) {
            return Err(KeySweepError::Validation(format!(
                "Layout '{}' assigns '{}' more than once",
                self.name, c
            )));
        }
        self.grid[pos.row as usize][pos.col as usize] = Some(c);
        self.char_to_pos.insert(c, pos);
        self.valid_keys.insert(c);
        Ok(())
    }

    pub fn char_at(&self, pos: Position) -> Option<char> {
        self.grid
            .get(pos.row as usize)
            .and_then(|r| r.get(pos.col as usize))
            .copied()
            .flatten()
    }

    pub fn position_of(&self, c: char) -> Option<Position> {
        self.char_to_pos.get(&c).copied()
    }

    pub fn finger_of(&self, c: char) -> Option<Finger> {
        if c == SPACE {
            return Some(Finger::Thumb);
        }
        self.position_of(c).map(Position::finger)
    }

    pub fn hand_of(&self, c: char) -> Option<Hand> {
        self.finger_of(c).map(Finger::hand)
    }

    pub fn valid_keys(&self) -> &HashSet<char> {
        &self.valid_keys
    }

    pub fn contains(&self, c: char) -> bool {
        self.valid_keys.contains(&c)
    }

    /// Number of keyed (non-space) characters.
    pub fn key_count(&self) -> usize {
        self.char_to_pos.len()
    }

    /// Keyed characters in row-major order.
    pub fn keyed_chars(&self) -> Vec<char> {
        Position::all()
            .filter_map(|p| self.char_at(p))
            .filter(|&c| c != SPACE)
            .collect()
    }

    pub fn rows(&self) -> &[[Option<char>; COLS]; ROWS] {
        &self.grid
    }

    /// Exchanges the slots of `a` and `b`. Returns false (and changes nothing) unless
    /// both are distinct keyed characters of this layout.
    pub fn swap(&mut self, a: char, b: char) -> bool {
        if a == b || a == SPACE || b == SPACE {
            return false;
        }
        let (Some(pa), Some(pb)) = (self.position_of(a), self.position_of(b)) else {
            return false;
        };

        self.grid[pa.row as usize][pa.col as usize] = Some(b);
        self.grid[pb.row as usize][pb.col as usize] = Some(a);
        self.char_to_pos.insert(a, pb);
        self.char_to_pos.insert(b, pa);
        true
    }

    /// Value copy with `a` and `b` exchanged; `self` is untouched.
    pub fn swapped(&self, a: char, b: char) -> Layout {
        let mut next = self.clone();
        next.swap(a, b);
        next
    }

    /// True when the grid and the index agree in both directions.
    pub fn is_consistent(&self) -> bool {
        let forward = self
            .char_to_pos
            .iter()
            .all(|(&c, &p)| self.char_at(p) == Some(c));

        let mut seen = HashSet::new();
        let backward = Position::all().all(|p| match self.char_at(p) {
            Some(SPACE) => p.is_thumb_slot(),
            Some(c) => self.position_of(c) == Some(p) && seen.insert(c),
            None => true,
        });

        let thumbs = self.char_at(Position::LEFT_THUMB) == Some(SPACE)
            && self.char_at(Position::RIGHT_THUMB) == Some(SPACE);

        forward && backward && thumbs
    }
}

/// Renders the layout back into its definition format.
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", self.name, NAME_DELIMITER)?;
        let occupied = |r: usize| (0..COLS).any(|c| self.grid[r][c].is_some() && !is_thumb(r, c));
        let Some(last) = (0..ROWS).rev().find(|&r| occupied(r)) else {
            return Ok(());
        };
        // Empty rows still print their separator so later rows keep their index.
        for (r, row) in self.grid.iter().enumerate().take(last + 1) {
            let half = |cols: std::ops::Range<usize>| -> String {
                cols.filter(|&c| !is_thumb(r, c))
                    .filter_map(|c| row[c])
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            writeln!(f, "{} {} {}", half(0..5), HALF_SEPARATOR, half(5..10))?;
        }
        Ok(())
    }
}

fn is_thumb(row: usize, col: usize) -> bool {
    row == THUMB_ROW as usize && (col == 4 || col == 5)
}

fn half_slots(row: u8, cols: std::ops::Range<u8>) -> Vec<Position> {
    cols.map(|col| Position { row, col })
        .filter(|p| !p.is_thumb_slot())
        .collect()
}

fn keys_of(half: &str) -> Vec<char> {
    half.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Resolves `identifier` to a definition file in `dir` (with or without `.txt`),
/// falling back to the built-in catalogue.
pub fn load_layout<P: AsRef<Path>>(dir: P, identifier: &str) -> KsResult<Layout> {
    let dir = dir.as_ref();
    let candidates = [
        dir.join(identifier),
        dir.join(format!("{}.txt", identifier)),
    ];

    for path in &candidates {
        if path.is_file() {
            info!("📂 Loading Layout: {}", path.display());
            let text = fs::read_to_string(path)?;
            return Layout::parse(&text);
        }
    }

    if let Ok(known) = KnownLayout::from_str(&identifier.to_lowercase()) {
        info!("📂 Using built-in layout: {}", known);
        return Layout::parse(known.definition());
    }

    Err(KeySweepError::LayoutNotFound(format!(
        "'{}' (looked in '{}')",
        identifier,
        dir.display()
    )))
}
