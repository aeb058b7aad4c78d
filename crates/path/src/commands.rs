//! Typed drawing commands.
//!
//! A [`Command`] is one operation of a drawing command stream, carrying its
//! operands in 26.6 fixed-point coordinates. [`Commands`] is an owned,
//! ordered sequence of them.
//!
//! # Examples
//!
//! ```
//! use dashline_path::{Command, Commands, FixedPoint};
//! use dashline_path::builder::*;
//!
//! let mut builder = Commands::builder();
//! builder.begin(FixedPoint::from_bits(0, 0));
//! builder.line_to(FixedPoint::from_bits(640, 0));
//! let commands = builder.build();
//!
//! for cmd in &commands {
//!     match cmd {
//!         Command::MoveTo { to } => { println!("move to {}", to); }
//!         Command::LineTo { to } => { println!("line to {}", to); }
//!         _ => { panic!("unexpected command!") }
//!     }
//! }
//! ```

use crate::builder::{Build, PathBuilder, RasterBuilder};
use crate::geom::FixedPoint;

use core::iter::{Copied, FromIterator};
use core::ops::Index;
use core::slice;

/// The kind of a command, and its tag in the raw buffer encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
}

impl Verb {
    /// The tag of this verb in the raw encoding.
    #[inline]
    pub fn tag(self) -> i32 {
        match self {
            Verb::MoveTo => 0,
            Verb::LineTo => 1,
            Verb::QuadTo => 2,
            Verb::CubicTo => 3,
        }
    }

    #[inline]
    pub fn from_tag(tag: i32) -> Option<Verb> {
        match tag {
            0 => Some(Verb::MoveTo),
            1 => Some(Verb::LineTo),
            2 => Some(Verb::QuadTo),
            3 => Some(Verb::CubicTo),
            _ => None,
        }
    }

    /// Number of points carried by a command of this kind.
    #[inline]
    pub fn num_points(self) -> usize {
        match self {
            Verb::MoveTo | Verb::LineTo => 1,
            Verb::QuadTo => 2,
            Verb::CubicTo => 3,
        }
    }
}

/// A single drawing command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Command {
    MoveTo {
        to: FixedPoint,
    },
    LineTo {
        to: FixedPoint,
    },
    QuadTo {
        ctrl: FixedPoint,
        to: FixedPoint,
    },
    CubicTo {
        ctrl1: FixedPoint,
        ctrl2: FixedPoint,
        to: FixedPoint,
    },
}

impl Command {
    #[inline]
    pub fn verb(&self) -> Verb {
        match self {
            Command::MoveTo { .. } => Verb::MoveTo,
            Command::LineTo { .. } => Verb::LineTo,
            Command::QuadTo { .. } => Verb::QuadTo,
            Command::CubicTo { .. } => Verb::CubicTo,
        }
    }

    /// The position of the cursor after this command.
    #[inline]
    pub fn to(&self) -> FixedPoint {
        match *self {
            Command::MoveTo { to }
            | Command::LineTo { to }
            | Command::QuadTo { to, .. }
            | Command::CubicTo { to, .. } => to,
        }
    }

    /// Forwards this command to a builder.
    pub fn build_into<B: PathBuilder + ?Sized>(&self, builder: &mut B) {
        match *self {
            Command::MoveTo { to } => builder.begin(to),
            Command::LineTo { to } => builder.line_to(to),
            Command::QuadTo { ctrl, to } => builder.quadratic_bezier_to(ctrl, to),
            Command::CubicTo { ctrl1, ctrl2, to } => builder.cubic_bezier_to(ctrl1, ctrl2, to),
        }
    }
}

/// An ordered sequence of drawing commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Commands {
    cmds: Vec<Command>,
}

impl Commands {
    /// Creates an empty command sequence.
    #[inline]
    pub fn new() -> Self {
        Commands { cmds: Vec::new() }
    }

    #[inline]
    pub fn builder() -> CommandsBuilder {
        CommandsBuilder::new()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Commands {
            cmds: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn iter(&self) -> Iter {
        self.cmds.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Command] {
        &self.cmds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Number of sub-paths, that is, of move-to commands.
    pub fn num_subpaths(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| cmd.verb() == Verb::MoveTo)
            .count()
    }

    /// Writes all commands into a builder.
    pub fn build_into<B: PathBuilder + ?Sized>(&self, builder: &mut B) {
        builder.reserve(self.cmds.len());
        for cmd in &self.cmds {
            cmd.build_into(builder);
        }
    }
}

/// An iterator over the commands of a `Commands` sequence.
pub type Iter<'l> = Copied<slice::Iter<'l, Command>>;

impl<'l> IntoIterator for &'l Commands {
    type Item = Command;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

impl IntoIterator for Commands {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.into_iter()
    }
}

impl FromIterator<Command> for Commands {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Commands {
            cmds: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Command>> for Commands {
    fn from(cmds: Vec<Command>) -> Self {
        Commands { cmds }
    }
}

impl Index<usize> for Commands {
    type Output = Command;

    fn index(&self, idx: usize) -> &Command {
        &self.cmds[idx]
    }
}

/// Builds a `Commands` sequence.
#[derive(Clone, Debug, Default)]
pub struct CommandsBuilder {
    cmds: Vec<Command>,
}

impl CommandsBuilder {
    #[inline]
    pub fn new() -> Self {
        CommandsBuilder { cmds: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        CommandsBuilder {
            cmds: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, cmd: Command) {
        self.cmds.push(cmd);
    }

    #[inline]
    pub fn build(self) -> Commands {
        Commands { cmds: self.cmds }
    }
}

impl RasterBuilder for CommandsBuilder {
    #[inline]
    fn begin(&mut self, at: FixedPoint) {
        self.cmds.push(Command::MoveTo { to: at });
    }

    #[inline]
    fn line_to(&mut self, to: FixedPoint) {
        self.cmds.push(Command::LineTo { to });
    }
}

impl PathBuilder for CommandsBuilder {
    #[inline]
    fn quadratic_bezier_to(&mut self, ctrl: FixedPoint, to: FixedPoint) {
        self.cmds.push(Command::QuadTo { ctrl, to });
    }

    #[inline]
    fn cubic_bezier_to(&mut self, ctrl1: FixedPoint, ctrl2: FixedPoint, to: FixedPoint) {
        self.cmds.push(Command::CubicTo { ctrl1, ctrl2, to });
    }

    #[inline]
    fn reserve(&mut self, commands: usize) {
        self.cmds.reserve(commands);
    }
}

impl Build for CommandsBuilder {
    type PathType = Commands;

    fn build(self) -> Commands {
        self.build()
    }
}

#[test]
fn verb_tags() {
    for verb in &[Verb::MoveTo, Verb::LineTo, Verb::QuadTo, Verb::CubicTo] {
        assert_eq!(Verb::from_tag(verb.tag()), Some(*verb));
    }
    assert_eq!(Verb::from_tag(4), None);
    assert_eq!(Verb::from_tag(-1), None);
}

#[test]
fn command_end_points() {
    let a = FixedPoint::from_bits(1, 1);
    let b = FixedPoint::from_bits(2, 2);
    let c = FixedPoint::from_bits(3, 3);

    assert_eq!(Command::MoveTo { to: a }.to(), a);
    assert_eq!(Command::QuadTo { ctrl: a, to: b }.to(), b);
    assert_eq!(
        Command::CubicTo {
            ctrl1: a,
            ctrl2: b,
            to: c
        }
        .to(),
        c
    );
    assert_eq!(Command::CubicTo { ctrl1: a, ctrl2: b, to: c }.verb().num_points(), 3);
}

#[test]
fn copy_between_builders() {
    let mut builder = Commands::builder();
    builder.begin(FixedPoint::from_bits(0, 0));
    builder.line_to(FixedPoint::from_bits(64, 0));
    builder.quadratic_bezier_to(FixedPoint::from_bits(64, 64), FixedPoint::from_bits(0, 64));
    builder.begin(FixedPoint::from_bits(128, 128));
    builder.cubic_bezier_to(
        FixedPoint::from_bits(1, 2),
        FixedPoint::from_bits(3, 4),
        FixedPoint::from_bits(5, 6),
    );
    let commands = builder.build();

    let mut copy = Commands::builder();
    commands.build_into(&mut copy);
    let copy = copy.build();

    assert_eq!(copy, commands);
    assert_eq!(copy.num_subpaths(), 2);
    assert_eq!(copy.iter().collect::<Commands>(), commands);
}
