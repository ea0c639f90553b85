// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the collkit CLI: the `inspect` shape table and the
//! verbose per-step lines.
//!
//! Colors are plain 16-color ANSI so they follow the terminal's own palette.
//! `NO_COLOR` or a non-TTY stream turns them off, so piping `collkit run`
//! into another tool yields plain text.

use collkit::{Shape, ShapeKind};

/// Width between the two `│` borders of the shape table.
const TABLE_WIDTH: usize = 40;

const RESET: &str = "\x1b[0m";

/// What a piece of output is, mapped to one SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Border,
    Label,
    Heading,
    Kind(ShapeKind),
    Type,
    Ok,
    Failed,
}

impl Role {
    fn sgr(self) -> &'static str {
        match self {
            Role::Border | Role::Label => "\x1b[90m",
            Role::Heading => "\x1b[1;36m",
            Role::Kind(ShapeKind::Sequence) => "\x1b[1;32m",
            Role::Kind(ShapeKind::Collection) => "\x1b[1;35m",
            Role::Kind(ShapeKind::Scalar) => "\x1b[1;33m",
            Role::Type => "\x1b[34m",
            Role::Ok => "\x1b[2;32m",
            Role::Failed => "\x1b[31m",
        }
    }
}

/// Where the text is going; colors are decided per stream.
#[derive(Debug, Clone, Copy)]
enum Target {
    Stdout,
    Stderr,
}

impl Target {
    fn colored(self) -> bool {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        atty::is(match self {
            Target::Stdout => atty::Stream::Stdout,
            Target::Stderr => atty::Stream::Stderr,
        })
    }

    fn paint(self, role: Role, text: &str) -> String {
        if self.colored() {
            format!("{}{}{}", role.sgr(), text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Length as the terminal shows it, skipping SGR sequences.
fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if !in_escape => len += 1,
            _ => {}
        }
    }
    len
}

/// One-line shape summary, e.g. `sequence []int (len 3)`
pub fn shape_summary(shape: &Shape) -> String {
    let ty = match (&shape.kind, &shape.key) {
        (ShapeKind::Collection, Some(key)) => format!("map[{}]{}", key, shape.elem),
        (ShapeKind::Sequence, _) if shape.fixed => format!("[{}]{}", shape.len, shape.elem),
        (ShapeKind::Sequence, _) => format!("[]{}", shape.elem),
        _ => shape.elem.to_string(),
    };
    format!("{} {} (len {})", shape.kind.as_str(), ty, shape.len)
}

/// Lines of the `inspect` table for one shape, without trailing newlines.
fn table_lines(shape: &Shape, out: Target) -> Vec<String> {
    let border = |text: &str| out.paint(Role::Border, text);
    let row = |name: &str, value: String| {
        let content = format!(" {}{}", out.paint(Role::Label, &format!("{:<9}", name)), value);
        let pad = TABLE_WIDTH.saturating_sub(visible_len(&content));
        format!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"))
    };

    let heading = format!("─ {} ", out.paint(Role::Heading, "SHAPE"));
    let rule = TABLE_WIDTH.saturating_sub(visible_len(&heading));
    let mut lines = vec![format!(
        "{}{}{}",
        border("┌"),
        heading,
        border(&format!("{}┐", "─".repeat(rule)))
    )];
    lines.push(row("kind", out.paint(Role::Kind(shape.kind), shape.kind.as_str())));
    lines.push(row("element", out.paint(Role::Type, &shape.elem.to_string())));
    if let Some(key) = &shape.key {
        lines.push(row("key", out.paint(Role::Type, &key.to_string())));
    }
    lines.push(row("length", shape.len.to_string()));
    if shape.kind == ShapeKind::Sequence {
        let storage = if shape.fixed { "fixed" } else { "growable" };
        lines.push(row("storage", storage.to_string()));
    }
    lines.push(border(&format!("└{}┘", "─".repeat(TABLE_WIDTH))));
    lines
}

/// Print the `inspect` table for one shape
pub fn shape_table(shape: &Shape) {
    for line in table_lines(shape, Target::Stdout) {
        println!("{}", line);
    }
}

/// Verbose per-step line for stderr: `  2 chunk=2 → sequence [][]int (len 3)`
pub fn step_line(step: usize, name: &str, outcome: &str, failed: bool) -> String {
    let out = Target::Stderr;
    let outcome = out.paint(if failed { Role::Failed } else { Role::Ok }, outcome);
    format!(
        "{} {} → {}",
        out.paint(Role::Label, &format!("{:>3}", step)),
        out.paint(Role::Heading, name),
        outcome
    )
}
