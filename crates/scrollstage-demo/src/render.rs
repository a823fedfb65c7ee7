#![forbid(unsafe_code)]

//! Scene → terminal.
//!
//! [`compose`] turns the scene and page position into a flat list of
//! [`Paint`]s (pure, tested); [`draw`] queues them as crossterm commands.
//!
//! Pixels map to rows at [`CARD_PX_PER_ROW`] for cards and
//! [`CONTENT_PX_PER_ROW`] for content panels, so a 250 px card exit moves
//! ten rows and the 20 px content offset moves two.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use scrollstage_runtime::{Catalog, ScrollProgress, VisualState};

use crate::catalog::icon_glyph;
use crate::scene::Scene;

/// Card offset pixels per terminal row.
pub const CARD_PX_PER_ROW: f32 = 25.0;
/// Content offset pixels per terminal row.
pub const CONTENT_PX_PER_ROW: f32 = 10.0;
/// Page scroll pixels per terminal row.
pub const PAGE_PX_PER_ROW: f32 = 25.0;

/// Opacity below which an element is not drawn.
const INVISIBLE: f32 = 0.05;
/// Opacity below which an element is drawn dimmed.
const FAINT: f32 = 0.5;

const CARD_HEIGHT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Dim,
    Accent,
}

/// Text at a screen cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paint {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub tone: Tone,
}

/// Everything [`compose`] needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub scene: &'a Scene,
    pub catalog: &'a Catalog,
    pub progress: ScrollProgress,
    pub active: usize,
    /// Page scroll offset.
    pub offset: f32,
    /// Offset where the section pins.
    pub section_start: f32,
    /// Pinned travel.
    pub travel: f32,
    pub width: u16,
    pub height: u16,
}

struct Canvas {
    width: i32,
    height: i32,
    paints: Vec<Paint>,
}

impl Canvas {
    fn put(&mut self, x: i32, y: i32, text: &str, tone: Tone) {
        if y < 0 || y >= self.height || x < 0 || x >= self.width || text.is_empty() {
            return;
        }
        let text = fit(text, (self.width - x) as usize);
        self.paints.push(Paint {
            x: x as u16,
            y: y as u16,
            text,
            tone,
        });
    }
}

/// Lay out one frame.
#[must_use]
pub fn compose(view: &View<'_>) -> Vec<Paint> {
    let mut canvas = Canvas {
        width: i32::from(view.width),
        height: i32::from(view.height),
        paints: Vec::new(),
    };
    let h = canvas.height;
    let top = section_top(view);

    // Intro above the section, outro below it.
    canvas.put(4, top - h / 2, "Scroll down to see the animation", Tone::Normal);
    canvas.put(4, top + h + h / 2, "That's all. Scroll back up to replay.", Tone::Normal);

    canvas.put(2, top + 1, "what we do", Tone::Accent);
    canvas.put(2, top + 2, &gauge(view.progress, view.active, view.catalog.len()), Tone::Dim);

    compose_cards(&mut canvas, view, top);
    compose_content(&mut canvas, view, top);
    canvas.paints
}

/// Row of the section's top edge: follows the page until pinned, holds at 0
/// for the pinned travel, then scrolls away.
fn section_top(view: &View<'_>) -> i32 {
    let end = view.section_start + view.travel;
    let px = if view.offset < view.section_start {
        view.section_start - view.offset
    } else if view.offset > end {
        end - view.offset
    } else {
        0.0
    };
    (px / PAGE_PX_PER_ROW).round() as i32
}

fn compose_cards(canvas: &mut Canvas, view: &View<'_>, top: i32) {
    let half = canvas.width / 2;
    let base_width = (half - 4).clamp(12, 32);
    let rest_row = top + canvas.height / 2 - CARD_HEIGHT / 2;

    let mut order: Vec<usize> = (0..view.scene.cards.len()).collect();
    order.sort_by_key(|&i| view.scene.cards[i].layer);

    for i in order {
        let state = &view.scene.cards[i];
        let Some(tone) = tone_for(state) else {
            continue;
        };
        let Some(item) = view.catalog.get(i) else {
            continue;
        };
        let width = ((base_width as f32 * state.scale).round() as i32).max(6);
        let x = 2 + (base_width - width) / 2;
        let y = rest_row + (state.offset / CARD_PX_PER_ROW).round() as i32;
        let inner = (width - 2) as usize;

        let title = format!(" {} {}", icon_glyph(&item.card.icon), item.card.title);
        let gradient = format!(" {}", item.card.gradient);
        let rows = [
            format!("┌{}┐", "─".repeat(inner)),
            format!("│{}│", pad(&title, inner)),
            format!("│{}│", pad(&gradient, inner)),
            format!("│{}│", " ".repeat(inner)),
            format!("└{}┘", "─".repeat(inner)),
        ];
        for (r, line) in rows.iter().enumerate() {
            canvas.put(x, y + r as i32, line, tone);
        }
    }
}

fn compose_content(canvas: &mut Canvas, view: &View<'_>, top: i32) {
    let x = canvas.width / 2 + 2;
    let width = (canvas.width - x - 2).max(10) as usize;
    for (i, state) in view.scene.contents.iter().enumerate() {
        if !state.visible {
            continue;
        }
        let Some(tone) = tone_for(state) else {
            continue;
        };
        let Some(item) = view.catalog.get(i) else {
            continue;
        };
        let body_tone = if tone == Tone::Dim { Tone::Dim } else { Tone::Normal };
        let mut y = top + canvas.height / 4 + (state.offset / CONTENT_PX_PER_ROW).round() as i32;

        canvas.put(x, y, &item.content.heading, Tone::Accent);
        y += 2;
        for line in wrap(&item.content.body, width) {
            canvas.put(x, y, &line, body_tone);
            y += 1;
        }
        y += 1;
        for feature in &item.content.features {
            canvas.put(x, y, &format!("• {feature}"), body_tone);
            y += 1;
        }
        y += 1;
        canvas.put(x, y, "explore →", Tone::Dim);
    }
}

fn tone_for(state: &VisualState) -> Option<Tone> {
    if !state.visible || state.opacity < INVISIBLE {
        None
    } else if state.opacity < FAINT {
        Some(Tone::Dim)
    } else {
        Some(Tone::Normal)
    }
}

/// `[██████░░░░░░]  45%  3/5`
#[must_use]
pub fn gauge(progress: ScrollProgress, active: usize, n: usize) -> String {
    const CELLS: usize = 16;
    let filled = ((progress.get() * CELLS as f32).round() as usize).min(CELLS);
    format!(
        "[{}{}] {:>3}%  {}/{}",
        "█".repeat(filled),
        "░".repeat(CELLS - filled),
        (progress.get() * 100.0).round() as u32,
        active + 1,
        n
    )
}

/// Greedy word wrap to `width` display columns.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Truncate to `max` display columns.
fn fit(text: &str, max: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Truncate or right-pad to exactly `cols` display columns.
fn pad(text: &str, cols: usize) -> String {
    let mut out = fit(text, cols);
    let used = out.width();
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    out
}

/// Queue a full redraw.
pub fn draw<W: Write>(out: &mut W, paints: &[Paint]) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for paint in paints {
        queue!(out, MoveTo(paint.x, paint.y))?;
        match paint.tone {
            Tone::Normal => {}
            Tone::Dim => queue!(out, SetAttribute(Attribute::Dim))?,
            Tone::Accent => queue!(
                out,
                SetForegroundColor(Color::Yellow),
                SetAttribute(Attribute::Bold)
            )?,
        }
        queue!(
            out,
            Print(&paint.text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    }
    out.flush()
}
