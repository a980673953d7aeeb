use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use glyphwave_core::{
    FrameOutcome, HostAdapter, ResizeOutcome, Rgba, Theme, easing::ease_out_expo,
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::{
    cli::Cli,
    event::PreviewEvent,
    mount::{TerminalMount, viewport_for},
    surface::FrameBuffer,
    tui::Tui,
};

/// Rows reserved below the animation for the status line.
const STATUS_ROWS: u16 = 1;

/// Time for the status line to fade in, in ms.
const STATUS_FADE_MS: f64 = 1500.0;

const STATUS_COLOR: Rgba = Rgba::rgb(119, 155, 206);

/// Frame counters shown in the status line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub painted: u64,
    pub skipped: u64,
    pub remounts: u32,
}

impl FrameStats {
    pub fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Painted { .. } => self.painted += 1,
            FrameOutcome::Skipped => self.skipped += 1,
            FrameOutcome::Idle => {},
        }
    }
}

pub struct App {
    host: HostAdapter<TerminalMount>,
    theme: Theme,
    breakpoint: f64,
    started: Instant,
    time_limit: Option<Duration>,
    stats: FrameStats,
    should_quit: bool,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        let theme = Theme::default();

        Self {
            host: HostAdapter::new(TerminalMount::new(theme, cli.seed)),
            theme,
            breakpoint: cli.effective_breakpoint(),
            started: Instant::now(),
            time_limit: cli.time_limit(),
            stats: FrameStats::default(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let (cols, rows) = tui.size()?;
        if let Err(e) = self.host.mount(self.viewport(cols, rows)) {
            tracing::error!(error = %e, "failed to mount animation");
        }

        while !self.should_quit {
            tui.draw(|frame| self.render(frame))?;
            tui.receive_events(|event| self.handle_event(event))?;
        }

        self.host.unmount();
        tracing::info!(
            painted = self.stats.painted,
            skipped = self.stats.skipped,
            remounts = self.stats.remounts,
            engines = self.host.mounter().mounts(),
            "preview finished"
        );
        Ok(())
    }

    fn viewport(&self, cols: u16, rows: u16) -> glyphwave_core::Viewport {
        viewport_for(cols, rows.saturating_sub(STATUS_ROWS), self.breakpoint)
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn handle_event(&mut self, event: PreviewEvent) {
        match event {
            PreviewEvent::Tick => self.on_tick(),
            PreviewEvent::Resize(cols, rows) => {
                let viewport = self.viewport(cols, rows);
                self.host.notify_resize(viewport, self.now_ms());
            },
            PreviewEvent::Input(key) if is_quit_key(&key) => self.should_quit = true,
            PreviewEvent::Input(_) => {},
        }
    }

    fn on_tick(&mut self) {
        let now = self.now_ms();

        match self.host.poll(now) {
            Ok(ResizeOutcome::Remounted) => self.stats.remounts += 1,
            Ok(_) => {},
            Err(e) => tracing::error!(error = %e, "failed to rebuild animation"),
        }

        if let Some(engine) = self.host.active_mut()
            && engine.scheduler().is_pending()
        {
            match engine.tick(now) {
                Ok(outcome) => self.stats.record(outcome),
                Err(e) => tracing::warn!(error = %e, "animation halted"),
            }
        }

        if self
            .time_limit
            .is_some_and(|limit| self.started.elapsed() >= limit)
        {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let buf = frame.buffer_mut();

        if let Some(engine) = self.host.active() {
            render_frame_buffer(engine.context(), area, buf);
        }

        if area.height > 0 {
            let status_y = area.bottom() - 1;
            let style = Style::default()
                .fg(color(status_color(&self.theme, self.now_ms())))
                .bg(color(self.theme.background));

            buf.set_style(Rect::new(area.x, status_y, area.width, 1), style);
            buf.set_string(area.x, status_y, self.status_text(), style);
        }
    }

    fn status_text(&self) -> String {
        let layout = self
            .host
            .active()
            .map(|engine| {
                let (cols, rows) = engine.grid().size();
                let device = if engine.profile().is_mobile() { "mobile" } else { "desktop" };
                format!("{device} {cols}x{rows}")
            })
            .unwrap_or_else(|| "not mounted".to_string());

        format!(
            " glyphwave | {layout} | {} frames, {} skipped | q to quit",
            self.stats.painted, self.stats.skipped
        )
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Status line color, fading in from the background after start-up.
fn status_color(theme: &Theme, elapsed_ms: f64) -> Rgba {
    let t = (elapsed_ms / STATUS_FADE_MS).clamp(0.0, 1.0);
    STATUS_COLOR
        .with_alpha(ease_out_expo(t))
        .over(theme.background)
}

fn color(rgba: Rgba) -> Color {
    Color::Rgb(rgba.r, rgba.g, rgba.b)
}

/// Copies a painted frame into the terminal buffer, clipped to `area`.
fn render_frame_buffer(frame: &FrameBuffer, area: Rect, buf: &mut Buffer) {
    let (cols, rows) = frame.size();
    let background = color(frame.background());

    for row in 0..rows.min(usize::from(area.height)) {
        for col in 0..cols.min(usize::from(area.width)) {
            let Some(cell) = frame.cell(col, row) else { continue };
            let position = (area.x + col as u16, area.y + row as u16);
            let Some(target) = buf.cell_mut(position) else { continue };

            let mut style = Style::default().fg(color(cell.color)).bg(background);
            if cell.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            target.set_char(cell.glyph).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use glyphwave_core::{DrawContext, GlyphFont};

    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_quit_key(&KeyEvent::from(KeyCode::Esc)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit_key(&KeyEvent::from(KeyCode::Enter)));
    }

    #[test]
    fn test_status_color_fades_in() {
        let theme = Theme::default();

        assert_eq!(status_color(&theme, 0.0), theme.background);
        assert_eq!(status_color(&theme, STATUS_FADE_MS), STATUS_COLOR);
        assert_eq!(status_color(&theme, 10.0 * STATUS_FADE_MS), STATUS_COLOR);

        let halfway = status_color(&theme, STATUS_FADE_MS / 2.0);
        assert!(halfway.b > theme.background.b && halfway.b <= STATUS_COLOR.b);
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::default();
        stats.record(FrameOutcome::Painted { logo_cells: 1, background_cells: 2 });
        stats.record(FrameOutcome::Skipped);
        stats.record(FrameOutcome::Idle);
        stats.record(FrameOutcome::Painted { logo_cells: 1, background_cells: 2 });

        assert_eq!(stats, FrameStats { painted: 2, skipped: 1, remounts: 0 });
    }

    #[test]
    fn test_render_frame_buffer_clips_to_area() {
        let mut frame = FrameBuffer::new(4, 3, 12.0, 20.0);
        frame.fill_background(48.0, 60.0, Rgba::from_hex(0x051533));
        frame.draw_glyph('W', 0.0, 0.0, GlyphFont::logo(20.0), Rgba::rgb(255, 255, 255));
        frame.draw_glyph('+', 36.0, 40.0, GlyphFont::field(20.0), Rgba::rgb(119, 155, 206));

        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        render_frame_buffer(&frame, area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "W");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0x05, 0x15, 0x33));
        assert!(cell.modifier.contains(Modifier::BOLD));

        assert_eq!(buf[(1, 1)].symbol(), " ");
        // (3, 2) lies outside the area and is left untouched
        assert_eq!(buf[(3, 2)].symbol(), " ");
        assert_eq!(buf[(3, 2)].bg, Color::Reset);
    }
}
