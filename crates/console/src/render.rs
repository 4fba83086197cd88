use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::transcript::{classify_line, echoed_text, LineKind, Transcript};

pub struct Theme {
    text: Color,
    prompt: Color,
    ok: Color,
    error: Color,
    highlight: Color,
    help: Color,
    progress: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Color::Green,
            prompt: Color::Green,
            ok: Color::LightGreen,
            error: Color::LightRed,
            highlight: Color::LightYellow,
            help: Color::LightBlue,
            progress: Color::Yellow,
        }
    }

    fn prompt_style(&self) -> Style {
        Style::default().fg(self.prompt).add_modifier(Modifier::BOLD)
    }

    fn kind_style(&self, kind: LineKind) -> Style {
        let color = match kind {
            LineKind::Success => self.ok,
            LineKind::Error => self.error,
            LineKind::Help => self.help,
            LineKind::Progress => self.progress,
            LineKind::Command | LineKind::Listing | LineKind::Plain => self.text,
        };
        Style::default().fg(color)
    }
}

pub fn render_line(theme: &Theme, prompt: &str, line: &str) -> Line<'static> {
    let kind = classify_line(line);
    match kind {
        LineKind::Command => Line::from(vec![
            Span::styled(format!("{prompt} "), theme.prompt_style()),
            Span::styled(echoed_text(line).to_string(), theme.kind_style(kind)),
        ]),
        LineKind::Listing => {
            let segments: Vec<&str> = line.split('|').collect();
            let last = segments.len() - 1;
            let spans = segments
                .into_iter()
                .enumerate()
                .map(|(index, segment)| {
                    let mut text = segment.to_string();
                    if index < last {
                        text.push('|');
                    }
                    let style = if index == 0 {
                        Style::default().fg(theme.highlight)
                    } else {
                        theme.kind_style(kind)
                    };
                    Span::styled(text, style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        }
        _ => Line::from(Span::styled(line.to_string(), theme.kind_style(kind))),
    }
}

pub fn render_transcript(
    theme: &Theme,
    prompt: &str,
    transcript: &Transcript,
) -> Vec<Line<'static>> {
    transcript
        .lines()
        .iter()
        .map(|line| render_line(theme, prompt, line))
        .collect()
}

pub fn render_input(theme: &Theme, prompt: &str, buffer: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{prompt} "), theme.prompt_style()),
        Span::styled(buffer.to_string(), Style::default().fg(theme.text)),
    ])
}
