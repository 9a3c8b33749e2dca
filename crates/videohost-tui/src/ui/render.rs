use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use videohost_core::{ActiveTab, AuthProvider, AuthView, StatusMessage};

use crate::app::{App, FormFocus};

use super::styles::{self, Palette};

const PRODUCT_NAME: &str = "VideoHost Pro";

/// Visible width of a form field inside the brackets
const FIELD_WIDTH: usize = 24;

const FEATURES: [(&str, &str); 3] = [
    ("∞", "Unlimited Videos"),
    ("⚡", "Fast Streaming"),
    ("🔒", "Secure Upload"),
];

const GETTING_STARTED: [&str; 4] = [
    "Create an account or sign in",
    "Upload your videos (up to 500MB each)",
    "Share links with your audience",
    "Track views and analytics",
];

pub fn render<P>(frame: &mut Frame, app: &App<P>)
where
    P: AuthProvider + 'static,
{
    let palette = Palette::for_theme(app.theme());
    frame.render_widget(Block::default().style(palette.base_style()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(14),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], &palette);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(chunks[1]);

    render_auth_panel(frame, app, columns[0], &palette);
    render_product_panel(frame, columns[1], &palette);
    render_footer(frame, chunks[2], &palette);
}

fn render_header<P>(frame: &mut Frame, app: &App<P>, area: Rect, palette: &Palette)
where
    P: AuthProvider + 'static,
{
    let title = format!("  ■ {}", PRODUCT_NAME);
    let theme_hint = format!("[Ctrl-T] {}", app.theme().label());
    let used = title.chars().count() + theme_hint.chars().count() + 2;

    let line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(theme_hint, palette.muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.border_style(false));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_auth_panel<P>(frame: &mut Frame, app: &App<P>, area: Rect, palette: &Palette)
where
    P: AuthProvider + 'static,
{
    let view = app.view();

    let mut lines = if view.show_form {
        form_lines(&view, app.focus, palette)
    } else {
        signed_in_lines(&view, palette)
    };

    if let Some(line) = status_line(view.status) {
        lines.push(Line::from(""));
        lines.push(line);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style(view.show_form))
        .title(" Account ");

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(palette.surface_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn form_lines<'a>(view: &AuthView<'_>, focus: FormFocus, palette: &Palette) -> Vec<Line<'a>> {
    let mut lines = vec![];

    // Tab row
    let mut tabs = vec![Span::raw(" ")];
    for (i, tab) in [ActiveTab::Login, ActiveTab::Register].iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw("  "));
        }
        tabs.push(Span::styled(
            format!(" {} ", tab.title()),
            palette.tab_style(*tab == view.active_tab),
        ));
    }
    tabs.push(Span::styled("  ←/→", palette.muted_style()));
    lines.push(Line::from(tabs));
    lines.push(Line::from(""));

    // Email field
    let email_focused = focus == FormFocus::Email;
    lines.push(Line::from(Span::styled(" Email", palette.muted_style())));
    lines.push(field_line(
        &fit_tail(view.email, FIELD_WIDTH),
        "your@email.com",
        email_focused,
        palette,
    ));

    // Password field (masked)
    let password_focused = focus == FormFocus::Password;
    let masked = "•".repeat(view.password_len.min(FIELD_WIDTH));
    lines.push(Line::from(Span::styled(" Password", palette.muted_style())));
    lines.push(field_line(&masked, "••••••••", password_focused, palette));
    lines.push(Line::from(""));

    // Submit button
    let button_focused = focus == FormFocus::Button;
    let label = if button_focused && view.submit_enabled {
        format!(" ▶ {} ◀ ", view.submit_label)
    } else {
        format!("   {}   ", view.submit_label)
    };
    lines.push(Line::from(vec![
        Span::raw(" ["),
        Span::styled(label, palette.button_style(button_focused, view.submit_enabled)),
        Span::raw("]"),
    ]));

    lines
}

fn field_line<'a>(value: &str, placeholder: &str, focused: bool, palette: &Palette) -> Line<'a> {
    let cursor = if focused { "▌" } else { " " };
    let (text, style) = if value.is_empty() && !focused {
        (placeholder.to_string(), palette.muted_style())
    } else {
        (value.to_string(), palette.field_style(focused))
    };
    let padding = FIELD_WIDTH.saturating_sub(text.chars().count());

    Line::from(vec![
        Span::styled(" [", palette.muted_style()),
        Span::styled(format!("{}{}{}", text, cursor, " ".repeat(padding)), style),
        Span::styled("]", palette.muted_style()),
    ])
}

fn signed_in_lines<'a>(view: &AuthView<'_>, palette: &Palette) -> Vec<Line<'a>> {
    let email = view.session.map(|s| s.email.clone()).unwrap_or_default();
    vec![
        Line::from(Span::styled(" Signed in as", palette.muted_style())),
        Line::from(Span::styled(format!(" {}", email), styles::highlight_style())),
        Line::from(""),
        Line::from(Span::styled(" [Ctrl-O] Sign out", palette.muted_style())),
    ]
}

fn status_line<'a>(status: &StatusMessage) -> Option<Line<'a>> {
    match status {
        StatusMessage::None => None,
        StatusMessage::Error(msg) => Some(Line::from(Span::styled(
            format!(" {}", msg),
            styles::error_style(),
        ))),
        StatusMessage::Success(msg) => Some(Line::from(Span::styled(
            format!(" {}", msg),
            styles::success_style(),
        ))),
    }
}

fn render_product_panel(frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" Welcome to {}", PRODUCT_NAME),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " A professional video hosting platform with powerful features for content creators and viewers.",
            palette.text_style(),
        )),
        Line::from(""),
    ];

    let mut tiles = vec![Span::raw(" ")];
    for (icon, label) in FEATURES {
        tiles.push(Span::styled(format!(" {} ", icon), styles::highlight_style()));
        tiles.push(Span::styled(format!("{}   ", label), palette.text_style()));
    }
    lines.push(Line::from(tiles));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Getting Started", styles::title_style())));
    for (i, step) in GETTING_STARTED.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), styles::highlight_style()),
            Span::styled(*step, palette.muted_style()),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style(false));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(palette.surface_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            format!("© 2025 {}. All rights reserved.", PRODUCT_NAME),
            palette.muted_style(),
        )),
        Line::from(Span::styled(
            "[←/→] tab  [Tab] next field  [Enter] submit  [Ctrl-T] theme  [Esc] quit",
            palette.muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(palette.border_style(false));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Keep the last `width` characters so the cursor end stays visible
fn fit_tail(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len <= width {
        value.to_string()
    } else {
        value.chars().skip(len - width).collect()
    }
}
