use crate::explore::FEATURED;
use crate::presenter::{authors_line, description_or_default};
use crate::store::Theme;
use crate::tui::action::Tab;
use crate::tui::state::{AppState, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

/// Colors for one display theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight_bg: Color,
    pub favorite: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                highlight_bg: Color::LightBlue,
                favorite: Color::Red,
            },
            Theme::Dark => Palette {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Yellow,
                muted: Color::Gray,
                highlight_bg: Color::Blue,
                favorite: Color::LightRed,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let palette = Palette::for_theme(state.theme());
    f.render_widget(Block::default().style(palette.base()), f.area());

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_search_bar(f, state, &palette, v_chunks[0]);

    let tab_index = match state.tab {
        Tab::Books => 0,
        Tab::Explore => 1,
    };
    let tabs = Tabs::new(vec![" Books ", " Explore "])
        .select(tab_index)
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, v_chunks[1]);

    match state.tab {
        Tab::Books => draw_book_list(f, state, &palette, v_chunks[2]),
        Tab::Explore => draw_explore(f, state, &palette, v_chunks[2]),
    }

    draw_footer(f, state, &palette, v_chunks[3]);

    if state.selection.is_visible() {
        draw_detail(f, state, &palette);
    }
}

fn draw_search_bar(f: &mut Frame, state: &AppState, palette: &Palette, area: Rect) {
    let editing = state.mode == InputMode::Searching;
    let border_style = if editing {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    let prefix = "/ ";
    let text = if state.store.search.query.is_empty() && !editing {
        Span::styled(
            format!("{}Search for books", prefix),
            Style::default().fg(palette.muted),
        )
    } else {
        Span::raw(format!("{}{}", prefix, state.store.search.query))
    };
    let input = Paragraph::new(Line::from(text)).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(border_style),
    );
    f.render_widget(input, area);

    if editing {
        let cursor_x = area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_book_list(f: &mut Frame, state: &mut AppState, palette: &Palette, area: Rect) {
    let items: Vec<ListItem> = state
        .store
        .rows()
        .into_iter()
        .map(|row| {
            let star = if row.is_favorite {
                Span::styled("★ ", Style::default().fg(palette.favorite))
            } else {
                Span::styled("☆ ", Style::default().fg(palette.muted))
            };
            let thumb = if row.book.has_thumbnail() {
                Span::styled("▣ ", Style::default().fg(palette.accent))
            } else {
                Span::raw("  ")
            };
            let mut spans = vec![star, thumb, Span::raw(row.book.title.clone())];
            if let Some(authors) = row.book.joined_authors() {
                spans.push(Span::styled(
                    format!("  {}", authors),
                    Style::default().fg(palette.muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let label = if state.store.search.viewing_favorites {
        "Favorites"
    } else {
        "Results"
    };
    let title = if state.store.search.is_loading {
        format!(" {} (Loading...) ", label)
    } else {
        format!(" {} ({}) ", label, state.store.visible_books().len())
    };

    let list = List::new(items)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(palette.highlight_bg),
        );
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_explore(f: &mut Frame, state: &mut AppState, palette: &Palette, area: Rect) {
    let width = area.width.saturating_sub(6).max(10) as usize;
    let items: Vec<ListItem> = FEATURED
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let expanded = state.explore.is_expanded(i);
            let marker = if expanded { "▾ " } else { "▸ " };
            let mut lines = vec![Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.accent)),
                Span::styled(book.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", book.author),
                    Style::default().fg(palette.muted),
                ),
            ])];
            if expanded {
                for chunk in wrap_words(book.blurb, width) {
                    lines.push(Line::from(format!("    {}", chunk)));
                }
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Explore Famous Books ")
                .border_style(Style::default().fg(palette.accent)),
        )
        .highlight_style(Style::default().bg(palette.highlight_bg));
    f.render_stateful_widget(list, area, &mut state.explore_state);
}

fn draw_footer(f: &mut Frame, state: &AppState, palette: &Palette, area: Rect) {
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(palette.accent).bg(palette.bg))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );

    let help_str = if state.mode == InputMode::Searching {
        "Enter:Search | Esc:Cancel"
    } else if state.selection.is_visible() {
        "p:Preview | b:Buy | i:Info | s:Share | f:Fav | Esc:Close"
    } else {
        match state.tab {
            Tab::Books => "/:Find | Enter:Open | f:Fav | v:Favorites | s:Share | t:Theme | Tab:Explore | q:Quit",
            Tab::Explore => "Space:Expand | Enter:Search | t:Theme | Tab:Books | q:Quit",
        }
    };

    let help = Paragraph::new(help_str)
        .style(Style::default().fg(palette.muted).bg(palette.bg))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

fn draw_detail(f: &mut Frame, state: &AppState, palette: &Palette) {
    let Some(book) = state.selection.selected() else {
        return;
    };
    let area = centered_rect(80, 70, f.area());

    let favorite = if state.store.is_favorite(&book.id) {
        Span::styled("★ Favorite", Style::default().fg(palette.favorite))
    } else {
        Span::styled("☆ Not a favorite", Style::default().fg(palette.muted))
    };

    let link_line = |label: &'static str, url: &Option<String>| {
        Line::from(vec![
            Span::styled(format!("{:<9}", label), Style::default().fg(palette.muted)),
            Span::raw(url.clone().unwrap_or_else(|| "-".to_string())),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(authors_line(book)).alignment(Alignment::Center),
        Line::from(favorite).alignment(Alignment::Center),
        Line::from(""),
    ];
    if let Some(thumb) = &book.thumbnail_url {
        lines.push(link_line("Cover", &Some(thumb.clone())));
    }
    lines.push(link_line("Preview", &book.preview_link));
    lines.push(link_line("Buy", &book.buy_link));
    lines.push(link_line("Info", &book.info_link));
    lines.push(Line::from(""));
    lines.push(Line::from(description_or_default(book).to_string()));

    let detail = Paragraph::new(lines)
        .style(palette.base())
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0))
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );

    f.render_widget(Clear, area);
    f.render_widget(detail, area);
}

/// Greedy word wrap for list items, which ratatui does not wrap on its own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Helper function to create a centered rect using up certain percentages of the available rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Book;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("a bb ccc dddd", 6), vec!["a bb", "ccc", "dddd"]);
        assert!(wrap_words("", 10).is_empty());
    }

    #[test]
    fn test_list_shows_titles_and_favorite_marker() {
        let mut state = AppState::default();
        let mut dune = Book::new("A1", "Dune");
        dune.thumbnail_url = Some("http://t".into());
        state.store.search.results = vec![dune.clone(), Book::new("A2", "Emma")];
        state.store.toggle_favorite(&dune);
        state.reset_selection();

        let screen = render(&mut state);
        assert!(screen.contains("★ ▣ Dune"));
        assert!(screen.contains("☆   Emma"));
        assert!(screen.contains("Results (2)"));
    }

    #[test]
    fn test_detail_popup_renders_fallbacks() {
        let mut state = AppState::default();
        state.selection.open(Book::new("A1", "Dune"));
        let screen = render(&mut state);
        assert!(screen.contains("Author info unavailable"));
        assert!(screen.contains("No description available"));
    }

    #[test]
    fn test_both_palettes_render() {
        let mut state = AppState::default();
        render(&mut state);
        state.store.toggle_theme();
        let screen = render(&mut state);
        assert!(screen.contains("Search for books"));
    }
}
