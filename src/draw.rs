use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::bracket::{BracketTreeView, tooltip_lines};
use crate::components::radar::RadarChart;
use crate::components::theme::{Palette, choropleth_color, fg, resolve};
use crate::components::world_map::WorldMapView;
use crate::state::app_state::LoadStatus;
use crate::state::loader::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use aotui_core::choropleth::ColorScale;
use aotui_core::duel::{self, RADAR_AXES, RadarSeries};

static TABS: &[&str; 3] = &["Map", "Bracket", "Duel"];

pub const EMPTY_SELECTION: &str = "No data available for this selection.";
pub const SELECT_PLAYER: &str = "Select a player.";
pub const NO_PLAYER_DATA: &str = "No data for selection.";

const HELP_TEXT: &str = "\
Global   1 Map   2 Bracket   3 Duel   ? help   f full screen   \" logs   q quit

Map      h/l year   j/k country

Bracket  h/l year   g men/women   j/k move   Enter highlight winner path + fold
         x clear highlight   e expand all

Duel     Tab switch slot   j/k cycle player   / search   Backspace clear slot
         m mirror overlay   b head-to-head baseline

Esc leaves this screen.";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        match &app.state.status {
            LoadStatus::Loading => {
                draw_loading_screen(f, f.area(), loading);
                return;
            }
            LoadStatus::Failed(message) => {
                draw_failure(f, f.area(), message);
                return;
            }
            LoadStatus::Ready => {}
        }

        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Map => draw_map(f, layout.main, app),
            MenuItem::Bracket => draw_bracket(f, layout.main, app),
            MenuItem::Duel => draw_duel(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("Failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_centered_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

// ---------------------------------------------------------------------------
// Startup screens
// ---------------------------------------------------------------------------

fn draw_loading_screen(f: &mut Frame, area: Rect, loading: LoadingState) {
    let block = default_border(Color::DarkGray).title(" Australian Open ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top, line, _bottom] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(
        Paragraph::new(format!("{} Loading match data...", loading.spinner_char))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        line,
    );
}

fn draw_failure(f: &mut Frame, area: Rect, message: &str) {
    let block = default_border(Color::Red).title(" Load failed ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top, body, _bottom] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let text = vec![
        Line::styled("Could not load the tournament data.", Style::default().fg(Color::Red)),
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("Press q to quit.", Style::default().fg(Color::DarkGray)),
    ];
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Map => 0,
        MenuItem::Bracket => 1,
        MenuItem::Duel => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let loaded = app
        .state
        .loaded_at
        .as_deref()
        .map(|at| format!("Loaded {at}  "))
        .unwrap_or_default();
    let help = Paragraph::new(format!("{loaded}Help: ? "))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// `◀ 2016 2017 [2018] 2019 ▶` with the active year emphasised.
pub fn year_slider(years: &[u16], active: u16) -> Line<'static> {
    let dim = resolve(Palette::Dim);
    let mut spans = vec![Span::styled("◀ ", dim)];
    for &year in years {
        if year == active {
            spans.push(Span::styled(format!("[{year}]"), resolve(Palette::Accent)));
        } else {
            spans.push(Span::styled(format!(" {year} "), resolve(Palette::Text)));
        }
    }
    spans.push(Span::styled(" ▶", dim));
    Line::from(spans)
}

fn scale_legend(max: u32) -> Line<'static> {
    let scale = ColorScale::sequential(max);
    let mut spans = vec![Span::raw("0 ")];
    for step in 0..=4u32 {
        let value = max * step / 4;
        spans.push(Span::styled("██", Style::default().fg(choropleth_color(&scale, Some(value)))));
    }
    spans.push(Span::raw(format!(" {max}   ")));
    spans.push(Span::styled("██", Style::default().fg(choropleth_color(&scale, None))));
    spans.push(Span::raw(" no data"));
    Line::from(spans)
}

fn draw_map(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Cumulative Wins by Country ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(year) = app.map_year() else {
        draw_centered_message(f, inner, EMPTY_SELECTION);
        return;
    };

    let [slider, legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(year_slider(&app.state.years, year)), slider);
    f.render_widget(Paragraph::new(scale_legend(app.wins.max(year))), legend);

    let [map_area, side] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(30)]).areas(content);
    let ranking = app.map_ranking();
    let selected = ranking.get(app.state.map.selected).map(|(code, _)| code.as_str());

    f.render_widget(
        WorldMapView {
            world: &app.dataset.world,
            wins: &app.wins,
            year,
            selected,
        },
        map_area,
    );

    let [list_area, tooltip_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(side);
    draw_ranking(f, list_area, app, &ranking);
    draw_country_tooltip(f, tooltip_area, app, year);
}

fn draw_ranking(f: &mut Frame, area: Rect, app: &App, ranking: &[(String, u32)]) {
    let block = default_border(Color::DarkGray).title(" Ranking ");
    if ranking.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_centered_message(f, inner, EMPTY_SELECTION);
        return;
    }

    let items: Vec<ListItem> = ranking
        .iter()
        .enumerate()
        .map(|(idx, (code, wins))| {
            ListItem::new(format!("{:>3}. {code:<4} {wins:>4}", idx + 1))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(resolve(Palette::Accent).add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.state.map.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_country_tooltip(f: &mut Frame, area: Rect, app: &App, year: u16) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some((code, wins)) = app.map_selected_country() else {
        return;
    };
    let name = app.dataset.world.name_of(&code);
    let lines = vec![
        Line::styled(name.to_string(), resolve(Palette::Accent)),
        Line::from(format!("Cumulative Wins ({year}): {wins}")),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Bracket
// ---------------------------------------------------------------------------

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    let bracket = &app.state.bracket;
    let header_text = match app.bracket_year() {
        Some(year) => format!("{year} {} Singles", bracket.gender.label()),
        None => format!("{} Singles", bracket.gender.label()),
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(header_text),
            Span::styled(
                bracket
                    .highlight
                    .as_ref()
                    .map(|h| format!("   path: {}", h.player))
                    .unwrap_or_default(),
                resolve(Palette::Accent),
            ),
        ])),
        header,
    );
    f.render_widget(
        Paragraph::new("Keys: h/l=year  g=gender  j/k=move  Enter=path+fold  x=clear  e=expand")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if bracket.roots.is_empty() {
        draw_centered_message(f, content, EMPTY_SELECTION);
        return;
    }

    let (tree_area, tooltip_area) = if content.width >= 90 {
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(46)]).areas(content);
        (left, right)
    } else {
        let [top, bottom] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(13)]).areas(content);
        (top, bottom)
    };

    let rows = bracket.visible_rows();
    f.render_widget(
        BracketTreeView {
            rows: &rows,
            cursor: bracket.cursor,
        },
        tree_area,
    );

    let tooltip = default_border(Color::DarkGray).title(" Match ");
    let tooltip_inner = tooltip.inner(tooltip_area);
    f.render_widget(tooltip, tooltip_area);
    if let Some(node) = bracket.selected_node() {
        let text: Vec<Line> = tooltip_lines(node).into_iter().map(Line::from).collect();
        f.render_widget(Paragraph::new(text), tooltip_inner);
    }
}

// ---------------------------------------------------------------------------
// Duel
// ---------------------------------------------------------------------------

/// `1st Srv %   64%` style rows for the value table under a chart.
pub fn value_lines(series: &RadarSeries) -> Vec<String> {
    RADAR_AXES
        .iter()
        .map(|axis| format!("{:<14}{:>6}", axis.label, axis.format(series.value(axis))))
        .collect()
}

fn toggle(label: &str, on: bool) -> Span<'static> {
    let mark = if on { "[x]" } else { "[ ]" };
    let style = if on { resolve(Palette::Accent) } else { resolve(Palette::Text) };
    Span::styled(format!("{mark} {label}  "), style)
}

fn draw_duel(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Duel ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let duel_state = &app.state.duel;
    let duel = &duel_state.duel;

    let [header, toggles, status, charts] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let slot_span = |idx: usize, palette: Palette| {
        let focused = duel_state.focus as usize == idx;
        let name = duel_state.players[idx].as_deref().unwrap_or("-");
        let marker = if focused { "▶ " } else { "  " };
        let mut style = resolve(palette);
        if focused {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        Span::styled(format!("{marker}{name}"), style)
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            slot_span(0, Palette::PlayerA),
            Span::raw("   vs   "),
            slot_span(1, Palette::PlayerB),
        ])),
        header,
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            toggle("Mirror (m)", duel_state.mirror),
            toggle("Head-to-head (b)", duel_state.head_to_head),
            Span::styled("Tab=slot  j/k=cycle  /=search", Style::default().fg(Color::DarkGray)),
        ])),
        toggles,
    );
    if let Some(message) = duel.status {
        f.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::Yellow)),
            status,
        );
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(charts);
    draw_radar_panel(f, left, &duel.a, &duel.b, duel.overlay_for_a(), Palette::PlayerA, Palette::PlayerB, duel.mirror);
    draw_radar_panel(f, right, &duel.b, &duel.a, duel.overlay_for_b(), Palette::PlayerB, Palette::PlayerA, duel.mirror);

    if let Some(search) = &duel_state.search {
        draw_search_popup(f, inner, app, search);
    }
}

/// Mirror mode highlights a player who beats an opponent that has stats.
fn emphasise_title(series: &RadarSeries, opponent: &RadarSeries, mirror: bool) -> bool {
    mirror && opponent.player.is_some() && opponent.has_data() && duel::outperforms(series, opponent)
}

#[allow(clippy::too_many_arguments)]
fn draw_radar_panel(
    f: &mut Frame,
    area: Rect,
    series: &RadarSeries,
    opponent: &RadarSeries,
    overlay: Option<&RadarSeries>,
    color: Palette,
    overlay_color: Palette,
    mirror: bool,
) {
    let title = series.player.as_deref().unwrap_or("Empty slot");
    let title_style = if emphasise_title(series, opponent, mirror) {
        resolve(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        resolve(color)
    };
    let block = default_border(fg(color)).title(Span::styled(format!(" {title} "), title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if series.player.is_none() {
        draw_centered_message(f, inner, SELECT_PLAYER);
        return;
    }
    if !series.has_data() {
        draw_centered_message(f, inner, NO_PLAYER_DATA);
        return;
    }

    let [chart_area, values_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(RADAR_AXES.len() as u16)]).areas(inner);
    f.render_widget(
        RadarChart {
            series,
            color: fg(color),
            overlay: overlay.map(|s| (s, fg(overlay_color))),
        },
        chart_area,
    );
    let lines: Vec<Line> = value_lines(series).into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), values_area);
}

fn draw_search_popup(
    f: &mut Frame,
    area: Rect,
    app: &App,
    search: &crate::state::app_state::PlayerSearch,
) {
    let width = area.width.min(40);
    let height = area.height.min(12);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);

    let block = default_border(Color::Yellow).title(format!(" Find player: {}_ ", search.query));
    let candidates = search.candidates(&app.state.player_names);
    if candidates.is_empty() {
        let inner = block.inner(popup);
        f.render_widget(block, popup);
        draw_centered_message(f, inner, "No matching players");
        return;
    }
    let items: Vec<ListItem> = candidates.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(resolve(Palette::Accent).add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(search.cursor));
    f.render_stateful_widget(list, popup, &mut state);
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT).style(resolve(Palette::Text)), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray))
        .output_separator(' ')
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(3), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use aotui_core::{Dataset, Gender, MatchRecord, Round, StatKey};
    use std::collections::BTreeMap;
    use tui::backend::TestBackend;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(matches: Vec<MatchRecord>) -> App {
        let mut app = App::new(AppSettings::default());
        app.on_dataset_loaded(Dataset { matches, world: Default::default() });
        app
    }

    fn final_2020() -> MatchRecord {
        let mut stats = BTreeMap::new();
        stats.insert(StatKey::Aces, ["10".to_string(), "4".to_string()]);
        stats.insert(StatKey::FirstServe, ["65%".to_string(), "58%".to_string()]);
        MatchRecord {
            year: 2020,
            gender: Gender::Men,
            round: Round::Final,
            player1: "Djokovic".into(),
            player2: "Thiem".into(),
            winner: "Djokovic".into(),
            country1: "SRB".into(),
            country2: "AUT".into(),
            stats,
            results: "6-4 4-6 2-6 6-3 6-4".into(),
        }
    }

    #[test]
    fn year_slider_marks_active_year() {
        let line = year_slider(&[2019, 2020, 2021], 2020);
        assert_eq!(line_text(&line), "◀  2019 [2020] 2021  ▶");
    }

    #[test]
    fn value_lines_format_percentages_and_counts() {
        let series = RadarSeries {
            player: Some("A".into()),
            values: [(StatKey::FirstServe, 0.625), (StatKey::Aces, 7.25)].into_iter().collect(),
        };
        let lines = value_lines(&series);
        assert_eq!(lines.len(), RADAR_AXES.len());
        assert!(lines[0].starts_with("1st Srv %"));
        assert!(lines[0].ends_with("62%") || lines[0].ends_with("63%"));
        assert!(lines[1].ends_with("7.2") || lines[1].ends_with("7.3"));
        assert!(lines[2].ends_with("0.0"));
    }

    #[test]
    fn title_emphasis_needs_an_opponent_with_stats() {
        let strong = RadarSeries {
            player: Some("A".into()),
            values: [(StatKey::Aces, 9.0)].into_iter().collect(),
        };
        let blank = RadarSeries { player: Some("B".into()), values: BTreeMap::new() };
        let weak = RadarSeries {
            player: Some("B".into()),
            values: [(StatKey::Aces, 3.0)].into_iter().collect(),
        };
        assert!(!emphasise_title(&strong, &blank, true));
        assert!(emphasise_title(&strong, &weak, true));
        assert!(!emphasise_title(&strong, &weak, false));
    }

    #[test]
    fn failed_load_replaces_whole_ui() {
        let mut app = App::new(AppSettings::default());
        app.on_load_failed("Could not read matches.csv".into());
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen(&terminal);
        assert!(text.contains("Load failed"));
        assert!(text.contains("Could not read matches.csv"));
        assert!(!text.contains("Bracket"));
    }

    #[test]
    fn empty_bracket_shows_placeholder() {
        let mut app = app_with(vec![final_2020()]);
        app.update_tab(MenuItem::Bracket);
        app.bracket_toggle_gender();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen(&terminal);
        assert!(text.contains("2020 Women's Singles"));
        assert!(text.contains(EMPTY_SELECTION));
    }

    #[test]
    fn bracket_tooltip_follows_cursor() {
        let mut app = app_with(vec![final_2020()]);
        app.update_tab(MenuItem::Bracket);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen(&terminal);
        assert!(text.contains("Djokovic vs Thiem"));
        assert!(text.contains("Winner: Djokovic"));
        assert!(text.contains("Score: 6-4 4-6 2-6 6-3 6-4"));
        assert!(text.contains("65%"));
    }

    #[test]
    fn duel_slots_start_empty() {
        let mut app = app_with(vec![final_2020()]);
        app.update_tab(MenuItem::Duel);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen(&terminal);
        assert_eq!(text.matches(SELECT_PLAYER).count(), 2);
    }

    #[test]
    fn head_to_head_status_is_shown() {
        let mut app = app_with(vec![final_2020()]);
        app.update_tab(MenuItem::Duel);
        app.duel_cycle_player(true);
        app.duel_switch_focus();
        app.duel_cycle_player(true);
        app.duel_toggle_head_to_head();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen(&terminal);
        assert!(text.contains(duel::H2H_WITH_SELF));
    }

    #[test]
    fn map_tooltip_names_selected_country() {
        let mut app = app_with(vec![final_2020()]);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen(&terminal);
        assert!(text.contains("SRB"));
        assert!(text.contains("Cumulative Wins (2020): 1"));
    }
}
