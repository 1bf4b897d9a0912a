use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        BarChart, Block, Borders, Clear, List, ListItem, Paragraph, Row, Sparkline, Table, Wrap,
    },
};

use crate::app::{App, InputMode, ScheduleFocus, Screen};
use crate::assistant::Role;
use crate::questions;
use crate::stats;
use crate::store::{
    Candidate, CandidateStatus, FixtureStore, InterviewRound, JobStatus, Recommendation,
    RoundStatus,
};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Dashboard => render_dashboard(app, frame, body_area),
        Screen::Candidates => render_candidates(app, frame, body_area),
        Screen::Schedule => render_schedule(app, frame, body_area),
        Screen::Interview => render_interview(app, frame, body_area),
        Screen::Reports => render_reports(app, frame, body_area),
        Screen::Analysis => render_analysis(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.show_assistant {
        render_assistant_popup(app, frame, area);
    }
}

fn status_color(status: CandidateStatus) -> Color {
    match status {
        CandidateStatus::Pending => Color::DarkGray,
        CandidateStatus::Screening => Color::Yellow,
        CandidateStatus::Interviewing => Color::Cyan,
        CandidateStatus::Offer => Color::Magenta,
        CandidateStatus::Hired => Color::Green,
        CandidateStatus::Rejected => Color::Red,
    }
}

fn recommendation_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::Advance => Color::Green,
        Recommendation::Hold => Color::Yellow,
        Recommendation::Reject => Color::Red,
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let open_roles = app
        .store
        .jobs()
        .iter()
        .filter(|j| j.status == JobStatus::Open)
        .count();
    let counts = format!(
        " {} candidates · {} open roles ",
        app.store.candidates().len(),
        open_roles
    );

    let title = Line::from(vec![
        Span::styled(" Hireboard ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(counts, Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = if app.show_assistant {
        " ASSISTANT "
    } else {
        match app.screen {
            Screen::Dashboard => " DASHBOARD ",
            Screen::Candidates => " CANDIDATES ",
            Screen::Schedule => " SCHEDULE ",
            Screen::Interview => " INTERVIEW ",
            Screen::Reports => " REPORTS ",
            Screen::Analysis => " ANALYSIS ",
        }
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints: Vec<Span> = Vec::new();

    if app.show_assistant {
        hints.extend(vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Up/Dn ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" close ", label_style),
        ]);
    } else if app.input_mode == InputMode::Editing {
        hints.extend(vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" done ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ]);
    } else {
        match app.screen {
            Screen::Candidates => {
                hints.extend(vec![
                    Span::styled(" j/k ", key_style),
                    Span::styled(" nav ", label_style),
                    Span::styled(" / ", key_style),
                    Span::styled(" filter ", label_style),
                    Span::styled(" f ", key_style),
                    Span::styled(" status ", label_style),
                    Span::styled(" Esc ", key_style),
                    Span::styled(" clear ", label_style),
                ]);
            }
            Screen::Schedule => {
                hints.extend(vec![
                    Span::styled(" j/k ", key_style),
                    Span::styled(" nav ", label_style),
                    Span::styled(" Tab ", key_style),
                    Span::styled(" list ", label_style),
                    Span::styled(" Enter ", key_style),
                    Span::styled(" open ", label_style),
                ]);
            }
            Screen::Interview => {
                hints.extend(vec![
                    Span::styled(" j/k ", key_style),
                    Span::styled(" scroll ", label_style),
                    Span::styled(" Esc ", key_style),
                    Span::styled(" schedule ", label_style),
                ]);
            }
            Screen::Reports => {
                hints.extend(vec![
                    Span::styled(" j/k ", key_style),
                    Span::styled(" nav ", label_style),
                ]);
            }
            Screen::Dashboard | Screen::Analysis => {}
        }
        hints.extend(vec![
            Span::styled(" 1-6 ", key_style),
            Span::styled(" screens ", label_style),
            Span::styled(" a ", key_style),
            Span::styled(" assistant ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]);
    }

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    spans.extend(hints);

    let footer = Paragraph::new(Line::from(spans));
    frame.render_widget(footer, area);
}

fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let [tiles_area, lists_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    render_dashboard_tiles(app, frame, tiles_area);

    let [recent_area, upcoming_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(lists_area);

    render_recent_candidates(app, frame, recent_area);
    render_upcoming_list(app, frame, upcoming_area, " 近期面试 ");
}

fn render_dashboard_tiles(app: &App, frame: &mut Frame, area: Rect) {
    let tile_areas: [Rect; 4] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .areas(area);

    let open_headcount: u32 = app
        .store
        .jobs()
        .iter()
        .filter(|j| j.status == JobStatus::Open)
        .map(|j| j.headcount as u32)
        .sum();
    let upcoming = app.store.upcoming_rounds().len();
    let pass_rate = stats::overall_pass_rate(&app.store)
        .map(|rate| format!("{:.0}%", rate * 100.0))
        .unwrap_or_else(|| "—".to_string());
    let avg_rating = format!("{:.1}", stats::average_rating(&app.store));

    let tiles = [
        ("候选人总数", app.store.candidates().len().to_string(), Color::Cyan),
        ("在招名额", open_headcount.to_string(), Color::Magenta),
        ("待进行面试", upcoming.to_string(), Color::Yellow),
        ("通过率", pass_rate, Color::Green),
    ];

    for ((title, value, color), tile_area) in tiles.into_iter().zip(tile_areas) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", title));

        let sub = if title == "通过率" {
            format!("平均评分 {}", avg_rating)
        } else {
            String::new()
        };

        let text = Text::from(vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(sub, Style::default().fg(Color::DarkGray))),
        ]);

        frame.render_widget(Paragraph::new(text).block(block), tile_area);
    }
}

fn candidate_line(candidate: &Candidate) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            format!(" {:<4}", candidate.name),
            Style::default().fg(Color::White).bold(),
        ),
        Span::raw(format!(" {} ", candidate.position)),
        Span::styled(
            format!("[{}]", candidate.status.label()),
            Style::default().fg(status_color(candidate.status)),
        ),
    ])
}

fn render_recent_candidates(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" 最新候选人 ");

    let mut recent: Vec<&Candidate> = app.store.candidates().iter().collect();
    recent.sort_by_key(|c| std::cmp::Reverse(c.applied_at));

    let items: Vec<ListItem> = recent
        .iter()
        .take(8)
        .map(|c| ListItem::new(candidate_line(c)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn round_line<'a>(store: &'a FixtureStore, round: &'a InterviewRound) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {} ", round.scheduled_at.format("%m-%d %H:%M")),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            store.candidate_name(&round.candidate_id),
            Style::default().fg(Color::White).bold(),
        ),
        Span::raw(format!(
            " · {} · {} · {}",
            store.job_title(&round.job_id),
            round.round.label(),
            round.interviewer
        )),
    ])
}

fn render_upcoming_list(app: &App, frame: &mut Frame, area: Rect, title: &str) {
    let upcoming = app.store.upcoming_rounds();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!("{}({})", title, upcoming.len()));

    let items: Vec<ListItem> = upcoming
        .iter()
        .take(8)
        .map(|r| ListItem::new(round_line(&app.store, r)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_candidates(app: &mut App, frame: &mut Frame, area: Rect) {
    let [input_area, body_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    // Filter input; the title shows the active status filter
    let status_label = app
        .status_filter
        .map(|s| s.label())
        .unwrap_or("全部状态");
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(
            if app.input_mode == InputMode::Editing {
                Color::Yellow
            } else {
                Color::DarkGray
            },
        ))
        .title(format!(" 搜索 — {} ", status_label));

    let input = Paragraph::new(app.candidate_filter.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, input_area);

    // Show cursor when editing
    if app.input_mode == InputMode::Editing {
        let char_count = app.candidate_filter.chars().count() as u16;
        frame.set_cursor_position((input_area.x + char_count + 1, input_area.y + 1));
    }

    let [table_area, detail_area] = Layout::horizontal([
        Constraint::Percentage(58),
        Constraint::Percentage(42),
    ])
    .areas(body_area);

    let filtered = app
        .store
        .search_candidates(&app.candidate_filter, app.status_filter);

    let table_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 候选人 ({}) ", filtered.len()));

    let header = Row::new(["姓名", "应聘职位", "状态", "评分", "经验"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = filtered
        .iter()
        .map(|c| {
            Row::new(vec![
                Span::raw(c.name.as_str()),
                Span::raw(c.position.as_str()),
                Span::styled(c.status.label(), Style::default().fg(status_color(c.status))),
                Span::raw(format!("{:.1}", c.rating)),
                Span::raw(format!("{}年", c.experience_years)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(table_block)
    .highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, table_area, &mut app.candidate_state);

    render_candidate_detail(app, frame, detail_area);
}

fn render_candidate_detail(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" 详情 ");

    let Some(candidate) = app.selected_candidate() else {
        let placeholder = Paragraph::new("没有匹配的候选人")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            candidate.name.clone(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(format!("应聘职位：{}", candidate.position)),
        Line::from(vec![
            Span::raw("状态："),
            Span::styled(
                candidate.status.label(),
                Style::default().fg(status_color(candidate.status)),
            ),
        ]),
        Line::from(format!(
            "评分：{:.1} / 10    经验：{}年",
            candidate.rating, candidate.experience_years
        )),
        Line::from(format!("学历：{}", candidate.education)),
        Line::from(format!("技能：{}", candidate.skills.join("、"))),
        Line::from(format!("投递日期：{}", candidate.applied_at.format("%Y-%m-%d"))),
        Line::default(),
        Line::from(Span::styled("面试记录", Style::default().fg(Color::DarkGray))),
    ];

    let rounds = app.store.rounds_for_candidate(&candidate.id);
    if rounds.is_empty() {
        lines.push(Line::from(Span::styled(
            "暂无面试安排",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for round in rounds {
            let score = app
                .store
                .evaluation_for(&round.id)
                .map(|e| format!("{:.1}分", e.score))
                .unwrap_or_else(|| "—".to_string());
            lines.push(Line::from(format!(
                "{} {} · {} · {}",
                round.scheduled_at.format("%m-%d"),
                round.round.label(),
                round.status.label(),
                score
            )));
        }
    }

    let detail = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(detail, area);
}

fn render_schedule(app: &mut App, frame: &mut Frame, area: Rect) {
    let [upcoming_area, completed_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(area);

    let upcoming_focused = app.schedule_focus == ScheduleFocus::Upcoming;

    let upcoming = app.store.upcoming_rounds();
    let upcoming_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if upcoming_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(format!(" 待进行 ({}) ", upcoming.len()));

    let upcoming_items: Vec<ListItem> = upcoming
        .iter()
        .map(|r| {
            let mut line = round_line(&app.store, r);
            if r.status == RoundStatus::InProgress {
                line.spans.push(Span::styled(
                    " [进行中]",
                    Style::default().fg(Color::Yellow),
                ));
            }
            ListItem::new(line)
        })
        .collect();

    let upcoming_list = List::new(upcoming_items)
        .block(upcoming_block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(upcoming_list, upcoming_area, &mut app.upcoming_state);

    let completed = app.store.completed_rounds();
    let completed_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if upcoming_focused {
            Color::DarkGray
        } else {
            Color::Cyan
        }))
        .title(format!(" 已完成 ({}) ", completed.len()));

    let completed_items: Vec<ListItem> = completed
        .iter()
        .map(|r| {
            let score = app
                .store
                .evaluation_for(&r.id)
                .map(|e| format!(" {:.1}分", e.score))
                .unwrap_or_else(|| " —".to_string());
            let mut line = round_line(&app.store, r);
            line.spans
                .push(Span::styled(score, Style::default().fg(Color::Green)));
            ListItem::new(line)
        })
        .collect();

    let completed_list = List::new(completed_items)
        .block(completed_block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(completed_list, completed_area, &mut app.completed_state);
}

fn render_interview(app: &App, frame: &mut Frame, area: Rect) {
    let Some(round) = app.active_round() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" 面试 ");
        let placeholder = Paragraph::new("请先在日程中选择一场面试（按 3 打开日程，Enter 进入）")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let [info_area, body_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(0),
    ])
    .areas(area);

    // Round header
    let candidate_name = app.store.candidate_name(&round.candidate_id);
    let job_title = app.store.job_title(&round.job_id);

    let info_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} — {} ", round.round.label(), round.status.label()));

    let rating = app
        .store
        .candidate(&round.candidate_id)
        .map(|c| format!("{:.1}", c.rating))
        .unwrap_or_else(|| "—".to_string());

    let info = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(candidate_name, Style::default().fg(Color::White).bold()),
            Span::raw(format!("  应聘：{}", job_title)),
        ]),
        Line::from(format!("初筛评分：{} / 10", rating)),
        Line::from(format!(
            "时间：{}    面试官：{}",
            round.scheduled_at.format("%Y-%m-%d %H:%M"),
            round.interviewer
        )),
    ])
    .block(info_block);
    frame.render_widget(info, info_area);

    let [questions_area, evaluation_area] = Layout::horizontal([
        Constraint::Percentage(60),
        Constraint::Percentage(40),
    ])
    .areas(body_area);

    render_question_list(app, frame, questions_area, &round.job_id);
    render_evaluation(app, frame, evaluation_area, &round.id);
}

fn render_question_list(app: &App, frame: &mut Frame, area: Rect, job_id: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" 面试问题（AI 生成） ");

    let Some(job) = app.store.job(job_id) else {
        let placeholder = Paragraph::new("未知职位，无法生成面试问题")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let generated = questions::questions_for_job(job);

    let mut lines: Vec<Line> = Vec::new();
    for (i, question) in generated.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>2}. ", i + 1),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::styled(
                format!("[{}] ", question.category.label()),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(question.text.clone()),
        ]));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.question_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_evaluation(app: &App, frame: &mut Frame, area: Rect, round_id: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" 面试评价 ");

    let Some(eval) = app.store.evaluation_for(round_id) else {
        let placeholder = Paragraph::new("暂无评价记录")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let concerns = if eval.concerns.is_empty() {
        "—"
    } else {
        eval.concerns.as_str()
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("评分："),
            Span::styled(
                format!("{:.1} / 10", eval.score),
                Style::default().fg(Color::Cyan).bold(),
            ),
        ]),
        Line::from(vec![
            Span::raw("结论："),
            Span::styled(
                eval.recommendation.label(),
                Style::default().fg(recommendation_color(eval.recommendation)),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled("亮点", Style::default().fg(Color::DarkGray))),
        Line::from(eval.strengths.as_str()),
        Line::default(),
        Line::from(Span::styled("顾虑", Style::default().fg(Color::DarkGray))),
        Line::from(concerns),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_reports(app: &mut App, frame: &mut Frame, area: Rect) {
    let completed = app.store.completed_rounds();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 面试报告 ({}) ", completed.len()));

    let header = Row::new(["候选人", "职位", "轮次", "面试官", "评分", "结论", "备注"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = completed
        .iter()
        .map(|round| {
            let (score, recommendation, concerns) = match app.store.evaluation_for(&round.id) {
                Some(eval) => (
                    format!("{:.1}", eval.score),
                    Span::styled(
                        eval.recommendation.label(),
                        Style::default().fg(recommendation_color(eval.recommendation)),
                    ),
                    if eval.concerns.is_empty() {
                        "—".to_string()
                    } else {
                        eval.concerns.clone()
                    },
                ),
                None => (
                    "—".to_string(),
                    Span::styled("未评价", Style::default().fg(Color::DarkGray)),
                    "—".to_string(),
                ),
            };

            Row::new(vec![
                Span::raw(app.store.candidate_name(&round.candidate_id).to_string()),
                Span::raw(app.store.job_title(&round.job_id).to_string()),
                Span::raw(round.round.label()),
                Span::raw(round.interviewer.clone()),
                Span::raw(score),
                recommendation,
                Span::raw(concerns),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.report_state);
}

fn render_analysis(app: &App, frame: &mut Frame, area: Rect) {
    let [top_area, bottom_area] = Layout::vertical([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(area);

    let [funnel_area, pass_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(top_area);

    let [monthly_area, score_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(bottom_area);

    // Pipeline funnel
    let funnel: Vec<(&str, u64)> = stats::status_funnel(&app.store)
        .into_iter()
        .map(|(status, count)| (status.label(), count))
        .collect();

    let funnel_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" 候选人漏斗 "),
        )
        .data(&funnel)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(funnel_chart, funnel_area);

    // Pass rate per round kind, as percentages
    let pass_rates: Vec<(&str, u64)> = stats::pass_rate_by_round(&app.store)
        .into_iter()
        .map(|(kind, rate)| (kind.label(), (rate * 100.0).round() as u64))
        .collect();

    let pass_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" 各轮通过率 (%) "),
        )
        .data(&pass_rates)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));
    frame.render_widget(pass_chart, pass_area);

    // Monthly application counts
    let monthly = stats::monthly_applications(&app.store);
    let monthly_counts: Vec<u64> = monthly.iter().map(|(_, n)| *n).collect();
    let monthly_title = match (monthly.first(), monthly.last()) {
        (Some((first, _)), Some((last, _))) => format!(" 月度新增候选人 {} — {} ", first, last),
        _ => " 月度新增候选人 ".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(monthly_title),
        )
        .data(&monthly_counts)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(sparkline, monthly_area);

    // Evaluation score distribution
    let scores = stats::score_distribution(&app.store);

    let score_chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" 评价分数分布 "),
        )
        .data(&scores)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Magenta))
        .value_style(Style::default().fg(Color::Black).bg(Color::Magenta));
    frame.render_widget(score_chart, score_area);
}

fn render_assistant_popup(app: &mut App, frame: &mut Frame, area: Rect) {
    // Centered popup over whichever screen is active
    let popup_width = 66.min(area.width.saturating_sub(4));
    let popup_height = 22.min(area.height.saturating_sub(4));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(popup_area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" AI 招聘助手 ");

    let chat_text = if app.messages.is_empty() && !app.composing {
        Text::from(Span::styled(
            "问问候选人质量、面试通过率、招聘趋势，或让我推荐候选人…",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in &app.messages {
            let (label, color) = match msg.role {
                Role::User => ("You:", Color::Cyan),
                Role::Assistant => ("AI:", Color::Yellow),
            };
            lines.push(Line::from(vec![
                Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" {}", msg.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            for line in msg.text.lines() {
                lines.push(Line::from(line.to_string()));
            }
            lines.push(Line::default());
        }

        if app.composing {
            lines.push(Line::from(Span::styled(
                "AI:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Thinking{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let chat = Paragraph::new(chat_text)
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, chat_area);

    // Input line; disabled styling while a reply is composing
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.composing {
            Color::DarkGray
        } else {
            Color::Yellow
        }))
        .title(if app.composing {
            " 回复生成中… "
        } else {
            " 提问 (Enter 发送, Esc 关闭) "
        });

    // Horizontal scrolling keeps the cursor visible in a narrow input
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let cursor_pos = app.assistant_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .assistant_input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, input_area);

    if !app.composing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((input_area.x + cursor_x + 1, input_area.y + 1));
    }
}
