//! Rendering tests: draw the bound widgets into an off-screen buffer and
//! check what ended up on it.

use multiview::{
    CardRole, ColumnDef, DataView, DataViewOptions, GalleryRole, JsonRecord, KanbanRole,
    ViewComponent, ViewComponents, ViewMode, ViewProps,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use serde_json::json;

fn records(value: serde_json::Value) -> Vec<JsonRecord> {
    serde_json::from_value(value).unwrap()
}

fn people() -> Vec<JsonRecord> {
    records(json!([
        { "name": "Ada Lovelace", "email": "ada@example.com", "team": "Core", "photo": "img/ada.png" },
        { "name": "Grace Hopper", "email": "grace@example.com", "team": "Tools", "photo": "" },
        { "name": "Alan Turing", "email": "alan@example.com", "team": "Core" },
    ]))
}

fn untagged() -> Vec<ColumnDef<JsonRecord>> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("team", "Team"),
    ]
}

fn all_views(data: Vec<JsonRecord>, columns: Vec<ColumnDef<JsonRecord>>) -> DataViewOptions<JsonRecord> {
    DataViewOptions::new(data, columns).views(ViewMode::ALL.iter().copied())
}

fn render(view: &DataView<JsonRecord>, width: u16, height: u16) -> Vec<String> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    view.view_renderer().render(area, &mut buf);
    lines(&buf)
}

fn lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|l| l.contains(needle))
}

#[test]
fn every_view_shows_the_empty_state_when_nothing_matches() {
    let mut view = DataView::new(all_views(people(), untagged()).enable_global_filter(true)).unwrap();
    view.set_global_filter("zzz-no-such-person");

    for &mode in ViewMode::ALL {
        view.set_view_mode(mode);
        let screen = render(&view, 80, 20);
        assert!(
            screen_contains(&screen, "No data to display."),
            "{mode} did not render the empty state"
        );
    }
}

#[test]
fn untagged_columns_fill_card_slots_by_position() {
    let mut view = DataView::new(all_views(people(), untagged())).unwrap();
    view.set_view_mode(ViewMode::Card);
    let screen = render(&view, 100, 30);
    assert!(screen_contains(&screen, "Ada Lovelace"));
    assert!(screen_contains(&screen, "ada@example.com"));
    // The third column is left over for the footer.
    assert!(screen_contains(&screen, "Team"));
}

#[test]
fn kanban_groups_in_first_seen_order_with_counts() {
    let data = records(json!([
        { "title": "Write docs", "status": "Todo" },
        { "title": "Ship it", "status": "Done" },
        { "title": "Fix bug", "status": "Todo" },
        { "title": "Mystery", "status": "" },
    ]));
    let columns = vec![
        ColumnDef::new("title", "Title").kanban(KanbanRole::Title),
        ColumnDef::new("status", "Status").kanban(KanbanRole::GroupBy),
    ];
    let view = DataView::new(
        DataViewOptions::new(data, columns)
            .views([ViewMode::Kanban])
            .default_view(ViewMode::Kanban),
    )
    .unwrap();

    let screen = render(&view, 100, 20);
    let header = &screen[0];
    let todo = header.find("Todo (2)").expect("todo column");
    let done = header.find("Done (1)").expect("done column");
    let other = header.find("Uncategorized (1)").expect("uncategorized column");
    assert!(todo < done && done < other);
    assert!(screen_contains(&screen, "Fix bug"));
}

#[test]
fn table_header_shows_sort_direction() {
    let mut view = DataView::new(DataViewOptions::new(people(), untagged())).unwrap();
    view.toggle_sorting("name");
    let screen = render(&view, 90, 10);
    assert!(screen[0].contains("NAME ↑"), "{}", screen[0]);
    assert!(screen[0].contains("EMAIL ↕"));
    // Ascending by name: Ada, Alan, Grace.
    assert!(screen[2].contains("Ada Lovelace"));
    assert!(screen[3].contains("Alan Turing"));
}

#[test]
fn gallery_uses_placeholder_for_missing_images() {
    let columns = vec![
        ColumnDef::new("name", "Name").gallery(GalleryRole::Title),
        ColumnDef::new("photo", "Photo")
            .gallery(GalleryRole::Image)
            .card(CardRole::Image),
    ];
    let view = DataView::new(
        DataViewOptions::new(people(), columns)
            .views([ViewMode::Gallery])
            .default_view(ViewMode::Gallery),
    )
    .unwrap();
    let screen = render(&view, 80, 12);
    assert!(screen_contains(&screen, "▣ ada.png"));
    assert!(screen_contains(&screen, "▢"));
    assert!(screen_contains(&screen, "Grace Hopper"));
}

#[test]
fn list_hit_testing_matches_what_is_drawn() {
    let mut view = DataView::new(DataViewOptions::new(people(), untagged())).unwrap();
    view.set_view_mode(ViewMode::List);
    let area = Rect::new(0, 0, 60, 12);
    let screen = render(&view, 60, 12);

    let y = screen
        .iter()
        .position(|l| l.contains("Alan Turing"))
        .expect("alan is drawn") as u16;
    let renderer = view.view_renderer();
    let hit = renderer.row_at(area, 2, y).expect("a row under the point");
    assert_eq!(renderer.rows()[hit].text("name"), "Alan Turing");
}

#[test]
fn switcher_highlights_and_hit_tests_tabs() {
    let mut view = DataView::new(DataViewOptions::new(people(), untagged())).unwrap();
    let area = Rect::new(0, 0, 60, 1);
    let mut buf = Buffer::empty(area);
    view.view_switcher().render(area, &mut buf);
    let line = &lines(&buf)[0];
    assert!(line.contains("▦ Table"));
    assert!(line.contains("☰ List"));

    let x = line.chars().position(|c| c == '☰').unwrap() as u16;
    let mode = view.view_switcher().hit_test(area, x, 0);
    assert_eq!(mode, Some(ViewMode::List));
    assert!(view.set_view_mode(ViewMode::List));

    // Icons only.
    let mut buf = Buffer::empty(area);
    view.view_switcher().show_labels(false).render(area, &mut buf);
    assert!(!lines(&buf)[0].contains("Table"));
}

struct RowCount;

impl ViewComponent<JsonRecord> for RowCount {
    fn render(&self, props: &ViewProps<'_, JsonRecord>, area: Rect, buf: &mut Buffer) {
        buf.set_string(area.x, area.y, format!("custom: {} rows", props.rows.len()), Style::default());
    }
}

#[test]
fn custom_components_replace_only_their_view() {
    let components = ViewComponents::default().with_view(ViewMode::Card, RowCount);
    let mut view = DataView::new(DataViewOptions::new(people(), untagged()).components(components)).unwrap();

    view.set_view_mode(ViewMode::Card);
    assert!(screen_contains(&render(&view, 60, 10), "custom: 3 rows"));

    view.set_view_mode(ViewMode::Table);
    let screen = render(&view, 60, 10);
    assert!(!screen_contains(&screen, "custom:"));
    assert!(screen_contains(&screen, "NAME"));
}

#[test]
fn kanban_column_scrolls_to_the_selected_card() {
    let data: Vec<JsonRecord> = (1..=10)
        .map(|i| records(json!([{ "title": format!("Task{i:02}"), "status": "Todo" }])).remove(0))
        .collect();
    let columns = vec![
        ColumnDef::new("title", "Title").kanban(KanbanRole::Title),
        ColumnDef::new("status", "Status").kanban(KanbanRole::GroupBy),
    ];
    let view = DataView::new(
        DataViewOptions::new(data, columns)
            .views([ViewMode::Kanban])
            .default_view(ViewMode::Kanban),
    )
    .unwrap();

    let area = Rect::new(0, 0, 60, 20);
    let renderer = view.view_renderer().selected(Some(9));
    let mut buf = Buffer::empty(area);
    view.view_renderer().selected(Some(9)).render(area, &mut buf);
    let screen = lines(&buf);

    assert!(screen_contains(&screen, "Task10"), "selected card not drawn");
    assert!(!screen_contains(&screen, "Task01"));
    let y = screen
        .iter()
        .position(|l| l.contains("Task10"))
        .expect("task 10 is drawn") as u16;
    assert_eq!(renderer.row_at(area, 3, y), Some(9));
    // Cards scrolled off the top cannot be hit.
    let hits: Vec<usize> = (0..area.height)
        .filter_map(|y| renderer.row_at(area, 3, y))
        .collect();
    assert!(!hits.contains(&0));
}

#[test]
fn cell_renderers_apply_to_the_table_only() {
    let columns = vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("team", "Team").cell(|value, _| format!("team:{value}")),
    ];
    let mut view = DataView::new(DataViewOptions::new(people(), columns)).unwrap();
    assert!(screen_contains(&render(&view, 80, 10), "team:Core"));

    view.set_view_mode(ViewMode::Card);
    let screen = render(&view, 80, 20);
    assert!(screen_contains(&screen, "Core"));
    assert!(!screen_contains(&screen, "team:"));
}
